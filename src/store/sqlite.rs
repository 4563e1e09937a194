use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{MatchStore, StoreChange};
use crate::config::StoreSettings;
use crate::database::{self, get_connection, matches, setup, DbConn, DbPool, MatchRow, NewMatchRow};
use crate::errors::StoreError;

/// Match table in a SQLite file, shared through a connection pool
#[derive(Clone)]
pub struct SqliteMatchStore {
    pool: DbPool,
    changes: broadcast::Sender<StoreChange>,
}

impl SqliteMatchStore {
    pub fn open(settings: &StoreSettings) -> Result<Self> {
        let pool = database::create_pool(&settings.database_path)?;
        info!("Opened match store at {}", settings.database_path);
        Self::from_pool(pool, settings.change_buffer)
    }

    pub fn from_pool(pool: DbPool, change_buffer: usize) -> Result<Self> {
        let mut conn = get_connection(&pool)?;
        setup::initialize_database(&mut conn)?;

        let (changes, _) = broadcast::channel(change_buffer.max(1));
        Ok(Self { pool, changes })
    }

    /// Emit `StoreChange::External` whenever another connection commits.
    ///
    /// The poller holds one pooled connection and stops when dropped.
    pub fn spawn_change_poller(&self, interval: Duration) -> Result<ChangePoller> {
        let conn = Arc::new(Mutex::new(get_connection(&self.pool)?));
        let changes = self.changes.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_version: Option<i64> = None;

            loop {
                ticker.tick().await;

                match read_data_version(Arc::clone(&conn)).await {
                    Ok(version) => {
                        if last_version.is_some_and(|last| last != version) {
                            debug!("Database data_version moved to {}", version);
                            notify(&changes, StoreChange::External);
                        }
                        last_version = Some(version);
                    }
                    Err(e) => warn!("Failed to poll for external changes: {:#}", e),
                }
            }
        });

        info!("Polling for external changes every {:?}", interval);
        Ok(ChangePoller { task })
    }
}

impl MatchStore for SqliteMatchStore {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<MatchRow>, StoreError>> + Send {
        let pool = self.pool.clone();

        async move {
            let rows = with_connection(pool, matches::list_all)
                .await?
                .map_err(StoreError::fetch)?;
            debug!("Fetched {} matches", rows.len());
            Ok(rows)
        }
    }

    fn insert(
        &self,
        row: NewMatchRow,
    ) -> impl Future<Output = Result<MatchRow, StoreError>> + Send {
        let pool = self.pool.clone();
        let changes = self.changes.clone();

        async move {
            let created = with_connection(pool, move |conn| matches::insert_match(conn, &row))
                .await?
                .map_err(StoreError::insert)?;

            info!("Inserted match {} at {} ({})", created.id, created.venue, created.date);
            notify(&changes, StoreChange::Inserted { id: created.id.clone() });
            Ok(created)
        }
    }

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send {
        let pool = self.pool.clone();
        let changes = self.changes.clone();
        let id = id.to_string();

        async move {
            let Ok(row_id) = id.parse::<i64>() else {
                return Err(StoreError::NotFound(id));
            };

            let removed = with_connection(pool, move |conn| matches::delete_match(conn, row_id))
                .await?
                .map_err(|e| StoreError::delete(&id, e))?;

            if !removed {
                return Err(StoreError::NotFound(id));
            }

            info!("Deleted match {}", id);
            notify(&changes, StoreChange::Deleted { id });
            Ok(())
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}

/// Background task started by `SqliteMatchStore::spawn_change_poller`
#[derive(Debug)]
pub struct ChangePoller {
    task: JoinHandle<()>,
}

impl Drop for ChangePoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn with_connection<T, F>(pool: DbPool, job: F) -> Result<Result<T>, StoreError>
where
    F: FnOnce(&mut DbConn) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut conn = get_connection(&pool)?;
        job(&mut conn)
    })
    .await
    .map_err(|e| StoreError::Unavailable(e.to_string()))
}

async fn read_data_version(conn: Arc<Mutex<DbConn>>) -> Result<i64> {
    tokio::task::spawn_blocking(move || {
        let mut conn = conn
            .lock()
            .map_err(|_| anyhow!("Change poller connection lock poisoned"))?;
        matches::data_version(&mut conn)
    })
    .await
    .context("Change poller task failed")?
}

fn notify(changes: &broadcast::Sender<StoreChange>, change: StoreChange) {
    if changes.send(change).is_err() {
        debug!("No subscribers for match changes");
    }
}
