use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use crate::config::AppConfig;
use crate::domain::{MatchDraft, MatchRecord};
use crate::report;
use crate::services::migration::{self, MigrationReport};
use crate::session::{LiveStatsSession, SessionHandle, SessionPhase, StatsSnapshot};
use crate::stats::recent_matches;
use crate::store::SqliteMatchStore;

/// One-shot journal operations run from the command line
pub struct JournalService {
    config: AppConfig,
    store: Arc<SqliteMatchStore>,
    session: SessionHandle<SqliteMatchStore>,
}

impl JournalService {
    /// Open the store and wait for the first statistics
    pub async fn open(config: AppConfig) -> Result<Self> {
        let store = Arc::new(SqliteMatchStore::open(&config.store)?);
        let session = LiveStatsSession::spawn(Arc::clone(&store), config.session.clone());
        session
            .wait_ready()
            .await
            .context("Failed to load matches")?;

        Ok(Self {
            config,
            store,
            session,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.session.snapshot()
    }

    pub fn recent_matches(&self, limit: Option<usize>) -> Vec<MatchRecord> {
        let snapshot = self.session.snapshot();
        let limit = limit.unwrap_or(self.config.session.recent_limit);
        recent_matches(&snapshot.matches, limit).to_vec()
    }

    pub async fn log_match(&self, draft: MatchDraft) -> Result<MatchRecord> {
        let new_match = draft.validate(&self.config.validation)?;
        let record = self.session.record_match(new_match).await?;
        info!("Logged match {} on {}", record.id, record.date.format("%Y-%m-%d"));
        Ok(record)
    }

    pub async fn delete_match(&self, id: &str) -> Result<MatchRecord> {
        let record = self.session.delete_match(id).await?;
        Ok(record)
    }

    pub async fn import(&self, path: &Path) -> Result<MigrationReport> {
        let legacy = migration::read_legacy_file(path)?;
        Ok(migration::migrate(self.store.as_ref(), legacy).await)
    }

    /// Print the dashboard after every refresh until Ctrl-C
    pub async fn watch(&self) -> Result<()> {
        let interval = Duration::from_millis(self.config.store.poll_interval_ms);
        let _poller = self.store.spawn_change_poller(interval)?;
        let recent_limit = self.config.session.recent_limit;

        let mut snapshots = self.session.subscribe();
        let mut last_printed = 0;
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            {
                let snapshot = snapshots.borrow_and_update();
                if snapshot.phase == SessionPhase::Ready && snapshot.generation > last_printed {
                    last_printed = snapshot.generation;
                    println!("{}", report::render_snapshot(&snapshot, recent_limit));
                }
            }

            tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                signal = &mut shutdown => {
                    signal.context("Failed to listen for Ctrl-C")?;
                    info!("Stopping watch");
                    break;
                }
            }
        }

        Ok(())
    }

    pub async fn close(self) {
        self.session.shutdown().await;
    }
}
