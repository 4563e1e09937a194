use std::sync::Arc;

use chrono::Utc;
use log::{debug, error, info, warn};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::deletion::check_deletable;
use super::state::{RefreshState, SessionPhase, StatsSnapshot};
use crate::config::SessionSettings;
use crate::database::MatchRow;
use crate::domain::{normalize, normalize_all, to_new_row, MatchRecord, NewMatch};
use crate::errors::{SessionError, StoreError};
use crate::stats::Dashboard;
use crate::store::{MatchStore, StoreChange};

type FetchOutcome = Result<Vec<MatchRow>, StoreError>;
type Reply = oneshot::Sender<Result<(), SessionError>>;

enum SessionCommand {
    Refresh(Reply),
    Shutdown,
}

/// Keeps a `StatsSnapshot` current by refetching on every store change.
///
/// The session runs as its own task; all interaction goes through the
/// `SessionHandle` returned by `spawn`.
pub struct LiveStatsSession<S> {
    store: Arc<S>,
    commands: mpsc::Receiver<SessionCommand>,
    changes: Option<broadcast::Receiver<StoreChange>>,
    snapshot: watch::Sender<StatsSnapshot>,
    refresh: RefreshState,
    in_flight: Option<JoinHandle<FetchOutcome>>,
    // answered by the fetch in flight
    current_waiters: Vec<Reply>,
    // answered by the follow-up fetch
    next_waiters: Vec<Reply>,
}

impl<S: MatchStore> LiveStatsSession<S> {
    /// Subscribe to store changes, issue the first fetch and run in the background
    pub fn spawn(store: Arc<S>, settings: SessionSettings) -> SessionHandle<S> {
        let (command_tx, commands) = mpsc::channel(settings.command_buffer.max(1));
        let (snapshot, snapshot_rx) = watch::channel(StatsSnapshot::default());

        let session = Self {
            changes: Some(store.subscribe()),
            store: Arc::clone(&store),
            commands,
            snapshot,
            refresh: RefreshState::default(),
            in_flight: None,
            current_waiters: Vec::new(),
            next_waiters: Vec::new(),
        };
        let task = tokio::spawn(session.run());

        SessionHandle {
            store,
            settings,
            commands: command_tx,
            snapshot: snapshot_rx,
            task,
        }
    }

    async fn run(mut self) {
        info!("Stats session started");
        self.request_refresh(None);

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(SessionCommand::Refresh(reply)) => self.request_refresh(Some(reply)),
                    Some(SessionCommand::Shutdown) | None => break,
                },
                change = next_change(&mut self.changes) => self.on_change(change),
                outcome = join_fetch(&mut self.in_flight) => self.on_fetch_complete(outcome),
            }
        }

        self.teardown();
    }

    fn request_refresh(&mut self, reply: Option<Reply>) {
        if self.refresh.request() {
            self.current_waiters.extend(reply);
            self.start_fetch();
        } else {
            debug!("Fetch already in flight, scheduling one follow-up refresh");
            self.next_waiters.extend(reply);
        }
    }

    fn start_fetch(&mut self) {
        let store = Arc::clone(&self.store);
        self.in_flight = Some(tokio::spawn(async move { store.fetch_all().await }));
        self.snapshot
            .send_modify(|snapshot| snapshot.phase = SessionPhase::Loading);
    }

    fn on_change(&mut self, change: Result<StoreChange, RecvError>) {
        match change {
            Ok(change) => debug!("Store change received: {:?}", change),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Missed {} store changes, refreshing anyway", skipped)
            }
            Err(RecvError::Closed) => {
                warn!("Store change channel closed, live updates stopped");
                self.changes = None;
                return;
            }
        }

        self.request_refresh(None);
    }

    fn on_fetch_complete(&mut self, outcome: FetchOutcome) {
        self.in_flight = None;

        let result = match outcome {
            Ok(rows) => normalize_all(rows).map_err(SessionError::from),
            Err(err) => Err(err.into()),
        };

        let reply = match result {
            Ok(records) => {
                self.publish(records);
                Ok(())
            }
            Err(err) => {
                error!("Stats refresh failed, keeping last known statistics: {}", err);
                self.snapshot.send_modify(|snapshot| {
                    snapshot.phase = SessionPhase::Ready;
                    snapshot.last_error = Some(err.clone());
                    snapshot.generation += 1;
                });
                Err(err)
            }
        };

        for waiter in self.current_waiters.drain(..) {
            let _ = waiter.send(reply.clone());
        }

        if self.refresh.complete() {
            debug!("Starting coalesced follow-up refresh");
            self.current_waiters = std::mem::take(&mut self.next_waiters);
            self.start_fetch();
        }
    }

    fn publish(&mut self, mut records: Vec<MatchRecord>) {
        let now = Utc::now();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        let dashboard = Dashboard::build(&records, now.date_naive());

        info!(
            "Stats refreshed: {} matches, {} played, {}% win rate",
            dashboard.statistics.total_matches,
            dashboard.formatted_duration,
            dashboard.win_rate_percent
        );

        self.snapshot.send_modify(|snapshot| {
            snapshot.phase = SessionPhase::Ready;
            snapshot.dashboard = Arc::new(dashboard);
            snapshot.matches = Arc::new(records);
            snapshot.last_error = None;
            snapshot.refreshed_at = Some(now);
            snapshot.generation += 1;
        });
    }

    fn teardown(mut self) {
        // dropping the receiver unsubscribes from the store
        self.changes = None;
        if self.in_flight.take().is_some() {
            debug!("Detached in-flight fetch, its result will be ignored");
        }
        info!("Stats session stopped");
    }
}

async fn next_change(
    changes: &mut Option<broadcast::Receiver<StoreChange>>,
) -> Result<StoreChange, RecvError> {
    match changes.as_mut() {
        Some(receiver) => receiver.recv().await,
        None => std::future::pending().await,
    }
}

async fn join_fetch(task: &mut Option<JoinHandle<FetchOutcome>>) -> FetchOutcome {
    match task.as_mut() {
        Some(handle) => handle
            .await
            .unwrap_or_else(|e| Err(StoreError::Unavailable(e.to_string()))),
        None => std::future::pending().await,
    }
}

/// Front end of a running `LiveStatsSession`
pub struct SessionHandle<S> {
    store: Arc<S>,
    settings: SessionSettings,
    commands: mpsc::Sender<SessionCommand>,
    snapshot: watch::Receiver<StatsSnapshot>,
    task: JoinHandle<()>,
}

impl<S: MatchStore> SessionHandle<S> {
    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StatsSnapshot> {
        self.snapshot.clone()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Wait for the first completed refresh; its failure is returned as the error
    pub async fn wait_ready(&self) -> Result<StatsSnapshot, SessionError> {
        let mut receiver = self.snapshot.clone();
        let snapshot = receiver
            .wait_for(StatsSnapshot::is_ready)
            .await
            .map_err(|_| SessionError::Closed)?
            .clone();

        match &snapshot.last_error {
            Some(err) => Err(err.clone()),
            None => Ok(snapshot),
        }
    }

    /// Refetch now; resolves once a fetch started after this call has completed
    pub async fn refresh(&self) -> Result<StatsSnapshot, SessionError> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(SessionCommand::Refresh(reply))
            .await
            .map_err(|_| SessionError::Closed)?;

        outcome.await.map_err(|_| SessionError::Closed)??;
        Ok(self.snapshot())
    }

    /// Store a validated match; the session refreshes through the change event
    pub async fn record_match(&self, new_match: NewMatch) -> Result<MatchRecord, SessionError> {
        let row = self.store.insert(to_new_row(&new_match)).await?;
        Ok(normalize(row)?)
    }

    /// Delete a match if the recency rule allows it
    pub async fn delete_match(&self, id: &str) -> Result<MatchRecord, SessionError> {
        let snapshot = self.snapshot();
        let today = Utc::now().date_naive();

        let target = check_deletable(
            &snapshot.matches,
            id,
            today,
            self.settings.deletion_window_days,
        )?
        .clone();

        self.store.delete(id).await?;
        Ok(target)
    }

    /// Stop the session task and unsubscribe from the store
    pub async fn shutdown(self) {
        let _ = self.commands.send(SessionCommand::Shutdown).await;
        if let Err(e) = self.task.await {
            warn!("Stats session task ended abnormally: {}", e);
        }
    }
}
