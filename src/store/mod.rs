use std::future::Future;

use tokio::sync::broadcast;

use crate::database::{MatchRow, NewMatchRow};
use crate::errors::StoreError;

pub mod sqlite;

pub use sqlite::{ChangePoller, SqliteMatchStore};

/// Something changed in the match table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Inserted { id: String },
    Deleted { id: String },
    /// A commit made outside this store handle, e.g. by another process
    External,
}

/// A table of match rows with change notification.
///
/// Unsubscribing is dropping the receiver returned by `subscribe`.
pub trait MatchStore: Send + Sync + 'static {
    /// Every row, newest `date` first
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<MatchRow>, StoreError>> + Send;

    fn insert(&self, row: NewMatchRow)
    -> impl Future<Output = Result<MatchRow, StoreError>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;
}
