pub mod deletion;
pub mod live;
pub mod state;

pub use deletion::check_deletable;
pub use live::{LiveStatsSession, SessionHandle};
pub use state::{SessionPhase, StatsSnapshot};
