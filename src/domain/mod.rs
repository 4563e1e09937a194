pub mod models;
pub mod normalizer;
pub mod validation;

pub use models::{MatchFormat, MatchRecord, MatchResult, MatchType, NewMatch};
pub use normalizer::{normalize, normalize_all, parse_match_date, to_new_row};
pub use validation::MatchDraft;
