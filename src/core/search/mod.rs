pub mod fuzzy;
pub mod ranker;

pub use fuzzy::{match_indices, matches};
pub use ranker::{DEFAULT_LIMIT, Suggestion, SuggestionList, rank};
