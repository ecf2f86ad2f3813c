pub mod candidate;
pub mod controller;
pub mod error;
pub mod pool;
pub mod search;

pub use candidate::{Book, BookKey, Candidate, Field, Username};
pub use controller::{AutocompleteController, AutocompleteOptions, ControllerState, RenderSurface};
pub use error::{PoolLoadError, SelectionError};
pub use pool::CandidatePool;
