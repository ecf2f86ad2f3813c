pub mod config;
pub mod console;
pub mod core;
pub mod share;
pub mod shell;
pub mod source;

pub use crate::core::candidate;
pub use crate::core::controller;
pub use crate::core::pool;
pub use crate::core::search;
