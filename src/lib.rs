pub mod analyzer;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod inspect;
pub mod registry;
pub mod release;
pub mod ui;
pub mod walker;

pub use error::{Result, SemrelError};
pub use inspect::resolve;
pub use release::aggregate;
