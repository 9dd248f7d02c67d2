//! Configuration module for wordcrawl
//!
//! The engine takes an explicit [`EngineConfig`] rather than reading
//! process-wide state; the binary fills it in from CLI flags.

mod types;
mod validation;

pub use types::EngineConfig;
pub use validation::validate;
