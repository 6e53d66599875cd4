//! Browser error types - re-exports the unified RunnerError from pagerun-core
//!
//! All browser errors use the unified RunnerError type with the Browser
//! variant for launch, navigation, and CDP failures. Error messages should
//! include context about the operation that failed.

pub use pagerun_core::{Result, RunnerError};

// Convenience alias for call sites that only deal with browser failures
pub type BrowserError = RunnerError;
