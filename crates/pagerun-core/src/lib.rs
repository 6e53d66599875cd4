//! # pagerun-core
//!
//! Core types for the pagerun test-page launcher.
//!
//! Pagerun opens one HTML page in a headless browser, forwards the page's
//! console output to the host process's standard output, and terminates the
//! host process with an exit code the page reports through a host-exposed
//! callback.
//!
//! This crate carries the pieces shared by the browser layer and the CLI:
//!
//! - [`RunnerConfig`]: launch and timing configuration
//! - [`RunnerError`] / [`Result`]: the unified error type
//! - [`ExitSignal`]: the canonical decoded exit signal
//! - [`LoadSession`] / [`RunOutcome`]: the lifecycle of a single run

mod config;
mod error;
mod session;
mod signal;

pub use config::RunnerConfig;
pub use error::{Result, RunnerError};
pub use session::{LoadSession, LoadStatus, RunOutcome};
pub use signal::{ExitSignal, SignalDecodeError};
