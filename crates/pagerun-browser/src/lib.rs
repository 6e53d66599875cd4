//! Browser session and page-runner event loop for pagerun
//!
//! This crate drives one headless Chrome instance over the Chrome DevTools
//! Protocol: it loads a single test page, forwards the page's console output
//! to standard output, and resolves when the page reports completion through
//! a host-exposed callback.
//!
//! # Example
//!
//! ```no_run
//! use pagerun_browser::PageRunner;
//! use pagerun_core::RunnerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = PageRunner::launch(RunnerConfig::default()).await?;
//!     let outcome = runner
//!         .run("http://localhost:3450/", "http://localhost:3450/")
//!         .await?;
//!     std::process::exit(outcome.exit_code());
//! }
//! ```
//!
//! # Requirements
//!
//! - Chrome or Chromium installed (or an explicit path in the config)
//!
//! # Architecture
//!
//! - [`browser`]: browser lifecycle and navigation
//! - [`console`]: rendering of console-call arguments into plain text
//! - [`runner`]: the run loop wiring console and exit-signal events
//! - [`error`]: error types for browser operations

pub mod browser;
pub mod console;
pub mod error;
pub mod runner;

// Re-export commonly used types
pub use browser::BrowserSession;
pub use error::{BrowserError, Result};
pub use runner::PageRunner;
