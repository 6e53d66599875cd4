//! Load-session lifecycle
//!
//! One transient entity per run: the [`LoadSession`]. Created when the
//! runner starts, mutated once when navigation settles and at most once
//! more when the page signals completion. Nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::signal::ExitSignal;

/// Outcome of a navigation attempt, reported once per page load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// Navigation has not settled yet
    #[default]
    Pending,
    /// Navigation reached a success state
    Success,
    /// Navigation did not reach a success state
    Fail,
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// State of a single page run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSession {
    /// Target URL being loaded
    pub url: String,
    /// Outcome of the navigation attempt
    pub status: LoadStatus,
    /// Exit code recorded from the page's signal, if any
    pub exit_code: Option<i32>,
}

impl LoadSession {
    /// Create a session for a target URL, navigation not yet attempted
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: LoadStatus::Pending,
            exit_code: None,
        }
    }

    /// Record that navigation settled successfully
    pub fn mark_loaded(&mut self) {
        self.status = LoadStatus::Success;
    }

    /// Record that navigation failed
    pub fn mark_failed(&mut self) {
        self.status = LoadStatus::Fail;
    }

    /// Record the exit signal received from the page
    pub fn record_signal(&mut self, signal: ExitSignal) {
        self.exit_code = Some(signal.code);
    }
}

/// Terminal outcome of a page run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The page reported completion with an exit code
    Signaled(i32),
    /// Navigation never reached a success state
    LoadFailed,
}

impl RunOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Signaled(code) => *code,
            Self::LoadFailed => 1,
        }
    }
}
