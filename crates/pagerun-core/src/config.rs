//! Runner configuration
//!
//! One struct covers both browser launch options and the runner's timing
//! knobs. Populated from CLI flags; `Default` carries production values.

use std::path::PathBuf;

/// Configuration for a page run
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Run the browser in headless mode (default: true)
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Chromium sandbox (disable when running inside containers)
    pub sandbox: bool,
    /// Path to the browser binary (None = auto-detect)
    pub browser_path: Option<PathBuf>,
    /// Navigation timeout in seconds
    pub nav_timeout_secs: u64,
    /// Watchdog: maximum seconds to wait for the page's exit signal
    pub watchdog_secs: u64,
    /// Pause before issuing the page load, in milliseconds
    pub delay_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 800,
            sandbox: true,
            browser_path: None,
            nav_timeout_secs: 30,
            watchdog_secs: 300,
            delay_ms: 0,
        }
    }
}
