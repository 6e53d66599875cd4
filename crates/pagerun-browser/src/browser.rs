//! Browser lifecycle management using Chrome DevTools Protocol

use crate::error::Result;
use headless_chrome::{Browser, LaunchOptions, Tab};
use pagerun_core::{RunnerConfig, RunnerError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Extra headroom on the browser's idle timeout so the CDP connection
/// outlives the watchdog while the runner waits for the exit signal.
const IDLE_TIMEOUT_MARGIN_SECS: u64 = 30;

/// Active browser session with Chrome DevTools Protocol
pub struct BrowserSession {
    /// Underlying browser instance (kept alive for tab lifetime)
    #[allow(dead_code)]
    browser: Browser,
    /// The single tab hosting the test page
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a browser instance configured for a page run
    pub async fn launch(config: &RunnerConfig) -> Result<Self> {
        info!(
            "Launching browser (headless: {}, size: {}x{})",
            config.headless, config.window_width, config.window_height
        );

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(config.sandbox)
            .window_size(Some((config.window_width, config.window_height)))
            .path(config.browser_path.clone())
            .idle_browser_timeout(Duration::from_secs(
                config.watchdog_secs + IDLE_TIMEOUT_MARGIN_SECS,
            ))
            .build()
            .map_err(|e| RunnerError::Browser(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| RunnerError::Browser(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| RunnerError::Browser(format!("Failed to create tab: {}", e)))?;

        tab.set_default_timeout(Duration::from_secs(config.nav_timeout_secs));

        info!("Browser launched successfully");

        Ok(Self { browser, tab })
    }

    /// Navigate to a URL and wait until navigation settles
    ///
    /// An error here means the navigation did not reach a success state;
    /// the caller decides how to surface that.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| RunnerError::Browser(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| RunnerError::Browser(format!("Navigation failed for {}: {}", url, e)))?;

        debug!("Navigation settled for {}", url);
        Ok(())
    }

    /// Get reference to the tab hosting the test page
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        debug!("BrowserSession dropped, browser will be cleaned up");
    }
}
