//! Pagerun CLI - headless browser test-page launcher
//!
//! Usage:
//!   pagerun                     Open resources/public/index.html
//!   pagerun server              Open http://localhost:3450/
//!   pagerun <url-or-path>       Open an explicit URL or local file
//!
//! The process exits with the code the page reports through its exit
//! signal, `1` when the page fails to load, `124` when the watchdog
//! expires, or `2` on usage and launch errors.

use anyhow::{Context, Result};
use clap::Parser;
use pagerun_browser::PageRunner;
use pagerun_core::{RunnerConfig, RunnerError};
use std::path::{Path, PathBuf};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;
use url::Url;

/// Fixed address the `server` keyword maps to
const SERVER_URL: &str = "http://localhost:3450/";

/// Default target when no argument is given
const DEFAULT_TARGET: &str = "resources/public/index.html";

/// Exit code when the watchdog expires before the page signals
const WATCHDOG_EXIT_CODE: i32 = 124;

/// Exit code for usage and launch errors
const USAGE_EXIT_CODE: i32 = 2;

#[derive(Parser)]
#[command(name = "pagerun")]
#[command(author, version, about = "Headless browser test-page launcher")]
struct Cli {
    /// Test target: a URL, a local file path, or the `server` keyword
    target: Option<String>,

    /// Pause before issuing the page load, in milliseconds
    #[arg(long, default_value = "0", value_name = "MS")]
    delay_ms: u64,

    /// Maximum seconds to wait for the page's exit signal
    #[arg(long, default_value = "300", value_name = "SECS")]
    timeout: u64,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Disable the Chromium sandbox (for container environments)
    #[arg(long)]
    no_sandbox: bool,

    /// Path to the Chrome/Chromium binary
    #[arg(long, value_name = "PATH")]
    chrome: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to install logging subscriber");
    }

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            USAGE_EXIT_CODE
        }
    };

    std::process::exit(code);
}

/// Run one page load and map its outcome to a process exit code
async fn run(cli: Cli) -> Result<i32> {
    let target = display_target(cli.target.as_deref());
    let url = resolve_target(cli.target.as_deref())?;

    let config = RunnerConfig {
        headless: !cli.headed,
        sandbox: !cli.no_sandbox,
        browser_path: cli.chrome,
        watchdog_secs: cli.timeout,
        delay_ms: cli.delay_ms,
        ..RunnerConfig::default()
    };

    let runner = PageRunner::launch(config)
        .await
        .context("Failed to launch browser")?;

    match runner.run(target, url.as_str()).await {
        Ok(outcome) => Ok(outcome.exit_code()),
        Err(RunnerError::Watchdog(secs)) => {
            error!("No exit signal within {} seconds", secs);
            Ok(WATCHDOG_EXIT_CODE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Target string echoed in the startup line
///
/// The keyword mapping is applied, but a file path stays as the user wrote
/// it rather than its resolved `file://` form.
fn display_target(arg: Option<&str>) -> &str {
    match arg {
        Some("server") => SERVER_URL,
        Some(other) => other,
        None => DEFAULT_TARGET,
    }
}

/// Map the positional argument onto a loadable URL
///
/// `server` selects the fixed local server address; no argument selects the
/// default relative file path; anything else is taken as a URL if it parses
/// as one, otherwise as a local file path.
fn resolve_target(arg: Option<&str>) -> pagerun_core::Result<Url> {
    let raw = match arg {
        Some("server") => return parse_url(SERVER_URL),
        Some(other) => other,
        None => DEFAULT_TARGET,
    };

    if let Ok(url) = Url::parse(raw) {
        if !url.cannot_be_a_base() {
            return Ok(url);
        }
    }

    file_url(raw)
}

fn parse_url(raw: &str) -> pagerun_core::Result<Url> {
    Url::parse(raw).map_err(|e| RunnerError::Target(format!("{}: {}", raw, e)))
}

/// Resolve a local file path against the current directory
fn file_url(raw: &str) -> pagerun_core::Result<Url> {
    let path = Path::new(raw);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    Url::from_file_path(&absolute)
        .map_err(|_| RunnerError::Target(format!("not a loadable path: {}", raw)))
}
