//! The page runner: one browser page instance for one test run
//!
//! The runner installs a host-exposed callback before navigation, opens the
//! target URL, then drives a single event loop that forwards the page's
//! console output and waits for the page to report completion. The wait is
//! bounded by a watchdog; a page that never signals does not hang the
//! process forever.

use std::sync::Arc;
use std::time::Duration;

use headless_chrome::protocol::cdp::types::Event;
use headless_chrome::protocol::cdp::{Page, Runtime};
use pagerun_core::{ExitSignal, LoadSession, Result, RunOutcome, RunnerConfig, RunnerError};
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};

use crate::browser::BrowserSession;
use crate::console;

/// Name of the CDP binding carrying the exit signal
const EXIT_BINDING: &str = "__pagerun_exit";

/// Installed on every new document before the page's own scripts run.
/// `window.callPhantom` is the function existing test pages invoke; the
/// shim serializes its argument and delivers it over the binding.
const CALLBACK_SHIM: &str = r#"
(function () {
    var deliver = window.__pagerun_exit;
    window.callPhantom = function (data) {
        deliver(JSON.stringify(data === undefined ? null : data));
    };
})();
"#;

/// Events delivered from the browser transport to the run loop
#[derive(Debug)]
pub(crate) enum PageEvent {
    /// One console line emitted by the page
    Console(String),
    /// Raw exit-signal payload from the host-exposed callback
    Signal(String),
}

/// Owns one browser page instance for the duration of a single test run
pub struct PageRunner {
    session: BrowserSession,
    config: RunnerConfig,
}

impl PageRunner {
    /// Launch a browser and prepare a runner for a single page run
    pub async fn launch(config: RunnerConfig) -> Result<Self> {
        let session = BrowserSession::launch(&config).await?;
        Ok(Self { session, config })
    }

    /// Load the target page and wait for its exit signal
    ///
    /// Prints the contractual output lines (`Opening <target>`, forwarded
    /// console output, `Page loaded...` / `Unable to access test site`)
    /// and resolves with the run's terminal outcome. A load failure is an
    /// outcome, not an error; errors are browser/CDP failures and watchdog
    /// expiry.
    ///
    /// `target` is echoed in the startup line exactly as supplied on the
    /// command line; `url` is the resolved address actually loaded.
    pub async fn run(&self, target: &str, url: &str) -> Result<RunOutcome> {
        let mut load_session = LoadSession::new(url);

        let (tx, mut rx) = mpsc::unbounded_channel();
        self.subscribe(tx)?;
        self.expose_exit_callback()?;

        if self.config.delay_ms > 0 {
            debug!("Delaying page load by {}ms", self.config.delay_ms);
            sleep(Duration::from_millis(self.config.delay_ms)).await;
        }

        println!("Opening {}", target);

        if let Err(e) = self.session.navigate(url).await {
            debug!("Load failed: {}", e);
            load_session.mark_failed();
            println!("Unable to access test site");
            return Ok(RunOutcome::LoadFailed);
        }

        load_session.mark_loaded();
        println!("Page loaded...");

        let watchdog = Duration::from_secs(self.config.watchdog_secs);
        let signal = drive_events(&mut rx, watchdog, |line| println!("{}", line)).await?;
        load_session.record_signal(signal);

        Ok(RunOutcome::Signaled(signal.code))
    }

    /// Route console and exit-binding events into the run loop's channel
    fn subscribe(&self, tx: mpsc::UnboundedSender<PageEvent>) -> Result<()> {
        self.session
            .tab()
            .add_event_listener(Arc::new(move |event: &Event| route_event(event, &tx)))
            .map_err(|e| {
                RunnerError::Browser(format!("Failed to subscribe to page events: {}", e))
            })?;
        Ok(())
    }

    /// Expose the exit-signal callback to the page before it loads
    fn expose_exit_callback(&self) -> Result<()> {
        let tab = self.session.tab();

        tab.enable_runtime()
            .map_err(|e| RunnerError::Browser(format!("Failed to enable runtime events: {}", e)))?;

        tab.call_method(Runtime::AddBinding {
            name: EXIT_BINDING.to_string(),
            execution_context_id: None,
            execution_context_name: None,
        })
        .map_err(|e| RunnerError::Browser(format!("Failed to add exit binding: {}", e)))?;

        tab.call_method(Page::AddScriptToEvaluateOnNewDocument {
            source: CALLBACK_SHIM.to_string(),
            world_name: None,
            include_command_line_api: None,
            run_immediately: None,
        })
        .map_err(|e| RunnerError::Browser(format!("Failed to install callback shim: {}", e)))?;

        Ok(())
    }
}

/// Translate raw CDP events into the run loop's page events
pub(crate) fn route_event(event: &Event, tx: &mpsc::UnboundedSender<PageEvent>) {
    match event {
        Event::RuntimeConsoleAPICalled(e) => {
            let line = console::format_console_args(&e.params.args);
            let _ = tx.send(PageEvent::Console(line));
        }
        Event::RuntimeBindingCalled(e) if e.params.name == EXIT_BINDING => {
            let _ = tx.send(PageEvent::Signal(e.params.payload.clone()));
        }
        _ => {}
    }
}

/// Forward console lines and wait for a decodable exit signal
///
/// Console lines go to `forward` in the order they arrive. A payload that
/// fails to decode is logged and skipped; the page may signal again, and
/// the watchdog bounds the overall wait.
pub(crate) async fn drive_events(
    rx: &mut mpsc::UnboundedReceiver<PageEvent>,
    watchdog: Duration,
    mut forward: impl FnMut(String),
) -> Result<ExitSignal> {
    let deadline = Instant::now() + watchdog;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match timeout(remaining, rx.recv()).await {
            Err(_) => return Err(RunnerError::Watchdog(watchdog.as_secs())),
            Ok(None) => {
                return Err(RunnerError::Browser(
                    "page event channel closed before exit signal".to_string(),
                ))
            }
            Ok(Some(PageEvent::Console(line))) => forward(line),
            Ok(Some(PageEvent::Signal(payload))) => match ExitSignal::decode(&payload) {
                Ok(signal) => {
                    debug!("Exit signal received: code {}", signal.code);
                    return Ok(signal);
                }
                Err(err) => warn!("Ignoring undecodable exit signal: {}", err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_WATCHDOG: Duration = Duration::from_millis(100);

    fn discard(_line: String) {}

    #[tokio::test]
    async fn test_signal_resolves_with_code() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(PageEvent::Signal(r#"{"exit": 0}"#.to_string())).unwrap();

        let signal = drive_events(&mut rx, TEST_WATCHDOG, discard).await.unwrap();
        assert_eq!(signal.code, 0);
    }

    #[tokio::test]
    async fn test_legacy_exit_code_field_resolves() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(PageEvent::Signal(r#"{"exitCode": 3}"#.to_string())).unwrap();

        let signal = drive_events(&mut rx, TEST_WATCHDOG, discard).await.unwrap();
        assert_eq!(signal.code, 3);
    }

    #[tokio::test]
    async fn test_console_lines_forwarded_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(PageEvent::Console("hello".to_string())).unwrap();
        tx.send(PageEvent::Console("world".to_string())).unwrap();
        tx.send(PageEvent::Signal(r#"{"exit": 97}"#.to_string())).unwrap();

        let mut lines = Vec::new();
        let signal = drive_events(&mut rx, TEST_WATCHDOG, |line| lines.push(line))
            .await
            .unwrap();

        // Console lines reach the sink in emission order and never
        // terminate the wait themselves.
        assert_eq!(lines, vec!["hello", "world"]);
        assert_eq!(signal.code, 97);
    }

    #[tokio::test]
    async fn test_undecodable_signal_keeps_waiting() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(PageEvent::Signal(r#"{"done": true}"#.to_string())).unwrap();
        tx.send(PageEvent::Signal(r#"{"exit": 2}"#.to_string())).unwrap();

        // The malformed payload must not terminate the wait; the next
        // decodable signal wins.
        let signal = drive_events(&mut rx, TEST_WATCHDOG, discard).await.unwrap();
        assert_eq!(signal.code, 2);
    }

    #[tokio::test]
    async fn test_undecodable_signal_alone_hits_watchdog() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(PageEvent::Signal("null".to_string())).unwrap();
        drop(tx);

        let err = drive_events(&mut rx, TEST_WATCHDOG, discard)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RunnerError::Watchdog(_) | RunnerError::Browser(_)
        ));
    }

    #[tokio::test]
    async fn test_silence_hits_watchdog() {
        let (tx, mut rx) = mpsc::unbounded_channel::<PageEvent>();

        let err = drive_events(&mut rx, TEST_WATCHDOG, discard)
            .await
            .unwrap_err();
        assert!(matches!(err, RunnerError::Watchdog(0)));
        drop(tx);
    }

    fn cdp_event(raw: serde_json::Value) -> Event {
        serde_json::from_value(raw).expect("valid CDP event")
    }

    #[test]
    fn test_console_event_routed_to_console_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let event = cdp_event(serde_json::json!({
            "method": "Runtime.consoleAPICalled",
            "params": {
                "type": "log",
                "args": [{"type": "string", "value": "hello"}],
                "executionContextId": 1,
                "timestamp": 0.0
            }
        }));

        route_event(&event, &tx);

        match rx.try_recv().unwrap() {
            PageEvent::Console(line) => assert_eq!(line, "hello"),
            other => panic!("expected console event, got {:?}", other),
        }
    }

    #[test]
    fn test_exit_binding_routed_to_signal_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let event = cdp_event(serde_json::json!({
            "method": "Runtime.bindingCalled",
            "params": {
                "name": EXIT_BINDING,
                "payload": r#"{"exit": 0}"#,
                "executionContextId": 1
            }
        }));

        route_event(&event, &tx);

        match rx.try_recv().unwrap() {
            PageEvent::Signal(payload) => assert_eq!(payload, r#"{"exit": 0}"#),
            other => panic!("expected signal event, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_binding_ignored() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let event = cdp_event(serde_json::json!({
            "method": "Runtime.bindingCalled",
            "params": {
                "name": "someOtherBinding",
                "payload": r#"{"exit": 0}"#,
                "executionContextId": 1
            }
        }));

        route_event(&event, &tx);

        assert!(rx.try_recv().is_err());
    }
}
