//! Scriptable in-memory backend for exercising the facade without a browser.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::error::WebDriverError;

use crate::backend::DriverBackend;
use crate::errors::{DriverError, Result};
use crate::session::BrowserSession;
use crate::types::{BrowserKind, Locator, SessionConfig};

/// A transient, retryable failure as the backend would surface it.
pub fn transient_error(message: &str) -> DriverError {
    DriverError::WebDriver(WebDriverError::RequestFailed(message.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSession {
    pub kind: BrowserKind,
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    pub locator: String,
}

/// Backend double that records every call and fails on request.
///
/// `fail_starts`/`fail_quits` hold the number of upcoming calls that will
/// fail with a transient error before one succeeds.
#[derive(Debug, Default)]
pub struct MockBackend {
    next_id: AtomicU32,
    pub fail_starts: AtomicU32,
    pub fail_quits: AtomicU32,
    /// When set, every visibility wait times out.
    pub never_visible: AtomicBool,
    /// Locator values that fail lookup.
    pub missing: Mutex<Vec<String>>,
    pub start_calls: AtomicUsize,
    pub quit_calls: AtomicUsize,
    pub started: Mutex<Vec<BrowserKind>>,
    pub visited: Mutex<Vec<String>>,
    pub clicks: AtomicUsize,
    pub typed: Mutex<Vec<String>>,
}

fn take_failure(remaining: &AtomicU32) -> bool {
    remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

#[async_trait]
impl DriverBackend for MockBackend {
    type Session = MockSession;
    type Element = MockElement;

    async fn start(&self, kind: BrowserKind, _config: &SessionConfig) -> Result<MockSession> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.fail_starts) {
            return Err(transient_error("mock start failure"));
        }
        self.started.lock().unwrap().push(kind);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(MockSession { kind, id })
    }

    async fn quit(&self, _session: &MockSession) -> Result<()> {
        self.quit_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.fail_quits) {
            return Err(transient_error("mock quit failure"));
        }
        Ok(())
    }

    async fn goto(&self, _session: &MockSession, url: &str) -> Result<()> {
        self.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn find(&self, _session: &MockSession, locator: &Locator) -> Result<MockElement> {
        if self.missing.lock().unwrap().contains(&locator.value) {
            return Err(transient_error(&format!("no such element: {locator}")));
        }
        Ok(MockElement {
            locator: locator.to_string(),
        })
    }

    async fn wait_visible(
        &self,
        session: &MockSession,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<MockElement> {
        if self.never_visible.load(Ordering::SeqCst) {
            return Err(DriverError::Timeout(format!(
                "{locator} not visible within {}s",
                timeout.as_secs()
            )));
        }
        self.find(session, locator).await
    }

    async fn click(&self, _element: &MockElement) -> Result<()> {
        self.clicks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn send_keys(&self, _element: &MockElement, text: &str) -> Result<()> {
        self.typed.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Facade wired to a fresh mock backend with default configuration.
pub fn mock_facade(browser: &str) -> BrowserSession<MockBackend> {
    let config = SessionConfig {
        browser: browser.to_string(),
        ..Default::default()
    };
    BrowserSession::with_backend(MockBackend::default(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failure_budget_is_consumed_in_order() {
        let backend = MockBackend::default();
        backend.fail_starts.store(2, Ordering::SeqCst);
        let config = SessionConfig::default();

        assert!(backend.start(BrowserKind::Chrome, &config).await.is_err());
        assert!(backend.start(BrowserKind::Chrome, &config).await.is_err());
        assert!(backend.start(BrowserKind::Chrome, &config).await.is_ok());
        assert_eq!(backend.start_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn sessions_get_distinct_ids() {
        let backend = MockBackend::default();
        let config = SessionConfig::default();
        let a = backend.start(BrowserKind::Firefox, &config).await.unwrap();
        let b = backend.start(BrowserKind::Firefox, &config).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
