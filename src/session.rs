use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::backend::DriverBackend;
use crate::errors::{DriverError, Result};
use crate::types::{BrowserKind, Locator, SessionConfig};
use crate::webdriver::WebDriverBackend;

/// Visibility-wait timeout used by [`BrowserSession::wait_for_visibility`].
pub const DEFAULT_VISIBILITY_TIMEOUT: Duration = Duration::from_secs(10);

/// Facade over a browser-automation backend.
///
/// Holds at most one live session handle. `connect`/`close` run under the
/// configured retry policy; every other operation delegates once and
/// propagates failures unchanged. Single-owner use only: lifecycle methods
/// take `&mut self` and no internal synchronization is provided.
pub struct BrowserSession<B: DriverBackend = WebDriverBackend> {
    backend: B,
    config: SessionConfig,
    session: Option<B::Session>,
}

impl BrowserSession<WebDriverBackend> {
    /// Facade over a real WebDriver server.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_backend(WebDriverBackend, config)
    }
}

impl<B: DriverBackend> BrowserSession<B> {
    /// Facade over an arbitrary backend. No side effects until `connect`.
    pub fn with_backend(backend: B, config: SessionConfig) -> Self {
        Self {
            backend,
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    fn live_session(&self) -> Result<&B::Session> {
        match self.session.as_ref() {
            Some(session) => Ok(session),
            None => {
                error!("no active browser session");
                Err(DriverError::SessionUnavailable)
            }
        }
    }

    /// Start a browser session of the configured kind.
    ///
    /// Transient backend failures retry per the configured policy; an
    /// unsupported browser kind fails on the first attempt. A session that is
    /// already live is quit first, so at most one handle exists per facade.
    pub async fn connect(&mut self) -> Result<()> {
        info!("connecting to {} browser", self.config.browser);
        if let Some(old) = self.session.take() {
            if let Err(err) = self.backend.quit(&old).await {
                warn!("failed to quit previous session: {err}");
            }
        }

        let backend = &self.backend;
        let config = &self.config;
        let session = config
            .retry
            .run("connect", || async move {
                let kind: BrowserKind = config.browser.parse()?;
                backend.start(kind, config).await
            })
            .await?;

        self.session = Some(session);
        Ok(())
    }

    /// Terminate the active session, if any. A no-op when never connected.
    pub async fn close(&mut self) -> Result<()> {
        info!("closing the browser");
        let Some(session) = self.session.as_ref() else {
            debug!("close called with no active session");
            return Ok(());
        };

        let backend = &self.backend;
        self.config
            .retry
            .run("close", || backend.quit(session))
            .await?;

        self.session = None;
        Ok(())
    }

    /// Load the given address in the active session. The URL is passed
    /// through unvalidated.
    pub async fn navigate_to(&self, url: &str) -> Result<()> {
        info!("navigating to {url}");
        let session = self.live_session()?;
        self.backend.goto(session, url).await.map_err(|err| {
            error!("navigation to {url} failed: {err}");
            err
        })
    }

    /// Locate the first element matching the locator.
    pub async fn find_element(&self, locator: &Locator) -> Result<B::Element> {
        debug!("finding element by {locator}");
        let session = self.live_session()?;
        self.backend.find(session, locator).await.map_err(|err| {
            error!("element lookup by {locator} failed: {err}");
            err
        })
    }

    /// Wait up to [`DEFAULT_VISIBILITY_TIMEOUT`] for a matching element to
    /// become visible.
    pub async fn wait_for_visibility(&self, locator: &Locator) -> Result<B::Element> {
        self.wait_for_visibility_within(locator, DEFAULT_VISIBILITY_TIMEOUT)
            .await
    }

    /// Wait up to `timeout` for a matching element to become visible, failing
    /// with [`DriverError::Timeout`] on expiry.
    pub async fn wait_for_visibility_within(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<B::Element> {
        info!(
            "waiting up to {}s for {locator} to become visible",
            timeout.as_secs()
        );
        let session = self.live_session()?;
        self.backend
            .wait_visible(session, locator, timeout)
            .await
            .map_err(|err| {
                error!("visibility wait for {locator} failed: {err}");
                err
            })
    }

    /// Click a previously located element. `None` fails with
    /// [`DriverError::ElementNotFound`] without touching the backend.
    pub async fn click_element(&self, element: Option<&B::Element>) -> Result<()> {
        info!("clicking on element");
        let Some(element) = element else {
            error!("element not found");
            return Err(DriverError::ElementNotFound(
                "no element supplied for click".to_string(),
            ));
        };
        self.backend.click(element).await.map_err(|err| {
            error!("click failed: {err}");
            err
        })
    }

    /// Type `text` into a previously located element. Empty text is allowed.
    pub async fn send_text(&self, element: &B::Element, text: &str) -> Result<()> {
        info!("sending text to element");
        self.backend.send_keys(element, text).await.map_err(|err| {
            error!("sending text failed: {err}");
            err
        })
    }
}

impl<B: DriverBackend> Drop for BrowserSession<B> {
    fn drop(&mut self) {
        // No async cleanup here; the caller owns the close() contract.
        if self.session.is_some() {
            debug!("facade dropped with a live session; the browser was not quit");
        }
    }
}
