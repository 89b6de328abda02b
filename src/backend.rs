use std::time::Duration;

use async_trait::async_trait;

use crate::errors::Result;
use crate::types::{BrowserKind, Locator, SessionConfig};

/// The browser-control capability behind the facade.
///
/// Production code talks to a WebDriver server through
/// [`WebDriverBackend`](crate::WebDriverBackend); tests substitute the mock
/// from [`testing`](crate::testing). Session and element handles are opaque to
/// the facade.
#[async_trait]
pub trait DriverBackend: Send + Sync {
    type Session: Send + Sync;
    type Element: Send + Sync;

    /// Start a browser session of the given kind.
    async fn start(&self, kind: BrowserKind, config: &SessionConfig) -> Result<Self::Session>;

    /// Terminate a session.
    async fn quit(&self, session: &Self::Session) -> Result<()>;

    /// Load a URL in the session.
    async fn goto(&self, session: &Self::Session, url: &str) -> Result<()>;

    /// Locate the first element matching the locator.
    async fn find(&self, session: &Self::Session, locator: &Locator) -> Result<Self::Element>;

    /// Poll until a matching element is visible or the timeout elapses.
    async fn wait_visible(
        &self,
        session: &Self::Session,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Self::Element>;

    /// Click an element.
    async fn click(&self, element: &Self::Element) -> Result<()>;

    /// Type text into an element.
    async fn send_keys(&self, element: &Self::Element, text: &str) -> Result<()>;
}
