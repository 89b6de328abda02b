use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use thirtyfour::{Capabilities, ChromiumLikeCapabilities};
use tracing::debug;

use crate::backend::DriverBackend;
use crate::errors::{DriverError, Result};
use crate::types::{BrowserKind, Locator, SessionConfig, Strategy};

/// Interval between visibility polls.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// [`DriverBackend`] over a WebDriver server (chromedriver, geckodriver,
/// msedgedriver) via `thirtyfour`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebDriverBackend;

impl WebDriverBackend {
    fn capabilities(kind: BrowserKind, config: &SessionConfig) -> Result<Capabilities> {
        let caps = match kind {
            BrowserKind::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if config.headless {
                    caps.add_arg("--headless=new")?;
                }
                caps.add_arg("--no-sandbox")?;
                caps.add_arg("--disable-dev-shm-usage")?;
                caps.into()
            }
            BrowserKind::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if config.headless {
                    caps.add_arg("-headless")?;
                }
                caps.into()
            }
            BrowserKind::Edge => {
                let mut caps = DesiredCapabilities::edge();
                if config.headless {
                    caps.add_arg("--headless")?;
                }
                caps.into()
            }
        };
        Ok(caps)
    }
}

fn to_by(locator: &Locator) -> By {
    let value = locator.value.as_str();
    match locator.strategy {
        Strategy::Id => By::Id(value),
        Strategy::Name => By::Name(value),
        Strategy::Css => By::Css(value),
        Strategy::XPath => By::XPath(value),
        Strategy::ClassName => By::ClassName(value),
        Strategy::Tag => By::Tag(value),
        Strategy::LinkText => By::LinkText(value),
    }
}

#[async_trait]
impl DriverBackend for WebDriverBackend {
    type Session = WebDriver;
    type Element = WebElement;

    async fn start(&self, kind: BrowserKind, config: &SessionConfig) -> Result<WebDriver> {
        let url = config
            .webdriver_url
            .clone()
            .unwrap_or_else(|| kind.default_webdriver_url().to_string());
        let caps = Self::capabilities(kind, config)?;
        debug!("starting {kind} session via {url}");
        let driver = WebDriver::new(&url, caps).await?;
        Ok(driver)
    }

    async fn quit(&self, session: &WebDriver) -> Result<()> {
        // WebDriver is a cheap handle clone; quit() consumes it.
        session.clone().quit().await?;
        Ok(())
    }

    async fn goto(&self, session: &WebDriver, url: &str) -> Result<()> {
        session.goto(url).await?;
        Ok(())
    }

    async fn find(&self, session: &WebDriver, locator: &Locator) -> Result<WebElement> {
        Ok(session.find(to_by(locator)).await?)
    }

    async fn wait_visible(
        &self,
        session: &WebDriver,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<WebElement> {
        session
            .query(to_by(locator))
            .wait(timeout, POLL_INTERVAL)
            .and_displayed()
            .first()
            .await
            .map_err(|err| match err {
                WebDriverError::NoSuchElement(_) | WebDriverError::Timeout(_) => {
                    DriverError::Timeout(format!(
                        "{locator} not visible within {}s",
                        timeout.as_secs()
                    ))
                }
                other => DriverError::WebDriver(other),
            })
    }

    async fn click(&self, element: &WebElement) -> Result<()> {
        element.click().await?;
        Ok(())
    }

    async fn send_keys(&self, element: &WebElement, text: &str) -> Result<()> {
        element.send_keys(text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locators_map_to_native_selectors() {
        // Display output mirrors the By variant, which is enough to pin the
        // mapping without a running browser.
        let by = to_by(&Locator::css("button.submit"));
        assert!(format!("{by:?}").contains("button.submit"));

        let by = to_by(&Locator::id("result"));
        assert!(format!("{by:?}").contains("result"));
    }

    #[test]
    fn capabilities_build_for_every_kind() {
        let config = SessionConfig::default();
        for kind in [BrowserKind::Chrome, BrowserKind::Firefox, BrowserKind::Edge] {
            assert!(WebDriverBackend::capabilities(kind, &config).is_ok());
        }
    }
}
