use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DriverError;
use crate::retry::RetryPolicy;

/// Browser family to automate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowserKind {
    Chrome,
    Firefox,
    Edge,
}

impl BrowserKind {
    /// Conventional local endpoint of the kind's driver binary
    /// (chromedriver/msedgedriver on 9515, geckodriver on 4444).
    pub fn default_webdriver_url(&self) -> &'static str {
        match self {
            BrowserKind::Chrome | BrowserKind::Edge => "http://localhost:9515",
            BrowserKind::Firefox => "http://localhost:4444",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = DriverError;

    /// Parse a browser kind from a string, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chrome" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            "edge" => Ok(BrowserKind::Edge),
            other => Err(DriverError::InvalidConfiguration(format!(
                "unsupported browser: {other}"
            ))),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserKind::Chrome => write!(f, "chrome"),
            BrowserKind::Firefox => write!(f, "firefox"),
            BrowserKind::Edge => write!(f, "edge"),
        }
    }
}

/// How to search the page for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Id,
    Name,
    Css,
    XPath,
    ClassName,
    Tag,
    LinkText,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Id => "id",
            Strategy::Name => "name",
            Strategy::Css => "css",
            Strategy::XPath => "xpath",
            Strategy::ClassName => "class",
            Strategy::Tag => "tag",
            Strategy::LinkText => "link-text",
        };
        write!(f, "{name}")
    }
}

/// A strategy+value pair identifying an element on the page.
///
/// The value is passed to the backend untouched; no validation happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    pub strategy: Strategy,
    pub value: String,
}

impl Locator {
    pub fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::new(Strategy::Id, value)
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::new(Strategy::Name, value)
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::new(Strategy::Css, value)
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, value)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy, self.value)
    }
}

/// Facade configuration.
///
/// The browser kind is kept as a plain string and parsed during `connect`, so
/// an unsupported kind surfaces there as `InvalidConfiguration` rather than at
/// construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub browser: String,
    /// WebDriver server to connect to; defaults to the kind's conventional
    /// local endpoint when unset.
    pub webdriver_url: Option<String>,
    pub headless: bool,
    /// Retry policy applied to connect/close only.
    pub retry: RetryPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            browser: "chrome".to_string(),
            webdriver_url: None,
            headless: true,
            retry: RetryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_kind_parses_case_insensitively() {
        assert_eq!("CHROME".parse::<BrowserKind>().unwrap(), BrowserKind::Chrome);
        assert_eq!("Firefox".parse::<BrowserKind>().unwrap(), BrowserKind::Firefox);
        assert_eq!("edge".parse::<BrowserKind>().unwrap(), BrowserKind::Edge);
    }

    #[test]
    fn unsupported_kind_is_invalid_configuration() {
        let err = "safari".parse::<BrowserKind>().unwrap_err();
        assert!(matches!(err, DriverError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("safari"));
    }

    #[test]
    fn locator_display_is_strategy_and_value() {
        let locator = Locator::id("submit-button");
        assert_eq!(locator.to_string(), "id=submit-button");
        assert_eq!(Locator::xpath("//a[1]").to_string(), "xpath=//a[1]");
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SessionConfig {
            browser: "firefox".to_string(),
            webdriver_url: Some("http://localhost:4445".to_string()),
            ..Default::default()
        };
        let raw = serde_json::to_string(&config).unwrap();
        let parsed: SessionConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.browser, "firefox");
        assert_eq!(parsed.webdriver_url.as_deref(), Some("http://localhost:4445"));
    }
}
