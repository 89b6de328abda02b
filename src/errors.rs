use thirtyfour::error::WebDriverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("No active browser session")]
    SessionUnavailable,

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timed out waiting for element: {0}")]
    Timeout(String),

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] WebDriverError),
}

pub type Result<T> = std::result::Result<T, DriverError>;

impl DriverError {
    /// Failures surfaced by the backend may be transient; everything the
    /// facade synthesizes itself is deterministic and fails fast.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DriverError::WebDriver(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_errors_are_retryable() {
        let err = DriverError::WebDriver(WebDriverError::RequestFailed("boom".into()));
        assert!(err.is_retryable());
    }

    #[test]
    fn facade_errors_are_not_retryable() {
        assert!(!DriverError::InvalidConfiguration("safari".into()).is_retryable());
        assert!(!DriverError::SessionUnavailable.is_retryable());
        assert!(!DriverError::ElementNotFound("button".into()).is_retryable());
        assert!(!DriverError::Timeout("#result".into()).is_retryable());
    }
}
