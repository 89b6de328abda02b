pub mod backend;
pub mod errors;
pub mod retry;
pub mod session;
pub mod testing;
pub mod types;
pub mod webdriver;

pub use backend::DriverBackend;
pub use errors::{DriverError, Result};
pub use retry::RetryPolicy;
pub use session::BrowserSession;
pub use types::{BrowserKind, Locator, SessionConfig, Strategy};
pub use webdriver::WebDriverBackend;
