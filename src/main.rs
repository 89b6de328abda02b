use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use webpilot::{BrowserSession, Locator, SessionConfig, Strategy};

#[derive(Parser, Debug)]
#[command(
    name = "webpilot",
    about = "Drive a browser through a local WebDriver server"
)]
struct Args {
    /// Browser to automate (chrome, firefox, edge)
    #[arg(long)]
    browser: Option<String>,

    /// URL to open
    #[arg(long, default_value = "https://example.com")]
    url: String,

    /// CSS selector to wait for after navigation
    #[arg(long)]
    wait_for: Option<String>,

    /// Text to type into the awaited element
    #[arg(long)]
    text: Option<String>,

    /// Click the awaited element
    #[arg(long)]
    click: bool,

    /// WebDriver server URL (defaults to the browser's conventional port)
    #[arg(long)]
    webdriver_url: Option<String>,

    /// Read session configuration from a JSON file; flags override it
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => serde_json::from_str::<SessionConfig>(&std::fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };
    if let Some(browser) = args.browser.clone() {
        config.browser = browser;
    }
    if args.webdriver_url.is_some() {
        config.webdriver_url = args.webdriver_url.clone();
    }

    let mut session = BrowserSession::new(config);
    session.connect().await?;

    let outcome = run(&session, &args).await;
    session.close().await?;
    outcome
}

async fn run(session: &BrowserSession, args: &Args) -> anyhow::Result<()> {
    session.navigate_to(&args.url).await?;

    if let Some(selector) = &args.wait_for {
        let locator = Locator::new(Strategy::Css, selector);
        let element = session.wait_for_visibility(&locator).await?;
        if let Some(text) = &args.text {
            session.send_text(&element, text).await?;
        }
        if args.click {
            session.click_element(Some(&element)).await?;
        }
    }

    info!("done");
    Ok(())
}
