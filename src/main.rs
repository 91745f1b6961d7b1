//! Blogsmith - A terminal client for the blog writing agent
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::path::PathBuf;
use std::process::ExitCode;

use blogsmith_app::config::{load_settings, load_settings_from};
use blogsmith_app::Engine;
use blogsmith_client::HttpBlogClient;
use clap::Parser;
use tracing::info;

use blogsmith::HeadlessRequest;

/// Blogsmith - write blog posts with an AI agent from your terminal
#[derive(Parser, Debug)]
#[command(name = "blogsmith", version)]
#[command(about = "A terminal client for the blog writing agent", long_about = None)]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Config file (defaults to .blogsmith/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run one generation with JSON output instead of the TUI
    #[arg(long, requires = "topic")]
    headless: bool,

    /// Topic to write about (headless mode)
    #[arg(long, requires = "headless")]
    topic: Option<String>,

    /// As-of date, YYYY-MM-DD (headless mode, defaults to today)
    #[arg(long, value_name = "DATE", requires = "headless")]
    as_of: Option<String>,

    /// Directory for the exported markdown (headless mode)
    #[arg(long, value_name = "DIR", requires = "headless")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();

    blogsmith_core::logging::init()?;

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            load_settings(&cwd)
        }
    };
    if let Some(url) = args.api_url {
        settings.api.base_url = url;
    }
    info!("Using backend at {}", settings.api.base_url);

    let client =
        HttpBlogClient::with_connect_timeout(&settings.api.base_url, settings.api.connect_timeout())?;

    if args.headless {
        let request = HeadlessRequest {
            topic: args.topic.unwrap_or_default(),
            as_of: args.as_of,
            output: args.output,
        };
        let mut stdout = std::io::stdout();
        let outcome = blogsmith::run_headless(client, settings, request, &mut stdout).await;
        return Ok(ExitCode::from(blogsmith::exit_status(outcome)?));
    }

    blogsmith::run(Engine::new(client, settings)).await?;
    Ok(ExitCode::SUCCESS)
}
