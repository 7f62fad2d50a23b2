use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::{EmployeeTransport, FetchController, HttpEmployeeTransport, UnavailableTransport};
use shared::protocol::{DEFAULT_PAGE, DEFAULT_PER_PAGE};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

#[derive(Parser, Debug)]
#[command(about = "Fetch one page of the employee directory")]
struct Args {
    /// Settings file; defaults to ./directory.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    page: u64,
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    per_page: u64,
    #[arg(long)]
    json: bool,
    /// Leave the page empty instead of showing sample employees when the service is down.
    #[arg(long)]
    no_fallback: bool,
    /// Skip the network entirely.
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }

    let transport: Arc<dyn EmployeeTransport> = if args.offline {
        Arc::new(UnavailableTransport)
    } else {
        let base_url = config::validate_base_url(&settings.base_url)?;
        info!(base_url = %base_url, "directory: using remote employee service");
        let mut transport = HttpEmployeeTransport::new(base_url);
        if let Some(timeout) = settings.request_timeout() {
            transport = transport.with_timeout(timeout);
        }
        Arc::new(transport)
    };
    let controller = FetchController::with_retry_policy(transport, settings.retry_policy());

    controller.load(&args.search, args.page, args.per_page).await;

    let mut from_fallback = false;
    if controller.state().await.degraded && !args.no_fallback {
        warn!("directory: service unavailable; showing sample employees");
        controller.load_fallback(args.per_page).await;
        from_fallback = true;
    }

    let state = controller.state().await;
    if args.json {
        println!("{}", render::render_json(&state, from_fallback)?);
    } else {
        println!("{}", render::render_table(&state, from_fallback));
    }

    Ok(())
}
