//! Site Counts server binary.
//!
//! Serves server-rendered blocks over HTTP, or renders one block to stdout.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use site_counts_kernel::cli::{Cli, Command, render_context};
use site_counts_kernel::config::Config;
use site_counts_kernel::routes;
use site_counts_kernel::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env().context("failed to load configuration")?;
    let state = AppState::new(&config)
        .await
        .context("failed to initialize application state")?;

    match cli.command() {
        Command::Serve => serve(&config, state).await,
        Command::Render {
            block,
            current,
            class_name,
            lang,
        } => {
            let html = state
                .render_block(&block, render_context(current, class_name, lang))
                .await
                .with_context(|| format!("failed to render {block}"))?;
            println!("{html}");
            Ok(())
        }
        Command::Blocks => {
            for def in state.registry().definitions() {
                println!("{}\t{}", def.name, def.title);
            }
            Ok(())
        }
    }
}

async fn serve(config: &Config, state: AppState) -> Result<()> {
    info!(port = config.port, backend = state.host().name(), "starting block server");

    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Logs go to stderr so `render` output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,sqlx=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
