mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use adextract_core::config::seed_from_dotenv;
use adextract_core::{AppConfig, FacebookAdsAdapter, HttpClient, ReqwestHttpClient, ShopifyAdapter};
use adextract_web::{build_router, AppState, ServerError};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

const DEFAULT_LOG_FILTER: &str = "adextract_web=info,adextract_core=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    // `.env` must be in the environment before RUST_LOG and the clap env
    // fallbacks are read.
    let dotenv_error = seed_from_dotenv();
    init_tracing();
    if let Some(error) = dotenv_error {
        warn!(error = %error, "ignoring malformed .env file");
    }
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "server stopped");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let config = AppConfig::from_env()?;
    info!(shopify = ?config.shopify, facebook = ?config.facebook, "configuration loaded");

    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let timeout_ms = config.http.timeout_ms;

    let mut shopify =
        ShopifyAdapter::new(config.shopify.clone(), Arc::clone(&http_client)).with_timeout_ms(timeout_ms);
    shopify.authenticate()?;
    let facebook = FacebookAdsAdapter::new(&config.facebook, http_client)?.with_timeout_ms(timeout_ms);

    let app = build_router(AppState::new(Arc::new(shopify), Arc::new(facebook)));

    let addr = cli.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "adextract server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("adextract server shut down");
    Ok(())
}

/// `RUST_LOG` wins over the default filter.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
