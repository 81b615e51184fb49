#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use checa_postgres::run_pending_migrations;
use checa_server::handler::routes;
use checa_server::middleware::RouterObservabilityExt;
use checa_server::service::{ServiceConfig, ServiceState};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Tracing target for server startup events.
pub const TRACING_TARGET_STARTUP: &str = "checa_cli::server::startup";

/// Tracing target for server shutdown events.
pub const TRACING_TARGET_SHUTDOWN: &str = "checa_cli::server::shutdown";

/// Command-line arguments for the portal server.
#[derive(Debug, Parser)]
#[command(name = "checa", version, about)]
struct Cli {
    #[command(flatten)]
    service: ServiceConfig,

    /// Skip applying pending database migrations on startup.
    #[arg(long, env = "SKIP_MIGRATIONS", default_value_t = false)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    #[cfg(feature = "dotenv")]
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing();
    log_startup_info();

    if !cli.skip_migrations {
        run_pending_migrations(&cli.service.postgres)
            .await
            .context("failed to apply database migrations")?;
    }

    let (state, audit_worker) =
        ServiceState::from_config(&cli.service).context("failed to create service state")?;

    let cancellation = CancellationToken::new();
    let audit_task = tokio::spawn(audit_worker.run(cancellation.clone()));

    let router: Router = routes(state.clone())
        .with_state(state)
        .with_observability();
    let result = server::serve(router, &cli.service).await;

    // Stop the audit worker and let it drain its queue before exiting.
    cancellation.cancel();
    audit_task.await.context("audit worker panicked")?;

    result.map_err(Into::into)
}

/// Initializes tracing with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Logs startup information.
fn log_startup_info() {
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting checa portal server"
    );

    tracing::debug!(
        target: TRACING_TARGET_STARTUP,
        pid = process::id(),
        arch = std::env::consts::ARCH,
        os = std::env::consts::OS,
        "build information"
    );
}
