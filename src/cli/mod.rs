//! CLI module
//!
//! Owns the whole process lifecycle: argument parsing, tracing setup,
//! pool creation with bounded retry, schema bootstrap, notifier wiring,
//! and the serve loop with graceful shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{DatabaseConfig, SchoolInfo, SmtpConfig};
use crate::db;
use crate::http_server::{build_router, AppState, HttpServerConfig};
use crate::notify::{FailureLog, Notifier};

/// Command-line arguments for formgate
#[derive(Debug, Parser)]
#[command(name = "formgate")]
#[command(about = "Form submission backend for a school website")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub http: HttpServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub smtp: SmtpConfig,

    #[command(flatten)]
    pub school: SchoolInfo,

    /// Directory for the email failure log
    #[arg(long, env = "FORMGATE_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,
}

pub async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formgate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("starting formgate on {}", args.http.socket_addr());

    let pool = db::connect_with_retry(&args.database)
        .await
        .context("database connection failed")?;
    db::ensure_schema(&pool)
        .await
        .context("schema bootstrap failed")?;

    let failure_log = FailureLog::new(args.log_dir.join("email_failures"));
    let notifier = Notifier::from_config(&args.smtp, &args.school, failure_log)
        .context("mailer configuration invalid")?;

    let state = Arc::new(AppState {
        pool: pool.clone(),
        notifier: Arc::new(notifier),
        school: args.school.clone(),
    });
    let app = build_router(state);

    let addr: SocketAddr = args
        .http
        .socket_addr()
        .parse()
        .context("invalid bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;
    info!("listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    pool.close().await;
    info!("server shutdown complete");
    Ok(())
}

/// Graceful shutdown on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
