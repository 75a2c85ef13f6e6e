//! Otopark Server Application
//!
//! Wires configuration, logging, the SQLite gateway, and the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use otopark_core::{branding, AppConfig};
use otopark_http::FacilityServer;
use otopark_storage::SqliteFacilityGateway;
use tracing::{info, warn};

/// Default filter when RUST_LOG is not set.
///
/// Crate names use underscores in tracing (otopark-http → otopark_http).
const DEFAULT_LOG_FILTER: &str =
    "info,otopark_core=debug,otopark_http=debug,otopark_storage=debug,otopark_lib=debug,tower_http=info";

/// Initialize tracing with console and file logging
///
/// - Console: colored, compact format
/// - File: daily rotation in `<data dir>/otopark/logs/`
///
/// Returns the file writer guard, or `None` when file logging could not be
/// set up (console logging still works).
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let logs_dir = branding::logs_dir();

    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
    }

    // Creates files like: otopark.2026-01-22.log
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(branding::LOG_PREFIX)
        .filename_suffix("log")
        .build(&logs_dir);

    let (file_writer, guard) = match file_appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        Err(e) => {
            eprintln!("Warning: File logging disabled: {}", e);
            (None, None)
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Console layer: colored, compact
    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    // File layer: no colors, include more detail
    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

/// Entry point of the `otopark-server` binary
pub fn run() -> anyhow::Result<()> {
    // Load .env file if present (for development)
    dotenvy::dotenv().ok();

    // Keep the guard alive for the entire program - dropping it stops file logging
    let _log_guard = init_tracing();

    info!(
        "Starting {} v{}",
        branding::DISPLAY_NAME,
        env!("CARGO_PKG_VERSION")
    );
    info!("Logs directory: {}", branding::logs_dir().display());

    let config = AppConfig::from_env().context("Invalid configuration")?;
    info!("Store configuration: {:?}", config.database);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async move {
        let gateway = SqliteFacilityGateway::new(config.database)
            .with_max_connections(config.server.max_connections);
        if !gateway.path().exists() {
            warn!(
                "Store {:?} does not exist yet; requests will report a connection error",
                gateway.path()
            );
        }

        FacilityServer::new(config.server, Arc::new(gateway))
            .run()
            .await
    })
}
