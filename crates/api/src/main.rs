use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use presurvey_api::config::ServerConfig;
use presurvey_api::page::Templates;
use presurvey_api::router::build_app_router;
use presurvey_api::state::AppState;
use presurvey_sheets::{connect, select_provider, Endpoints};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "presurvey_api=debug,presurvey_sheets=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Worksheet ---
    // Nothing is served unless the sheet can be opened.
    let provider = select_provider(&config.credentials_path, &config.secrets_path);
    let worksheet = match connect(
        provider.as_ref(),
        &config.spreadsheet_name,
        Endpoints::default(),
    )
    .await
    {
        Ok(worksheet) => worksheet,
        Err(e) => {
            tracing::error!(
                error = %e,
                spreadsheet = %config.spreadsheet_name,
                "Failed to connect to Google Sheets; check the credentials and the spreadsheet name",
            );
            std::process::exit(1);
        }
    };

    // --- App state ---
    let templates = Templates::new().expect("Failed to compile page templates");
    let state = AppState {
        appender: Arc::new(worksheet),
        templates: Arc::new(templates),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
