//! WeTube server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::{signal, sync::broadcast::error::RecvError};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wetube_common::Config;
use wetube_core::{DbBackend, SessionContext, SessionEvent};
use wetube_web::{AppState, router};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Log session changes until the session context shuts down.
async fn log_session_events(sessions: SessionContext) {
    let mut events = sessions.subscribe();

    loop {
        match events.recv().await {
            Ok(SessionEvent::SignedIn(session)) => {
                info!(user_id = %session.user_id, username = %session.username, "Session started");
            }
            Ok(SessionEvent::SignedOut(session)) => {
                info!(user_id = %session.user_id, "Session ended");
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Session event log fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wetube=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting WeTube server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = wetube_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    wetube_db::migrate(&db).await?;
    info!("Migrations completed");

    let backend = Arc::new(DbBackend::new(Arc::new(db)));
    let sessions = SessionContext::init(backend.clone());
    let session_log = tokio::spawn(log_session_events(sessions.clone()));

    let state = AppState::new(backend, sessions.clone(), &config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);
    info!("Public URL: {}", config.server.public_url());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sessions.shutdown();
    if let Err(e) = session_log.await {
        warn!(error = %e, "Session event log task failed");
    }

    info!("Server shutdown complete");
    Ok(())
}
