//! Coordination-service binary entrypoint wiring the HTTP surface and the
//! startup timer recovery scan.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use poker_clubs_back::{
    config::Settings,
    dao::memory::InMemoryDirectory,
    routes,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = Settings::from_env();
    let directory = Arc::new(InMemoryDirectory::default());
    let app_state = AppState::new(settings, directory).context("building peer clients")?;

    // Replay timers the persisted state says should be live; the scan is
    // also re-triggerable through POST /internal/restart-timers.
    tokio::spawn(run_startup_recovery(app_state.clone()));

    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Run the startup recovery scan and surface its outcome in the logs; an
/// unclean scan here still leaves the manual endpoint as the retry path.
async fn run_startup_recovery(state: SharedState) {
    match state.recovery().scan().await {
        Ok(report) if report.is_clean() => {
            info!(rearmed = report.rearmed, "startup timer recovery complete");
        }
        Ok(report) => {
            error!(
                rearmed = report.rearmed,
                failed = report.failures.len(),
                skipped = report.skipped,
                "startup timer recovery left timers un-armed"
            );
        }
        Err(err) => {
            error!(error = %err, "startup timer recovery could not read persisted state");
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
