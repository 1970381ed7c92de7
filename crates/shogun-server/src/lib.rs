pub mod embed;
pub mod error;
pub mod panes;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use shogun_core::config::TmuxConfig;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(dashboard: Option<PathBuf>, tmux: TmuxConfig) -> Router {
    let app_state = state::AppState::new(dashboard, tmux);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health))
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // Dashboard
        .route("/api/dashboard", get(routes::dashboard::get_dashboard))
        // Agent panes
        .route(
            "/api/ashigaru/{id}/output",
            get(routes::panes::get_output),
        )
        .route("/api/ashigaru/{id}/send", post(routes::panes::send_text))
        .fallback(embed::static_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the dashboard server on a pre-bound listener.
///
/// The caller can read the actual port before starting, which matters when
/// `port = 0` lets the OS pick one.
pub async fn serve_on(
    dashboard: Option<PathBuf>,
    tmux: TmuxConfig,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    match &dashboard {
        Some(path) => tracing::info!(dashboard = %path.display(), "serving dashboard"),
        None => tracing::warn!("no dashboard path configured; /api/dashboard will return 400"),
    }
    let app = build_router(dashboard, tmux);

    tracing::info!("shogun dashboard listening on http://{addr}");

    if open_browser {
        let url = format!("http://{addr}");
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}
