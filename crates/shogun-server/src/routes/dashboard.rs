use axum::extract::State;
use axum::Json;
use shogun_core::error::DashboardError;
use shogun_core::Report;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/dashboard — the parsed dashboard. Re-read on every request.
pub async fn get_dashboard(State(app): State<AppState>) -> Result<Json<Report>, AppError> {
    let path = app
        .dashboard
        .clone()
        .ok_or(DashboardError::DashboardNotConfigured)?;
    let report = tokio::task::spawn_blocking(move || shogun_core::parse_file(&path))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(report))
}
