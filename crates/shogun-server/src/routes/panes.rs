use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use shogun_core::pane::AgentId;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/ashigaru/{id}/output — recent output of the agent's pane.
pub async fn get_output(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let agent: AgentId = id.parse()?;
    let target = app.tmux.target_for(agent.number());
    let output = crate::panes::capture(&target, app.tmux.capture_lines).await?;

    Ok(Json(serde_json::json!({
        "id": agent.to_string(),
        "target": target,
        "output": output,
    })))
}

#[derive(Deserialize)]
pub struct SendBody {
    text: String,
}

/// POST /api/ashigaru/{id}/send — type `text` into the agent's pane.
pub async fn send_text(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SendBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let agent: AgentId = id.parse()?;
    if body.text.trim().is_empty() {
        return Err(AppError::bad_request("text must not be empty"));
    }
    let target = app.tmux.target_for(agent.number());
    crate::panes::send(&target, &body.text).await?;

    Ok(Json(serde_json::json!({ "ok": true, "target": target })))
}
