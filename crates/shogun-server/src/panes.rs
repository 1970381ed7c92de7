//! Runs tmux against agent panes.

use shogun_core::error::{DashboardError, Result};
use shogun_core::pane;
use tokio::process::Command;

const TMUX: &str = "tmux";

async fn tmux(args: Vec<String>) -> Result<String> {
    if which::which(TMUX).is_err() {
        return Err(DashboardError::TmuxUnavailable);
    }

    let output = Command::new(TMUX).args(&args).output().await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::warn!(args = ?args, %stderr, "tmux command failed");
        return Err(DashboardError::PaneCommand(stderr));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// The last `lines` lines of `target`, trailing padding removed.
pub async fn capture(target: &str, lines: u32) -> Result<String> {
    let output = tmux(pane::capture_args(target, lines)).await?;
    Ok(pane::trim_capture(&output).to_string())
}

/// Type `text` into `target` and press Enter.
pub async fn send(target: &str, text: &str) -> Result<()> {
    tmux(pane::send_text_args(target, text)).await?;
    tmux(pane::send_enter_args(target)).await?;
    tracing::info!(pane = target, chars = text.chars().count(), "sent text to pane");
    Ok(())
}
