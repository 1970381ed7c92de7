use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dashboard not found: {}", .0.display())]
    DashboardNotFound(PathBuf),

    #[error("dashboard path not configured: pass --dashboard or set SHOGUN_DASHBOARD_PATH")]
    DashboardNotConfigured,

    #[error("invalid agent id '{0}': expected ashigaru<N>")]
    InvalidAgentId(String),

    #[error("tmux not found on PATH")]
    TmuxUnavailable,

    #[error("tmux command failed: {0}")]
    PaneCommand(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
