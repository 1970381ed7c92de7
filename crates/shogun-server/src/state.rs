use shogun_core::config::TmuxConfig;
use shogun_core::dashboard::{find_last_updated, split_sections};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const POLL_INTERVAL: Duration = Duration::from_millis(800);

/// Sent to SSE subscribers when the dashboard file is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardChanged {
    /// `最終更新` of the new content; empty when absent or unreadable.
    pub last_updated: String,
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Option<PathBuf>,
    pub tmux: TmuxConfig,
    pub event_tx: broadcast::Sender<DashboardChanged>,
}

impl AppState {
    pub fn new(dashboard: Option<PathBuf>, tmux: TmuxConfig) -> Self {
        let (tx, _) = broadcast::channel(64);

        // Only inside a Tokio runtime, so sync unit tests can build a state.
        if let (Some(path), Ok(_)) = (dashboard.clone(), tokio::runtime::Handle::try_current()) {
            spawn_watcher(path, tx.downgrade());
        }

        Self {
            dashboard,
            tmux,
            event_tx: tx,
        }
    }
}

async fn modified(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path)
        .await
        .and_then(|m| m.modified())
        .ok()
}

async fn read_last_updated(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => find_last_updated(split_sections(&text).preamble).unwrap_or_default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read changed dashboard");
            String::new()
        }
    }
}

/// Poll `path`'s mtime and broadcast when it moves. The mtime at start is
/// the baseline, so nothing is sent until the file actually changes. The
/// task ends once every strong sender (the router's state) is gone.
pub fn spawn_watcher(path: PathBuf, tx: broadcast::WeakSender<DashboardChanged>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_mtime = modified(&path).await;
        loop {
            tokio::time::sleep(POLL_INTERVAL).await;
            let Some(tx) = tx.upgrade() else {
                break;
            };
            let mtime = modified(&path).await;
            if mtime.is_none() || mtime == last_mtime {
                continue;
            }
            last_mtime = mtime;
            let last_updated = read_last_updated(&path).await;
            tracing::debug!(path = %path.display(), %last_updated, "dashboard changed");
            let _ = tx.send(DashboardChanged { last_updated });
        }
        tracing::debug!(path = %path.display(), "dashboard watcher stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_dashboard(dir: &tempfile::TempDir, stamp: &str) -> PathBuf {
        let path = dir.path().join("dashboard.md");
        std::fs::write(&path, format!("最終更新: {stamp}\n\n## ⏸️ 待機中\n- 足軽5\n")).unwrap();
        path
    }

    #[test]
    fn new_state_stores_paths() {
        let state = AppState::new(Some(PathBuf::from("/tmp/dashboard.md")), TmuxConfig::default());
        assert_eq!(state.dashboard, Some(PathBuf::from("/tmp/dashboard.md")));
        assert_eq!(state.tmux.session, "multiagent");
    }

    #[tokio::test]
    async fn unchanged_file_sends_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_dashboard(&dir, "a");

        let state = AppState::new(Some(path), TmuxConfig::default());
        let mut rx = state.event_tx.subscribe();
        let received = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(received.is_err(), "unexpected event: {received:?}");
    }

    #[tokio::test]
    async fn edit_broadcasts_new_last_updated() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_dashboard(&dir, "2024-01-01 10:00");

        let state = AppState::new(Some(path), TmuxConfig::default());
        let mut rx = state.event_tx.subscribe();
        // Let the watcher record its baseline mtime before the edit.
        tokio::time::sleep(Duration::from_millis(100)).await;
        write_dashboard(&dir, "2024-01-01 11:30");

        let received = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(received.last_updated, "2024-01-01 11:30");
    }

    #[tokio::test]
    async fn watcher_stops_when_state_is_dropped() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_dashboard(&dir, "a");

        let (tx, _) = broadcast::channel(4);
        let handle = spawn_watcher(path, tx.downgrade());
        drop(tx);

        let finished = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(matches!(finished, Ok(Ok(()))));
    }
}
