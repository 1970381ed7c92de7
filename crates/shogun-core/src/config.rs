use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the dashboard path.
pub const DASHBOARD_ENV: &str = "SHOGUN_DASHBOARD_PATH";

/// Environment variable holding the config file path.
pub const CONFIG_ENV: &str = "SHOGUN_CONFIG";

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// TmuxConfig
// ---------------------------------------------------------------------------

/// Where agent panes live. Agent `ashigaruN` is pane `N - 1 + pane_offset`
/// of `session:window`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmuxConfig {
    #[serde(default = "default_session")]
    pub session: String,
    #[serde(default = "default_window")]
    pub window: String,
    #[serde(default = "default_pane_offset")]
    pub pane_offset: u32,
    /// Scrollback lines returned by a capture.
    #[serde(default = "default_capture_lines")]
    pub capture_lines: u32,
}

fn default_session() -> String {
    "multiagent".to_string()
}

fn default_window() -> String {
    "0".to_string()
}

fn default_pane_offset() -> u32 {
    1
}

fn default_capture_lines() -> u32 {
    200
}

impl Default for TmuxConfig {
    fn default() -> Self {
        Self {
            session: default_session(),
            window: default_window(),
            pane_offset: default_pane_offset(),
            capture_lines: default_capture_lines(),
        }
    }
}

impl TmuxConfig {
    pub fn target_for(&self, agent_number: u32) -> String {
        let pane = agent_number.saturating_sub(1) + self.pane_offset;
        format!("{}:{}.{}", self.session, self.window, pane)
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<PathBuf>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tmux: TmuxConfig,
}

impl Config {
    /// Load a YAML config file. A relative `dashboard` path is resolved
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&data)?;
        if let Some(dir) = path.parent() {
            config.dashboard = config.dashboard.take().map(|dashboard| {
                if dashboard.is_relative() {
                    dir.join(dashboard)
                } else {
                    dashboard
                }
            });
        }
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// An explicitly given path wins over the configured one.
    pub fn dashboard_path(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.dashboard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.tmux.session, "multiagent");
        assert!(config.dashboard.is_none());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("tmux:\n  session: war\n").unwrap();
        assert_eq!(config.tmux.session, "war");
        assert_eq!(config.tmux.window, "0");
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn target_for_agent() {
        let tmux = TmuxConfig::default();
        assert_eq!(tmux.target_for(1), "multiagent:0.1");
        assert_eq!(tmux.target_for(8), "multiagent:0.8");
        let tmux = TmuxConfig {
            pane_offset: 0,
            window: "agents".into(),
            ..Default::default()
        };
        assert_eq!(tmux.target_for(3), "multiagent:agents.2");
    }

    #[test]
    fn load_resolves_relative_dashboard() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shogun.yaml");
        std::fs::write(&path, "dashboard: status/dashboard.md\nserver:\n  port: 9000\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.dashboard,
            Some(dir.path().join("status/dashboard.md"))
        );
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn load_invalid_yaml_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "server: [not, a, map]\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn explicit_dashboard_wins() {
        let config = Config {
            dashboard: Some(PathBuf::from("/from/config.md")),
            ..Default::default()
        };
        assert_eq!(
            config.dashboard_path(Some(Path::new("/from/flag.md"))),
            Some(PathBuf::from("/from/flag.md"))
        );
        assert_eq!(
            config.dashboard_path(None),
            Some(PathBuf::from("/from/config.md"))
        );
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
