use anyhow::{bail, Context};
use shogun_core::config::Config;
use shogun_core::error::DashboardError;
use std::path::{Path, PathBuf};

/// `serve` flags. Unset values fall back to the config file, then defaults.
pub struct ServeArgs {
    pub dashboard: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub open: bool,
}

pub fn run(config_path: Option<&Path>, args: ServeArgs) -> anyhow::Result<()> {
    let config = Config::load_or_default(config_path).with_context(|| match config_path {
        Some(p) => format!("failed to load config {}", p.display()),
        None => "failed to load config".to_string(),
    })?;

    let dashboard = config
        .dashboard_path(args.dashboard.as_deref())
        .ok_or(DashboardError::DashboardNotConfigured)?;
    if !dashboard.is_file() {
        bail!(DashboardError::DashboardNotFound(dashboard));
    }
    let dashboard = std::fs::canonicalize(&dashboard)
        .with_context(|| format!("failed to resolve {}", dashboard.display()))?;

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let open_browser = args.open;
    let tmux = config.tmux;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind((host.as_str(), port))
            .await
            .with_context(|| format!("failed to bind {host}:{port}"))?;
        let addr = listener.local_addr()?;

        println!("Dashboard: {}", dashboard.display());
        println!("Server: http://{addr}");

        tokio::select! {
            res = shogun_server::serve_on(Some(dashboard), tmux, listener, open_browser) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
