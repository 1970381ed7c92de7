mod cmd;
mod output;

use clap::{Parser, Subcommand};
use shogun_core::config::{CONFIG_ENV, DASHBOARD_ENV};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shogun",
    about = "Read the shogun dashboard.md and serve it as a live web dashboard",
    version,
    propagate_version = true
)]
struct Cli {
    /// YAML config file
    #[arg(long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a dashboard file and print what was recognized
    Parse {
        /// Path to dashboard.md
        path: PathBuf,
    },

    /// Serve the dashboard over HTTP
    Serve {
        /// Path to dashboard.md
        #[arg(long, env = DASHBOARD_ENV)]
        dashboard: Option<PathBuf>,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default: 8000)
        #[arg(long)]
        port: Option<u16>,

        /// Open the dashboard in a browser once listening
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        Commands::Parse { .. } => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Parse { path } => cmd::parse::run(&path, cli.json),
        Commands::Serve {
            dashboard,
            host,
            port,
            open,
        } => cmd::serve::run(
            cli.config.as_deref(),
            cmd::serve::ServeArgs {
                dashboard,
                host,
                port,
                open,
            },
        ),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
