//! gossipd — the gossip exporter daemon.
//!
//! Serves the current gossip peer snapshot as Prometheus gauges. Every
//! scrape re-reads the snapshot file.
//!
//! # Usage
//!
//! ```text
//! gossipd serve --listen 0.0.0.0:8080 --snapshot /var/lib/gossip/output.json
//! gossipd collect --snapshot ./output.json
//! gossipd config > gossipd.toml
//! ```

mod collect;
mod serve;
mod settings;
mod telemetry;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gossip_core::DecodeMode;
use gossip_core::config::LogFormat;

#[derive(Parser)]
#[command(name = "gossipd", about = "Gossip peer Prometheus exporter", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Flags shared by every subcommand that reads a snapshot.
#[derive(Args, Debug, Default)]
pub struct SnapshotArgs {
    /// Path to gossipd.toml.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Snapshot file to read on every scrape.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Decode mode: strict or per_record.
    #[arg(long)]
    pub decode: Option<DecodeMode>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the Prometheus endpoint.
    Serve {
        #[command(flatten)]
        snapshot: SnapshotArgs,

        /// Address to listen on.
        #[arg(long)]
        listen: Option<String>,

        /// Route serving the exposition.
        #[arg(long)]
        metrics_path: Option<String>,

        /// Log output format: text or json.
        #[arg(long)]
        log_format: Option<LogFormat>,
    },
    /// Run one collection and print the exposition to stdout.
    Collect {
        #[command(flatten)]
        snapshot: SnapshotArgs,

        /// Read the snapshot from stdin instead of a file.
        #[arg(long, conflicts_with = "snapshot")]
        stdin: bool,
    },
    /// Print the effective configuration as TOML.
    Config {
        /// Path to gossipd.toml.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            snapshot,
            listen,
            metrics_path,
            log_format,
        } => {
            let mut config = settings::load(&snapshot)?;
            if let Some(listen) = listen {
                config.server.listen = listen;
            }
            if let Some(path) = metrics_path {
                config.server.metrics_path = path;
            }
            if let Some(format) = log_format {
                config.log.format = format;
            }
            telemetry::init(&config.log)?;
            serve::run(config).await
        }
        Command::Collect { snapshot, stdin } => {
            let config = settings::load(&snapshot)?;
            telemetry::init(&config.log)?;
            collect::run(&config, stdin)
        }
        Command::Config { config } => {
            let config = settings::load(&SnapshotArgs {
                config,
                ..Default::default()
            })?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
