//! Risk Register - GRC Risk Assessment API
//!
//! Scores likelihood x impact submissions into severity levels and keeps
//! an append-only register of the results behind a small HTTP API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

// Re-export from library
pub use risk_register::*;

mod cli;

/// Risk Register - GRC Risk Assessment API
#[derive(Parser)]
#[command(name = "risk-register")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Bind address, e.g. 127.0.0.1:8000
        #[arg(short, long)]
        listen: Option<String>,

        /// Database file path
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Create the database schema and exit
    Migrate {
        /// Database file path
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Score a risk from the command line
    Assess {
        /// Asset under evaluation
        asset: String,

        /// Threat scenario
        threat: String,

        /// Likelihood rating (1-5)
        likelihood: u32,

        /// Impact rating (1-5)
        impact: u32,

        /// Persist the assessment to the database
        #[arg(short, long)]
        save: bool,

        /// Database file path
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG wins over the -v flag when set
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve { listen, db } => {
            info!("🛡️ Starting Risk Register API...");
            cli::serve::run(cli.config.as_deref(), listen, db).await?;
        }
        Commands::Migrate { db } => {
            cli::migrate::run(cli.config.as_deref(), db).await?;
        }
        Commands::Assess {
            asset,
            threat,
            likelihood,
            impact,
            save,
            db,
        } => {
            cli::assess::run(
                cli.config.as_deref(),
                asset,
                threat,
                likelihood,
                impact,
                save,
                db,
            )
            .await?;
        }
    }

    Ok(())
}
