//! CLI entry point.

mod serve;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "vaxportal")]
#[command(about = "Reporting portal for vaccination and infection statistics")]
#[command(version)]
pub struct Cli {
    /// Path to the statistics database (opened read-only)
    #[arg(long, global = true, env = "VAXPORTAL_DATABASE")]
    database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the report web server
    Serve {
        /// Bind address: PORT, HOST, or HOST:PORT
        #[arg(short, long, default_value = "127.0.0.1:3030")]
        bind: String,
    },

    /// Print the landing-page aggregate facts
    Status,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.database);

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, &bind).await,
        Commands::Status => status::cmd_status(&settings),
    }
}
