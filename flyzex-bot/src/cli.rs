//! CLI parser.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flyzexbot")]
#[command(about = "FlyzexBot guild bot for Rubika", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (settings from config/settings.yaml; token can override BOT_TOKEN).
    Run {
        /// Path to the settings file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Rubika bot token, overriding the settings file and BOT_TOKEN.
        #[arg(short, long)]
        token: Option<String>,
    },
}
