//! CLI definitions for sidekick.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// sidekick CLI.
#[derive(Parser)]
#[command(name = "sidekick")]
#[command(about = "Tab-aware chat companion")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.sidekick/config.toml)
    #[arg(short, long, global = true, env = "SIDEKICK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Interactive chat session on stdin (default)
    Chat,

    /// Send one message and print the reply
    Send {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Send one activity alert right away, skipping the debounce
    Alert {
        /// URL of the tab
        url: String,
    },

    /// Print the effective configuration
    Config,
}
