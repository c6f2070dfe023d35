//! Command-line interface for the catalog server.

mod commands;

use clap::{Parser, Subcommand};

/// Personal media catalog: movies, shows, books, games, music and programs
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    Init,

    /// Print the collation key of a text
    Normalize {
        /// Text to normalize; multiple words are joined with spaces
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Regenerate and print an account's API key
    ApiKey {
        /// Account username
        username: String,
    },
}

pub use commands::*;
