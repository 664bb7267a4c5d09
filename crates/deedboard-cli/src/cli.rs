//! Command-line arguments.

use clap::{Parser, Subcommand};

/// deedboard - collect daily deed uploads and summarize them
#[derive(Parser, Debug)]
#[command(name = "deedboard")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true, env = "DEEDBOARD_CONFIG")]
    pub config: Option<String>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Overrides for `serve`; each one beats the config file.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long)]
    pub port: Option<u16>,

    /// Store URL (`redis://...`, or `memory://` for a throwaway store)
    #[arg(long, env = "DEEDBOARD_REDIS_URL")]
    pub redis_url: Option<String>,
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file path in use
    Path,

    /// Print the effective configuration as TOML
    Show,

    /// Print one value by dotted key, e.g. `server.port`
    Get {
        /// Dotted key
        key: String,
    },

    /// Write a config file holding the defaults
    Init {
        /// Where to write it (defaults to the standard location)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
