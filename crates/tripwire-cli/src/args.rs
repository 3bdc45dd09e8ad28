//! CLI argument definitions using clap
//!
//! - tripwire simulate --name payments --script ok,fail,fail,sleep:1500,ok
//! - tripwire config show
//! - tripwire config validate

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tripwire_core::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "tripwire")]
#[command(about = "Tripwire - circuit breakers for unreliable dependencies")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (TOML, YAML or JSON)
    #[arg(long, short, global = true, env = "TRIPWIRE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drive a scripted sequence of calls through a circuit breaker
    ///
    /// Steps are comma separated: `ok`, `fail` or `sleep:<millis>`.
    /// The final metrics of every breaker are printed as JSON.
    #[command(verbatim_doc_comment)]
    Simulate {
        /// Dependency name the breaker is registered under
        #[arg(long, short)]
        name: String,

        /// Call script, e.g. "fail,fail,fail,sleep:1000,ok,ok"
        #[arg(long, short)]
        script: String,

        /// Value returned in place of errors and rejected calls
        #[arg(long)]
        fallback: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Load and validate the configuration
    Validate,
}
