//! CLI interface for Libris

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::auth::{Area, Role};

#[derive(Parser)]
#[command(name = "libris")]
#[command(author = "Krakaw")]
#[command(version)]
#[command(about = "Sign in to the library catalog and inspect the current session", long_about = None)]
pub struct Cli {
    /// Path to libris.toml (searched upward from the current directory by default)
    #[arg(short, long, global = true, env = "LIBRIS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new libris.toml configuration file
    Init,

    /// Start a session from a token or from backend credentials
    Login {
        /// Token already issued by the backend; any password is ignored
        #[arg(short, long, conflicts_with = "email")]
        token: Option<String>,

        /// Account email (prompted when missing)
        #[arg(short, long)]
        email: Option<String>,

        /// Account password (prompted when missing)
        #[arg(short, long, env = "LIBRIS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account on the backend
    Signup {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted when missing)
        #[arg(short, long)]
        password: Option<String>,

        /// Role to request
        #[arg(short, long, default_value = "USER")]
        role: Role,
    },

    /// End the current session
    Logout,

    /// Show who is logged in
    Whoami {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the Authorization header for backend requests
    Header,

    /// Check whether the current session may enter an area
    Check {
        /// Area to check
        #[arg(value_enum)]
        area: Area,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
