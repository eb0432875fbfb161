//! Command-line interface for `tinct`.
//!
//! # Examples
//!
//! ```bash
//! # List every theme, builtins first
//! tinct list
//!
//! # Switch the remembered theme
//! tinct use nord
//!
//! # Print the style variables a theme produces
//! tinct show dracula
//!
//! # Derive a palette from one base color
//! tinct derive background '#282a36'
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use directories::ProjectDirs;

/// Manage and inspect tinct themes.
#[derive(Parser, Debug, Clone)]
#[command(name = "tinct", author, version, about = "Manage and inspect tinct themes")]
pub struct Cli {
    /// Directory holding persisted user themes and the active theme id
    #[arg(long, global = true, env = "TINCT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Engine configuration file (TOML)
    #[arg(long, global = true, env = "TINCT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory of richer builtin definitions (`<id>.json`) loaded on start
    #[arg(long, global = true, env = "TINCT_THEMES_DIR")]
    pub themes_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List registered themes
    List {
        /// Print summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the style variables a theme produces as a `:root` block
    Show { id: String },

    /// Activate a theme and remember it
    Use { id: String },

    /// Print a theme document
    Export {
        id: String,

        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Import a theme document from a file
    Import { file: PathBuf },

    /// Delete a user theme
    Delete { id: String },

    /// Copy a theme under a new name
    Duplicate { source: String, name: String },

    /// Reset a builtin theme to its shipped definition
    Restore { id: String },

    /// Derive a color group's members from a base color
    Derive { group: String, base: String },

    /// Print the editor theme generated for a theme as JSON
    Editor { id: String },

    /// Print the effective engine configuration
    Config,
}

impl Cli {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "tinct", "tinct")
    }

    /// Data directory from the flag, else the platform default.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    /// Config file from the flag, else the platform default.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml")))
    }

    /// Default log filter for the verbosity count.
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
