use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "veil")]
#[command(about = "Detect and mask secrets before text leaves your machine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "VEIL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report secrets found in text (exits 1 when any are found)
    Scan {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        filter: CategoryArgs,

        /// Print the detection result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace secrets with fixed mask tokens
    Mask {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        filter: CategoryArgs,

        /// Print the masking summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mask and restore interactively; the restore map lives only in this process
    ///
    /// Each line read from stdin is masked with numbered tokens and printed.
    /// A line starting with `:copy ` is restored from the map of the last
    /// masked line. `:clear` forgets the map and `:quit` ends the session.
    Session {
        /// Hostname the restore map belongs to
        #[arg(long, default_value = "localhost")]
        host: String,

        #[command(flatten)]
        filter: CategoryArgs,

        /// Also put restored `:copy` output on the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// List detection categories and whether they are enabled
    Categories,

    /// Show the active configuration
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
pub struct InputArgs {
    /// File to read (defaults to stdin)
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct CategoryArgs {
    /// Enable a category for this run (repeatable)
    #[arg(long, value_name = "CATEGORY")]
    pub enable: Vec<String>,

    /// Disable a category for this run (repeatable)
    #[arg(long, value_name = "CATEGORY")]
    pub disable: Vec<String>,
}
