//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "steam-inventory")]
#[command(about = "List installed Steam games and the compatibility tools they use", long_about = None)]
pub(crate) struct Cli {
    /// Steam config directory (defaults to the saved setting, then ~/.steam/root/config)
    #[arg(long, global = true)]
    pub steam_config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format shared by listing commands.
#[derive(Args, Clone, Copy)]
pub(crate) struct OutputArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List installed apps and non-Steam shortcuts
    Apps {
        /// Leave out non-Steam shortcuts
        #[arg(long)]
        no_shortcuts: bool,

        /// Rescan instead of using the cached inventory
        #[arg(long)]
        fresh: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List non-Steam shortcuts of every local user
    Shortcuts {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List games, optionally only those using one compatibility tool
    Games {
        /// Internal tool name (e.g., GE-Proton9-2, proton_experimental)
        #[arg(short, long)]
        tool: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Group games by the compatibility tool pinned for them
    Group {
        /// Tool names to group by (defaults to installed and mapped tools)
        #[arg(short, long, value_delimiter = ',')]
        tools: Option<Vec<String>>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List compatibility tools installed under compatibilitytools.d
    Tools,

    /// Manage the saved Steam config location
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the settings file and resolved locations
    Show,

    /// Print the settings file path
    Path,

    /// Save a Steam config directory
    Set {
        /// Path to the Steam config directory (the one holding libraryfolders.vdf)
        path: PathBuf,
    },

    /// Remove the saved Steam config directory
    Clear,
}
