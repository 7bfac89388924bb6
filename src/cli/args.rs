//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Create directory structures from a tree string
#[derive(Parser, Debug)]
#[command(name = "creatree")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(flatten)]
    pub create: CreateArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments of the default action: create the tree on disk
#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// File containing the directory tree (reads stdin when omitted)
    #[arg(value_hint = ValueHint::FilePath)]
    pub tree: Option<PathBuf>,

    /// Where to create the directory tree [default: "."]
    #[arg(short = 'w', long = "where", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub where_to_create: Option<PathBuf>,

    /// List the paths that would be created, without touching the disk
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the parsed tree
    Show {
        /// File containing the directory tree (reads stdin when omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        tree: Option<PathBuf>,
        /// Include inline comments
        #[arg(short, long)]
        comments: bool,
    },

    /// Print the parsed tree as a nested mapping
    Dict {
        /// File containing the directory tree (reads stdin when omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        tree: Option<PathBuf>,
        /// Map files to their comments instead of None
        #[arg(short, long)]
        comments: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config instead of ./.creatree.toml
        #[arg(short, long)]
        global: bool,
    },
}
