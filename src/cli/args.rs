//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;

/// Behavior tree XML model: node catalog, typed parameter schemas and tree building
#[derive(Parser, Debug)]
#[command(name = "btxml")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every behavior tree of a document
    Tree {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Hide parameter values
        #[arg(long)]
        no_params: bool,
    },

    /// List the node models of a document
    Catalog {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Include Action models
        #[arg(short, long)]
        all: bool,
    },

    /// Parse a document and lint its parameter values
    Check {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Serialize catalog and trees
    Export {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Output format (default from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Write to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
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

    /// Create global config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
