//! Command-line definition.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "rogu",
    about = "Personal workstation provisioning assistant",
    version,
    infer_subcommands = true
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Manifest file (default: ~/.rogu)
    #[arg(short, long, global = true, env = "ROGU_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install missing items and update installed ones
    #[command(alias = "s")]
    Sync(SyncOpts),
    /// Check the health of every item
    #[command(alias = "d")]
    Doctor(DoctorOpts),
    /// Uninstall the selected items
    Uninstall(UninstallOpts),
    /// List dotfiles, or the item catalog with --items
    List(ListOpts),
    /// Start a new project from an installed template
    Init(InitOpts),
    /// Print a boilerplate file from the boilerplate server
    Boilerplate(BoilerplateOpts),
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

/// Options for the `sync` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct SyncOpts {
    /// Also update rogu itself
    #[arg(long = "self")]
    pub sync_self: bool,

    /// Treat items that cannot be installed as errors
    #[arg(long)]
    pub strict: bool,

    /// Only items whose name contains one of these (case-insensitive)
    pub filters: Vec<String>,
}

/// Options for the `doctor` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct DoctorOpts {
    /// Only items whose name contains one of these (case-insensitive)
    pub filters: Vec<String>,
}

/// Options for the `uninstall` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct UninstallOpts {
    /// Items whose name contains one of these (case-insensitive)
    #[arg(required = true)]
    pub filters: Vec<String>,
}

/// Options for the `list` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ListOpts {
    /// List the item catalog instead of the dotfiles
    #[arg(long)]
    pub items: bool,
}

/// Options for the `init` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InitOpts {
    /// List available templates
    #[arg(short, long, conflicts_with = "template")]
    pub list: bool,

    /// Template name
    #[arg(required_unless_present = "list")]
    pub template: Option<String>,
}

/// Options for the `boilerplate` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct BoilerplateOpts {
    /// File to fetch (default: the server's file list)
    pub file: Option<String>,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
