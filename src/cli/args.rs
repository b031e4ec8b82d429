/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// output-mapping — cross-reference Terraform outputs with the Resource Manager schema.
#[derive(Debug, Parser)]
#[command(
    name = "output-mapping",
    about = "Map Terraform outputs to the Resource Manager schema and document the result",
    version
)]
pub struct Cli {
    /// Repository root that the input and target paths are relative to.
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Terraform outputs file [default: deploy/coolify/outputs.tf].
    #[arg(long, global = true, value_name = "PATH")]
    pub outputs: Option<PathBuf>,

    /// Resource Manager schema file [default: deploy/coolify/schema.yaml].
    #[arg(long, global = true, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Generated report
    /// [default: deploy/coolify/docs/application-information-mapping.md].
    #[arg(long, global = true, value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// Print status, rows and errors as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Print per-stage timing to stderr for debugging.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Defaults to `generate`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// All subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand, Default)]
pub enum Command {
    /// Regenerate the mapping report, overwriting the target file.
    #[default]
    Generate,
    /// Exit non-zero if the report on disk is missing or out of date.
    Check,
    /// Print the mapping rows without writing anything.
    Show,
}
