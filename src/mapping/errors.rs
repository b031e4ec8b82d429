/// Errors from loading, reconciling and writing the mapping report.
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing the mapping report.
#[derive(Debug, Error)]
pub enum MapError {
    /// An input file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The report could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// The target file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The Terraform outputs file is not valid HCL.
    #[error("Failed to parse HCL in '{}': {source}", path.display())]
    Hcl {
        /// The HCL file.
        path: PathBuf,
        /// Parser error.
        source: hcl::Error,
    },

    /// The schema file is not valid YAML.
    #[error("Failed to parse YAML in '{}': {source}", path.display())]
    Yaml {
        /// The schema file.
        path: PathBuf,
        /// Parser error.
        source: serde_yaml::Error,
    },

    /// The schema parsed but does not have the expected structure.
    #[error("Unexpected schema structure in '{}': {reason}", path.display())]
    SchemaShape {
        /// The schema file.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },

    /// The report on disk differs from a freshly rendered one.
    #[error("Report '{}' is out of date; re-run `output-mapping generate`", path.display())]
    Stale {
        /// The target file.
        path: PathBuf,
    },
}

impl MapError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Stale { .. } => 1,
            Self::Read { .. } | Self::Write { .. } => 2,
            Self::Hcl { .. } | Self::Yaml { .. } | Self::SchemaShape { .. } => 3,
        }
    }

    /// Machine-readable error code (`snake_case`) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read_failed",
            Self::Write { .. } => "write_failed",
            Self::Hcl { .. } => "invalid_hcl",
            Self::Yaml { .. } => "invalid_yaml",
            Self::SchemaShape { .. } => "invalid_schema",
            Self::Stale { .. } => "stale_report",
        }
    }
}
