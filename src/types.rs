/// Shared serializable output types for all commands.
///
/// These types are what gets written to stdout in `--json` mode. They are
/// decoupled from the internal `Report` type so the JSON shape stays stable.
use serde::{Deserialize, Serialize};

use crate::mapping::{MapError, Report};

/// Result of `generate` and `check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    /// Always `true`; failures use [`ErrorOutput`].
    pub ok: bool,
    /// Report file that was written or checked.
    pub target: String,
    /// Number of Terraform outputs (table rows).
    pub outputs: usize,
    /// Terraform outputs missing from the schema.
    pub terraform_only: Vec<String>,
    /// Schema outputs missing from Terraform.
    pub schema_only: Vec<String>,
    /// Outputs surfaced on the Application information tab, or null when no
    /// such group exists.
    pub application_outputs: Option<Vec<String>>,
}

impl RunOutput {
    #[must_use]
    pub fn from_report(report: &Report, target: &std::path::Path) -> Self {
        Self {
            ok: true,
            target: target.display().to_string(),
            outputs: report.rows.len(),
            terraform_only: report.terraform_only.clone(),
            schema_only: report.schema_only.clone(),
            application_outputs: report
                .application_groups_present
                .then(|| report.application_outputs.clone()),
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (`snake_case`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `MapError`.
    #[must_use]
    pub fn from_map_error(err: &MapError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}
