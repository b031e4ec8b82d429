/// Markdown rendering of the mapping report.
use std::path::Path;

use super::errors::MapError;
use super::reconcile::{Report, ReportRow};

const TABLE_HEADERS: [&str; 5] = [
    "Output name (`outputs.tf`)",
    "Declared in `schema.yaml`?",
    "Title in Application Tab",
    "Sensitive?",
    "Value Source",
];

/// Render the full markdown document. The result ends with a newline.
#[must_use]
pub fn render_markdown(report: &Report) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut push = |line: &str| lines.push(line.to_owned());

    push("# Application information output mapping");
    push("");
    push(
        "This document maps Terraform root module outputs to the Oracle Cloud Resource Manager \
         schema so you can see which values appear on the **Application information** tab.",
    );
    push("");
    push("## Terraform outputs");
    push("");
    push("The root module defines the following outputs in [`outputs.tf`](../outputs.tf).");
    push("");
    push(&render_table(&report.rows));
    push("");
    push("## Findings");
    push("");
    for finding in findings(report) {
        push(&finding);
    }
    push("");
    push("## Surface additional outputs on Application information");
    push("");
    push("To show more Terraform outputs in Application information:");
    push(
        "1. Add them to the `outputs` map in [`schema.yaml`](../schema.yaml) with user-friendly titles.",
    );
    push(
        "2. Create or update an `outputGroups` entry with `title: Application information` and list the output names.",
    );
    push("3. Re-run `output-mapping` to refresh the mapping table.");
    push("");
    push("Generated by `output-mapping`.");

    let mut doc = lines.join("\n");
    doc.push('\n');
    doc
}

/// The markdown table: header, separator and one line per row.
#[must_use]
pub fn render_table(rows: &[ReportRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("| {} |", TABLE_HEADERS.join(" | ")));
    lines.push(format!("| {} |", ["---"; TABLE_HEADERS.len()].join(" | ")));
    for row in rows {
        lines.push(format!(
            "| `{}` | {} | {} | {} | `{}` |",
            escape_cell(&row.name),
            if row.declared { "✅ Yes" } else { "❌ No" },
            escape_cell(&row.title),
            row.sensitive,
            escape_cell(&row.value_summary),
        ));
    }
    lines.join("\n")
}

/// The three finding bullets.
fn findings(report: &Report) -> [String; 3] {
    let terraform_only = if report.terraform_only.is_empty() {
        "- All Terraform outputs are declared in `schema.yaml`.".to_owned()
    } else {
        format!(
            "- Outputs missing from `schema.yaml`: {}.",
            code_list(&report.terraform_only)
        )
    };

    let schema_only = if report.schema_only.is_empty() {
        "- No extra outputs are declared in `schema.yaml`.".to_owned()
    } else {
        format!(
            "- Outputs declared in `schema.yaml` but missing from Terraform: {}.",
            code_list(&report.schema_only)
        )
    };

    let application = if !report.application_groups_present {
        "- `schema.yaml` does not currently define an `outputGroups` entry for **Application information**."
            .to_owned()
    } else if report.application_outputs.is_empty() {
        "- The following outputs are surfaced on the **Application information** tab: (none).".to_owned()
    } else {
        format!(
            "- The following outputs are surfaced on the **Application information** tab: {}.",
            code_list(&report.application_outputs)
        )
    };

    [terraform_only, schema_only, application]
}

/// `a`, `b`, `c`
fn code_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("`{n}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Write the rendered report, replacing any previous content.
///
/// # Errors
///
/// Returns `MapError::Write` if the file cannot be written.
pub fn write_report(path: &Path, content: &str) -> Result<(), MapError> {
    std::fs::write(path, content).map_err(|source| MapError::Write {
        path: path.to_path_buf(),
        source,
    })
}
