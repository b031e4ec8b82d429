/// Cross-reference Terraform outputs against the schema.
use std::collections::BTreeSet;

use serde::Serialize;

use super::loader::{OutputDecl, Schema};
use super::value::summarise_value;

/// Title shown for outputs the schema does not declare.
pub const PLACEHOLDER_TITLE: &str = "(auto-labelled)";

/// Output group title that feeds the Application information tab.
pub const APPLICATION_GROUP_TITLE: &str = "application information";

/// One table row, derived from one output declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub declared: bool,
    pub title: String,
    pub sensitive: bool,
    pub value_summary: String,
    /// Schema output groups listing this output.
    pub groups: Vec<String>,
}

/// Result of reconciling the two documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Rows in declaration order.
    pub rows: Vec<ReportRow>,
    /// Terraform outputs missing from the schema (sorted, unique).
    pub terraform_only: Vec<String>,
    /// Schema outputs missing from Terraform (sorted, unique).
    pub schema_only: Vec<String>,
    /// Whether any "Application information" output group exists.
    pub application_groups_present: bool,
    /// Members of the matching groups, concatenated in group order.
    pub application_outputs: Vec<String>,
}

/// Build the report model.
#[must_use]
pub fn reconcile(outputs: &[OutputDecl], schema: &Schema) -> Report {
    let rows = outputs
        .iter()
        .map(|decl| {
            let entry = schema.outputs.get(&decl.name);
            ReportRow {
                name: decl.name.clone(),
                declared: entry.is_some(),
                title: entry
                    .and_then(|e| e.title.clone())
                    .unwrap_or_else(|| PLACEHOLDER_TITLE.to_owned()),
                sensitive: decl.sensitive,
                value_summary: decl.value.as_ref().map(summarise_value).unwrap_or_default(),
                groups: entry.map(|e| e.groups.clone()).unwrap_or_default(),
            }
        })
        .collect();

    let terraform_names: BTreeSet<&str> = outputs.iter().map(|o| o.name.as_str()).collect();
    let schema_names: BTreeSet<&str> = schema.outputs.keys().map(String::as_str).collect();

    let terraform_only = terraform_names
        .difference(&schema_names)
        .map(|s| (*s).to_owned())
        .collect();
    let schema_only = schema_names
        .difference(&terraform_names)
        .map(|s| (*s).to_owned())
        .collect();

    let application_groups: Vec<_> = schema
        .groups
        .iter()
        .filter(|g| g.title.trim().to_lowercase() == APPLICATION_GROUP_TITLE)
        .collect();
    let application_outputs = application_groups
        .iter()
        .flat_map(|g| g.outputs.iter().cloned())
        .collect();

    Report {
        rows,
        terraform_only,
        schema_only,
        application_groups_present: !application_groups.is_empty(),
        application_outputs,
    }
}
