/// Loading of the two input documents: Terraform `output` blocks (HCL) and the
/// Resource Manager schema (YAML).
use std::collections::BTreeMap;
use std::path::Path;

use hcl::{Block, Body, Expression, TemplateExpr};
use serde_yaml::Value as YamlValue;

use super::errors::MapError;
use super::value::Value;

/// One `output "<name>" { … }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputDecl {
    /// Output name (the block label).
    pub name: String,
    /// The `value` attribute, if the block has one.
    pub value: Option<Value>,
    /// The `sensitive` attribute; `false` when absent.
    pub sensitive: bool,
}

/// An entry of the schema `outputs` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub title: Option<String>,
    /// Titles of the output groups that list this entry.
    pub groups: Vec<String>,
}

/// An `outputGroups` item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGroup {
    pub title: String,
    pub outputs: Vec<String>,
}

/// The parts of `schema.yaml` the report cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Schema outputs keyed by name.
    pub outputs: BTreeMap<String, SchemaEntry>,
    /// Output groups in document order.
    pub groups: Vec<OutputGroup>,
}

// --- Terraform outputs ---

/// Read and parse the Terraform outputs file.
///
/// # Errors
///
/// Returns `MapError::Read` if the file cannot be read and `MapError::Hcl` if
/// it is not valid HCL.
pub fn load_terraform_outputs(path: &Path) -> Result<Vec<OutputDecl>, MapError> {
    let text = read_file(path)?;
    parse_terraform_outputs(&text, path)
}

/// Parse HCL text into output declarations, preserving declaration order.
///
/// `path` is only used for error reporting.
///
/// # Errors
///
/// Returns `MapError::Hcl` on a parse or expression formatting failure.
pub fn parse_terraform_outputs(text: &str, path: &Path) -> Result<Vec<OutputDecl>, MapError> {
    let hcl_err = |source: hcl::Error| MapError::Hcl {
        path: path.to_path_buf(),
        source,
    };

    let body: Body = hcl::parse(text).map_err(hcl_err)?;

    let mut outputs = Vec::new();
    for block in body.blocks().filter(|b| b.identifier.as_str() == "output") {
        let Some(name) = output_name(block) else {
            continue;
        };

        let mut value = None;
        let mut sensitive = false;
        for attr in block.body.attributes() {
            match attr.key.as_str() {
                "value" => value = Some(expr_to_value(&attr.expr).map_err(hcl_err)?),
                "sensitive" => sensitive = is_true(&attr.expr),
                _ => {}
            }
        }

        outputs.push(OutputDecl {
            name,
            value,
            sensitive,
        });
    }
    Ok(outputs)
}

/// `true`, or the string `"true"` that Terraform converts to a bool.
fn is_true(expr: &Expression) -> bool {
    match expr {
        Expression::Bool(b) => *b,
        Expression::String(s) => s == "true",
        _ => false,
    }
}

/// An `output` block must carry exactly one label.
fn output_name(block: &Block) -> Option<String> {
    match block.labels.as_slice() {
        [label] => Some(label.as_str().to_owned()),
        _ => None,
    }
}

/// Convert an HCL expression into a [`Value`].
///
/// Literals map directly. Templates keep their template text. Everything else
/// (references, calls, conditionals, …) is formatted back to HCL and wrapped
/// in a single `${…}` layer.
fn expr_to_value(expr: &Expression) -> Result<Value, hcl::Error> {
    Ok(match expr {
        Expression::Null => Value::Null,
        Expression::Bool(b) => Value::Bool(*b),
        Expression::Number(n) => number_to_value(n),
        Expression::String(s) => Value::String(s.clone()),
        Expression::Array(items) => Value::List(
            items
                .iter()
                .map(expr_to_value)
                .collect::<Result<_, _>>()?,
        ),
        Expression::Object(object) => {
            let mut entries = Vec::with_capacity(object.len());
            for (key, value) in object {
                entries.push((key.to_string(), expr_to_value(value)?));
            }
            Value::Map(entries)
        }
        Expression::TemplateExpr(template) => match template.as_ref() {
            TemplateExpr::QuotedString(s) => Value::String(s.clone()),
            TemplateExpr::Heredoc(heredoc) => Value::String(heredoc.template.clone()),
        },
        other => Value::String(format!("${{{}}}", hcl::format::to_string(other)?)),
    })
}

fn number_to_value(n: &hcl::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or_else(|| Value::String(n.to_string()), Value::Number)
    }
}

// --- Schema ---

/// Read and parse the Resource Manager schema file.
///
/// # Errors
///
/// Returns `MapError::Read`, `MapError::Yaml`, or `MapError::SchemaShape` when
/// the root or the `outputs` field is not a mapping.
pub fn load_schema(path: &Path) -> Result<Schema, MapError> {
    let text = read_file(path)?;
    parse_schema(&text, path)
}

/// Parse schema YAML text.
///
/// A missing, null or non-list `outputGroups` is treated as an empty list.
///
/// # Errors
///
/// See [`load_schema`].
pub fn parse_schema(text: &str, path: &Path) -> Result<Schema, MapError> {
    let shape_err = |reason: &str| MapError::SchemaShape {
        path: path.to_path_buf(),
        reason: reason.to_owned(),
    };

    let doc: YamlValue = serde_yaml::from_str(text).map_err(|source| MapError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    let root = match &doc {
        YamlValue::Null => return Ok(Schema::default()),
        YamlValue::Mapping(map) => map,
        _ => return Err(shape_err("document root is not a mapping")),
    };

    let groups: Vec<OutputGroup> = match root.get("outputGroups") {
        Some(YamlValue::Sequence(items)) => items.iter().map(parse_group).collect(),
        _ => Vec::new(),
    };

    let mut outputs = BTreeMap::new();
    match root.get("outputs") {
        None | Some(YamlValue::Null) => {}
        Some(YamlValue::Mapping(map)) => {
            for (key, meta) in map {
                let Some(name) = scalar_text(key) else {
                    return Err(shape_err("`outputs` has a non-scalar key"));
                };
                let title = meta.get("title").and_then(scalar_text);
                let member_of = groups
                    .iter()
                    .filter(|g| g.outputs.contains(&name))
                    .map(|g| g.title.clone())
                    .collect();
                outputs.insert(
                    name,
                    SchemaEntry {
                        title,
                        groups: member_of,
                    },
                );
            }
        }
        Some(_) => return Err(shape_err("`outputs` is not a mapping")),
    }

    Ok(Schema { outputs, groups })
}

fn parse_group(item: &YamlValue) -> OutputGroup {
    let title = item
        .get("title")
        .and_then(scalar_text)
        .unwrap_or_default();
    let outputs = match item.get("outputs") {
        Some(YamlValue::Sequence(members)) => members
            .iter()
            .filter_map(|m| m.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    };
    OutputGroup { title, outputs }
}

/// Text of a scalar YAML node; `None` for null, sequences and mappings.
fn scalar_text(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Tagged(tagged) => scalar_text(&tagged.value),
        YamlValue::Null | YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

fn read_file(path: &Path) -> Result<String, MapError> {
    std::fs::read_to_string(path).map_err(|source| MapError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::value::summarise_value;

    const OUTPUTS_TF: &str = r#"
variable "region" {
  type = string
}

output "app_url" {
  description = "Public URL"
  value       = "${module.x.url}"
}

output "db_pass" {
  value     = "secret"
  sensitive = true
}

output "endpoints" {
  value = {
    api  = "https://${var.host}/api"
    port = 8443
  }
}

output "no_value" {
  description = "placeholder"
}
"#;

    const SCHEMA_YAML: &str = r"
title: Coolify
outputs:
  app_url:
    title: App URL
    type: link
  admin_user:
    title: Admin user
  bare:
outputGroups:
  - title: Application Information
    outputs:
      - app_url
      - admin_user
  - title: Network
    outputs:
      - app_url
";

    fn path() -> &'static Path {
        Path::new("test-input")
    }

    #[test]
    fn test_outputs_in_declaration_order() {
        let outputs = parse_terraform_outputs(OUTPUTS_TF, path()).unwrap();
        let names: Vec<&str> = outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["app_url", "db_pass", "endpoints", "no_value"]);
    }

    #[test]
    fn test_output_attributes() {
        let outputs = parse_terraform_outputs(OUTPUTS_TF, path()).unwrap();
        assert_eq!(
            outputs[0].value,
            Some(Value::String("${module.x.url}".to_owned()))
        );
        assert!(!outputs[0].sensitive);
        assert_eq!(outputs[1].value, Some(Value::String("secret".to_owned())));
        assert!(outputs[1].sensitive);
        assert_eq!(outputs[3].value, None);
    }

    #[test]
    fn test_object_value_keeps_key_order() {
        let outputs = parse_terraform_outputs(OUTPUTS_TF, path()).unwrap();
        let Some(Value::Map(entries)) = &outputs[2].value else {
            panic!("expected a map value, got {:?}", outputs[2].value);
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["api", "port"]);
        assert_eq!(entries[1].1, Value::Number(8443.into()));
    }

    #[test]
    fn test_reference_expression_is_wrapped() {
        let text = "output \"id\" {\n  value = module.app.id\n}\n";
        let outputs = parse_terraform_outputs(text, path()).unwrap();
        let Some(Value::String(s)) = &outputs[0].value else {
            panic!("expected a string value");
        };
        assert!(s.starts_with("${"), "got {s}");
        assert!(s.contains("module.app.id"), "got {s}");
    }

    fn single_value(text: &str) -> Value {
        let outputs = parse_terraform_outputs(text, path()).unwrap();
        assert_eq!(outputs.len(), 1);
        outputs[0].value.clone().unwrap()
    }

    #[test]
    fn test_heredoc_keeps_template_text() {
        let text = "output \"d\" {\n  value = <<EOT\nline one ${var.x}\nEOT\n}\n";
        let value = single_value(text);
        let Value::String(template) = &value else {
            panic!("expected a string value, got {value:?}");
        };
        assert!(template.starts_with("line one ${var.x}"), "got {template}");
        assert_eq!(summarise_value(&value), "line one var.x");
    }

    #[test]
    fn test_function_call_is_wrapped() {
        let value = single_value("output \"j\" {\n  value = join(\",\", var.list)\n}\n");
        assert_eq!(summarise_value(&value), "join(\",\", var.list)");
    }

    #[test]
    fn test_conditional_is_wrapped() {
        let value = single_value("output \"c\" {\n  value = var.on ? \"yes\" : \"no\"\n}\n");
        let summary = summarise_value(&value);
        assert!(summary.starts_with("var.on ?"), "got {summary}");
        assert!(summary.contains(':'), "got {summary}");
        assert!(!summary.starts_with("${"), "got {summary}");
    }

    #[test]
    fn test_for_expression_is_wrapped() {
        let value =
            single_value("output \"f\" {\n  value = [for s in var.names : upper(s)]\n}\n");
        let Value::String(s) = &value else {
            panic!("expected a string value, got {value:?}");
        };
        assert!(s.starts_with("${["), "got {s}");
        assert!(s.contains("for s in var.names"), "got {s}");
        assert!(s.contains("upper(s)"), "got {s}");
    }

    #[test]
    fn test_quoted_object_key() {
        let value = single_value("output \"o\" {\n  value = { \"quoted\" = 1, bare = 2.5 }\n}\n");
        assert_eq!(summarise_value(&value), r#"{"quoted":1,"bare":2.5}"#);
    }

    #[test]
    fn test_adjacent_interpolations_strip_outer_layer_only() {
        let value = single_value("output \"p\" {\n  value = \"${a}-${b}\"\n}\n");
        assert_eq!(summarise_value(&value), "a}-${b");
    }

    #[test]
    fn test_sensitive_forms() {
        let text = r#"
output "literal" {
  value     = 1
  sensitive = true
}

output "string" {
  value     = 2
  sensitive = "true"
}

output "off" {
  value     = 3
  sensitive = false
}

output "reference" {
  value     = 4
  sensitive = var.is_secret
}
"#;
        let flags: Vec<bool> = parse_terraform_outputs(text, path())
            .unwrap()
            .iter()
            .map(|o| o.sensitive)
            .collect();
        assert_eq!(flags, [true, true, false, false]);
    }

    #[test]
    fn test_invalid_hcl_is_an_error() {
        let err = parse_terraform_outputs("output \"x\" {", path()).unwrap_err();
        assert!(matches!(err, MapError::Hcl { .. }));
    }

    #[test]
    fn test_schema_outputs_and_groups() {
        let schema = parse_schema(SCHEMA_YAML, path()).unwrap();
        assert_eq!(schema.outputs.len(), 3);
        assert_eq!(
            schema.outputs["app_url"].title.as_deref(),
            Some("App URL")
        );
        assert_eq!(schema.outputs["bare"].title, None);
        assert_eq!(
            schema.outputs["app_url"].groups,
            ["Application Information", "Network"]
        );
        assert_eq!(schema.groups.len(), 2);
        assert_eq!(schema.groups[0].outputs, ["app_url", "admin_user"]);
    }

    #[test]
    fn test_missing_output_groups_is_empty() {
        let schema = parse_schema("outputs:\n  a:\n    title: A\n", path()).unwrap();
        assert!(schema.groups.is_empty());
    }

    #[test]
    fn test_malformed_output_groups_is_empty() {
        let schema = parse_schema("outputs: {}\noutputGroups: nope\n", path()).unwrap();
        assert!(schema.groups.is_empty());
        assert!(schema.outputs.is_empty());
    }

    #[test]
    fn test_empty_document_is_empty_schema() {
        assert_eq!(parse_schema("", path()).unwrap(), Schema::default());
    }

    #[test]
    fn test_non_mapping_root_is_an_error() {
        let err = parse_schema("- a\n- b\n", path()).unwrap_err();
        assert!(matches!(err, MapError::SchemaShape { .. }));
    }

    #[test]
    fn test_non_mapping_outputs_is_an_error() {
        let err = parse_schema("outputs: [a, b]\n", path()).unwrap_err();
        assert!(matches!(err, MapError::SchemaShape { .. }));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let err = parse_schema("outputs: [unclosed\n", path()).unwrap_err();
        assert!(matches!(err, MapError::Yaml { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_schema(&dir.path().join("schema.yaml")).unwrap_err();
        assert!(matches!(err, MapError::Read { .. }));
        let err = load_terraform_outputs(&dir.path().join("outputs.tf")).unwrap_err();
        assert!(matches!(err, MapError::Read { .. }));
    }
}
