/// Generic structured value shared by both input documents, plus the value
/// summary shown in the report table.
use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Maximum length of a value summary, in characters.
pub const SUMMARY_MAX_CHARS: usize = 180;

/// Characters kept before the ellipsis when a summary is truncated.
const SUMMARY_KEEP_CHARS: usize = 177;

static INTERPOLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]*)\}").unwrap_or_else(|e| panic!("invalid interpolation regex: {e}"))
});

/// A parsed document value. Maps keep their declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Strip interpolation markers from every string in the value.
    #[must_use]
    pub fn cleaned(&self) -> Value {
        match self {
            Self::String(s) => Self::String(strip_interpolation(s)),
            Self::List(items) => Self::List(items.iter().map(Value::cleaned).collect()),
            Self::Map(entries) => Self::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.cleaned()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::List(_) | Self::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// Remove one outer `${…}` wrapper, then unwrap any remaining `${…}` markers.
///
/// `"${module.app.url}"` becomes `module.app.url`;
/// `"https://${var.host}/api"` becomes `https://var.host/api`.
#[must_use]
pub fn strip_interpolation(text: &str) -> String {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(trimmed);
    INTERPOLATION.replace_all(inner, "$1").into_owned()
}

/// Summarise a value for the report table.
///
/// Nested structures are serialized as compact JSON. Whitespace runs collapse
/// to a single space and the result is cut to [`SUMMARY_MAX_CHARS`] characters,
/// ending in `…` when truncated.
#[must_use]
pub fn summarise_value(value: &Value) -> String {
    let text = value.cleaned().to_string();
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= SUMMARY_MAX_CHARS {
        return collapsed;
    }

    let head: String = collapsed.chars().take(SUMMARY_KEEP_CHARS).collect();
    let mut summary = head.trim_end().to_owned();
    summary.push('…');
    summary
}
