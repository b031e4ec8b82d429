/// Output formatting: JSON or human-readable status, row tables, errors.
use std::io::Write;

use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use crate::mapping::ReportRow;
use crate::types::{ErrorOutput, RunOutput};

/// Output context passed to all formatters.
pub struct OutputCtx {
    /// Emit JSON instead of human-readable text.
    pub json: bool,
    /// When true, print stage timing spans to stderr.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(json: bool, debug: bool) -> Self {
        Self { json, debug }
    }

    /// Start a named debug timer. Prints elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

// --- Run status ---

/// Write the result of `generate` to stdout.
pub fn write_generated(result: &RunOutput, ctx: &OutputCtx) {
    if ctx.json {
        print_json(result);
    } else {
        println!("Wrote {} ({} outputs)", result.target, result.outputs);
        print_finding_counts(result);
    }
}

/// Write the result of a successful `check` to stdout.
pub fn write_checked(result: &RunOutput, ctx: &OutputCtx) {
    if ctx.json {
        print_json(result);
    } else {
        println!("{} is up to date ({} outputs)", result.target, result.outputs);
        print_finding_counts(result);
    }
}

fn print_finding_counts(result: &RunOutput) {
    if !result.terraform_only.is_empty() {
        println!(
            "  missing from schema: {}",
            result.terraform_only.join(", ")
        );
    }
    if !result.schema_only.is_empty() {
        println!(
            "  missing from Terraform: {}",
            result.schema_only.join(", ")
        );
    }
}

// --- Rows ---

/// Write the mapping rows to stdout.
pub fn write_rows(rows: &[ReportRow], ctx: &OutputCtx) {
    if ctx.json {
        print_json(rows);
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(["OUTPUT", "DECLARED", "TITLE", "GROUPS", "SENSITIVE", "VALUE"]);
    for row in rows {
        table.add_row([
            Cell::new(&row.name),
            Cell::new(if row.declared { "yes" } else { "no" }),
            Cell::new(&row.title),
            Cell::new(row.groups.join(", ")),
            Cell::new(if row.sensitive { "✓" } else { "" }),
            Cell::new(&row.value_summary),
        ]);
    }
    println!("{table}");
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, json: bool) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    if json {
        let s = serde_json::to_string_pretty(err).unwrap_or_default();
        let _ = writeln!(out, "{s}");
    } else {
        let _ = writeln!(out, "Error: {}", err.error.message);
    }
}

// --- Debug timer ---

/// A RAII timer that prints elapsed milliseconds to stderr on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[debug] {}: {ms:.2}ms", self.label);
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}
