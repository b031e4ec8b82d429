/// Mapping domain layer: loading, reconciliation and report rendering.
pub mod config;
pub mod errors;
pub mod loader;
pub mod reconcile;
pub mod render;
pub mod value;

pub use config::SourcePaths;
pub use errors::MapError;
pub use loader::{load_schema, load_terraform_outputs};
pub use reconcile::{Report, ReportRow, reconcile};
pub use render::{render_markdown, write_report};
