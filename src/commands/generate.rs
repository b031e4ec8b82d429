/// `generate` command: regenerate the mapping report.
use crate::cli::OutputCtx;
use crate::cli::output::write_generated;
use crate::mapping::{MapError, SourcePaths, render_markdown, write_report};
use crate::types::RunOutput;

use super::build_report;

/// Run `output-mapping generate` (also the default with no subcommand).
///
/// # Errors
///
/// Returns `MapError` on read, parse, or write failure.
pub fn run(paths: &SourcePaths, ctx: &OutputCtx) -> Result<(), MapError> {
    let report = build_report(paths, ctx)?;

    let _t_render = ctx.timer("render");
    let markdown = render_markdown(&report);
    drop(_t_render);

    let _t_write = ctx.timer("write");
    write_report(&paths.target, &markdown)?;
    drop(_t_write);

    write_generated(&RunOutput::from_report(&report, &paths.target), ctx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{quiet, write_fixture};

    #[test]
    fn test_generate_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture(dir.path());
        run(&paths, &quiet()).unwrap();

        let doc = std::fs::read_to_string(&paths.target).unwrap();
        assert!(doc.contains("| `app_url` | ✅ Yes | App URL | false | `module.x.url` |"));
        assert!(doc.contains("| `db_pass` | ❌ No | (auto-labelled) | true | `secret` |"));
        assert!(doc.contains("- Outputs missing from `schema.yaml`: `db_pass`."));
        assert!(doc.contains("- No extra outputs are declared in `schema.yaml`."));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture(dir.path());

        run(&paths, &quiet()).unwrap();
        let first = std::fs::read(&paths.target).unwrap();
        run(&paths, &quiet()).unwrap();
        let second = std::fs::read(&paths.target).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture(dir.path());
        std::fs::write(&paths.target, "hand-edited notes\n").unwrap();

        run(&paths, &quiet()).unwrap();
        let doc = std::fs::read_to_string(&paths.target).unwrap();
        assert!(!doc.contains("hand-edited"));
    }

    #[test]
    fn test_generate_fails_on_bad_hcl() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture(dir.path());
        std::fs::write(&paths.outputs, "output \"x\" {\n").unwrap();

        let err = run(&paths, &quiet()).unwrap_err();
        assert!(matches!(err, MapError::Hcl { .. }));
        assert!(!paths.target.exists());
    }
}
