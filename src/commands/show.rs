/// `show` command: print the mapping rows.
use crate::cli::OutputCtx;
use crate::cli::output::write_rows;
use crate::mapping::{MapError, SourcePaths};

use super::build_report;

/// Run `output-mapping show`.
///
/// # Errors
///
/// Returns `MapError` on read or parse failure.
pub fn run(paths: &SourcePaths, ctx: &OutputCtx) -> Result<(), MapError> {
    let report = build_report(paths, ctx)?;
    write_rows(&report.rows, ctx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{quiet, write_fixture};

    #[test]
    fn test_show_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture(dir.path());
        run(&paths, &quiet()).unwrap();
        assert!(!paths.target.exists());
    }
}
