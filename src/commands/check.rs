/// `check` command: verify the report on disk matches the inputs.
use crate::cli::OutputCtx;
use crate::cli::output::write_checked;
use crate::mapping::{MapError, SourcePaths, render_markdown};
use crate::types::RunOutput;

use super::build_report;

/// Run `output-mapping check`. Never writes.
///
/// # Errors
///
/// Returns `MapError::Stale` when the target is missing or differs from a
/// fresh rendering, and other `MapError`s on read or parse failure.
pub fn run(paths: &SourcePaths, ctx: &OutputCtx) -> Result<(), MapError> {
    let report = build_report(paths, ctx)?;

    let _t_render = ctx.timer("render");
    let expected = render_markdown(&report);
    drop(_t_render);

    let stale = || MapError::Stale {
        path: paths.target.clone(),
    };
    let current = match std::fs::read_to_string(&paths.target) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(stale()),
        Err(source) => {
            return Err(MapError::Read {
                path: paths.target.clone(),
                source,
            });
        }
    };

    if current != expected {
        return Err(stale());
    }

    write_checked(&RunOutput::from_report(&report, &paths.target), ctx);
    Ok(())
}
