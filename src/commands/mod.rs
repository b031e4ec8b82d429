/// Command dispatch: routes `Command` variants to their implementations.
pub mod check;
pub mod generate;
pub mod show;

use crate::cli::{Command, OutputCtx};
use crate::mapping::{
    MapError, Report, SourcePaths, load_schema, load_terraform_outputs, reconcile,
};

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `MapError` on any command failure.
pub fn dispatch(command: Command, paths: &SourcePaths, ctx: &OutputCtx) -> Result<(), MapError> {
    match command {
        Command::Generate => generate::run(paths, ctx),
        Command::Check => check::run(paths, ctx),
        Command::Show => show::run(paths, ctx),
    }
}

/// Load both inputs and reconcile them.
///
/// # Errors
///
/// Returns `MapError` if either input is missing or malformed.
pub fn build_report(paths: &SourcePaths, ctx: &OutputCtx) -> Result<Report, MapError> {
    let _t_outputs = ctx.timer("load_outputs");
    let outputs = load_terraform_outputs(&paths.outputs)?;
    drop(_t_outputs);

    let _t_schema = ctx.timer("load_schema");
    let schema = load_schema(&paths.schema)?;
    drop(_t_schema);

    let _t_reconcile = ctx.timer("reconcile");
    Ok(reconcile(&outputs, &schema))
}
