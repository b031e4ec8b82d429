#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! output-mapping — cross-reference Terraform outputs with the Resource
//! Manager schema and keep the Application information mapping doc current.

mod cli;
mod commands;
mod mapping;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use mapping::SourcePaths;
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    let ctx = OutputCtx::new(cli.json, cli.debug);
    let paths = SourcePaths::resolve(
        &cli.root,
        cli.outputs.as_deref(),
        cli.schema.as_deref(),
        cli.target.as_deref(),
    );

    match commands::dispatch(cli.command.unwrap_or_default(), &paths, &ctx) {
        Ok(()) => {}
        Err(err) => {
            write_error(&ErrorOutput::from_map_error(&err), cli.json);
            std::process::exit(err.exit_code());
        }
    }
}
