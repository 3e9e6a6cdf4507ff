//! Implementation of `sdlx index`.

use std::process::ExitCode;

use crate::cli::{
    args::IndexCommand,
    context::{CommandContext, index_or_failure},
    output::{dim, success},
};

/// Builds or rebuilds the search index for a schema.
pub fn run(ctx: &CommandContext, cmd: &IndexCommand) -> ExitCode {
    let schema = match ctx.load_schema(&cmd.schema) {
        Ok(schema) => schema,
        Err(code) => return code,
    };
    let engine = match ctx.engine(None) {
        Ok(engine) => engine,
        Err(code) => return code,
    };

    let id = cmd.id.as_deref().unwrap_or(&schema.id);
    let hash = engine.fingerprint(&schema.source);
    let count = match index_or_failure(&engine, id, &schema, &hash) {
        Ok(count) => count,
        Err(code) => return code,
    };

    let location = engine
        .index_dir(id)
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    println!(
        "{} {count} records from {} as '{id}'",
        success("Indexed"),
        schema.path.display()
    );
    println!("{}", dim(&location));

    ExitCode::SUCCESS
}
