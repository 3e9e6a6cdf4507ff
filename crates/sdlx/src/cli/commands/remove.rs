//! Implementation of `sdlx remove`.

use std::process::ExitCode;

use crate::cli::{args::RemoveCommand, context::CommandContext, output::dim};

/// Deletes a search index. Removing an index that does not exist succeeds.
pub fn run(ctx: &CommandContext, cmd: &RemoveCommand) -> ExitCode {
    let engine = match ctx.engine(None) {
        Ok(engine) => engine,
        Err(code) => return code,
    };

    let existed = engine.exists(&cmd.id);
    if let Err(e) = engine.remove(&cmd.id) {
        eprintln!("error: failed to remove index: {e}");
        return ExitCode::FAILURE;
    }

    if existed {
        println!("Removed index '{}'", cmd.id);
    } else {
        println!("{}", dim(&format!("No index for '{}'.", cmd.id)));
    }
    ExitCode::SUCCESS
}
