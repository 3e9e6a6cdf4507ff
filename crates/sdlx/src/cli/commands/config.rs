//! Implementation of `sdlx config`.

use std::process::ExitCode;

use crate::cli::{
    context::CommandContext,
    output::{dim, rule, subheader},
};

/// Shows effective configuration settings and configured schemas.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    let settings = match config.settings_to_toml() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", subheader("Effective settings:"));
    println!("{}", rule(40));
    print!("{settings}");
    println!("{}", rule(40));

    println!("{}", subheader("Schemas:"));
    if config.schemas.is_empty() {
        println!("   {}", dim("(none defined)"));
    }
    for schema in &config.schemas {
        let scope = if schema.is_global { "global" } else { "local" };
        println!(
            "   {} {} {}",
            schema.id,
            dim(&format!("({scope})")),
            dim(&format!("-> {}", schema.path.display()))
        );
    }

    ExitCode::SUCCESS
}
