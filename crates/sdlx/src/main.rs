//! Command-line interface for the `sdlx` schema explorer.

use std::process::ExitCode;

use sdlx::{
    cli::{
        CommandContext,
        args::{Commands, parse_cli},
        commands,
    },
    logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
