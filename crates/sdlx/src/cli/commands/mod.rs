//! Command implementations and dispatch.

pub mod config;
pub mod index;
pub mod init;
pub mod ls;
pub mod remove;
pub mod resolve;
pub mod search;
pub mod status;
pub mod usages;
pub mod walk;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Ls(cmd) => ls::run(ctx, &cmd),
        Commands::Usages(cmd) => usages::run(ctx, &cmd),
        Commands::Resolve(cmd) => resolve::run(ctx, &cmd),
        Commands::Walk(cmd) => walk::run(ctx, &cmd),
        Commands::Index(cmd) => index::run(ctx, &cmd),
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Remove(cmd) => remove::run(ctx, &cmd),
        Commands::Status(cmd) => status::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
    }
}
