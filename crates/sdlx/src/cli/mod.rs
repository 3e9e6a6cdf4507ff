//! CLI support for the `sdlx` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
pub mod panels;

pub use context::CommandContext;
