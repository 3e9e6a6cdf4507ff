//! Clap argument definitions for the `sdlx` CLI.

use clap::{Args, Parser, Subcommand};
use sdlx_nav::Category;

/// Parse a browse category from a string.
fn parse_category(s: &str) -> Result<Category, String> {
    s.parse().map_err(|e: sdlx_nav::UnknownCategory| e.to_string())
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sdlx")]
#[command(about = "Schema explorer - browse, cross-reference and search GraphQL SDL")]
pub struct Cli {
    /// Log debug output to stderr (overridden by SDLX_LOG)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `sdlx ls`.
#[derive(Args, Debug, Clone)]
pub struct LsCommand {
    /// Category to list: query, mutation, object, input, enum, scalar,
    /// interface, union or directive
    #[arg(value_parser = parse_category)]
    pub category: Category,

    /// Configured schema id or path to a schema file
    pub schema: String,

    /// Show descriptions and field counts.
    #[arg(short = 'l', long)]
    pub long: bool,
}

/// Arguments for `sdlx usages`.
#[derive(Args, Debug, Clone)]
pub struct UsagesCommand {
    /// Type name to look up
    pub type_name: String,

    /// Configured schema id or path to a schema file
    pub schema: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sdlx resolve`.
#[derive(Args, Debug, Clone)]
pub struct ResolveCommand {
    /// Reference to resolve: `Type`, `Type.field`, `Query.field` or `@directive`
    pub reference: String,

    /// Configured schema id or path to a schema file
    pub schema: String,
}

/// Arguments for `sdlx walk`.
#[derive(Args, Debug, Clone)]
pub struct WalkCommand {
    /// Configured schema id or path to a schema file
    pub schema: String,

    /// Category to start in
    #[arg(short = 'c', long, value_parser = parse_category, default_value = "query")]
    pub category: Category,

    /// Search query that fills the search category
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Steps: an item name to open and enter, `/text` to filter, or a key such as `h`, `tab` or `ctrl+r`
    pub steps: Vec<String>,
}

/// Arguments for `sdlx index`.
#[derive(Args, Debug, Clone)]
pub struct IndexCommand {
    /// Configured schema id or path to a schema file
    pub schema: String,

    /// Index id to use instead of the schema's id
    #[arg(long)]
    pub id: Option<String>,
}

/// Arguments for `sdlx search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Configured schema id or path to a schema file
    pub schema: String,

    /// Search terms (any term may match)
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Maximum results to return [default: settings.default_limit]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Fuzzy matching edit distance (0=exact, 1-2=fuzzy) [default: search.fuzzy_distance]
    #[arg(short = 'f', long)]
    pub fuzzy: Option<u8>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sdlx remove`.
#[derive(Args, Debug, Clone)]
pub struct RemoveCommand {
    /// Index id to delete
    pub id: String,
}

/// Arguments for `sdlx status`.
#[derive(Args, Debug, Clone)]
pub struct StatusCommand {
    /// Configured schema id or path to a schema file [default: all configured schemas]
    pub schema: Option<String>,
}

/// Arguments for `sdlx init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sdlx.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sdlx` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List the entities of one category
    Ls(LsCommand),

    /// Show every place a type is referenced
    Usages(UsagesCommand),

    /// Resolve a type, field or directive reference to its definition
    Resolve(ResolveCommand),

    /// Drive the panel navigator through a sequence of steps
    #[command(after_help = "\
STEPS:
  NAME        Select NAME in the focused panel, open it and move into it
  /TEXT       Keep only items matching TEXT in the focused panel
  l, right    Move focus forward
  h, left     Move focus backward
  enter       Open the selected item
  tab         Next category
  shift+tab   Previous category
  ctrl+r      Reset the panels

EXAMPLES:
  sdlx walk schema.graphql --category query user friends
  sdlx walk api -c object User h tab")]
    Walk(WalkCommand),

    /// Build or rebuild the search index for a schema
    Index(IndexCommand),

    /// Search names, paths and descriptions
    Search(SearchCommand),

    /// Delete a search index
    Remove(RemoveCommand),

    /// Show configuration and index status
    Status(StatusCommand),

    /// Print the effective configuration
    Config,

    /// Initialize sdlx configuration in current directory
    Init(InitCommand),
}

/// Parses command-line arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
