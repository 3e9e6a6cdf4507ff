//! Implementation of `sdlx status`.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use sdlx_config::{ConfigWarning, discover_config_files, discover_schema_files};
use sdlx_index::SearchEngine;

use crate::cli::{
    args::StatusCommand,
    context::CommandContext,
    output::{dim, subheader, table, warning},
};

/// Shows configuration files, schemas, index status, and validation warnings.
pub fn run(ctx: &CommandContext, cmd: &StatusCommand) -> ExitCode {
    let config = &ctx.config;
    let config_files = discover_config_files(&ctx.cwd);

    if config_files.is_empty() && cmd.schema.is_none() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("sdlx init")
        );
        return ExitCode::SUCCESS;
    }

    if !config_files.is_empty() {
        println!("{}", subheader("Config files:"));
        for path in &config_files {
            println!("   {}", path.display());
        }
        println!();
    }

    let schemas: Vec<(String, PathBuf)> = match &cmd.schema {
        Some(arg) => match ctx.schema_location(arg) {
            Ok(location) => vec![location],
            Err(code) => return code,
        },
        None => config
            .schemas
            .iter()
            .map(|s| (s.id.clone(), s.path.clone()))
            .collect(),
    };

    let engine = ctx
        .index_root()
        .ok()
        .and_then(|root| SearchEngine::new(root, &config.search.stemmer, 0).ok());

    match &engine {
        Some(engine) => println!(
            "{} {}",
            subheader("Index root:"),
            dim(&engine.root().display().to_string())
        ),
        None => println!("{} {}", subheader("Index root:"), warning("unavailable")),
    }
    println!();

    println!("{}", subheader("Schemas:"));
    if schemas.is_empty() {
        println!("   {}", dim("(none defined)"));
        let found = discover_schema_files(&ctx.cwd);
        if !found.is_empty() {
            println!();
            println!("{}", subheader("Schema files in this directory:"));
            for path in &found {
                println!("   {}", path.display());
            }
            println!("{}", dim("Hint: add them as [schema.<id>] tables in .sdlx.toml"));
        }
    } else {
        let mut t = table(&["Schema", "Path", "Index"]);
        for (id, path) in &schemas {
            let state = index_state(engine.as_ref(), id, path);
            t.add_row(vec![id.clone(), path.display().to_string(), state]);
        }
        println!("{t}");
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Describes the index of one schema relative to its current source.
fn index_state(engine: Option<&SearchEngine>, id: &str, path: &Path) -> String {
    let Some(engine) = engine else {
        return "unknown".to_string();
    };
    let Ok(source) = fs::read_to_string(path) else {
        return "source missing".to_string();
    };
    match engine.status(id, &engine.fingerprint(&source)) {
        Ok(status) => status.description().to_string(),
        Err(e) => e.to_string(),
    }
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        let hint = match w {
            ConfigWarning::NoVisiblePanels => "Hint: set [settings] visible_panels to 1 or more",
            ConfigWarning::ZeroSearchLimit => "Hint: set [settings] default_limit to 1 or more",
            ConfigWarning::UnknownStemmer { .. } => "Hint: use a supported [search] stemmer such as \"english\"",
            ConfigWarning::FuzzyDistanceTooLarge { .. } => "Hint: [search] fuzzy_distance must be 0, 1 or 2",
        };
        println!("{}", dim(hint));
    }
}
