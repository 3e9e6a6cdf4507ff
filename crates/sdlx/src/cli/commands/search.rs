//! Implementation of `sdlx search`.

use std::process::ExitCode;

use sdlx_index::{IndexError, SearchHit};
use serde::Serialize;

use crate::cli::{
    args::SearchCommand,
    context::{CommandContext, ensure_index_fresh, index_or_failure},
    output::{dim, print_json, table},
};

/// JSON output for `sdlx search`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// Schema id searched.
    schema: &'a str,
    /// The query string.
    query: &'a str,
    /// Total hits returned.
    total_matches: usize,
    /// Hits by descending score.
    results: &'a [SearchHit],
}

/// Searches a schema, indexing it first when the index is missing or stale.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let schema = match ctx.load_schema(&cmd.schema) {
        Ok(schema) => schema,
        Err(code) => return code,
    };
    let engine = match ctx.engine(cmd.fuzzy) {
        Ok(engine) => engine,
        Err(code) => return code,
    };
    if let Err(code) = ensure_index_fresh(&engine, &schema) {
        return code;
    }

    let query = cmd.queries.join(" ");
    let limit = cmd.limit.unwrap_or(ctx.config.settings.default_limit);

    let mut result = engine.search(&schema.id, &query, limit);
    if matches!(result, Err(IndexError::Unavailable { .. })) {
        // Removed between the freshness check and the search.
        let hash = engine.fingerprint(&schema.source);
        if let Err(code) = index_or_failure(&engine, &schema.id, &schema, &hash) {
            return code;
        }
        result = engine.search(&schema.id, &query, limit);
    }

    let hits = match result {
        Ok(hits) => hits,
        Err(e) => {
            eprintln!("error: search failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(&JsonSearchOutput {
            schema: &schema.id,
            query: &query,
            total_matches: hits.len(),
            results: &hits,
        });
    }

    if hits.is_empty() {
        println!("{}", dim("No results."));
        return ExitCode::SUCCESS;
    }

    let mut t = table(&["Score", "Kind", "Path", "Description"]);
    for hit in &hits {
        t.add_row(vec![
            format!("{:.2}", hit.score),
            hit.kind.to_string(),
            hit.path.clone(),
            hit.description.clone(),
        ]);
    }
    println!("{t}");

    ExitCode::SUCCESS
}
