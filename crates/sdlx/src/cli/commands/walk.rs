//! Implementation of `sdlx walk`.
//!
//! Replays a sequence of steps against a [`NavigationManager`] over schema
//! panels and prints where the walk ended: the category, the breadcrumb
//! trail and the focused panel.

use std::process::ExitCode;

use sdlx_index::SearchHit;
use sdlx_nav::{
    Category, CategorySelector, ListItem, NavAction, NavigationManager, Panel, binding_for,
};
use sdlx_schema::Resolver;
use tracing::debug;

use crate::cli::{
    args::WalkCommand,
    context::{CommandContext, LoadedSchema, ensure_index_fresh},
    output::{breadcrumb, dim, header, subheader, table},
    panels::{SchemaPanel, category_panel},
};

/// Walks the schema panels and prints the final navigation state.
pub fn run(ctx: &CommandContext, cmd: &WalkCommand) -> ExitCode {
    let schema = match ctx.load_schema(&cmd.schema) {
        Ok(schema) => schema,
        Err(code) => return code,
    };

    let hits = match &cmd.query {
        Some(query) => match search_hits(ctx, &schema, query) {
            Ok(hits) => hits,
            Err(code) => return code,
        },
        None => Vec::new(),
    };

    // The search category is only offered when there is something to show.
    let selector = if cmd.query.is_some() {
        CategorySelector::new()
    } else {
        CategorySelector::browse_only()
    };

    let resolver = Resolver::new(&schema.model);
    let visible = ctx.config.settings.visible_panels.max(1);
    let mut nav = NavigationManager::with_selector(visible, selector);

    if !nav.switch_category(cmd.category) {
        eprintln!("error: category {} needs --query", cmd.category);
        return ExitCode::FAILURE;
    }
    nav.set_current_panel(category_panel(resolver, cmd.category, &hits));

    for step in &cmd.steps {
        if let Err(message) = apply_step(&mut nav, resolver, &hits, step) {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    }

    print_state(&nav);
    ExitCode::SUCCESS
}

/// Runs one step: a bound key, a `/text` filter, or the name of an item to
/// open and enter.
fn apply_step<'a>(
    nav: &mut NavigationManager<SchemaPanel<'a>>,
    resolver: Resolver<'a>,
    hits: &[SearchHit],
    step: &str,
) -> Result<(), String> {
    if let Some(binding) = binding_for(step) {
        let moved = nav.apply(binding.action);
        debug!(step, action = ?binding.action, moved, "walk step");

        let repopulate = matches!(
            binding.action,
            NavAction::NextCategory | NavAction::PreviousCategory | NavAction::Search | NavAction::Reset
        );
        if moved && repopulate {
            nav.set_current_panel(category_panel(resolver, nav.current_category(), hits));
        }
        return Ok(());
    }

    let Some(panel) = nav.current_panel_mut() else {
        return Err("no panel is focused".to_string());
    };

    if let Some(text) = step.strip_prefix('/') {
        let filtered = panel.filtered(text);
        debug!(step, remaining = filtered.items().len(), "walk filter");
        nav.set_current_panel(filtered);
        return Ok(());
    }

    if !panel.select_by_name(step) {
        let title = panel.title().to_string();
        return Err(format!("no item named '{step}' in {title}"));
    }
    if !nav.open_selected() {
        return Err(format!("'{step}' has nothing to open"));
    }
    nav.navigate_forward();
    debug!(step, position = nav.position(), "walk step");
    Ok(())
}

/// Runs the walk's search query, indexing the schema first if needed.
fn search_hits(
    ctx: &CommandContext,
    schema: &LoadedSchema,
    query: &str,
) -> Result<Vec<SearchHit>, ExitCode> {
    let engine = ctx.engine(None)?;
    ensure_index_fresh(&engine, schema)?;
    engine
        .search(&schema.id, query, ctx.config.settings.default_limit)
        .map_err(|e| {
            eprintln!("error: search failed: {e}");
            ExitCode::FAILURE
        })
}

/// Prints the category, breadcrumbs and focused panel.
fn print_state(nav: &NavigationManager<SchemaPanel<'_>>) {
    let categories: Vec<String> = nav
        .all_categories()
        .iter()
        .map(|&c| {
            if c == nav.current_category() {
                format!("[{c}]")
            } else {
                dim(c.label())
            }
        })
        .collect();
    println!("{}", categories.join(" "));

    let trail = breadcrumb(nav.breadcrumbs());
    if trail.is_empty() {
        println!("{} {}", subheader("Path:"), dim("(top)"));
    } else {
        println!("{} {trail}", subheader("Path:"));
    }
    println!();

    let Some(panel) = nav.current_panel() else {
        return;
    };
    println!("{}", header(panel.title()));
    if panel.is_empty() {
        println!("{}", dim("(empty)"));
        return;
    }

    let selected = panel.selected_label();
    let mut t = table(&["", "Name", "Type", "Description"]);
    for item in panel.items() {
        let marker = if selected.as_deref() == Some(item.ref_name()) { ">" } else { "" };
        t.add_row(vec![marker, item.title(), item.detail(), item.description()]);
    }
    println!("{t}");

    if let Some(next) = nav.next_panel().filter(|p| !p.is_empty()) {
        println!("{} {}", dim("next:"), next.title());
    }
}
