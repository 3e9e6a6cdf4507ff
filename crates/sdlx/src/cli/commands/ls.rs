//! Implementation of `sdlx ls`.

use std::process::ExitCode;

use sdlx_nav::{Category, ListItem};
use sdlx_schema::Resolver;

use crate::cli::{
    args::LsCommand,
    context::CommandContext,
    output::{dim, header, table},
    panels::category_panel,
};

/// Lists the entities of one category.
pub fn run(ctx: &CommandContext, cmd: &LsCommand) -> ExitCode {
    if cmd.category == Category::Search {
        eprintln!("error: the search category has no fixed listing");
        eprintln!("Use 'sdlx search {} <query>' instead.", cmd.schema);
        return ExitCode::FAILURE;
    }

    let schema = match ctx.load_schema(&cmd.schema) {
        Ok(schema) => schema,
        Err(code) => return code,
    };

    let resolver = Resolver::new(&schema.model);
    let panel = category_panel(resolver, cmd.category, &[]);

    if panel.is_empty() {
        println!("{}", dim(&format!("No {} entries.", cmd.category)));
        return ExitCode::SUCCESS;
    }

    if cmd.long {
        println!("{}", header(panel.title()));
        let mut t = table(&["Name", "Type", "Description"]);
        for item in panel.items() {
            t.add_row(vec![item.title(), item.detail(), item.description()]);
        }
        println!("{t}");
    } else {
        for item in panel.items() {
            println!("{} {}", item.title(), dim(item.detail()));
        }
    }

    ExitCode::SUCCESS
}
