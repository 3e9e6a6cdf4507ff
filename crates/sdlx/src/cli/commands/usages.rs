//! Implementation of `sdlx usages`.

use std::process::ExitCode;

use sdlx_schema::{Resolver, Usage, is_builtin_scalar};
use serde::Serialize;

use crate::cli::{
    args::UsagesCommand,
    context::CommandContext,
    output::{dim, header, print_json, table, warning},
};

/// JSON output for `sdlx usages`.
#[derive(Serialize)]
struct JsonUsages<'a> {
    /// The type that was looked up.
    type_name: &'a str,
    /// Whether the schema defines the type.
    defined: bool,
    /// Every reference, in discovery order.
    usages: &'a [Usage],
}

/// Shows every place a type is referenced.
pub fn run(ctx: &CommandContext, cmd: &UsagesCommand) -> ExitCode {
    let schema = match ctx.load_schema(&cmd.schema) {
        Ok(schema) => schema,
        Err(code) => return code,
    };

    let resolver = Resolver::new(&schema.model);
    let name = cmd.type_name.as_str();
    let usages = resolver.resolve_usages(name);
    let defined = resolver.resolve_type(name).is_ok();

    if cmd.json {
        return print_json(&JsonUsages {
            type_name: name,
            defined,
            usages,
        });
    }

    if !defined && !is_builtin_scalar(name) {
        println!("{}", warning(&format!("{name} is not defined in this schema")));
    }

    if usages.is_empty() {
        println!("{}", dim(&format!("No usages of {name}.")));
        return ExitCode::SUCCESS;
    }

    println!("{}", header(&format!("{name} ({} usages)", usages.len())));
    let mut t = table(&["Path", "Parent", "Kind"]);
    for usage in usages {
        t.add_row(vec![
            usage.path.clone(),
            usage.parent_type.clone(),
            usage.parent_kind.to_string(),
        ]);
    }
    println!("{t}");

    ExitCode::SUCCESS
}
