//! Implementation of `sdlx resolve`.

use std::process::ExitCode;

use sdlx_nav::ListItem;
use sdlx_schema::{
    DirectiveDefinition, Field, InputValue, NotFoundError, Resolver, RootOperation,
    TypeDefinition, TypeRef,
};

use crate::cli::{
    args::ResolveCommand,
    context::CommandContext,
    output::{dim, header, subheader, warning},
    panels::type_panel,
};

/// A parsed `sdlx resolve` argument.
#[derive(Debug, PartialEq, Eq)]
enum Reference<'a> {
    /// `@name`
    Directive(&'a str),
    /// `Parent.field`
    Member(&'a str, &'a str),
    /// A bare type name.
    Type(&'a str),
}

impl<'a> Reference<'a> {
    /// Splits a reference string into its form.
    fn parse(text: &'a str) -> Self {
        if let Some(name) = text.strip_prefix('@') {
            return Self::Directive(name);
        }
        match text.split_once('.') {
            Some((parent, field)) => Self::Member(parent, field),
            None => Self::Type(text),
        }
    }
}

/// Resolves a type, field or directive reference and prints its definition.
pub fn run(ctx: &CommandContext, cmd: &ResolveCommand) -> ExitCode {
    let schema = match ctx.load_schema(&cmd.schema) {
        Ok(schema) => schema,
        Err(code) => return code,
    };
    let resolver = Resolver::new(&schema.model);

    match Reference::parse(&cmd.reference) {
        Reference::Directive(name) => report(resolver.resolve_directive(name).map(print_directive)),
        Reference::Member(parent, field) => resolve_member(resolver, parent, field),
        Reference::Type(name) => report(
            resolver
                .resolve_type(name)
                .map(|definition| print_type(resolver, definition)),
        ),
    }
}

/// Converts a lookup outcome to an exit code. Built-in names are reported as
/// such rather than as errors.
fn report(result: Result<(), NotFoundError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_builtin() => {
            println!("{} {}", header(&e.name), dim(&format!("(built-in {})", e.kind)));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Maps a parent name to a root operation, accepting renamed roots.
fn root_operation(resolver: Resolver<'_>, parent: &str) -> Option<RootOperation> {
    let model = resolver.model();
    if parent == RootOperation::Query.name() || parent == model.query_type_name() {
        Some(RootOperation::Query)
    } else if parent == RootOperation::Mutation.name() || parent == model.mutation_type_name() {
        Some(RootOperation::Mutation)
    } else {
        None
    }
}

/// Resolves `parent.field` against a root operation or a named type.
fn resolve_member(resolver: Resolver<'_>, parent: &str, field: &str) -> ExitCode {
    if let Some(root) = root_operation(resolver, parent) {
        return report(
            resolver
                .resolve_query_or_mutation_field(root, field)
                .map(|found| print_field(resolver, root.name(), found)),
        );
    }

    let definition = match resolver.resolve_type(parent) {
        Ok(definition) => definition,
        Err(e) => return report(Err(e)),
    };

    if let Some(found) = definition.field(field) {
        print_field(resolver, parent, found);
        return ExitCode::SUCCESS;
    }
    if let Some(value) = definition.input_fields().iter().find(|v| v.name == field) {
        print_input_value(resolver, parent, value);
        return ExitCode::SUCCESS;
    }

    eprintln!("error: {} {parent} has no field '{field}'", definition.kind().keyword());
    ExitCode::FAILURE
}

/// Describes where a declared type leads, falling back to its raw text.
fn type_target(resolver: Resolver<'_>, ty: &TypeRef) -> String {
    match resolver.resolve_type(ty.base_name()) {
        Ok(definition) => format!("{} ({})", ty, definition.kind().keyword()),
        Err(e) if e.is_builtin() => format!("{ty} (built-in)"),
        Err(_) => format!("{ty} {}", warning("(unresolved)")),
    }
}

/// Prints a field with its arguments and resolved type.
fn print_field(resolver: Resolver<'_>, parent: &str, field: &Field) {
    println!("{}", header(&format!("{parent}.{}", field.name)));
    println!("{}", field.signature());
    print_description(&field.description);
    if let Some(reason) = field.deprecation_reason() {
        println!("{}", warning(&format!("deprecated: {reason}")));
    }
    println!();
    println!("{} {}", subheader("Type:"), type_target(resolver, &field.ty));
    if !field.arguments.is_empty() {
        println!("{}", subheader("Arguments:"));
        for argument in &field.arguments {
            println!("   {}: {}", argument.name, type_target(resolver, &argument.ty));
        }
    }
}

/// Prints an input field with its resolved type.
fn print_input_value(resolver: Resolver<'_>, parent: &str, value: &InputValue) {
    println!("{}", header(&format!("{parent}.{}", value.name)));
    println!("{value}");
    print_description(&value.description);
    println!();
    println!("{} {}", subheader("Type:"), type_target(resolver, &value.ty));
}

/// Prints a named type with its contents and usage count.
fn print_type(resolver: Resolver<'_>, definition: &TypeDefinition) {
    println!(
        "{} {}",
        header(definition.name()),
        dim(definition.kind().keyword())
    );
    print_description(definition.description());
    println!();

    let panel = type_panel(resolver, definition);
    if !panel.is_empty() {
        println!("{}", subheader(&format!("{}:", panel.title())));
        for item in panel.items() {
            println!("   {} {}", item.title(), dim(item.detail()));
        }
    }

    let usages = resolver.resolve_usages(definition.name()).len();
    println!("{} {usages}", subheader("Usages:"));
}

/// Prints a directive definition.
fn print_directive(directive: &DirectiveDefinition) {
    println!("{}", header(&format!("@{}", directive.name)));
    print_description(&directive.description);
    println!();
    if !directive.arguments.is_empty() {
        println!("{}", subheader("Arguments:"));
        for argument in &directive.arguments {
            println!("   {argument}");
        }
    }
    let repeatable = if directive.repeatable { " (repeatable)" } else { "" };
    println!(
        "{} {}{}",
        subheader("Locations:"),
        directive.locations.join(" | "),
        dim(repeatable)
    );
}

/// Prints a description line, if any.
fn print_description(description: &str) {
    if !description.is_empty() {
        println!("{}", dim(description));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_forms() {
        assert_eq!(Reference::parse("@auth"), Reference::Directive("auth"));
        assert_eq!(Reference::parse("User.friends"), Reference::Member("User", "friends"));
        assert_eq!(Reference::parse("User"), Reference::Type("User"));
    }
}
