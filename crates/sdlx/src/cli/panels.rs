//! Schema-backed panels for the navigator.
//!
//! [`SchemaItem`] adapts fields, types, directives, usages and search hits to
//! the navigator's [`ListItem`] capability. Opening an item resolves its type
//! name through a [`Resolver`]; names that do not resolve (built-in scalars,
//! root operations) open nothing, and the item keeps showing its raw type
//! string.

use sdlx_index::{RecordKind, SearchHit};
use sdlx_nav::{Category, ListItem, ListPanel};
use sdlx_schema::{
    DirectiveDefinition, EnumValue, Field, InputValue, ParentKind, Resolver, RootOperation,
    TypeDefinition, TypeKind, TypeRef, Usage,
};

/// A panel of schema items.
pub type SchemaPanel<'a> = ListPanel<SchemaItem<'a>>;

/// What opening an item shows.
#[derive(Debug, Clone, Copy)]
enum Opens<'a> {
    /// The definition named by the item's type name.
    Type,
    /// A directive's arguments.
    Directive(&'a DirectiveDefinition),
    /// Nothing; the item is a leaf.
    Nothing,
}

/// One row of a schema panel.
#[derive(Debug, Clone)]
pub struct SchemaItem<'a> {
    /// Display title.
    title: String,
    /// Type signature or kind shown beside the title.
    detail: String,
    /// Description, empty when absent.
    description: String,
    /// Name of the definition this item leads to.
    type_name: String,
    /// Stable identity used for breadcrumbs and selection.
    ref_name: String,
    /// Child panel behaviour.
    opens: Opens<'a>,
    /// Lookups for opening child panels.
    resolver: Resolver<'a>,
}

impl<'a> SchemaItem<'a> {
    /// An output field: opens its declared type.
    pub fn field(resolver: Resolver<'a>, field: &Field) -> Self {
        Self {
            title: field.name.clone(),
            detail: field.ty.to_string(),
            description: field.description.clone(),
            type_name: field.ty.base_name().to_string(),
            ref_name: field.name.clone(),
            opens: Opens::Type,
            resolver,
        }
    }

    /// An argument or input field: opens its declared type.
    pub fn input_value(resolver: Resolver<'a>, value: &InputValue) -> Self {
        let detail = match &value.default_value {
            Some(default) => format!("{} = {default}", value.ty),
            None => value.ty.to_string(),
        };
        Self {
            title: value.name.clone(),
            detail,
            description: value.description.clone(),
            type_name: value.ty.base_name().to_string(),
            ref_name: value.name.clone(),
            opens: Opens::Type,
            resolver,
        }
    }

    /// A named type: opens its contents.
    pub fn definition(resolver: Resolver<'a>, definition: &TypeDefinition) -> Self {
        Self {
            title: definition.name().to_string(),
            detail: definition.kind().keyword().to_string(),
            description: definition.description().to_string(),
            type_name: definition.name().to_string(),
            ref_name: definition.name().to_string(),
            opens: Opens::Type,
            resolver,
        }
    }

    /// A union member, by name.
    fn member(resolver: Resolver<'a>, name: &str) -> Self {
        let (detail, description) = match resolver.resolve_type(name) {
            Ok(definition) => (
                definition.kind().keyword().to_string(),
                definition.description().to_string(),
            ),
            Err(_) => (name.to_string(), String::new()),
        };
        Self {
            title: name.to_string(),
            detail,
            description,
            type_name: name.to_string(),
            ref_name: name.to_string(),
            opens: Opens::Type,
            resolver,
        }
    }

    /// An enum value; never opens.
    fn enum_value(resolver: Resolver<'a>, value: &EnumValue) -> Self {
        let detail = match value.deprecation_reason() {
            Some(reason) => format!("deprecated: {reason}"),
            None => String::new(),
        };
        Self {
            title: value.name.clone(),
            detail,
            description: value.description.clone(),
            type_name: String::new(),
            ref_name: value.name.clone(),
            opens: Opens::Nothing,
            resolver,
        }
    }

    /// A directive definition: opens its arguments.
    pub fn directive(resolver: Resolver<'a>, directive: &'a DirectiveDefinition) -> Self {
        let name = format!("@{}", directive.name);
        Self {
            title: name.clone(),
            detail: directive.locations.join(" | "),
            description: directive.description.clone(),
            type_name: directive.name.clone(),
            ref_name: name,
            opens: Opens::Directive(directive),
            resolver,
        }
    }

    /// A reference to a type: opens the definition holding it.
    pub fn usage(resolver: Resolver<'a>, usage: &Usage) -> Self {
        let opens = match usage.parent_kind {
            ParentKind::Directive => resolver
                .resolve_directive(&usage.parent_type)
                .map_or(Opens::Nothing, Opens::Directive),
            _ => Opens::Type,
        };
        Self {
            title: usage.path.clone(),
            detail: usage.parent_kind.to_string(),
            description: String::new(),
            type_name: usage.parent_type.clone(),
            ref_name: usage.path.clone(),
            opens,
            resolver,
        }
    }

    /// A search hit: opens the definition the hit leads to.
    pub fn hit(resolver: Resolver<'a>, hit: &SearchHit) -> Self {
        let (type_name, opens) = hit_target(resolver, hit);
        Self {
            title: hit.path.clone(),
            detail: hit.kind.to_string(),
            description: hit.description.clone(),
            type_name,
            ref_name: hit.path.clone(),
            opens,
            resolver,
        }
    }

    /// Returns the signature or kind shown beside the title.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl<'a> ListItem for SchemaItem<'a> {
    type Panel = SchemaPanel<'a>;

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn ref_name(&self) -> &str {
        &self.ref_name
    }

    fn open_panel(&self) -> Option<SchemaPanel<'a>> {
        match self.opens {
            Opens::Type => self
                .resolver
                .resolve_type(&self.type_name)
                .ok()
                .map(|definition| type_panel(self.resolver, definition)),
            Opens::Directive(directive) => Some(directive_panel(self.resolver, directive)),
            Opens::Nothing => None,
        }
    }
}

/// Finds what a search hit should open.
fn hit_target<'a>(resolver: Resolver<'a>, hit: &SearchHit) -> (String, Opens<'a>) {
    let parent = hit.path.split_once('.').map(|(parent, _)| parent);
    let field_type = |ty: &TypeRef| (ty.base_name().to_string(), Opens::Type);

    let target = match hit.kind {
        RecordKind::Query | RecordKind::Mutation => {
            let root = if hit.kind == RecordKind::Query {
                RootOperation::Query
            } else {
                RootOperation::Mutation
            };
            resolver
                .resolve_query_or_mutation_field(root, &hit.name)
                .ok()
                .map(|field| field_type(&field.ty))
        }
        RecordKind::Field => parent
            .and_then(|parent| resolver.resolve_type(parent).ok())
            .and_then(|definition| definition.field(&hit.name))
            .map(|field| field_type(&field.ty)),
        RecordKind::InputField => parent
            .and_then(|parent| resolver.resolve_type(parent).ok())
            .and_then(|definition| {
                definition
                    .input_fields()
                    .iter()
                    .find(|value| value.name == hit.name)
            })
            .map(|value| field_type(&value.ty)),
        RecordKind::Directive => resolver
            .resolve_directive(&hit.name)
            .ok()
            .map(|directive| (directive.name.clone(), Opens::Directive(directive))),
        RecordKind::Object
        | RecordKind::Input
        | RecordKind::Enum
        | RecordKind::Scalar
        | RecordKind::Interface
        | RecordKind::Union => Some((hit.name.clone(), Opens::Type)),
    };

    target.unwrap_or_else(|| (hit.name.clone(), Opens::Nothing))
}

/// Maps a browse category to the type kind it lists.
fn category_kind(category: Category) -> Option<TypeKind> {
    match category {
        Category::Object => Some(TypeKind::Object),
        Category::Input => Some(TypeKind::InputObject),
        Category::Enum => Some(TypeKind::Enum),
        Category::Scalar => Some(TypeKind::Scalar),
        Category::Interface => Some(TypeKind::Interface),
        Category::Union => Some(TypeKind::Union),
        Category::Query | Category::Mutation | Category::Directive | Category::Search => None,
    }
}

/// Builds the top-level panel for a category.
///
/// `hits` fills the search category and is ignored otherwise.
pub fn category_panel<'a>(
    resolver: Resolver<'a>,
    category: Category,
    hits: &[SearchHit],
) -> SchemaPanel<'a> {
    let model = resolver.model();
    let items = match category {
        Category::Query => root_items(resolver, RootOperation::Query),
        Category::Mutation => root_items(resolver, RootOperation::Mutation),
        Category::Directive => model
            .directives()
            .into_iter()
            .map(|directive| SchemaItem::directive(resolver, directive))
            .collect(),
        Category::Search => hits.iter().map(|hit| SchemaItem::hit(resolver, hit)).collect(),
        other => category_kind(other)
            .map(|kind| {
                model
                    .types_of_kind(kind)
                    .into_iter()
                    .map(|definition| SchemaItem::definition(resolver, definition))
                    .collect()
            })
            .unwrap_or_default(),
    };
    ListPanel::new(category.label(), items)
}

/// Items for the fields of a root operation.
fn root_items<'a>(resolver: Resolver<'a>, root: RootOperation) -> Vec<SchemaItem<'a>> {
    resolver
        .model()
        .root_fields(root)
        .iter()
        .map(|field| SchemaItem::field(resolver, field))
        .collect()
}

/// Builds the panel shown when a type is opened.
///
/// Objects, interfaces and inputs list their fields, enums their values and
/// unions their members. Scalars have no contents, so they list their usages.
pub fn type_panel<'a>(resolver: Resolver<'a>, definition: &TypeDefinition) -> SchemaPanel<'a> {
    let items = match definition {
        TypeDefinition::Object(object) | TypeDefinition::Interface(object) => object
            .fields
            .iter()
            .map(|field| SchemaItem::field(resolver, field))
            .collect(),
        TypeDefinition::InputObject(input) => input
            .fields
            .iter()
            .map(|value| SchemaItem::input_value(resolver, value))
            .collect(),
        TypeDefinition::Enum(enumeration) => enumeration
            .values
            .iter()
            .map(|value| SchemaItem::enum_value(resolver, value))
            .collect(),
        TypeDefinition::Union(union) => union
            .members
            .iter()
            .map(|member| SchemaItem::member(resolver, member))
            .collect(),
        TypeDefinition::Scalar(_) => return usages_panel(resolver, definition.name()),
    };
    ListPanel::new(definition.name(), items)
}

/// Builds a panel listing every usage of `type_name`.
pub fn usages_panel<'a>(resolver: Resolver<'a>, type_name: &str) -> SchemaPanel<'a> {
    let items = resolver
        .resolve_usages(type_name)
        .iter()
        .map(|usage| SchemaItem::usage(resolver, usage))
        .collect();
    ListPanel::new(format!("{type_name} usages"), items)
}

/// Builds the panel listing a directive's arguments.
fn directive_panel<'a>(resolver: Resolver<'a>, directive: &DirectiveDefinition) -> SchemaPanel<'a> {
    let items = directive
        .arguments
        .iter()
        .map(|argument| SchemaItem::input_value(resolver, argument))
        .collect();
    ListPanel::new(format!("@{}", directive.name), items)
}

#[cfg(test)]
mod tests {
    use sdlx_nav::{CategorySelector, NavigationManager, Panel};
    use sdlx_schema::SchemaModel;

    use super::*;

    const SOURCE: &str = r#"
        type Query { user(id: ID!): User search(term: String): [Result!]! }
        type Mutation { rename(id: ID!, name: String!): User }
        "An account" type User { id: ID! friends: [User!]! joined: Date role: Role }
        type Post { title: String }
        union Result = User | Post
        enum Role { ADMIN GUEST @deprecated(reason: "gone") }
        scalar Date
        input Filter { name: String = "x" }
        directive @auth(role: Role) on FIELD_DEFINITION
    "#;

    fn model() -> SchemaModel {
        SchemaModel::parse(SOURCE).unwrap()
    }

    fn titles(panel: &SchemaPanel<'_>) -> Vec<String> {
        panel.items().iter().map(|i| i.title().to_string()).collect()
    }

    #[test]
    fn category_panels_list_entities() {
        let model = model();
        let resolver = Resolver::new(&model);

        let query = category_panel(resolver, Category::Query, &[]);
        assert_eq!(titles(&query), ["user", "search"]);
        assert_eq!(query.items()[1].detail(), "[Result!]!");

        let objects = category_panel(resolver, Category::Object, &[]);
        assert_eq!(titles(&objects), ["Post", "User"]);
        assert_eq!(objects.items()[1].description(), "An account");

        let directives = category_panel(resolver, Category::Directive, &[]);
        assert_eq!(titles(&directives), ["@auth"]);
        assert!(category_panel(resolver, Category::Search, &[]).is_empty());
    }

    #[test]
    fn fields_open_their_types() {
        let model = model();
        let resolver = Resolver::new(&model);
        let query = category_panel(resolver, Category::Query, &[]);

        let user = query.items()[0].open_panel().unwrap();
        assert_eq!(user.title(), "User");
        assert_eq!(titles(&user), ["id", "friends", "joined", "role"]);

        let search = query.items()[1].open_panel().unwrap();
        assert_eq!(titles(&search), ["User", "Post"]);
        assert_eq!(search.items()[0].detail(), "type");
    }

    #[test]
    fn builtin_types_open_nothing() {
        let model = model();
        let resolver = Resolver::new(&model);
        let user = type_panel(resolver, resolver.resolve_type("User").unwrap());

        let id = &user.items()[0];
        assert_eq!(id.detail(), "ID!");
        assert!(id.open_panel().is_none());
    }

    #[test]
    fn scalars_open_to_usages() {
        let model = model();
        let resolver = Resolver::new(&model);
        let user = type_panel(resolver, resolver.resolve_type("User").unwrap());

        let date = user.items()[2].open_panel().unwrap();
        assert_eq!(date.title(), "Date usages");
        assert_eq!(titles(&date), ["User.joined"]);

        // The usage leads back to its holder.
        let holder = date.items()[0].open_panel().unwrap();
        assert_eq!(holder.title(), "User");
    }

    #[test]
    fn enums_and_directives() {
        let model = model();
        let resolver = Resolver::new(&model);

        let role = type_panel(resolver, resolver.resolve_type("Role").unwrap());
        assert_eq!(titles(&role), ["ADMIN", "GUEST"]);
        assert_eq!(role.items()[1].detail(), "deprecated: gone");
        assert!(role.items()[0].open_panel().is_none());

        let directives = category_panel(resolver, Category::Directive, &[]);
        let args = directives.items()[0].open_panel().unwrap();
        assert_eq!(args.title(), "@auth");
        assert_eq!(titles(&args), ["role"]);

        let usages = usages_panel(resolver, "Role");
        assert_eq!(usages.items().len(), 2);
        let auth = usages
            .items()
            .iter()
            .find(|item| item.detail() == "Directive")
            .unwrap();
        assert_eq!(auth.open_panel().unwrap().title(), "@auth");
    }

    #[test]
    fn input_values_show_defaults() {
        let model = model();
        let resolver = Resolver::new(&model);
        let filter = type_panel(resolver, resolver.resolve_type("Filter").unwrap());
        assert_eq!(filter.items()[0].detail(), "String = \"x\"");
    }

    #[test]
    fn hits_open_their_targets() {
        let model = model();
        let resolver = Resolver::new(&model);
        let hit = |kind, name: &str, path: &str| SearchHit {
            kind,
            name: name.to_string(),
            path: path.to_string(),
            description: String::new(),
            score: 1.0,
        };

        let hits = [
            hit(RecordKind::Query, "user", "Query.user"),
            hit(RecordKind::Field, "friends", "User.friends"),
            hit(RecordKind::Scalar, "Date", "Date"),
            hit(RecordKind::Field, "title", "Post.title"),
        ];
        let panel = category_panel(resolver, Category::Search, &hits);
        assert_eq!(titles(&panel), ["Query.user", "User.friends", "Date", "Post.title"]);

        assert_eq!(panel.items()[0].type_name(), "User");
        assert_eq!(panel.items()[1].open_panel().unwrap().title(), "User");
        assert_eq!(panel.items()[2].open_panel().unwrap().title(), "Date usages");
        assert!(panel.items()[3].open_panel().is_none());
    }

    #[test]
    fn drives_the_navigator() {
        let model = model();
        let resolver = Resolver::new(&model);
        let mut nav = NavigationManager::with_selector(2, CategorySelector::browse_only());

        nav.set_current_panel(category_panel(resolver, Category::Query, &[]));
        assert!(nav.open_selected());
        assert!(nav.navigate_forward());

        let panel = nav.current_panel_mut().unwrap();
        assert!(panel.select_by_name("friends"));
        assert!(nav.open_selected());
        assert!(nav.navigate_forward());

        assert_eq!(nav.breadcrumbs(), ["user", "friends"]);
        assert_eq!(nav.current_panel().unwrap().title(), "User");
        assert_eq!(nav.current_panel().unwrap().selected_label().unwrap(), "id");
    }
}
