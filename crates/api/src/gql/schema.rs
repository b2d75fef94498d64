use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_graphql::dynamic::{
    Enum, EnumItem, Field, FieldFuture, FieldValue, InputObject, InputValue, Interface,
    InterfaceField, Object, ResolverContext, Scalar, Schema, TypeRef, Union,
};
use async_graphql::parser::parse_schema;
use async_graphql::parser::types::{
    BaseType, FieldDefinition, InputValueDefinition, ObjectType, Type, TypeDefinition, TypeKind,
    TypeSystemDefinition,
};
use async_graphql::{Name, PathSegment, QueryPathSegment, Request, Value as GqlValue};
use serde_json::{Map, Value};

use super::context::RequestContext;
use super::domains::DomainModule;
use super::error::{FieldFailure, NullElement, ResolveError, SchemaBuildError};
use super::format::{format_response, FormattedResponse};
use super::merge::merge_type_defs;
use super::resolver::{
    merge_resolvers, ResolverFn, ResolverInput, ResolverMap, TypeResolverFn, RESOLVE_TYPE,
};

const QUERY: &str = "Query";
const MUTATION: &str = "Mutation";
const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

#[derive(Clone, Debug)]
pub struct SchemaOptions {
    pub introspection: bool,
    pub depth_limit: usize,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            introspection: true,
            depth_limit: 15,
        }
    }
}

/// The executable union of every domain module's schema.
#[derive(Clone)]
pub struct GatewaySchema {
    schema: Schema,
    sdl: Arc<str>,
}

impl GatewaySchema {
    /// The merged schema document the executable schema was compiled from.
    pub fn sdl(&self) -> &str {
        &self.sdl
    }

    /// Runs one operation and normalizes its errors.
    pub async fn execute(&self, request: impl Into<Request>) -> FormattedResponse {
        format_response(self.schema.execute(request.into()).await)
    }
}

/// Merges the modules' fragments in slice order and compiles the result.
pub fn build_schema(
    modules: &[Box<dyn DomainModule>],
    options: &SchemaOptions,
) -> Result<GatewaySchema, SchemaBuildError> {
    let type_defs: Vec<&str> = modules.iter().map(|m| m.type_defs()).collect();
    let queries: Vec<&str> = modules.iter().map(|m| m.queries()).collect();
    let mutations: Vec<&str> = modules.iter().map(|m| m.mutations()).collect();
    let sdl = merge_type_defs(&type_defs, &queries, &mutations);

    let resolvers = merge_resolvers(modules.iter().map(|m| m.resolvers()))?;
    compile_schema(&sdl, &resolvers, options)
}

/// Parses `sdl` and binds every declared field to its resolver.
///
/// Object fields without a resolver read the same-named key of their parent
/// JSON value. Root fields and abstract types must be covered by the map.
pub fn compile_schema(
    sdl: &str,
    resolvers: &ResolverMap,
    options: &SchemaOptions,
) -> Result<GatewaySchema, SchemaBuildError> {
    let definitions = collect_definitions(sdl)?;
    let declared: HashSet<&str> = definitions.iter().map(|d| d.name.node.as_str()).collect();
    if !declared.contains(QUERY) {
        return Err(SchemaBuildError::Invalid("schema has no Query type".into()));
    }

    check_resolvers(&definitions, resolvers)?;

    let mut shapes: HashMap<String, TypeShape> = BUILTIN_SCALARS
        .iter()
        .map(|s| (s.to_string(), TypeShape::Leaf))
        .collect();
    let mut discriminators = HashMap::new();
    for definition in &definitions {
        let name = definition.name.node.to_string();
        let shape = match &definition.kind {
            TypeKind::Scalar | TypeKind::InputObject(_) => TypeShape::Leaf,
            TypeKind::Enum(_) => TypeShape::Enum,
            TypeKind::Object(_) => TypeShape::Object,
            TypeKind::Interface(_) | TypeKind::Union(_) => {
                let discriminator = resolvers
                    .type_resolver(&name)
                    .ok_or_else(|| SchemaBuildError::MissingTypeResolver(name.clone()))?;
                discriminators.insert(name.clone(), discriminator.clone());
                TypeShape::Abstract
            }
        };
        shapes.insert(name, shape);
    }
    let catalog = Arc::new(TypeCatalog {
        shapes,
        discriminators,
    });

    let mutation = declared.contains(MUTATION).then_some(MUTATION);
    let mut builder = Schema::build(QUERY, mutation, None).limit_depth(options.depth_limit);
    if !options.introspection {
        builder = builder.disable_introspection();
    }

    for definition in &definitions {
        let name = definition.name.node.as_str();
        let description = definition.description.as_ref().map(|d| d.node.as_str());
        builder = match &definition.kind {
            TypeKind::Scalar => {
                let mut scalar = Scalar::new(name);
                if let Some(description) = description {
                    scalar = scalar.description(description);
                }
                builder.register(scalar)
            }
            TypeKind::Object(object) => {
                builder.register(build_object(name, description, object, resolvers, &catalog))
            }
            TypeKind::Interface(interface) => {
                if !interface.implements.is_empty() {
                    return Err(SchemaBuildError::Invalid(format!(
                        "interface `{name}` implements other interfaces, which is not supported"
                    )));
                }
                let mut built = Interface::new(name);
                if let Some(description) = description {
                    built = built.description(description);
                }
                for field in &interface.fields {
                    let field = &field.node;
                    let mut iface_field =
                        InterfaceField::new(field.name.node.as_str(), type_ref(&field.ty.node));
                    for arg in &field.arguments {
                        iface_field = iface_field.argument(input_value(&arg.node));
                    }
                    built = built.field(iface_field);
                }
                builder.register(built)
            }
            TypeKind::Union(union) => {
                let mut built = Union::new(name);
                if let Some(description) = description {
                    built = built.description(description);
                }
                for member in &union.members {
                    built = built.possible_type(member.node.as_str());
                }
                builder.register(built)
            }
            TypeKind::Enum(enum_type) => {
                let mut built = Enum::new(name);
                if let Some(description) = description {
                    built = built.description(description);
                }
                for value in &enum_type.values {
                    built = built.item(EnumItem::new(value.node.value.node.as_str()));
                }
                builder.register(built)
            }
            TypeKind::InputObject(input) => {
                let mut built = InputObject::new(name);
                if let Some(description) = description {
                    built = built.description(description);
                }
                for field in &input.fields {
                    built = built.field(input_value(&field.node));
                }
                builder.register(built)
            }
        };
    }

    let schema = builder
        .finish()
        .map_err(|e| SchemaBuildError::Invalid(e.to_string()))?;

    tracing::debug!("Compiled schema with {} types", definitions.len());

    Ok(GatewaySchema {
        schema,
        sdl: Arc::from(sdl),
    })
}

fn collect_definitions(sdl: &str) -> Result<Vec<TypeDefinition>, SchemaBuildError> {
    let document = parse_schema(sdl).map_err(|e| SchemaBuildError::Syntax(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut definitions = Vec::new();
    for definition in document.definitions {
        match definition {
            TypeSystemDefinition::Type(definition) => {
                let definition = definition.node;
                let name = definition.name.node.to_string();
                if definition.extend {
                    return Err(SchemaBuildError::Invalid(format!(
                        "type extension `{name}` is not supported"
                    )));
                }
                if !seen.insert(name.clone()) {
                    return Err(SchemaBuildError::DuplicateType(name));
                }
                check_unique_fields(&definition)?;
                definitions.push(definition);
            }
            TypeSystemDefinition::Schema(_) => {
                return Err(SchemaBuildError::Invalid(
                    "schema definitions are not supported, roots are always Query and Mutation"
                        .into(),
                ));
            }
            TypeSystemDefinition::Directive(directive) => {
                return Err(SchemaBuildError::Invalid(format!(
                    "directive definition `@{}` is not supported",
                    directive.node.name.node
                )));
            }
        }
    }
    Ok(definitions)
}

fn check_unique_fields(definition: &TypeDefinition) -> Result<(), SchemaBuildError> {
    let names: Vec<&str> = match &definition.kind {
        TypeKind::Object(object) => object.fields.iter().map(|f| f.node.name.node.as_str()).collect(),
        TypeKind::Interface(interface) => interface
            .fields
            .iter()
            .map(|f| f.node.name.node.as_str())
            .collect(),
        TypeKind::InputObject(input) => input.fields.iter().map(|f| f.node.name.node.as_str()).collect(),
        _ => return Ok(()),
    };

    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(SchemaBuildError::DuplicateField {
                type_name: definition.name.node.to_string(),
                field: name.to_string(),
            });
        }
    }
    Ok(())
}

fn check_resolvers(
    definitions: &[TypeDefinition],
    resolvers: &ResolverMap,
) -> Result<(), SchemaBuildError> {
    let objects: HashMap<&str, &ObjectType> = definitions
        .iter()
        .filter_map(|d| match &d.kind {
            TypeKind::Object(object) => Some((d.name.node.as_str(), object)),
            _ => None,
        })
        .collect();

    let mut keys: Vec<(&str, &str)> = resolvers.field_keys().collect();
    keys.sort_unstable();
    for (type_name, field) in keys {
        let declared = objects
            .get(type_name)
            .is_some_and(|o| o.fields.iter().any(|f| f.node.name.node.as_str() == field));
        if !declared {
            return Err(SchemaBuildError::UnknownField {
                type_name: type_name.to_string(),
                field: field.to_string(),
            });
        }
    }

    let mut abstract_keys: Vec<&str> = resolvers.type_keys().collect();
    abstract_keys.sort_unstable();
    for type_name in abstract_keys {
        let is_abstract = definitions.iter().any(|d| {
            d.name.node.as_str() == type_name
                && matches!(d.kind, TypeKind::Interface(_) | TypeKind::Union(_))
        });
        if !is_abstract {
            return Err(SchemaBuildError::UnknownField {
                type_name: type_name.to_string(),
                field: RESOLVE_TYPE.to_string(),
            });
        }
    }

    for root in [QUERY, MUTATION] {
        let Some(object) = objects.get(root) else {
            continue;
        };
        for field in &object.fields {
            let field = field.node.name.node.as_str();
            if resolvers.field(root, field).is_none() {
                return Err(SchemaBuildError::MissingResolver {
                    type_name: root.to_string(),
                    field: field.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn build_object(
    name: &str,
    description: Option<&str>,
    object: &ObjectType,
    resolvers: &ResolverMap,
    catalog: &Arc<TypeCatalog>,
) -> Object {
    let mut built = Object::new(name);
    if let Some(description) = description {
        built = built.description(description);
    }
    for interface in &object.implements {
        built = built.implement(interface.node.as_str());
    }
    for field in &object.fields {
        let field = &field.node;
        let resolver = resolvers.field(name, field.name.node.as_str()).cloned();
        built = built.field(build_field(field, resolver, catalog));
    }
    built
}

fn build_field(
    definition: &FieldDefinition,
    resolver: Option<ResolverFn>,
    catalog: &Arc<TypeCatalog>,
) -> Field {
    let binding = Arc::new(FieldBinding {
        field: definition.name.node.to_string(),
        ty: definition.ty.node.clone(),
        resolver,
        catalog: Arc::clone(catalog),
    });

    let mut field = Field::new(
        definition.name.node.as_str(),
        type_ref(&definition.ty.node),
        move |ctx| {
            let binding = Arc::clone(&binding);
            FieldFuture::new(async move { binding.resolve(ctx).await })
        },
    );
    if let Some(description) = &definition.description {
        field = field.description(description.node.as_str());
    }
    for arg in &definition.arguments {
        field = field.argument(input_value(&arg.node));
    }
    field
}

fn input_value(definition: &InputValueDefinition) -> InputValue {
    let mut value = InputValue::new(definition.name.node.as_str(), type_ref(&definition.ty.node));
    if let Some(default) = &definition.default_value {
        value = value.default_value(default.node.clone());
    }
    if let Some(description) = &definition.description {
        value = value.description(description.node.as_str());
    }
    value
}

fn type_ref(ty: &Type) -> TypeRef {
    let base = match &ty.base {
        BaseType::Named(name) => TypeRef::named(name.as_str()),
        BaseType::List(inner) => TypeRef::List(Box::new(type_ref(inner))),
    };
    if ty.nullable {
        base
    } else {
        TypeRef::NonNull(Box::new(base))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TypeShape {
    Leaf,
    Enum,
    Object,
    Abstract,
}

struct TypeCatalog {
    shapes: HashMap<String, TypeShape>,
    discriminators: HashMap<String, TypeResolverFn>,
}

impl TypeCatalog {
    /// Turns backend JSON into the value the executor expects for `ty`.
    fn shape<'a>(&self, value: Value, ty: &Type) -> Result<Option<FieldValue<'a>>, ResolveError> {
        if value.is_null() {
            return Ok(None);
        }

        let name = match &ty.base {
            BaseType::List(inner) => {
                let items = match value {
                    Value::Array(items) => items,
                    other => {
                        return Err(ResolveError::Shape(format!(
                            "expected a list for `{ty}`, backend returned {other}"
                        )))
                    }
                };
                let mut shaped = Vec::with_capacity(items.len());
                for item in items {
                    let element = match self.shape(item, inner)? {
                        Some(element) => element,
                        None => self.null_element(inner),
                    };
                    shaped.push(element);
                }
                return Ok(Some(FieldValue::list(shaped)));
            }
            BaseType::Named(name) => name.as_str(),
        };

        let shaped = match (self.shape_of(name), value) {
            (TypeShape::Object, value) => FieldValue::owned_any(value),
            (TypeShape::Abstract, value) => {
                let concrete = self.discriminate(name, &value)?;
                FieldValue::owned_any(value).with_type(concrete)
            }
            (TypeShape::Enum, Value::String(item)) => {
                FieldValue::value(GqlValue::Enum(Name::new(item)))
            }
            (_, value) => FieldValue::value(
                GqlValue::from_json(value).map_err(|err| ResolveError::Shape(err.to_string()))?,
            ),
        };
        Ok(Some(shaped))
    }

    /// Inside a list the executor always descends into object elements, so a
    /// `null` object element gets a marker parent instead of a value.
    fn null_element<'a>(&self, ty: &Type) -> FieldValue<'a> {
        let BaseType::Named(name) = &ty.base else {
            return FieldValue::NULL;
        };
        match self.shape_of(name) {
            TypeShape::Object => FieldValue::owned_any(NullElement),
            TypeShape::Abstract => match self.discriminate(name, &Value::Null) {
                Ok(concrete) => FieldValue::owned_any(NullElement).with_type(concrete),
                Err(_) => FieldValue::NULL,
            },
            TypeShape::Leaf | TypeShape::Enum => FieldValue::NULL,
        }
    }

    fn shape_of(&self, name: &str) -> TypeShape {
        self.shapes.get(name).copied().unwrap_or(TypeShape::Leaf)
    }

    fn discriminate(&self, name: &str, value: &Value) -> Result<&'static str, ResolveError> {
        let discriminator = self
            .discriminators
            .get(name)
            .ok_or_else(|| ResolveError::Shape(format!("no type discriminator for `{name}`")))?;
        Ok(discriminator(value))
    }
}

struct FieldBinding {
    field: String,
    ty: Type,
    resolver: Option<ResolverFn>,
    catalog: Arc<TypeCatalog>,
}

impl FieldBinding {
    async fn resolve<'a>(
        &self,
        ctx: ResolverContext<'a>,
    ) -> async_graphql::Result<Option<FieldValue<'a>>> {
        if ctx.parent_value.downcast_ref::<NullElement>().is_some() {
            return Err(async_graphql::Error::new_with_source(NullElement));
        }

        self.produce(&ctx).await.map_err(|cause| {
            async_graphql::Error::new_with_source(FieldFailure {
                path: field_path(&ctx),
                cause,
            })
        })
    }

    async fn produce<'a>(
        &self,
        ctx: &ResolverContext<'a>,
    ) -> Result<Option<FieldValue<'a>>, ResolveError> {
        let parent = ctx.parent_value.downcast_ref::<Value>();

        let value = match &self.resolver {
            Some(resolver) => {
                let input = ResolverInput {
                    args: arguments(ctx)?,
                    parent: parent.cloned().unwrap_or(Value::Null),
                    context: ctx.data_opt::<RequestContext>().cloned().unwrap_or_default(),
                };
                resolver(input).await?
            }
            None => parent
                .and_then(|p| p.get(&self.field))
                .cloned()
                .unwrap_or(Value::Null),
        };

        self.catalog.shape(value, &self.ty)
    }
}

/// Root-first path of the field being resolved.
fn field_path(ctx: &ResolverContext<'_>) -> Vec<PathSegment> {
    let Some(node) = ctx.path_node.as_ref() else {
        return Vec::new();
    };
    let mut path: Vec<PathSegment> = std::iter::once(node)
        .chain(node.parents())
        .map(|node| match node.segment {
            QueryPathSegment::Name(name) => PathSegment::Field(name.to_string()),
            QueryPathSegment::Index(index) => PathSegment::Index(index),
        })
        .collect();
    path.reverse();
    path
}

fn arguments(ctx: &ResolverContext<'_>) -> Result<Map<String, Value>, ResolveError> {
    ctx.args
        .iter()
        .map(|(name, value)| {
            let json = value
                .as_value()
                .clone()
                .into_json()
                .map_err(|err| ResolveError::Shape(err.to_string()))?;
            Ok((name.to_string(), json))
        })
        .collect()
}
