use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use serde_json::{Map, Value};

use super::context::RequestContext;
use super::error::{ResolveError, SchemaBuildError};

/// Name under which a type discriminator is keyed, next to ordinary fields.
pub const RESOLVE_TYPE: &str = "__resolveType";

pub type ResolverFn =
    Arc<dyn Fn(ResolverInput) -> BoxFuture<'static, Result<Value, ResolveError>> + Send + Sync>;

/// Picks the concrete object type for a value of an interface or union.
pub type TypeResolverFn = Arc<dyn Fn(&Value) -> &'static str + Send + Sync>;

/// Everything a resolver gets to see about one field invocation.
#[derive(Clone, Debug, Default)]
pub struct ResolverInput {
    pub args: Map<String, Value>,
    pub parent: Value,
    pub context: RequestContext,
}

impl ResolverInput {
    pub fn arg(&self, name: &str) -> Result<&Value, ResolveError> {
        self.args
            .get(name)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ResolveError::MissingArgument(name.to_string()))
    }

    /// Argument rendered as a URL path segment.
    pub fn key(&self, name: &str) -> Result<String, ResolveError> {
        Ok(match self.arg(name)? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.context.token()
    }
}

#[derive(Clone)]
pub(crate) enum Resolver {
    Field(ResolverFn),
    Type(TypeResolverFn),
}

#[derive(Clone)]
pub(crate) struct FragmentEntry {
    pub type_name: String,
    pub field: String,
    pub resolver: Resolver,
    pub overrides: bool,
}

/// The resolvers one domain module contributes, in declaration order.
#[derive(Clone)]
pub struct ResolverFragment {
    source: String,
    entries: Vec<FragmentEntry>,
}

impl ResolverFragment {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entries: Vec::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn query<F, Fut>(self, field: &str, f: F) -> Self
    where
        F: Fn(ResolverInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ResolveError>> + Send + 'static,
    {
        self.field("Query", field, f)
    }

    pub fn mutation<F, Fut>(self, field: &str, f: F) -> Self
    where
        F: Fn(ResolverInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ResolveError>> + Send + 'static,
    {
        self.field("Mutation", field, f)
    }

    pub fn field<F, Fut>(self, type_name: &str, field: &str, f: F) -> Self
    where
        F: Fn(ResolverInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ResolveError>> + Send + 'static,
    {
        self.push(type_name, field, Resolver::Field(boxed(f)), false)
    }

    /// Registers a resolver that is allowed to replace one contributed by an
    /// earlier fragment.
    pub fn override_field<F, Fut>(self, type_name: &str, field: &str, f: F) -> Self
    where
        F: Fn(ResolverInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ResolveError>> + Send + 'static,
    {
        self.push(type_name, field, Resolver::Field(boxed(f)), true)
    }

    pub fn resolve_type<F>(self, type_name: &str, f: F) -> Self
    where
        F: Fn(&Value) -> &'static str + Send + Sync + 'static,
    {
        self.push(type_name, RESOLVE_TYPE, Resolver::Type(Arc::new(f)), false)
    }

    fn push(mut self, type_name: &str, field: &str, resolver: Resolver, overrides: bool) -> Self {
        self.entries.push(FragmentEntry {
            type_name: type_name.to_string(),
            field: field.to_string(),
            resolver,
            overrides,
        });
        self
    }

    pub(crate) fn into_entries(self) -> (String, Vec<FragmentEntry>) {
        (self.source, self.entries)
    }
}

fn boxed<F, Fut>(f: F) -> ResolverFn
where
    F: Fn(ResolverInput) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ResolveError>> + Send + 'static,
{
    Arc::new(move |input| f(input).boxed())
}

/// Merged dispatch table keyed by `(type, field)`.
#[derive(Clone, Default)]
pub struct ResolverMap {
    fields: HashMap<(String, String), (ResolverFn, String)>,
    types: HashMap<String, (TypeResolverFn, String)>,
}

impl ResolverMap {
    pub fn field(&self, type_name: &str, field: &str) -> Option<&ResolverFn> {
        self.fields
            .get(&(type_name.to_string(), field.to_string()))
            .map(|(resolver, _)| resolver)
    }

    pub fn type_resolver(&self, type_name: &str) -> Option<&TypeResolverFn> {
        self.types.get(type_name).map(|(resolver, _)| resolver)
    }

    /// Module that contributed the winning resolver for `type.field`.
    pub fn source_of(&self, type_name: &str, field: &str) -> Option<&str> {
        if field == RESOLVE_TYPE {
            return self.types.get(type_name).map(|(_, s)| s.as_str());
        }
        self.fields
            .get(&(type_name.to_string(), field.to_string()))
            .map(|(_, s)| s.as_str())
    }

    pub fn field_keys(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields.keys().map(|(t, f)| (t.as_str(), f.as_str()))
    }

    pub fn type_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len() + self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Applies fragments in order. A second resolver for the same `type.field`
/// is a collision unless it was registered with
/// [`ResolverFragment::override_field`], in which case the later one wins.
pub fn merge_resolvers<I>(fragments: I) -> Result<ResolverMap, SchemaBuildError>
where
    I: IntoIterator<Item = ResolverFragment>,
{
    let mut map = ResolverMap::default();

    for fragment in fragments {
        let (source, entries) = fragment.into_entries();
        for entry in entries {
            let previous = map.source_of(&entry.type_name, &entry.field).map(str::to_string);
            if let Some(first) = previous {
                if !entry.overrides {
                    return Err(SchemaBuildError::ResolverCollision {
                        type_name: entry.type_name,
                        field: entry.field,
                        first,
                        second: source,
                    });
                }
                tracing::debug!(
                    "{}.{} from `{}` overrides `{}`",
                    entry.type_name,
                    entry.field,
                    source,
                    first
                );
            }

            match entry.resolver {
                Resolver::Field(resolver) => {
                    map.fields
                        .insert((entry.type_name, entry.field), (resolver, source.clone()));
                }
                Resolver::Type(resolver) => {
                    map.types.insert(entry.type_name, (resolver, source.clone()));
                }
            }
        }
    }

    Ok(map)
}
