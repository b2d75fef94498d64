pub mod context;
pub mod domains;
pub mod error;
pub mod format;
pub mod merge;
pub mod resolver;
pub mod schema;

pub use context::RequestContext;
pub use error::{FieldFailure, ResolveError, SchemaBuildError};
pub use format::{format_error, format_response, FormattedError, FormattedResponse};
pub use merge::{merge_type_defs, JSON_SCALAR};
pub use resolver::{merge_resolvers, ResolverFragment, ResolverInput, ResolverMap};
pub use schema::{build_schema, compile_schema, GatewaySchema, SchemaOptions};
