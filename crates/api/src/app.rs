use std::time::Duration;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{rejection::GraphQLRejection, GraphQLRequest};
use axum::{
    extract::State,
    http::{
        header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware,
    response::{Html, IntoResponse},
    routing::get,
    Extension, Json, Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::gql::{FormattedResponse, RequestContext};
use crate::middleware::bearer::bearer_middleware;
use crate::state::AppState;

/// Build the Axum router: GraphQL on GET and POST, GraphiQL and a health probe.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(state.config().allowed_origins.as_deref());

    Router::new()
        .route("/health", get(health))
        .route("/graphql", get(graphql_handler).post(graphql_handler))
        .route("/graphiql", get(graphiql))
        .with_state(state)
        .layer(middleware::from_fn(bearer_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors)
}

fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let Some(allowed_origins) = allowed_origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// Executes one GraphQL operation with the caller's [`RequestContext`].
async fn graphql_handler(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    request: Result<GraphQLRequest, GraphQLRejection>,
) -> Result<Json<FormattedResponse>, AppError> {
    let request = request
        .map_err(|e| AppError::BadRequest(format!("Invalid GraphQL request: {}", e.0)))?
        .into_inner()
        .data(context);

    Ok(Json(state.schema.execute(request).await))
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn health() -> &'static str {
    "ok"
}
