use api::gql::domains::default_modules;
use api::gql::{build_schema, FormattedResponse, GatewaySchema, RequestContext, SchemaOptions};
use async_graphql::{Request, Variables};
use infra::{BackendEndpoint, BackendsConfig, HttpClient};
use wiremock::MockServer;

/// Every backend served by one mock server, distinguished by path prefix.
pub fn backends_for(server: &MockServer) -> BackendsConfig {
    backends_on_port(server.address().port())
}

#[allow(dead_code)]
pub fn backends_on_port(port: u16) -> BackendsConfig {
    BackendsConfig {
        courses: BackendEndpoint::new("127.0.0.1", port, Some("courses".into())),
        users: BackendEndpoint::new("127.0.0.1", port, Some("users".into())),
        newsletters: BackendEndpoint::new("127.0.0.1", port, None),
        centers: BackendEndpoint::new("127.0.0.1", port, Some("centers".into())),
        show_urls: false,
    }
}

#[allow(dead_code)]
pub fn gateway_schema(backends: &BackendsConfig) -> GatewaySchema {
    let modules = default_modules(backends, &HttpClient::new(backends.show_urls));
    build_schema(&modules, &SchemaOptions::default()).expect("gateway schema should compile")
}

#[allow(dead_code)]
pub async fn setup() -> (MockServer, GatewaySchema) {
    let server = MockServer::start().await;
    let schema = gateway_schema(&backends_for(&server));
    (server, schema)
}

#[allow(dead_code)]
/// Helper function to execute GraphQL queries and mutations
pub async fn execute_graphql(
    schema: &GatewaySchema,
    query: &str,
    variables: Option<Variables>,
    token: Option<&str>,
) -> FormattedResponse {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(vars);
    }

    request = request.data(RequestContext::new(token.map(str::to_string)));

    schema.execute(request).await
}
