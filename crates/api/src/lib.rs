pub mod app;
pub mod config;
pub mod error;
pub mod gql;
pub mod middleware;
pub mod state;

pub use config::GatewayConfig;
pub use state::AppState;
