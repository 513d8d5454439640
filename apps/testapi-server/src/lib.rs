//! # testapi-server
//!
//! HTTP surface of the Test API: a basket service with deliberately strict
//! rules plus product, task and user CRUD, all held in memory.
//!
//! ## Module Organization
//!
//! - [`config`] - `ServerConfig` layered from defaults, file and environment
//! - [`error`] - `ApiError`, the single mapping from domain errors to responses
//! - [`extract`] - Body, query and path decoding
//! - [`services`] - Basket rules over the store
//! - [`handlers`] - One module per resource
//! - [`routes`] - Router and middleware
//! - [`openapi`] - Generated OpenAPI document

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence over
/// `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
