//! In-memory todo CRUD service.
//!
//! # Overview
//! A `Store` holds the records behind one mutex; the axum router in
//! `routes` validates requests, calls exactly one store operation and maps
//! the outcome to a status code. The store is an ordinary value handed to
//! the router, so each `app()` is an isolated instance.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use config::ServerConfig;
pub use error::ApiError;
pub use model::{Pagination, Todo, TodoId, TodoInput};
pub use store::Store;

/// Router over a fresh store with the default configuration.
pub fn app() -> Router {
    router(Arc::new(Store::new()), &ServerConfig::default())
}

pub fn router(store: Arc<Store>, config: &ServerConfig) -> Router {
    routes::routes(store)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Allow-listed origins get every method and header. Credentials are
/// allowed, so methods and headers are mirrored from the preflight rather
/// than answered with a wildcard.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Serve `router` on `listener` until Ctrl-C.
pub async fn run(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
