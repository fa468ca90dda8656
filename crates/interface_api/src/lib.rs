//! HTTP API Layer
//!
//! REST API of the third-party registry, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: registration, search, update, deletion, dry-run
//!   validation and document-type choices
//! - **Middleware**: bearer-token authentication and audit logging
//! - **DTOs**: request/response bodies
//! - **Error Handling**: every rejected record answers 422 with all of its
//!   field errors
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_tercero::ThirdPartyService;

use crate::config::ApiConfig;
use crate::handlers::{document_types, health, terceros};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: ThirdPartyService,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Third-party workflows over the configured store
/// * `config` - API configuration
pub fn create_router(service: ThirdPartyService, config: ApiConfig) -> Router {
    let state = AppState { service, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let tercero_routes = Router::new()
        .route("/", post(terceros::register).get(terceros::search))
        .route("/validate", post(terceros::validate))
        .route(
            "/:code",
            get(terceros::get_tercero)
                .put(terceros::update)
                .delete(terceros::delete_tercero),
        );

    // Protected API routes
    let api_routes = Router::new()
        .nest("/terceros", tercero_routes)
        .route("/document-types", get(document_types::document_types))
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
