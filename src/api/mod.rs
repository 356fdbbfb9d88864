//! API handlers for the library REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod policy;
pub mod security;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::Principal, AppState};

/// Mount point of the REST API
pub const API_PREFIX: &str = "/api";

/// Mount point of the books resource, including [`API_PREFIX`]
pub const BOOKS_PATH: &str = "/api/books";

/// `Json` extractor answering malformed bodies with an [`AppError`] JSON body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path` extractor answering unparseable segments with an [`AppError`] JSON body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Principal resolved by [`security::enforce_access`]
pub struct CurrentPrincipal(pub Principal);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts
            .extensions
            .get::<Principal>()
            .cloned()
            .unwrap_or_else(Principal::anonymous);
        Ok(CurrentPrincipal(principal))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books, with and without trailing slash
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/", get(books::list_books).post(books::create_book))
        .route("/books/:id", get(books::get_book).delete(books::delete_book))
        .with_state(state.clone());

    Router::new()
        .nest(API_PREFIX, api)
        .merge(openapi::create_openapi_router())
        .layer(middleware::from_fn_with_state(state, security::enforce_access))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
