//! Router creation.

use super::handlers::*;
use super::types::AppState;
use crate::service::RepoService;
use axum::Router;
use axum::routing::{delete, get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Create the REST router over a constructed service.
pub fn router(service: Arc<RepoService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/health", get(health))
        .route("/v1/users/:username/summary", get(user_summary))
        .route("/v1/users/:username/repositories", get(user_repositories))
        .route("/v1/users/:username/contributions", get(user_contributions))
        .route("/v1/repositories/random", get(random_repository))
        .route("/v1/repos/:owner/:repo", get(repository))
        .route("/v1/repos/:owner/:repo/readme", get(readme))
        .route("/v1/search/repositories", get(search))
        .route("/v1/cache/users/:username/warm", post(warm_user))
        .route("/v1/cache/users/:username", delete(invalidate_user))
        .with_state(state)
        .layer(CorsLayer::permissive())
}
