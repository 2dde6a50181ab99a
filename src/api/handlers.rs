//! HTTP request handlers.
//!
//! Thin plumbing: extract parameters, delegate to the service layer, and map
//! failures to the JSON error shape with the request path attached.

use super::error::ApiError;
use super::types::*;
use crate::service::ServiceError;
use crate::service::types::{
    RandomFilters, RandomRepositoryResponse, ReadmeContent, RepoListOptions, RepoSort,
    RepositorySummary, SearchResults, SummaryResponse,
};
use axum::Json;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;

pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub(super) async fn user_summary(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<SummaryParams>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<SummaryResponse>, ApiError> {
    state
        .service
        .user_summary(&username, params.limit)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(err, uri.path()))
}

pub(super) async fn user_repositories(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<RepoListParams>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Vec<RepositorySummary>>, ApiError> {
    let sort = match params.sort.as_deref() {
        Some(raw) => raw
            .parse::<RepoSort>()
            .map_err(|msg| ApiError::from_service(ServiceError::Validation(msg), uri.path()))?,
        None => RepoSort::default(),
    };
    let options = RepoListOptions {
        sort,
        limit: params.limit,
        include_commits: params.include_commits.unwrap_or(false),
    };

    state
        .service
        .user_repositories(&username, &options)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(err, uri.path()))
}

pub(super) async fn user_contributions(
    State(state): State<AppState>,
    Path(username): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .service
        .user_contributions(&username)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(err, uri.path()))
}

pub(super) async fn random_repository(
    State(state): State<AppState>,
    Query(params): Query<RandomParams>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<RandomRepositoryResponse>, ApiError> {
    let filters = RandomFilters {
        min_stars: params.min_stars,
        max_stars: params.max_stars,
        language: params.language,
        country: params.country,
    };

    state
        .service
        .random_repository(&filters)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(err, uri.path()))
}

pub(super) async fn repository(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<RepositorySummary>, ApiError> {
    state
        .service
        .repository(&owner, &repo)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(err, uri.path()))
}

pub(super) async fn readme(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<ReadmeContent>, ApiError> {
    state
        .service
        .readme(&owner, &repo)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(err, uri.path()))
}

pub(super) async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<SearchResults>, ApiError> {
    let query = params.q.unwrap_or_default();
    state
        .service
        .search(&query, params.page.unwrap_or(1))
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(err, uri.path()))
}

pub(super) async fn warm_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .warm_user(&username)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|err| ApiError::from_service(err, uri.path()))
}

pub(super) async fn invalidate_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .invalidate_user(&username)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|err| ApiError::from_service(err, uri.path()))
}
