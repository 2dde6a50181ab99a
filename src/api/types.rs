//! HTTP surface types: shared state and query parameter shapes.

use crate::service::RepoService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RepoService>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RepoListParams {
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub include_commits: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RandomParams {
    pub min_stars: Option<i64>,
    pub max_stars: Option<i64>,
    pub language: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<u32>,
}
