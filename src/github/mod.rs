//! Upstream client layer: a thin, classified wrapper over the GitHub REST
//! API plus the pagination and batching helpers built on top of it.

pub mod batch;
pub mod client;
pub mod error;
pub mod pagination;
pub mod types;

pub use client::GitHubClient;
pub use error::{GitHubError, GitHubResult};
pub use pagination::fetch_all_repositories;
pub use types::{
    LanguageBytes, RawCommit, RawCommitDetail, RawCommitSignature, RawOwner, RawReadme,
    RawRepository, RawUser, SearchPage,
};

use async_trait::async_trait;

/// Upstream maximum page size; larger requests are capped, not rejected.
pub const MAX_PAGE_SIZE: u8 = 100;

/// The upstream seam the orchestrator depends on.
///
/// One method per resource. Implemented by [`GitHubClient`] for production
/// and by in-process mocks in tests.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn get_user(&self, username: &str) -> GitHubResult<RawUser>;

    async fn list_user_repositories(
        &self,
        username: &str,
        page: u32,
        per_page: u8,
    ) -> GitHubResult<Vec<RawRepository>>;

    async fn get_repository(&self, owner: &str, name: &str) -> GitHubResult<RawRepository>;

    async fn get_readme(&self, owner: &str, name: &str) -> GitHubResult<RawReadme>;

    async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
        sort: Option<&str>,
    ) -> GitHubResult<SearchPage>;

    /// Most recent commits first; callers wanting only the latest pass
    /// `per_page = 1`.
    async fn list_commits(
        &self,
        owner: &str,
        name: &str,
        per_page: u8,
    ) -> GitHubResult<Vec<RawCommit>>;

    async fn list_languages(&self, owner: &str, name: &str) -> GitHubResult<LanguageBytes>;

    /// Public event feed, passed through untyped for the contributions route.
    async fn list_user_events(&self, username: &str) -> GitHubResult<serde_json::Value>;
}
