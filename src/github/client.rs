//! GitHub API client wrapper
//!
//! Provides the facade's upstream surface without exposing Octocrab. One
//! method per resource; every call is bounded by the configured per-request
//! timeout and every failure is classified into the [`GitHubError`] taxonomy.

use crate::github::error::{GitHubError, GitHubResult, classify};
use crate::github::types::{
    LanguageBytes, RawCommit, RawReadme, RawRepository, RawUser, SearchPage,
};
use crate::github::{GitHubApi, MAX_PAGE_SIZE};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Upstream GitHub client. Cloning is cheap (Arc clone).
#[derive(Clone)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
    timeout: Duration,
}

impl GitHubClient {
    /// Create a client authenticated with a personal access token.
    pub fn new(token: impl Into<String>, timeout: Duration) -> GitHubResult<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(octocrab),
            timeout,
        })
    }

    /// Issue a GET against a fully-formed route, decoding into a loose
    /// payload type. Exceeding the per-call timeout is an `Unknown` failure.
    async fn get_json<T>(&self, route: String, context: &str) -> GitHubResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.inner.get::<T, _, ()>(&route, None);
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(payload)) => Ok(payload),
            Ok(Err(err)) => Err(classify(err, context)),
            Err(_) => {
                log::warn!("upstream call timed out: {context} after {:?}", self.timeout);
                Err(GitHubError::Unknown {
                    context: context.to_string(),
                    status: None,
                    message: format!("request timed out after {:?}", self.timeout),
                })
            }
        }
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_user(&self, username: &str) -> GitHubResult<RawUser> {
        let route = format!("/users/{}", urlencoding::encode(username));
        self.get_json(route, &format!("getUser for {username}")).await
    }

    async fn list_user_repositories(
        &self,
        username: &str,
        page: u32,
        per_page: u8,
    ) -> GitHubResult<Vec<RawRepository>> {
        let per_page = per_page.min(MAX_PAGE_SIZE);
        let route = format!(
            "/users/{}/repos?per_page={per_page}&page={page}&sort=updated",
            urlencoding::encode(username)
        );
        self.get_json(route, &format!("listUserRepositories for {username} page {page}"))
            .await
    }

    async fn get_repository(&self, owner: &str, name: &str) -> GitHubResult<RawRepository> {
        let route = format!(
            "/repos/{}/{}",
            urlencoding::encode(owner),
            urlencoding::encode(name)
        );
        self.get_json(route, &format!("getRepository for {owner}/{name}")).await
    }

    async fn get_readme(&self, owner: &str, name: &str) -> GitHubResult<RawReadme> {
        let route = format!(
            "/repos/{}/{}/readme",
            urlencoding::encode(owner),
            urlencoding::encode(name)
        );
        self.get_json(route, &format!("getReadme for {owner}/{name}")).await
    }

    async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
        sort: Option<&str>,
    ) -> GitHubResult<SearchPage> {
        let per_page = per_page.min(MAX_PAGE_SIZE);
        let mut route = format!(
            "/search/repositories?q={}&page={page}&per_page={per_page}",
            urlencoding::encode(query)
        );
        if let Some(sort) = sort {
            route.push_str(&format!("&sort={}&order=desc", urlencoding::encode(sort)));
        }
        self.get_json(route, &format!("searchRepositories for \"{query}\" page {page}"))
            .await
    }

    async fn list_commits(
        &self,
        owner: &str,
        name: &str,
        per_page: u8,
    ) -> GitHubResult<Vec<RawCommit>> {
        let per_page = per_page.min(MAX_PAGE_SIZE);
        let route = format!(
            "/repos/{}/{}/commits?per_page={per_page}",
            urlencoding::encode(owner),
            urlencoding::encode(name)
        );
        self.get_json(route, &format!("listCommits for {owner}/{name}")).await
    }

    async fn list_languages(&self, owner: &str, name: &str) -> GitHubResult<LanguageBytes> {
        let route = format!(
            "/repos/{}/{}/languages",
            urlencoding::encode(owner),
            urlencoding::encode(name)
        );
        self.get_json(route, &format!("listLanguages for {owner}/{name}")).await
    }

    async fn list_user_events(&self, username: &str) -> GitHubResult<serde_json::Value> {
        let route = format!(
            "/users/{}/events/public?per_page={MAX_PAGE_SIZE}",
            urlencoding::encode(username)
        );
        self.get_json(route, &format!("listUserEvents for {username}")).await
    }
}
