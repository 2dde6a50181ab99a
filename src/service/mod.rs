//! Orchestrator (service layer).
//!
//! Composes validation, cache, upstream client, and transforms. Every
//! operation follows the same shape: validate, build the cache key, try the
//! cache, and on a miss fetch, transform, store, and return. Cache failures
//! never fail a request; disabling the cache changes latency and upstream
//! call volume, never response values.

pub mod error;
pub mod random;
pub mod types;
pub mod validate;

pub use error::{ServiceError, ServiceResult};

use crate::cache::{self, CacheStore, keys};
use crate::config::AppConfig;
use crate::github::types::{RawRepository, SearchPage};
use crate::github::{GitHubApi, batch, fetch_all_repositories};
use crate::transform;
use crate::service::types::{
    ReadmeContent, RepoListOptions, RepoSort, RepositorySummary, SearchResults, SummaryResponse,
    UserSummary,
};
use crate::service::validate::{normalize_repo_name, normalize_username};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Search result pages go stale fast; they get a short TTL regardless of the
/// configured default.
const SEARCH_TTL: Duration = Duration::from_secs(5 * 60);

/// Default page size for search requests.
const SEARCH_PAGE_SIZE: u8 = 30;

pub struct RepoService {
    api: Arc<dyn GitHubApi>,
    cache: Arc<dyn CacheStore>,
    config: Arc<AppConfig>,
}

impl RepoService {
    pub fn new(
        api: Arc<dyn GitHubApi>,
        cache: Arc<dyn CacheStore>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self { api, cache, config }
    }

    pub(crate) fn api(&self) -> &dyn GitHubApi {
        self.api.as_ref()
    }

    pub(crate) fn config(&self) -> &AppConfig {
        &self.config
    }

    /// User stats: profile plus the top-N repositories by stars.
    ///
    /// Requests wider than the configured maximum are capped to it, so only
    /// narrower limits get their own cache entry; every limit that can
    /// produce a distinct payload has a distinct key.
    pub async fn user_summary(
        &self,
        username: &str,
        limit: Option<i64>,
    ) -> ServiceResult<SummaryResponse> {
        let started = Instant::now();
        let username = normalize_username(username)?;

        let default_limit = self.config.max_repositories as i64;
        let effective_limit = limit.unwrap_or(default_limit).min(default_limit);
        let key_limit = limit.filter(|&n| n < default_limit);
        let key = keys::user_stats(&username, key_limit)?;

        if let Some(summary) = cache::get_json::<UserSummary>(self.cache.as_ref(), &key).await {
            return Ok(SummaryResponse {
                summary,
                cached: true,
                response_time_ms: started.elapsed().as_millis() as u64,
            });
        }

        let summary = self.build_user_summary(&username, effective_limit).await?;
        cache::set_json(self.cache.as_ref(), &key, &summary, None).await;

        Ok(SummaryResponse {
            summary,
            cached: false,
            response_time_ms: started.elapsed().as_millis() as u64,
        })
    }

    async fn build_user_summary(
        &self,
        username: &str,
        limit: i64,
    ) -> ServiceResult<UserSummary> {
        // Profile and repository list are independent; fetch them together.
        let (user, repos) = tokio::join!(
            self.api.get_user(username),
            fetch_all_repositories(self.api.as_ref(), username)
        );
        let user = user?;
        let mut repos = repos?;

        let total_repositories = repos.len();
        let languages = transform::language_stats(&repos);

        transform::sort_by_stars(&mut repos);
        let top = transform::limit(repos, limit);
        let repositories = top
            .iter()
            .map(|repo| transform::repository_summary(repo, None, None))
            .collect();

        Ok(UserSummary {
            user: transform::user_profile(user),
            repositories,
            total_repositories,
            languages,
        })
    }

    /// Repository listing: the raw list is cached by username only, and the
    /// requested sort/limit/enrichment is applied after the cache read so one
    /// cached fetch serves every combination.
    pub async fn user_repositories(
        &self,
        username: &str,
        options: &RepoListOptions,
    ) -> ServiceResult<Vec<RepositorySummary>> {
        let username = normalize_username(username)?;
        let key = keys::user_repos(&username)?;

        let mut repos = match cache::get_json::<Vec<RawRepository>>(self.cache.as_ref(), &key).await
        {
            Some(repos) => repos,
            None => {
                let repos = fetch_all_repositories(self.api.as_ref(), &username).await?;
                cache::set_json(self.cache.as_ref(), &key, &repos, None).await;
                repos
            }
        };

        match options.sort {
            RepoSort::Stars => transform::sort_by_stars(&mut repos),
            RepoSort::Recent => transform::sort_by_recency(&mut repos),
        }
        let limit = options.limit.unwrap_or(self.config.max_repositories as i64);
        let repos = transform::limit(repos, limit);

        if !options.include_commits {
            return Ok(repos
                .iter()
                .map(|repo| transform::repository_summary(repo, None, None))
                .collect());
        }

        let pairs: Vec<(String, String)> = repos
            .iter()
            .filter_map(transform::owner_and_name)
            .collect();
        let dates = batch::latest_commit_dates(self.api.as_ref(), &pairs).await;

        Ok(repos
            .iter()
            .map(|repo| {
                let commit_date = transform::owner_and_name(repo)
                    .and_then(|(owner, name)| dates.get(&format!("{owner}/{name}")).cloned())
                    .flatten();
                let resolved = transform::resolve_last_commit_date(commit_date, repo);
                transform::repository_summary(repo, resolved, None)
            })
            .collect())
    }

    /// Single repository lookup with best-effort last-commit enrichment.
    pub async fn repository(&self, owner: &str, name: &str) -> ServiceResult<RepositorySummary> {
        let owner = normalize_username(owner)?;
        let name = normalize_repo_name(name)?;
        let key = keys::repository(&owner, &name)?;

        if let Some(summary) =
            cache::get_json::<RepositorySummary>(self.cache.as_ref(), &key).await
        {
            return Ok(summary);
        }

        let raw = self.api.get_repository(&owner, &name).await?;

        // Enrichment is best-effort: a failed commit lookup degrades to the
        // repository's own timestamps.
        let commit_date = match self.api.list_commits(&owner, &name, 1).await {
            Ok(commits) => commits.first().and_then(transform::commit_date),
            Err(err) => {
                log::warn!("last-commit enrichment failed for {owner}/{name}: {err}");
                None
            }
        };
        let resolved = transform::resolve_last_commit_date(commit_date, &raw);
        let summary = transform::repository_summary(&raw, resolved, None);

        cache::set_json(self.cache.as_ref(), &key, &summary, None).await;
        Ok(summary)
    }

    /// README lookup with owner/name-derived URL fallbacks.
    pub async fn readme(&self, owner: &str, name: &str) -> ServiceResult<ReadmeContent> {
        let owner = normalize_username(owner)?;
        let name = normalize_repo_name(name)?;
        let key = keys::readme(&owner, &name)?;

        if let Some(readme) = cache::get_json::<ReadmeContent>(self.cache.as_ref(), &key).await {
            return Ok(readme);
        }

        let raw = self.api.get_readme(&owner, &name).await?;
        let readme = transform::readme_content(raw, &owner, &name);

        cache::set_json(self.cache.as_ref(), &key, &readme, None).await;
        Ok(readme)
    }

    /// Repository search.
    ///
    /// The cache key covers query and page only, not sort or page size, so
    /// callers sharing a query+page share an entry regardless of requested
    /// sort. Known imprecision, kept deliberately.
    pub async fn search(&self, query: &str, page: u32) -> ServiceResult<SearchResults> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::Validation("search query must not be empty".into()));
        }
        let page = page.max(1);
        let key = keys::search(trimmed, page)?;

        let raw_page = match cache::get_json::<SearchPage>(self.cache.as_ref(), &key).await {
            Some(cached) => cached,
            None => {
                let fetched = self
                    .api
                    .search_repositories(trimmed, page, SEARCH_PAGE_SIZE, Some("stars"))
                    .await?;
                cache::set_json(self.cache.as_ref(), &key, &fetched, Some(SEARCH_TTL)).await;
                fetched
            }
        };

        Ok(SearchResults {
            total_count: raw_page.total_count.unwrap_or(0),
            page,
            items: raw_page
                .items
                .iter()
                .map(|repo| transform::repository_summary(repo, None, None))
                .collect(),
        })
    }

    /// Contribution feed pass-through; not part of the cached core.
    pub async fn user_contributions(&self, username: &str) -> ServiceResult<serde_json::Value> {
        let username = normalize_username(username)?;
        Ok(self.api.list_user_events(&username).await?)
    }

    /// Drop the user-stats and user-repositories entries for a username.
    pub async fn invalidate_user(&self, username: &str) -> ServiceResult<()> {
        let username = normalize_username(username)?;
        let stats_key = keys::user_stats(&username, None)?;
        let repos_key = keys::user_repos(&username)?;

        self.cache.delete(&stats_key).await;
        // Limit-suffixed variants share the base key as prefix.
        self.cache.delete_by_prefix(&format!("{stats_key}:")).await;
        self.cache.delete(&repos_key).await;
        Ok(())
    }

    /// Pre-populate the user-stats and user-repositories entries. Used for
    /// administrative refresh, not on the request hot path.
    pub async fn warm_user(&self, username: &str) -> ServiceResult<()> {
        let username = normalize_username(username)?;
        let stats_key = keys::user_stats(&username, None)?;
        let repos_key = keys::user_repos(&username)?;

        let (user, repos) = tokio::join!(
            self.api.get_user(&username),
            fetch_all_repositories(self.api.as_ref(), &username)
        );
        let user = user?;
        let repos = repos?;

        let repos_entry = cache::encode_json(&repos_key, &repos);

        let mut sorted = repos;
        let total_repositories = sorted.len();
        let languages = transform::language_stats(&sorted);
        transform::sort_by_stars(&mut sorted);
        let top = transform::limit(sorted, self.config.max_repositories as i64);

        let summary = UserSummary {
            user: transform::user_profile(user),
            repositories: top
                .iter()
                .map(|repo| transform::repository_summary(repo, None, None))
                .collect(),
            total_repositories,
            languages,
        };
        let stats_entry = cache::encode_json(&stats_key, &summary);

        let entries: Vec<_> = [repos_entry, stats_entry].into_iter().flatten().collect();
        self.cache.set_many(entries).await;

        log::info!("warmed cache for {username} ({total_repositories} repositories)");
        Ok(())
    }
}
