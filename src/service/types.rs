//! Stable DTOs returned by the facade.
//!
//! These shapes are the public contract; raw upstream payloads never leave
//! the service layer. Serialized camelCase for the HTTP surface and cached
//! verbatim where an operation caches transformed data.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Immutable snapshot of a user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub public_gists: u64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Primary-language occurrence statistics over a repository list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageCount {
    pub language: String,
    pub count: u64,
    pub percentage: u32,
}

/// One language's share of a single repository's bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStat {
    pub language: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub owner: Option<String>,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub private: bool,
    pub url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    /// Resolved through the commit/repo-timestamp fallback chain, not raw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<LanguageStat>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeContent {
    pub owner: String,
    pub repository: String,
    pub name: String,
    pub path: String,
    pub size: u64,
    pub content: String,
    pub encoding: String,
    pub url: String,
    pub download_url: String,
}

/// Cached payload of the user-stats operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user: UserProfile,
    pub repositories: Vec<RepositorySummary>,
    pub total_repositories: usize,
    pub languages: Vec<LanguageCount>,
}

/// User-stats response: the summary plus cache metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: UserSummary,
    pub cached: bool,
    pub response_time_ms: u64,
}

/// Sort key for repository listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepoSort {
    #[default]
    Stars,
    Recent,
}

impl FromStr for RepoSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stars" => Ok(RepoSort::Stars),
            "recent" | "updated" => Ok(RepoSort::Recent),
            other => Err(format!("unknown sort '{other}', expected 'stars' or 'recent'")),
        }
    }
}

/// Options applied after the cached raw list is read.
#[derive(Debug, Clone, Default)]
pub struct RepoListOptions {
    pub sort: RepoSort,
    pub limit: Option<i64>,
    pub include_commits: bool,
}

/// Caller filters for random repository discovery.
#[derive(Debug, Clone, Default)]
pub struct RandomFilters {
    pub min_stars: Option<i64>,
    pub max_stars: Option<i64>,
    pub language: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomRepositoryResponse {
    pub repository: RepositorySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_location: Option<String>,
    pub attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub total_count: u64,
    pub page: u32,
    pub items: Vec<RepositorySummary>,
}
