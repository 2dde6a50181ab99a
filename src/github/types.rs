//! Raw upstream payload types.
//!
//! GitHub response schemas are only partially validated here: every field is
//! optional or defaulted and unknown fields are ignored, so payloads pass
//! through the facade without the client breaking on upstream additions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user profile as returned by `GET /users/{username}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUser {
    pub login: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub public_repos: Option<u64>,
    pub public_gists: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// The owner object embedded in repository payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOwner {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub location: Option<String>,
}

/// A repository as returned by the repos and search endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRepository {
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub owner: Option<RawOwner>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub open_issues_count: Option<u64>,
    pub private: Option<bool>,
    pub html_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
}

/// Commit author/committer signature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCommitSignature {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
}

/// The nested `commit` object of a commit payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCommitDetail {
    pub author: Option<RawCommitSignature>,
    pub committer: Option<RawCommitSignature>,
    pub message: Option<String>,
}

/// A commit as returned by `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCommit {
    pub sha: Option<String>,
    pub commit: Option<RawCommitDetail>,
}

/// A README file as returned by `GET /repos/{owner}/{repo}/readme`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReadme {
    pub name: Option<String>,
    pub path: Option<String>,
    pub size: Option<u64>,
    pub content: Option<String>,
    pub encoding: Option<String>,
    pub html_url: Option<String>,
    pub download_url: Option<String>,
}

/// One page of `GET /search/repositories` results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPage {
    pub total_count: Option<u64>,
    pub incomplete_results: Option<bool>,
    pub items: Vec<RawRepository>,
}

/// Byte counts per language from `GET /repos/{owner}/{repo}/languages`.
pub type LanguageBytes = BTreeMap<String, u64>;
