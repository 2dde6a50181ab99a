//! In-process mock upstream for orchestrator tests.

use async_trait::async_trait;
use hubcap::cache::MemoryCache;
use hubcap::config::AppConfig;
use hubcap::github::types::{
    LanguageBytes, RawCommit, RawCommitDetail, RawCommitSignature, RawOwner, RawReadme,
    RawRepository, RawUser, SearchPage,
};
use hubcap::github::{GitHubApi, GitHubError, GitHubResult};
use hubcap::service::RepoService;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct Calls {
    pub get_user: AtomicUsize,
    pub list_repos: AtomicUsize,
    pub search: AtomicUsize,
    pub list_commits: AtomicUsize,
}

impl Calls {
    pub fn get_user(&self) -> usize {
        self.get_user.load(Ordering::SeqCst)
    }
    pub fn list_repos(&self) -> usize {
        self.list_repos.load(Ordering::SeqCst)
    }
    pub fn search(&self) -> usize {
        self.search.load(Ordering::SeqCst)
    }
    pub fn list_commits(&self) -> usize {
        self.list_commits.load(Ordering::SeqCst)
    }
}

/// Programmable upstream double. Missing entries behave as failures: users
/// and repositories answer 404, commit and language lookups answer an
/// unclassified failure (exercising the degraded paths).
#[derive(Default)]
pub struct MockGitHub {
    pub users: Mutex<HashMap<String, RawUser>>,
    pub repos_by_user: Mutex<HashMap<String, Vec<RawRepository>>>,
    pub repositories: Mutex<HashMap<String, RawRepository>>,
    pub readmes: Mutex<HashMap<String, RawReadme>>,
    pub commits: Mutex<HashMap<String, Vec<RawCommit>>>,
    pub languages: Mutex<HashMap<String, LanguageBytes>>,
    /// Consumed front-to-back, one page per search call; empty means every
    /// further search returns an empty page.
    pub search_pages: Mutex<Vec<SearchPage>>,
    pub calls: Calls,
}

#[async_trait]
impl GitHubApi for MockGitHub {
    async fn get_user(&self, username: &str) -> GitHubResult<RawUser> {
        self.calls.get_user.fetch_add(1, Ordering::SeqCst);
        self.users
            .lock()
            .unwrap()
            .get(username)
            .cloned()
            .ok_or_else(|| GitHubError::NotFound {
                context: format!("getUser for {username}"),
            })
    }

    async fn list_user_repositories(
        &self,
        username: &str,
        page: u32,
        per_page: u8,
    ) -> GitHubResult<Vec<RawRepository>> {
        self.calls.list_repos.fetch_add(1, Ordering::SeqCst);
        let all = self
            .repos_by_user
            .lock()
            .unwrap()
            .get(username)
            .cloned()
            .ok_or_else(|| GitHubError::NotFound {
                context: format!("listUserRepositories for {username} page {page}"),
            })?;

        let start = ((page - 1) as usize) * per_page as usize;
        let end = (start + per_page as usize).min(all.len());
        Ok(if start >= all.len() {
            Vec::new()
        } else {
            all[start..end].to_vec()
        })
    }

    async fn get_repository(&self, owner: &str, name: &str) -> GitHubResult<RawRepository> {
        self.repositories
            .lock()
            .unwrap()
            .get(&format!("{owner}/{name}"))
            .cloned()
            .ok_or_else(|| GitHubError::NotFound {
                context: format!("getRepository for {owner}/{name}"),
            })
    }

    async fn get_readme(&self, owner: &str, name: &str) -> GitHubResult<RawReadme> {
        self.readmes
            .lock()
            .unwrap()
            .get(&format!("{owner}/{name}"))
            .cloned()
            .ok_or_else(|| GitHubError::NotFound {
                context: format!("getReadme for {owner}/{name}"),
            })
    }

    async fn search_repositories(
        &self,
        _query: &str,
        _page: u32,
        _per_page: u8,
        _sort: Option<&str>,
    ) -> GitHubResult<SearchPage> {
        self.calls.search.fetch_add(1, Ordering::SeqCst);
        let mut pages = self.search_pages.lock().unwrap();
        if pages.is_empty() {
            Ok(SearchPage::default())
        } else {
            Ok(pages.remove(0))
        }
    }

    async fn list_commits(
        &self,
        owner: &str,
        name: &str,
        _per_page: u8,
    ) -> GitHubResult<Vec<RawCommit>> {
        self.calls.list_commits.fetch_add(1, Ordering::SeqCst);
        self.commits
            .lock()
            .unwrap()
            .get(&format!("{owner}/{name}"))
            .cloned()
            .ok_or_else(|| GitHubError::Unknown {
                context: format!("listCommits for {owner}/{name}"),
                status: Some(500),
                message: "mock commit failure".into(),
            })
    }

    async fn list_languages(&self, owner: &str, name: &str) -> GitHubResult<LanguageBytes> {
        self.languages
            .lock()
            .unwrap()
            .get(&format!("{owner}/{name}"))
            .cloned()
            .ok_or_else(|| GitHubError::Unknown {
                context: format!("listLanguages for {owner}/{name}"),
                status: Some(500),
                message: "mock language failure".into(),
            })
    }

    async fn list_user_events(&self, _username: &str) -> GitHubResult<serde_json::Value> {
        Ok(serde_json::json!([]))
    }
}

pub fn user(login: &str) -> RawUser {
    RawUser {
        login: Some(login.to_string()),
        html_url: Some(format!("https://github.com/{login}")),
        ..Default::default()
    }
}

pub fn user_in(login: &str, location: &str) -> RawUser {
    RawUser {
        location: Some(location.to_string()),
        ..user(login)
    }
}

pub fn repo(owner: &str, name: &str, stars: u64) -> RawRepository {
    RawRepository {
        name: Some(name.to_string()),
        full_name: Some(format!("{owner}/{name}")),
        owner: Some(RawOwner {
            login: Some(owner.to_string()),
            ..Default::default()
        }),
        html_url: Some(format!("https://github.com/{owner}/{name}")),
        stargazers_count: Some(stars),
        private: Some(false),
        pushed_at: Some("2024-03-01T00:00:00Z".to_string()),
        updated_at: Some("2024-02-01T00:00:00Z".to_string()),
        created_at: Some("2024-01-01T00:00:00Z".to_string()),
        ..Default::default()
    }
}

pub fn commit(date: &str) -> RawCommit {
    RawCommit {
        sha: Some("abc123".into()),
        commit: Some(RawCommitDetail {
            committer: Some(RawCommitSignature {
                date: Some(date.to_string()),
                ..Default::default()
            }),
            author: None,
            message: None,
        }),
    }
}

/// Service wired to the mock and a fresh in-memory cache. `max_search_pages`
/// is pinned to 1 so the random page choice is deterministic in tests.
pub fn service_with(mock: Arc<MockGitHub>) -> (RepoService, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new(100, Duration::from_secs(60)));
    let config = Arc::new(AppConfig {
        max_repositories: 10,
        max_search_pages: 1,
        ..Default::default()
    });
    let service = RepoService::new(
        mock as Arc<dyn GitHubApi>,
        cache.clone() as Arc<dyn hubcap::cache::CacheStore>,
        config,
    );
    (service, cache)
}
