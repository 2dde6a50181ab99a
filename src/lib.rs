//! `hubcap`: cached HTTP facade over the GitHub REST API.
//!
//! The facade accepts requests for user profiles, repositories, READMEs, and
//! random repository discovery, forwards validated queries upstream,
//! reshapes responses into stable DTOs, and caches results to cut upstream
//! call volume. Layers, leaves first:
//!
//! - [`github`]: classified upstream client plus pagination/batch helpers
//! - [`cache`]: swappable key/value store with per-entry TTL and key builders
//! - [`transform`]: pure raw-payload-to-DTO functions
//! - [`service`]: the orchestrator composing the three above
//! - [`api`]: thin axum surface over the service

pub mod api;
pub mod cache;
pub mod config;
pub mod github;
pub mod service;
pub mod transform;

pub use cache::{CacheStore, MemoryCache};
pub use config::AppConfig;
pub use github::{GitHubApi, GitHubClient, GitHubError, GitHubResult};
pub use service::{RepoService, ServiceError, ServiceResult};
