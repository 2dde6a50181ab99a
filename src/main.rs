// hubcap server binary: wires config, upstream client, cache, and the axum
// router together and serves the facade.

use anyhow::Result;
use hubcap::{AppConfig, GitHubClient, MemoryCache, RepoService, api};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Arc::new(AppConfig::from_env()?);
    let client = GitHubClient::new(config.github_token.clone(), config.request_timeout)?;
    let cache = Arc::new(MemoryCache::new(config.cache_capacity, config.cache_ttl));
    let service = Arc::new(RepoService::new(Arc::new(client), cache, config.clone()));

    let app = api::router(service);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("listening on http://{addr}");
    log::info!("  health:  http://{addr}/health");
    log::info!("  summary: http://{addr}/v1/users/{{username}}/summary");
    log::info!("  random:  http://{addr}/v1/repositories/random");

    axum::serve(listener, app).await?;
    Ok(())
}
