//! Batched per-repository lookups.
//!
//! Lookups run in fixed-size concurrent batches with a short pause between
//! batches to stay under upstream rate limits. Every item settles: a failed
//! lookup is recorded as `None`, never aborts the rest of the batch.

use crate::github::GitHubApi;
use crate::transform::commit_date;
use futures::future::join_all;
use std::collections::HashMap;
use std::time::Duration;

/// Commits are fetched ten repositories at a time.
pub const COMMIT_BATCH_SIZE: usize = 10;

/// Owner profiles are fetched five at a time during country filtering.
pub const LOCATION_BATCH_SIZE: usize = 5;

/// Pause between consecutive batches.
pub const BATCH_PAUSE: Duration = Duration::from_millis(100);

/// Resolve the most recent commit date for each `(owner, name)` pair, keyed
/// by `"owner/name"` in the result.
pub async fn latest_commit_dates(
    api: &dyn GitHubApi,
    pairs: &[(String, String)],
) -> HashMap<String, Option<String>> {
    let mut dates = HashMap::with_capacity(pairs.len());

    for (index, chunk) in pairs.chunks(COMMIT_BATCH_SIZE).enumerate() {
        if index > 0 {
            tokio::time::sleep(BATCH_PAUSE).await;
        }

        let lookups = chunk.iter().map(|(owner, name)| async move {
            let key = format!("{owner}/{name}");
            match api.list_commits(owner, name, 1).await {
                Ok(commits) => {
                    let date = commits.first().and_then(commit_date);
                    (key, date)
                }
                Err(err) => {
                    log::debug!("latest commit lookup failed for {key}: {err}");
                    (key, None)
                }
            }
        });

        for (key, date) in join_all(lookups).await {
            dates.insert(key, date);
        }
    }

    dates
}

/// Resolve the self-reported profile location for each login.
pub async fn owner_locations(
    api: &dyn GitHubApi,
    logins: &[String],
) -> HashMap<String, Option<String>> {
    let mut locations = HashMap::with_capacity(logins.len());

    for (index, chunk) in logins.chunks(LOCATION_BATCH_SIZE).enumerate() {
        if index > 0 {
            tokio::time::sleep(BATCH_PAUSE).await;
        }

        let lookups = chunk.iter().map(|login| async move {
            match api.get_user(login).await {
                Ok(user) => (login.clone(), user.location),
                Err(err) => {
                    log::debug!("owner location lookup failed for {login}: {err}");
                    (login.clone(), None)
                }
            }
        });

        for (login, location) in join_all(lookups).await {
            locations.insert(login, location);
        }
    }

    locations
}
