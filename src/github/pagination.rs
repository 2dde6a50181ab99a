//! Exhaustive paged listing.

use crate::github::types::RawRepository;
use crate::github::{GitHubApi, GitHubResult, MAX_PAGE_SIZE};

/// Hard stop so a misbehaving upstream that keeps echoing full pages can
/// never spin the loop forever.
const MAX_PAGES: u32 = 100;

/// Fetch every repository of a user, page by page.
///
/// Stops at the first short or empty page (end of data) or at [`MAX_PAGES`].
pub async fn fetch_all_repositories(
    api: &dyn GitHubApi,
    username: &str,
) -> GitHubResult<Vec<RawRepository>> {
    let mut all = Vec::new();

    for page in 1..=MAX_PAGES {
        let batch = api
            .list_user_repositories(username, page, MAX_PAGE_SIZE)
            .await?;
        let got = batch.len();
        all.extend(batch);

        if got < MAX_PAGE_SIZE as usize {
            break;
        }
    }

    log::debug!("fetched {} repositories for {username}", all.len());
    Ok(all)
}
