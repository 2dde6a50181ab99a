//! Transform/aggregation engine.
//!
//! Pure, side-effect-free functions turning raw upstream payloads into the
//! facade's DTOs: sorting, filtering, limiting, language statistics, and the
//! last-commit-date fallback chain. Nothing here touches the network or the
//! cache.

use crate::github::types::{LanguageBytes, RawCommit, RawReadme, RawRepository, RawUser};
use crate::service::types::{
    LanguageCount, LanguageStat, ReadmeContent, RepositorySummary, UserProfile,
};
use chrono::DateTime;

/// Sort descending by star count; missing counts sort as 0. Stable, so
/// equal-star ties keep their original order.
pub fn sort_by_stars(repos: &mut [RawRepository]) {
    repos.sort_by(|a, b| {
        b.stargazers_count
            .unwrap_or(0)
            .cmp(&a.stargazers_count.unwrap_or(0))
    });
}

/// Sort descending by `updated_at`, falling back to `created_at` when
/// absent. Repositories with neither timestamp sort last.
pub fn sort_by_recency(repos: &mut [RawRepository]) {
    fn recency(repo: &RawRepository) -> Option<i64> {
        let raw = non_empty(repo.updated_at.as_deref()).or(non_empty(repo.created_at.as_deref()))?;
        DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.timestamp())
    }
    repos.sort_by(|a, b| recency(b).cmp(&recency(a)));
}

/// Take the first N entries; N ≤ 0 yields an empty result, never an error.
pub fn limit<T>(mut items: Vec<T>, n: i64) -> Vec<T> {
    if n <= 0 {
        return Vec::new();
    }
    items.truncate(n as usize);
    items
}

/// Case-insensitive exact match on the primary language field.
pub fn filter_by_language(repos: Vec<RawRepository>, language: &str) -> Vec<RawRepository> {
    repos
        .into_iter()
        .filter(|repo| {
            repo.language
                .as_deref()
                .is_some_and(|l| l.eq_ignore_ascii_case(language))
        })
        .collect()
}

/// Exclude private repositories.
pub fn filter_public(repos: Vec<RawRepository>) -> Vec<RawRepository> {
    repos
        .into_iter()
        .filter(|repo| !repo.private.unwrap_or(false))
        .collect()
}

/// Primary-language occurrence counts over a repository list.
///
/// Repositories without a language are excluded from both the numerator and
/// the denominator; percentages are integer-rounded and sorted by count.
pub fn language_stats(repos: &[RawRepository]) -> Vec<LanguageCount> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for repo in repos {
        let Some(language) = non_empty(repo.language.as_deref()) else {
            continue;
        };
        match counts.iter_mut().find(|(name, _)| name == language) {
            Some((_, count)) => *count += 1,
            None => counts.push((language.to_string(), 1)),
        }
    }

    let total: u64 = counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut stats: Vec<LanguageCount> = counts
        .into_iter()
        .map(|(language, count)| LanguageCount {
            language,
            percentage: rounded_percentage(count, total),
            count,
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count).then(a.language.cmp(&b.language)));
    stats
}

/// Per-repository language share from upstream byte counts, sorted by share.
pub fn language_breakdown(bytes: &LanguageBytes) -> Vec<LanguageStat> {
    let total: u64 = bytes.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut stats: Vec<(String, u64)> = bytes
        .iter()
        .map(|(language, count)| (language.clone(), *count))
        .collect();
    stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    stats
        .into_iter()
        .map(|(language, count)| LanguageStat {
            language,
            percentage: rounded_percentage(count, total),
        })
        .collect()
}

fn rounded_percentage(count: u64, total: u64) -> u32 {
    ((count as f64 / total as f64) * 100.0).round() as u32
}

/// The commit-level date: committer date preferred over author date.
pub fn commit_date(commit: &RawCommit) -> Option<String> {
    let detail = commit.commit.as_ref()?;
    let committer = detail.committer.as_ref().and_then(|sig| sig.date.as_deref());
    let author = detail.author.as_ref().and_then(|sig| sig.date.as_deref());
    non_empty(committer)
        .or(non_empty(author))
        .map(str::to_string)
}

/// Fixed fallback chain for a repository's last-commit date: commit date,
/// then `pushed_at`, `updated_at`, `created_at`; first non-empty wins.
pub fn resolve_last_commit_date(
    commit_date: Option<String>,
    repo: &RawRepository,
) -> Option<String> {
    commit_date
        .filter(|date| !date.is_empty())
        .or_else(|| non_empty(repo.pushed_at.as_deref()).map(str::to_string))
        .or_else(|| non_empty(repo.updated_at.as_deref()).map(str::to_string))
        .or_else(|| non_empty(repo.created_at.as_deref()).map(str::to_string))
}

/// Extract `(owner, name)` from a repository payload.
///
/// Prefers the canonical `full_name`, then the owner object plus name field,
/// then the first two path segments of the canonical URL. `None` means the
/// repository cannot be batch-enriched, not a fatal error.
pub fn owner_and_name(repo: &RawRepository) -> Option<(String, String)> {
    if let Some(full_name) = non_empty(repo.full_name.as_deref())
        && let Some((owner, name)) = full_name.split_once('/')
        && !owner.is_empty()
        && !name.is_empty()
    {
        return Some((owner.to_string(), name.to_string()));
    }

    let owner_login = repo
        .owner
        .as_ref()
        .and_then(|owner| non_empty(owner.login.as_deref()));
    if let Some(owner) = owner_login
        && let Some(name) = non_empty(repo.name.as_deref())
    {
        return Some((owner.to_string(), name.to_string()));
    }

    if let Some(url) = non_empty(repo.html_url.as_deref())
        && let Some(rest) = url.split("://").nth(1)
    {
        let mut segments = rest.split('/').skip(1).filter(|s| !s.is_empty());
        if let (Some(owner), Some(name)) = (segments.next(), segments.next()) {
            return Some((owner.to_string(), name.to_string()));
        }
    }

    log::warn!(
        "cannot determine owner/name for repository payload (name={:?})",
        repo.name
    );
    None
}

/// Build the stable profile DTO from a raw user payload.
pub fn user_profile(raw: RawUser) -> UserProfile {
    UserProfile {
        login: raw.login.unwrap_or_default(),
        name: raw.name,
        bio: raw.bio,
        location: raw.location,
        company: raw.company,
        blog: raw.blog,
        avatar_url: raw.avatar_url,
        profile_url: raw.html_url,
        followers: raw.followers.unwrap_or(0),
        following: raw.following.unwrap_or(0),
        public_repos: raw.public_repos.unwrap_or(0),
        public_gists: raw.public_gists.unwrap_or(0),
        created_at: raw.created_at,
        updated_at: raw.updated_at,
    }
}

/// Build the summary DTO, attaching optional enrichments.
pub fn repository_summary(
    raw: &RawRepository,
    last_commit_date: Option<String>,
    languages: Option<Vec<LanguageStat>>,
) -> RepositorySummary {
    let (owner, name) = match owner_and_name(raw) {
        Some((owner, name)) => (Some(owner), name),
        None => (None, raw.name.clone().unwrap_or_default()),
    };
    let full_name = raw.full_name.clone().unwrap_or_else(|| match &owner {
        Some(owner) => format!("{owner}/{name}"),
        None => name.clone(),
    });

    RepositorySummary {
        owner,
        name,
        full_name,
        description: raw.description.clone(),
        language: raw.language.clone(),
        stars: raw.stargazers_count.unwrap_or(0),
        forks: raw.forks_count.unwrap_or(0),
        open_issues: raw.open_issues_count.unwrap_or(0),
        private: raw.private.unwrap_or(false),
        url: raw.html_url.clone(),
        created_at: raw.created_at.clone(),
        updated_at: raw.updated_at.clone(),
        pushed_at: raw.pushed_at.clone(),
        last_commit_date,
        languages,
    }
}

/// Build the README DTO, falling back to repository-derived defaults for
/// fields the upstream payload omits.
pub fn readme_content(raw: RawReadme, owner: &str, name: &str) -> ReadmeContent {
    let file_name = raw
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "README.md".to_string());
    let path = raw
        .path
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| file_name.clone());

    ReadmeContent {
        owner: owner.to_string(),
        repository: name.to_string(),
        url: raw
            .html_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| format!("https://github.com/{owner}/{name}#readme")),
        download_url: raw
            .download_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| {
                format!("https://raw.githubusercontent.com/{owner}/{name}/HEAD/{path}")
            }),
        name: file_name,
        path,
        size: raw.size.unwrap_or(0),
        content: raw.content.unwrap_or_default(),
        encoding: raw
            .encoding
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "base64".to_string()),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
