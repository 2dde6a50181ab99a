//! Random repository discovery.
//!
//! Upstream search returns relevance/star-ordered pages, not uniform
//! samples, and caps how deep pagination can go. The compromise here is
//! "uniform over a randomly chosen page, retried on empty pages": pick a
//! random page within the cap, filter the candidates, and draw one uniformly
//! from the survivors.

use crate::github::types::RawRepository;
use crate::github::{GitHubApi, batch};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::types::{RandomFilters, RandomRepositoryResponse};
use crate::service::validate::validate_star_range;
use crate::service::{RepoService, SEARCH_PAGE_SIZE};
use crate::transform;
use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use std::collections::HashMap;

/// Fresh random pages are tried this many times before giving up.
pub const MAX_ATTEMPTS: u32 = 10;

/// Upstream search never serves more than 1000 results, so the configured
/// page range is clamped to a hard ceiling.
const UPSTREAM_PAGE_CAP: u32 = 100;

lazy_static! {
    /// Common shorthand for search-qualifier languages.
    static ref LANGUAGE_ALIASES: HashMap<&'static str, &'static str> = {
        let mut aliases = HashMap::new();
        aliases.insert("js", "JavaScript");
        aliases.insert("javascript", "JavaScript");
        aliases.insert("ts", "TypeScript");
        aliases.insert("typescript", "TypeScript");
        aliases.insert("py", "Python");
        aliases.insert("python", "Python");
        aliases.insert("rs", "Rust");
        aliases.insert("rust", "Rust");
        aliases.insert("golang", "Go");
        aliases.insert("go", "Go");
        aliases.insert("rb", "Ruby");
        aliases.insert("ruby", "Ruby");
        aliases.insert("kt", "Kotlin");
        aliases.insert("kotlin", "Kotlin");
        aliases.insert("java", "Java");
        aliases.insert("swift", "Swift");
        aliases.insert("cpp", "C++");
        aliases.insert("c++", "C++");
        aliases.insert("csharp", "C#");
        aliases.insert("c#", "C#");
        aliases.insert("objc", "Objective-C");
        aliases.insert("shell", "Shell");
        aliases.insert("c", "C");
        aliases
    };

    /// Alias groups for matching self-reported owner locations. Dots are
    /// stripped on both sides before matching, so "u.s.a." folds into "usa".
    static ref COUNTRY_ALIASES: Vec<&'static [&'static str]> = vec![
        &["usa", "united states", "united states of america", "america"][..],
        &["uk", "united kingdom", "great britain", "britain", "england", "scotland", "wales"][..],
        &["germany", "deutschland"][..],
        &["netherlands", "the netherlands", "holland"][..],
        &["china", "prc"][..],
        &["south korea", "korea", "republic of korea"][..],
        &["czechia", "czech republic"][..],
        &["uae", "united arab emirates", "dubai"][..],
        &["russia", "russian federation"][..],
        &["turkey", "türkiye"][..],
        &["india"][..],
        &["japan"][..],
        &["canada"][..],
        &["brazil", "brasil"][..],
        &["france"][..],
        &["spain", "españa"][..],
        &["italy", "italia"][..],
        &["australia"][..],
        &["sweden"][..],
        &["switzerland"][..],
        &["poland", "polska"][..],
        &["ukraine"][..],
        &["singapore"][..],
        &["israel"][..],
        &["nigeria"][..],
        &["mexico", "méxico"][..],
        &["argentina"][..],
        &["indonesia"][..],
        &["vietnam", "viet nam"][..],
    ];
}

impl RepoService {
    /// Return one repository sampled from a randomly chosen page of filtered
    /// search results.
    pub async fn random_repository(
        &self,
        filters: &RandomFilters,
    ) -> ServiceResult<RandomRepositoryResponse> {
        validate_star_range(filters.min_stars, filters.max_stars)?;
        let matcher = match &filters.country {
            Some(country) => Some(country_matcher(country)?),
            None => None,
        };

        let query = build_search_query(filters);
        let max_pages = self.config().max_search_pages.clamp(1, UPSTREAM_PAGE_CAP);

        for attempt in 1..=MAX_ATTEMPTS {
            let page = rand::thread_rng().gen_range(1..=max_pages);
            let found = self
                .api()
                .search_repositories(&query, page, SEARCH_PAGE_SIZE, None)
                .await?;

            let mut candidates = match &matcher {
                Some(re) => filter_by_country(self.api(), found.items, re).await,
                None => found.items.into_iter().map(|repo| (repo, None)).collect(),
            };

            if candidates.is_empty() {
                log::debug!(
                    "random attempt {attempt}/{MAX_ATTEMPTS}: page {page} of \"{query}\" \
                     yielded no candidates"
                );
                continue;
            }

            let index = rand::thread_rng().gen_range(0..candidates.len());
            let (repo, mut owner_location) = candidates.swap_remove(index);

            // Enrichment is best-effort: failures degrade to the unenriched
            // result instead of failing the request.
            let mut languages = None;
            if let Some((owner, name)) = transform::owner_and_name(&repo) {
                match self.api().list_languages(&owner, &name).await {
                    Ok(bytes) => {
                        let breakdown = transform::language_breakdown(&bytes);
                        if !breakdown.is_empty() {
                            languages = Some(breakdown);
                        }
                    }
                    Err(err) => {
                        log::warn!("language enrichment failed for {owner}/{name}: {err}");
                    }
                }

                if owner_location.is_none() {
                    match self.api().get_user(&owner).await {
                        Ok(user) => owner_location = user.location,
                        Err(err) => {
                            log::debug!("owner location enrichment failed for {owner}: {err}");
                        }
                    }
                }
            }

            return Ok(RandomRepositoryResponse {
                repository: transform::repository_summary(&repo, None, languages),
                owner_location,
                attempts: attempt,
            });
        }

        Err(ServiceError::NoRepositoriesFound)
    }
}

/// Map caller filters onto upstream search syntax. Deterministic: the same
/// filters always produce the same query string.
pub(crate) fn build_search_query(filters: &RandomFilters) -> String {
    let mut parts = vec!["is:public".to_string()];

    match (filters.min_stars, filters.max_stars) {
        (Some(min), Some(max)) => parts.push(format!("stars:{min}..{max}")),
        (Some(min), None) => parts.push(format!("stars:>={min}")),
        (None, Some(max)) => parts.push(format!("stars:<={max}")),
        (None, None) => parts.push("stars:>1".to_string()),
    }

    if let Some(language) = filters.language.as_deref().map(str::trim)
        && !language.is_empty()
    {
        parts.push(format!("language:{}", normalize_language(language)));
    }

    parts.join(" ")
}

/// Alias-normalize a language qualifier; quote it when it contains anything
/// beyond plain alphanumerics.
fn normalize_language(language: &str) -> String {
    let canonical = LANGUAGE_ALIASES
        .get(language.to_lowercase().as_str())
        .copied()
        .unwrap_or(language);
    if canonical.chars().all(|c| c.is_ascii_alphanumeric()) {
        canonical.to_string()
    } else {
        format!("\"{canonical}\"")
    }
}

/// Build a word-boundary, case-insensitive matcher for a country and its
/// aliases. Free-text location matching is inherently a heuristic.
pub(crate) fn country_matcher(country: &str) -> ServiceResult<Regex> {
    let normalized = country.trim().to_lowercase().replace('.', "");
    if normalized.is_empty() {
        return Err(ServiceError::Validation("country must not be empty".into()));
    }

    let aliases: Vec<String> = COUNTRY_ALIASES
        .iter()
        .find(|group| group.contains(&normalized.as_str()))
        .map(|group| group.iter().map(|a| a.to_string()).collect())
        .unwrap_or_else(|| vec![normalized.clone()]);

    let alternatives = aliases
        .iter()
        .map(|alias| regex::escape(alias))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(r"(?i)\b({alternatives})\b"))
        .map_err(|err| ServiceError::Validation(format!("unusable country filter: {err}")))
}

pub(crate) fn location_matches(matcher: &Regex, location: &str) -> bool {
    matcher.is_match(&location.replace('.', ""))
}

/// Keep only repositories whose owner's self-reported location matches.
/// Location lookups run in small concurrent batches; a failed lookup simply
/// drops that owner from consideration.
async fn filter_by_country(
    api: &dyn GitHubApi,
    items: Vec<RawRepository>,
    matcher: &Regex,
) -> Vec<(RawRepository, Option<String>)> {
    let mut logins: Vec<String> = Vec::new();
    for repo in &items {
        if let Some((owner, _)) = transform::owner_and_name(repo)
            && !logins.contains(&owner)
        {
            logins.push(owner);
        }
    }

    let locations = batch::owner_locations(api, &logins).await;

    items
        .into_iter()
        .filter_map(|repo| {
            let (owner, _) = transform::owner_and_name(&repo)?;
            let location = locations.get(&owner).cloned().flatten()?;
            if location_matches(matcher, &location) {
                Some((repo, Some(location)))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(
        min: Option<i64>,
        max: Option<i64>,
        language: Option<&str>,
    ) -> RandomFilters {
        RandomFilters {
            min_stars: min,
            max_stars: max,
            language: language.map(str::to_string),
            country: None,
        }
    }

    #[test]
    fn query_star_qualifiers() {
        assert_eq!(build_search_query(&filters(None, None, None)), "is:public stars:>1");
        assert_eq!(
            build_search_query(&filters(Some(100), Some(500), None)),
            "is:public stars:100..500"
        );
        assert_eq!(
            build_search_query(&filters(Some(100), None, None)),
            "is:public stars:>=100"
        );
        assert_eq!(
            build_search_query(&filters(None, Some(500), None)),
            "is:public stars:<=500"
        );
    }

    #[test]
    fn query_language_is_alias_normalized_and_quoted() {
        assert_eq!(
            build_search_query(&filters(None, None, Some("js"))),
            "is:public stars:>1 language:JavaScript"
        );
        assert_eq!(
            build_search_query(&filters(None, None, Some("Rust"))),
            "is:public stars:>1 language:Rust"
        );
        assert_eq!(
            build_search_query(&filters(None, None, Some("cpp"))),
            "is:public stars:>1 language:\"C++\""
        );
        assert_eq!(
            build_search_query(&filters(None, None, Some("Jupyter Notebook"))),
            "is:public stars:>1 language:\"Jupyter Notebook\""
        );
    }

    #[test]
    fn country_matching_uses_aliases_and_word_boundaries() {
        let usa = country_matcher("united states").unwrap();
        assert!(location_matches(&usa, "San Francisco, USA"));
        assert!(location_matches(&usa, "U.S.A."));
        assert!(location_matches(&usa, "Small Town, America"));
        assert!(!location_matches(&usa, "Busan, South Korea"));
        assert!(!location_matches(&usa, "Australia"));

        let korea = country_matcher("korea").unwrap();
        assert!(location_matches(&korea, "Seoul, South Korea"));
        assert!(!location_matches(&korea, "Tokyo, Japan"));
    }

    #[test]
    fn unknown_countries_match_literally() {
        let iceland = country_matcher("Iceland").unwrap();
        assert!(location_matches(&iceland, "Reykjavík, Iceland"));
        assert!(!location_matches(&iceland, "Greenland"));
    }

    #[test]
    fn empty_country_is_rejected() {
        assert!(country_matcher("  ").is_err());
        assert!(country_matcher("...").is_err());
    }
}
