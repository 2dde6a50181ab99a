//! Deterministic cache key construction.
//!
//! Distinct logical queries must never collide and identical queries must
//! always land on the same entry. Identifier inputs are expected to be
//! validated upstream; an empty component here is a programming error and is
//! rejected before any cache or network call can happen.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

/// An empty identifier reached the key builder.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cache key component must not be empty: {0}")]
pub struct EmptyKeyPart(pub &'static str);

fn require<'a>(part: &'a str, name: &'static str) -> Result<&'a str, EmptyKeyPart> {
    if part.is_empty() {
        Err(EmptyKeyPart(name))
    } else {
        Ok(part)
    }
}

/// `user_stats:{username}`, suffixed `:max:{N}` when a narrower result-size
/// limit is requested so different limits never share an entry.
pub fn user_stats(username: &str, max: Option<i64>) -> Result<String, EmptyKeyPart> {
    let username = require(username, "username")?;
    Ok(match max {
        Some(n) => format!("user_stats:{username}:max:{n}"),
        None => format!("user_stats:{username}"),
    })
}

/// `user_repos:{username}`
pub fn user_repos(username: &str) -> Result<String, EmptyKeyPart> {
    Ok(format!("user_repos:{}", require(username, "username")?))
}

/// `repo:{owner}:{name}`
pub fn repository(owner: &str, name: &str) -> Result<String, EmptyKeyPart> {
    Ok(format!(
        "repo:{}:{}",
        require(owner, "owner")?,
        require(name, "name")?
    ))
}

/// `readme:{owner}:{name}`
pub fn readme(owner: &str, name: &str) -> Result<String, EmptyKeyPart> {
    Ok(format!(
        "readme:{}:{}",
        require(owner, "owner")?,
        require(name, "name")?
    ))
}

/// `search:{base64(lowercased trimmed query)}:{page}`
///
/// Base64 keeps arbitrary query text out of the key syntax; lowercasing and
/// trimming make trivially-equivalent queries share an entry.
pub fn search(query: &str, page: u32) -> Result<String, EmptyKeyPart> {
    let normalized = query.trim().to_lowercase();
    let normalized = require(&normalized, "query")?;
    Ok(format!("search:{}:{page}", STANDARD.encode(normalized)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic() {
        assert_eq!(user_stats("octo", None), user_stats("octo", None));
        assert_eq!(repository("octo", "hello"), repository("octo", "hello"));
        assert_eq!(search("rust cli", 3), search("rust cli", 3));
    }

    #[test]
    fn distinct_inputs_never_collide() {
        assert_ne!(user_stats("octo", None), user_stats("octocat", None));
        assert_ne!(user_stats("octo", None), user_stats("octo", Some(5)));
        assert_ne!(user_stats("octo", Some(5)), user_stats("octo", Some(6)));
        assert_ne!(repository("a", "b"), repository("b", "a"));
        assert_ne!(search("rust", 1), search("rust", 2));
        assert_ne!(search("rust", 1), search("go", 1));
        assert_ne!(user_repos("octo"), user_stats("octo", None));
    }

    #[test]
    fn search_key_normalizes_case_and_whitespace() {
        assert_eq!(search("  Rust CLI  ", 1), search("rust cli", 1));
    }

    #[test]
    fn empty_identifiers_fail_fast() {
        assert_eq!(user_stats("", None), Err(EmptyKeyPart("username")));
        assert_eq!(user_repos(""), Err(EmptyKeyPart("username")));
        assert_eq!(repository("", "x"), Err(EmptyKeyPart("owner")));
        assert_eq!(repository("x", ""), Err(EmptyKeyPart("name")));
        assert_eq!(readme("", ""), Err(EmptyKeyPart("owner")));
        assert_eq!(search("   ", 1), Err(EmptyKeyPart("query")));
    }

    #[test]
    fn expected_shapes() {
        assert_eq!(user_stats("octo", None).unwrap(), "user_stats:octo");
        assert_eq!(user_stats("octo", Some(2)).unwrap(), "user_stats:octo:max:2");
        assert_eq!(user_repos("octo").unwrap(), "user_repos:octo");
        assert_eq!(repository("octo", "hello").unwrap(), "repo:octo:hello");
        assert_eq!(readme("octo", "hello").unwrap(), "readme:octo:hello");
        assert!(search("rust", 2).unwrap().starts_with("search:"));
        assert!(search("rust", 2).unwrap().ends_with(":2"));
    }
}
