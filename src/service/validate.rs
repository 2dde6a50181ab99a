//! Caller input normalization and validation.
//!
//! Everything here runs before key construction, cache reads, or upstream
//! calls, so bad input never costs a network round trip.

use crate::service::error::{ServiceError, ServiceResult};

/// Trim whitespace and a leading `@`; reject empty results.
pub fn normalize_username(raw: &str) -> ServiceResult<String> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation("username must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Trim whitespace and a trailing `.git`; reject empty results.
pub fn normalize_repo_name(raw: &str) -> ServiceResult<String> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation(
            "repository name must not be empty".into(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Star bounds must be non-negative and ordered min ≤ max when both given.
pub fn validate_star_range(min: Option<i64>, max: Option<i64>) -> ServiceResult<()> {
    if let Some(min) = min
        && min < 0
    {
        return Err(ServiceError::Validation("min_stars must be non-negative".into()));
    }
    if let Some(max) = max
        && max < 0
    {
        return Err(ServiceError::Validation("max_stars must be non-negative".into()));
    }
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(ServiceError::Validation(format!(
            "min_stars ({min}) must not exceed max_stars ({max})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_normalization() {
        assert_eq!(normalize_username("@octo ").unwrap(), "octo");
        assert_eq!(normalize_username("  octo").unwrap(), "octo");
        assert_eq!(normalize_username("@ octo ").unwrap(), "octo");
        assert!(normalize_username("@").is_err());
        assert!(normalize_username("   ").is_err());
    }

    #[test]
    fn repo_name_normalization() {
        assert_eq!(normalize_repo_name("octo.git").unwrap(), "octo");
        assert_eq!(normalize_repo_name(" hello ").unwrap(), "hello");
        assert_eq!(normalize_repo_name("plain").unwrap(), "plain");
        assert!(normalize_repo_name(".git").is_err());
        assert!(normalize_repo_name("").is_err());
    }

    #[test]
    fn star_range_validation() {
        assert!(validate_star_range(None, None).is_ok());
        assert!(validate_star_range(Some(10), None).is_ok());
        assert!(validate_star_range(Some(10), Some(10)).is_ok());
        assert!(validate_star_range(Some(100), Some(50)).is_err());
        assert!(validate_star_range(Some(-1), None).is_err());
        assert!(validate_star_range(None, Some(-5)).is_err());
    }
}
