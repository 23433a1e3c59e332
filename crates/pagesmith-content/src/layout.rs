//! On-disk layout of generated pages.
//!
//! A page's local path is its sorted path with dynamic segments made
//! filesystem-safe. Pages with children become directories holding a
//! `0.index.md` document; others are written as `<local path>.md`.

use std::sync::LazyLock;

use regex::Regex;

use crate::entity;
use crate::error::GenerateError;

/// Allowed characters of a page path.
pub const PATH_PATTERN: &str = "^[a-z0-9/:_.-]+$";

/// Name of the index document inside a directory page's folder.
pub const INDEX_STEM: &str = "0.index";

/// Marker file hiding a directory from navigation listings.
pub const DIR_MARKER: &str = "_dir.yml";

/// Contents of [`DIR_MARKER`].
pub const DIR_MARKER_CONTENT: &str = "navigation: false\n";

static PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATH_PATTERN).expect("invalid path regex"));

static SORT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("invalid sort prefix regex"));

/// Reject paths with characters outside [`PATH_PATTERN`].
///
/// # Errors
///
/// Returns [`GenerateError::InvalidPath`] naming the path and the pattern.
pub fn validate_path(path: &str) -> Result<(), GenerateError> {
    if PATH_REGEX.is_match(path) {
        Ok(())
    } else {
        Err(GenerateError::InvalidPath {
            path: path.to_owned(),
            pattern: PATH_PATTERN,
        })
    }
}

/// Rewrite `:entity.field` segments to `__entity.field__`.
///
/// ```
/// use pagesmith_content::layout::local_sorted_path;
///
/// assert_eq!(local_sorted_path("/en/2.cities/:city.slug"), "/en/2.cities/__city.slug__");
/// ```
#[must_use]
pub fn local_sorted_path(sorted_path: &str) -> String {
    entity::rewrite(sorted_path, |entity, field| format!("__{entity}.{field}__"))
}

/// Whether `child` lies strictly below `parent` at a segment boundary.
#[must_use]
pub fn is_path_extension(parent: &str, child: &str) -> bool {
    child.len() > parent.len()
        && child.starts_with(parent)
        && (parent.ends_with('/') || child[parent.len()..].starts_with('/'))
}

/// Document path relative to the content directory.
///
/// `/en/1.news` becomes `en/1.news.md`, or `en/1.news/0.index.md` for a
/// directory page.
#[must_use]
pub fn document_path(local_path: &str, directory: bool) -> String {
    let relative = local_path.trim_matches('/');
    if directory {
        format!("{relative}/{INDEX_STEM}.md")
    } else {
        format!("{relative}.md")
    }
}

/// Public URL path of a local path: numeric sort prefixes and a trailing
/// index segment are dropped.
///
/// ```
/// use pagesmith_content::layout::public_path;
///
/// assert_eq!(public_path("/en/1.news/2.post"), "/en/news/post");
/// assert_eq!(public_path("/en/1.news/0.index"), "/en/news");
/// ```
#[must_use]
pub fn public_path(local_path: &str) -> String {
    let mut segments: Vec<&str> = local_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match SORT_PREFIX.find(segment) {
            Some(prefix) => &segment[prefix.end()..],
            None => segment,
        })
        .collect();
    if segments.last() == Some(&"index") {
        segments.pop();
    }
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_validate_accepts_allowed_characters() {
        assert!(validate_path("/en/1.news/:city.slug").is_ok());
        assert!(validate_path("/de/a-b_c").is_ok());
    }

    #[test]
    fn test_validate_rejects_non_ascii_and_uppercase() {
        let err = validate_path("/en/Página").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("/en/Página"));
        assert!(message.contains(PATH_PATTERN));

        assert!(validate_path("/en/About").is_err());
        assert!(validate_path("/en/a b").is_err());
        assert!(validate_path("").is_err());
    }

    #[test]
    fn test_local_sorted_path_static_unchanged() {
        assert_eq!(local_sorted_path("/en/1.news"), "/en/1.news");
    }

    #[test]
    fn test_local_sorted_path_multiple_entities() {
        assert_eq!(
            local_sorted_path("/en/:country.code/:city.slug"),
            "/en/__country.code__/__city.slug__"
        );
    }

    #[test]
    fn test_is_path_extension() {
        assert!(is_path_extension("/en/1.news", "/en/1.news/1.post"));
        assert!(!is_path_extension("/en/1.news", "/en/1.newsletter"));
        assert!(!is_path_extension("/en/1.news", "/en/1.news"));
        assert!(!is_path_extension("/en/1.news/1.post", "/en/1.news"));
    }

    #[test]
    fn test_document_path() {
        assert_eq!(document_path("/en/1.news", false), "en/1.news.md");
        assert_eq!(document_path("/en/1.news", true), "en/1.news/0.index.md");
    }

    #[test]
    fn test_public_path() {
        assert_eq!(public_path("/en"), "/en");
        assert_eq!(public_path("/en/3.about"), "/en/about");
        assert_eq!(public_path("/en/v1.2"), "/en/v1.2");
        assert_eq!(public_path("/en/__city.slug__"), "/en/__city.slug__");
    }
}
