//! YAML front matter of generated documents.

use serde::Serialize;

use pagesmith_nav::Show;

/// Metadata header written before each document body.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub(crate) struct FrontMatter<'a> {
    /// `false` hides the page from host navigation; omitted for `always`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<bool>,
    /// Access tag.
    pub access: &'a str,
    /// URL the content was fetched from.
    pub source: &'a str,
}

impl<'a> FrontMatter<'a> {
    pub(crate) fn new(show: Show, access: &'a str, source: &'a str) -> Self {
        let navigation = match show {
            Show::Always => None,
            Show::Never | Show::Default => Some(false),
        };
        Self {
            navigation,
            access,
            source,
        }
    }

    /// Front matter block followed by `body`.
    pub(crate) fn render(&self, body: &str) -> Result<String, serde_yaml::Error> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{yaml}---\n{body}"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn header(document: &str) -> serde_yaml::Value {
        let inner = document
            .strip_prefix("---\n")
            .and_then(|rest| rest.split_once("---\n"))
            .map(|(yaml, _)| yaml)
            .unwrap();
        serde_yaml::from_str(inner).unwrap()
    }

    #[test]
    fn test_always_omits_navigation() {
        let document = FrontMatter::new(Show::Always, "public", "https://cms/x")
            .render("body")
            .unwrap();

        let yaml = header(&document);
        assert!(yaml.get("navigation").is_none());
        assert_eq!(yaml["access"], "public");
        assert_eq!(yaml["source"], "https://cms/x");
        assert!(document.ends_with("---\nbody"));
    }

    #[test]
    fn test_never_and_default_hide_navigation() {
        for show in [Show::Never, Show::Default] {
            let document = FrontMatter::new(show, "", "u").render("").unwrap();
            assert_eq!(header(&document)["navigation"], false);
        }
    }

    #[test]
    fn test_document_starts_with_fence() {
        let document = FrontMatter::new(Show::Always, "a", "u").render(":hero").unwrap();
        assert!(document.starts_with("---\naccess: a\n"));
        assert!(document.ends_with(":hero"));
    }
}
