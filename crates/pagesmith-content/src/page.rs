//! Navigation entries.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use pagesmith_nav::Show;

use crate::entity::EntityRecord;
use crate::placeholder::value_to_string;

/// A navigation entry, either a template or a concrete page.
///
/// `path`, `sorted_path` and `label` may contain `:entity.field`
/// placeholders until the page is expanded.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// CMS page identifier.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Page path, language first (`/en/news`).
    #[serde(default, deserialize_with = "lenient_string")]
    pub path: String,
    /// Path used for on-disk ordering (`/en/1.news`).
    #[serde(default, deserialize_with = "lenient_string")]
    pub sorted_path: String,
    /// Display label.
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    /// Ordering key among siblings.
    #[serde(default, deserialize_with = "lenient_sort")]
    pub sort: i64,
    /// Navigation visibility.
    #[serde(default, deserialize_with = "lenient_show")]
    pub show: Show,
    /// Free-form access tag.
    #[serde(default, deserialize_with = "lenient_string")]
    pub access: String,
    /// Entity this page was expanded from.
    #[serde(skip)]
    pub entity: Option<EntityBinding>,
}

impl Page {
    /// Sorted path, falling back to `path` when the CMS left it empty.
    #[must_use]
    pub fn ordering_path(&self) -> &str {
        if self.sorted_path.is_empty() {
            &self.path
        } else {
            &self.sorted_path
        }
    }
}

/// Entity record a dynamic page was expanded from.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityBinding {
    /// Entity-type name (`city`).
    pub name: String,
    /// The entity record.
    pub value: EntityRecord,
}

/// Accept strings, numbers and `null` for string fields.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| value_to_string(&value))
}

/// Accept integers, numeric strings and `null` for the sort key.
fn lenient_sort<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_i64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}

/// Unknown or missing visibility values map to [`Show::Default`].
fn lenient_show<'de, D>(deserializer: D) -> Result<Show, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value.as_str() {
        Some("always") => Show::Always,
        Some("never") => Show::Never,
        _ => Show::Default,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_full_entry() {
        let page: Page = serde_json::from_value(json!({
            "id": 42,
            "path": "/en/news",
            "sortedPath": "/en/1.news",
            "label": "News",
            "sort": 1,
            "show": "never",
            "access": "public"
        }))
        .unwrap();

        assert_eq!(page.id, "42");
        assert_eq!(page.sorted_path, "/en/1.news");
        assert_eq!(page.show, Show::Never);
        assert_eq!(page.access, "public");
        assert!(page.entity.is_none());
    }

    #[test]
    fn test_deserialize_tolerates_nulls_and_unknowns() {
        let page: Page = serde_json::from_value(json!({
            "id": "a1",
            "path": "/en/x",
            "sortedPath": null,
            "label": null,
            "sort": "7",
            "show": "sometimes",
            "access": null,
            "extra": true
        }))
        .unwrap();

        assert_eq!(page.sorted_path, "");
        assert_eq!(page.label, "");
        assert_eq!(page.sort, 7);
        assert_eq!(page.show, Show::Default);
    }

    #[test]
    fn test_ordering_path_falls_back_to_path() {
        let page = Page {
            path: "/en/x".to_owned(),
            ..Page::default()
        };
        assert_eq!(page.ordering_path(), "/en/x");
    }
}
