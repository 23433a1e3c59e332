//! `:entity.field` placeholders.
//!
//! Dynamic page templates reference entity fields with a colon-prefixed
//! dotted pair, e.g. `/en/cities/:city.slug`. Expansion substitutes the
//! fields of one bound entity record; placeholders of other entities are
//! left untouched.
//!
//! A field that is absent on the record, or `null`, expands to the empty
//! string.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::placeholder::value_to_string;

static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)\.([A-Za-z_][A-Za-z0-9_]*)")
        .expect("invalid entity placeholder regex")
});

/// An entity record as returned by a dynamic page resolver.
pub type EntityRecord = Map<String, Value>;

/// A `:entity.field` reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRef {
    /// Entity-type name.
    pub entity: String,
    /// Field name on the entity record.
    pub field: String,
}

/// Whether `text` contains at least one `:entity.field` placeholder.
#[must_use]
pub fn has_placeholder(text: &str) -> bool {
    ENTITY_PATTERN.is_match(text)
}

/// Replace every `:entity.field` placeholder of `entity` in `text` with the
/// record's field value.
///
/// # Example
///
/// ```
/// use pagesmith_content::entity::expand_entity;
/// use serde_json::json;
///
/// let record = json!({"slug": "zurich", "name": "Zürich"});
/// let record = record.as_object().unwrap();
/// assert_eq!(expand_entity("/en/:city.slug", "city", record), "/en/zurich");
/// assert_eq!(expand_entity(":city.zip :country.code", "city", record), " :country.code");
/// ```
#[must_use]
pub fn expand_entity(text: &str, entity: &str, record: &EntityRecord) -> String {
    if !has_placeholder(text) {
        return text.to_owned();
    }
    ENTITY_PATTERN
        .replace_all(text, |caps: &Captures| {
            if &caps[1] == entity {
                record.get(&caps[2]).map(value_to_string).unwrap_or_default()
            } else {
                caps[0].to_owned()
            }
        })
        .into_owned()
}

/// All entity references of a path, one per entity name.
///
/// Entities keep the position of their first occurrence; when an entity is
/// referenced more than once the last field wins.
#[must_use]
pub fn decompose_path(path: &str) -> Vec<EntityRef> {
    let mut refs: Vec<EntityRef> = Vec::new();
    for caps in ENTITY_PATTERN.captures_iter(path) {
        let (entity, field) = (&caps[1], &caps[2]);
        match refs.iter_mut().find(|r| r.entity == entity) {
            Some(existing) => field.clone_into(&mut existing.field),
            None => refs.push(EntityRef {
                entity: entity.to_owned(),
                field: field.to_owned(),
            }),
        }
    }
    refs
}

/// Entity type a dynamic path expands over: the entity of its last
/// placeholder, with that entity's (last-wins) field.
#[must_use]
pub fn primary_entity(path: &str) -> Option<EntityRef> {
    let last = ENTITY_PATTERN.captures_iter(path).last()?;
    decompose_path(path)
        .into_iter()
        .find(|r| r.entity == last[1])
}

/// Rewrite placeholders with `replace(entity, field)`.
pub(crate) fn rewrite(text: &str, replace: impl Fn(&str, &str) -> String) -> String {
    ENTITY_PATTERN
        .replace_all(text, |caps: &Captures| replace(&caps[1], &caps[2]))
        .into_owned()
}

/// Display form of a label: `:city.name` becomes `{city.name}`.
#[must_use]
pub fn display_label(label: &str) -> String {
    rewrite(label, |entity, field| format!("{{{entity}.{field}}}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn record() -> EntityRecord {
        json!({"slug": "bern", "name": "Bern", "population": 134_794, "zip": null})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_expand_without_placeholder_is_identity() {
        assert_eq!(expand_entity("/en/about", "city", &record()), "/en/about");
    }

    #[test]
    fn test_expand_replaces_every_occurrence() {
        assert_eq!(
            expand_entity(":city.name - :city.name (:city.slug)", "city", &record()),
            "Bern - Bern (bern)"
        );
    }

    #[test]
    fn test_expand_stringifies_numbers() {
        assert_eq!(
            expand_entity("pop :city.population", "city", &record()),
            "pop 134794"
        );
    }

    #[test]
    fn test_expand_absent_or_null_field_is_empty() {
        assert_eq!(expand_entity("[:city.unknown]", "city", &record()), "[]");
        assert_eq!(expand_entity("[:city.zip]", "city", &record()), "[]");
    }

    #[test]
    fn test_expand_leaves_other_entities() {
        assert_eq!(
            expand_entity("/:country.code/:city.slug", "city", &record()),
            "/:country.code/bern"
        );
    }

    #[test]
    fn test_decompose_path_lists_entities() {
        assert_eq!(
            decompose_path("/en/:country.code/:city.slug"),
            vec![
                EntityRef {
                    entity: "country".to_owned(),
                    field: "code".to_owned()
                },
                EntityRef {
                    entity: "city".to_owned(),
                    field: "slug".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_decompose_path_last_field_wins() {
        assert_eq!(
            decompose_path("/en/:city.region/:city.slug"),
            vec![EntityRef {
                entity: "city".to_owned(),
                field: "slug".to_owned()
            }]
        );
    }

    #[test]
    fn test_decompose_static_path_is_empty() {
        assert!(decompose_path("/en/1.news").is_empty());
    }

    #[test]
    fn test_primary_entity_is_last_segment() {
        let primary = primary_entity("/en/:country.code/:city.slug").unwrap();
        assert_eq!(primary.entity, "city");
        assert_eq!(primary.field, "slug");
        assert!(primary_entity("/en/about").is_none());
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("Visit :city.name"), "Visit {city.name}");
        assert_eq!(display_label("Plain"), "Plain");
    }

    #[test]
    fn test_url_scheme_is_not_a_placeholder() {
        assert!(!has_placeholder("https://example.com/a.b"));
    }
}
