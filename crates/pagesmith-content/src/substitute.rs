//! Entity substitution in fetched page content.
//!
//! Content of an expanded page may reference its entity anywhere in the
//! JSON tree, including inside strings that themselves hold JSON text (block
//! props are sometimes stored serialized). Substitution works on the parsed
//! tree:
//!
//! - a string equal to `:entity` is replaced by the whole entity record
//! - a string holding a JSON object or array is parsed, substituted and
//!   re-encoded (only if something changed)
//! - any other string has its `:entity.field` placeholders expanded

use serde_json::Value;

use crate::entity::expand_entity;
use crate::page::EntityBinding;

/// Substitute `binding` into every string leaf of `content`.
pub(crate) fn substitute_entity(content: &mut Value, binding: &EntityBinding) {
    let whole = format!(":{}", binding.name);
    walk(content, binding, &whole);
}

fn walk(value: &mut Value, binding: &EntityBinding, whole: &str) {
    match value {
        Value::Object(map) => {
            for item in map.values_mut() {
                walk(item, binding, whole);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, binding, whole);
            }
        }
        Value::String(text) => {
            if text.as_str() == whole {
                *value = Value::Object(binding.value.clone());
            } else if let Some(mut nested) = parse_json_text(text) {
                let before = nested.clone();
                walk(&mut nested, binding, whole);
                if nested != before {
                    *text = nested.to_string();
                }
            } else {
                *text = expand_entity(text, &binding.name, &binding.value);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Parse a string that holds a JSON object or array.
fn parse_json_text(text: &str) -> Option<Value> {
    let trimmed = text.trim_start();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(|value| value.is_object() || value.is_array())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn binding() -> EntityBinding {
        EntityBinding {
            name: "city".to_owned(),
            value: json!({"slug": "bern", "name": "Bern", "zip": 3000})
                .as_object()
                .cloned()
                .unwrap(),
        }
    }

    #[test]
    fn test_plain_placeholders_expanded() {
        let mut content = json!({
            "content": [{"text": "<h1>:city.name</h1>"}, {"text": "zip :city.zip"}]
        });
        substitute_entity(&mut content, &binding());

        assert_eq!(content["content"][0]["text"], "<h1>Bern</h1>");
        assert_eq!(content["content"][1]["text"], "zip 3000");
    }

    #[test]
    fn test_whole_entity_token_becomes_record() {
        let mut content = json!({"data": {"props": {"city": ":city", "other": ":country"}}});
        substitute_entity(&mut content, &binding());

        assert_eq!(
            content["data"]["props"]["city"],
            json!({"slug": "bern", "name": "Bern", "zip": 3000})
        );
        assert_eq!(content["data"]["props"]["other"], ":country");
    }

    #[test]
    fn test_json_text_substituted_and_reencoded() {
        let mut content = json!({"props": r#"{"entity":":city","title":"In :city.name"}"#});
        substitute_entity(&mut content, &binding());

        let text = content["props"].as_str().unwrap();
        let nested: Value = serde_json::from_str(text).unwrap();
        assert_eq!(nested["entity"]["slug"], "bern");
        assert_eq!(nested["title"], "In Bern");
    }

    #[test]
    fn test_unchanged_json_text_kept_verbatim() {
        let original = r#"{ "a": 1 }"#;
        let mut content = json!({"props": original});
        substitute_entity(&mut content, &binding());

        assert_eq!(content["props"], original);
    }

    #[test]
    fn test_brace_text_that_is_not_json_is_expanded() {
        let mut content = json!(["{ :city.name }"]);
        substitute_entity(&mut content, &binding());

        assert_eq!(content[0], "{ Bern }");
    }

    #[test]
    fn test_other_entities_untouched() {
        let mut content = json!(":country.code/:city.slug");
        substitute_entity(&mut content, &binding());

        assert_eq!(content, ":country.code/bern");
    }
}
