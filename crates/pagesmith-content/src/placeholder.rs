//! `{a.b.c}` placeholder substitution.
//!
//! Templates reference values of a JSON context by dotted path. Missing
//! values resolve to the empty string; callers must tolerate empty
//! substitutions.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::{Captures, Regex};
use serde_json::Value;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*)\}").expect("invalid placeholder regex")
});

/// Characters kept literal in query keys and values.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/')
    .remove(b':');

/// String form of a JSON value as used in substitutions.
///
/// `null` becomes the empty string, strings are used verbatim and everything
/// else uses its JSON text.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Look up a dotted path (`lang.code`, `items.0.slug`) in a JSON value.
#[must_use]
pub fn lookup<'a>(context: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted.split('.').try_fold(context, |value, key| match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Replace every `{a.b}` token in `template` with its value from `context`.
///
/// # Example
///
/// ```
/// use pagesmith_content::placeholder::resolve_str;
/// use serde_json::json;
///
/// let context = json!({"lang": {"code": "en"}});
/// assert_eq!(resolve_str("/{lang.code}/about", &context), "/en/about");
/// assert_eq!(resolve_str("/{lang.missing}/x", &context), "//x");
/// ```
#[must_use]
pub fn resolve_str(template: &str, context: &Value) -> String {
    if !template.contains('{') {
        return template.to_owned();
    }
    TOKEN_PATTERN
        .replace_all(template, |caps: &Captures| {
            lookup(context, &caps[1])
                .map(value_to_string)
                .unwrap_or_default()
        })
        .into_owned()
}

/// Resolve a query template into `?k=v&k2=v2`.
///
/// Keys whose value resolves empty are omitted; if nothing remains the
/// result is the empty string. Keys and values are percent-encoded.
#[must_use]
pub fn resolve_query(template: &BTreeMap<String, String>, context: &Value) -> String {
    let pairs: Vec<String> = template
        .iter()
        .filter_map(|(key, value)| {
            let resolved = resolve_str(value, context);
            (!resolved.is_empty()).then(|| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_COMPONENT),
                    utf8_percent_encode(&resolved, QUERY_COMPONENT)
                )
            })
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn context() -> Value {
        json!({
            "lang": {"code": "en", "default": true},
            "page": {"path": "/en/news", "sortedPath": "/en/1.news", "id": 12},
            "empty": "",
            "list": [{"slug": "first"}]
        })
    }

    #[test]
    fn test_resolve_str_nested_paths() {
        assert_eq!(
            resolve_str("{lang.code}:{page.sortedPath}", &context()),
            "en:/en/1.news"
        );
    }

    #[test]
    fn test_resolve_str_stringifies_scalars() {
        assert_eq!(
            resolve_str("id={page.id} default={lang.default}", &context()),
            "id=12 default=true"
        );
    }

    #[test]
    fn test_resolve_str_array_index() {
        assert_eq!(resolve_str("{list.0.slug}", &context()), "first");
    }

    #[test]
    fn test_resolve_str_missing_is_empty() {
        assert_eq!(resolve_str("a{nope.x}b", &context()), "ab");
    }

    #[test]
    fn test_resolve_str_object_value_uses_json() {
        assert_eq!(resolve_str("{lang}", &context()), r#"{"code":"en","default":true}"#);
    }

    #[test]
    fn test_resolve_str_leaves_non_token_braces() {
        assert_eq!(resolve_str("{ not a token }", &context()), "{ not a token }");
    }

    #[test]
    fn test_resolve_str_is_idempotent_once_resolved() {
        let once = resolve_str("/{lang.code}/{page.id}", &context());
        assert_eq!(resolve_str(&once, &context()), once);
    }

    #[test]
    fn test_resolve_query_joins_non_empty_pairs() {
        let template = BTreeMap::from([
            ("locale".to_owned(), "{lang.code}".to_owned()),
            ("path".to_owned(), "{page.path}".to_owned()),
            ("skip".to_owned(), "{empty}".to_owned()),
            ("missing".to_owned(), "{nope}".to_owned()),
        ]);

        assert_eq!(
            resolve_query(&template, &context()),
            "?locale=en&path=/en/news"
        );
    }

    #[test]
    fn test_resolve_query_all_empty() {
        let template = BTreeMap::from([("missing".to_owned(), "{nope}".to_owned())]);
        assert_eq!(resolve_query(&template, &context()), "");
        assert_eq!(resolve_query(&BTreeMap::new(), &context()), "");
    }

    #[test]
    fn test_resolve_query_encodes_reserved_characters() {
        let template = BTreeMap::from([("filter[title]".to_owned(), "a b&c".to_owned())]);
        assert_eq!(
            resolve_query(&template, &context()),
            "?filter%5Btitle%5D=a%20b%26c"
        );
    }
}
