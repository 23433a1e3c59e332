//! Block tree to MDC serialization.
//!
//! Components without children render inline on one line:
//!
//! ```text
//! :event-card{:featured=true title="Keynote"}
//! ```
//!
//! Components with children open a fence of `depth + 3` colons (three at
//! the top level, one more than the `dynamic-content` wrapper), render
//! their children one level deeper (two spaces of indentation per level)
//! and close with the same colon run:
//!
//! ```text
//! :::grid{:columns=2}
//!   :card{title="A"}
//!   ::::section
//!     <p>Nested</p>
//!   ::::
//! :::
//! ```

use crate::block::{Block, Component, PageContent, Prop};
use crate::entity::EntityRef;

/// Serialize page content into an MDC document.
///
/// Returns `None` when the content is not published or renders no lines.
/// With `dynamic` set, the document is wrapped in a `dynamic-content` block
/// so the renderer can substitute that entity's fields late.
///
/// # Example
///
/// ```
/// use pagesmith_content::block::PageContent;
/// use pagesmith_content::mdc::to_mdc;
/// use serde_json::json;
///
/// let content = PageContent::from_value(&json!({
///     "state": "published",
///     "content": [{"type": "SessionCard", "data": {"props": {"title": "Keynote"}}}]
/// }));
/// assert_eq!(to_mdc(&content, None).as_deref(), Some(r#":event-card{title="Keynote"}"#));
/// ```
#[must_use]
pub fn to_mdc(content: &PageContent, dynamic: Option<&EntityRef>) -> Option<String> {
    if !content.is_published() {
        return None;
    }

    let mut lines = Vec::new();
    for block in &content.blocks {
        write_block(block, 0, &mut lines);
    }
    if lines.is_empty() {
        return None;
    }

    if let Some(entity_ref) = dynamic {
        lines.insert(
            0,
            format!(
                "::dynamic-content{{entity=\"{}\" field=\"{}\"}}",
                entity_ref.entity, entity_ref.field
            ),
        );
        lines.push("::".to_owned());
    }

    Some(lines.join("\n"))
}

fn write_block(block: &Block, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match block {
        Block::Raw(text) => lines.push(format!("{indent}{text}")),
        Block::Component(component) if component.is_container() => {
            let fence = ":".repeat(depth + 3);
            lines.push(format!("{indent}{fence}{}", head(component)));
            for child in &component.children {
                write_block(child, depth + 1, lines);
            }
            lines.push(format!("{indent}{fence}"));
        }
        Block::Component(component) => lines.push(format!("{indent}:{}", head(component))),
        Block::Unknown => {}
    }
}

/// Component name followed by its property block, if any.
fn head(component: &Component) -> String {
    let name = component_name(&component.kind);
    if component.props.is_empty() {
        return name;
    }
    let props: Vec<String> = component
        .props
        .iter()
        .map(|(key, prop)| format_prop(key, prop))
        .collect();
    format!("{name}{{{}}}", props.join(" "))
}

/// Convert a CMS type name to its MDC component name.
///
/// `SessionCard` becomes `event-card`; other names are kebab-cased.
#[must_use]
pub fn component_name(kind: &str) -> String {
    let mut name = String::with_capacity(kind.len() + 4);
    for (i, c) in kind.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                name.push('-');
            }
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    match name.strip_prefix("session") {
        Some(rest) => format!("event{rest}"),
        None => name,
    }
}

fn format_prop(key: &str, prop: &Prop) -> String {
    match prop {
        Prop::Bool(value) => format!(":{key}={value}"),
        Prop::Number(value) => format!(":{key}={value}"),
        Prop::Structured(value) => {
            format!(":{key}='{}'", value.to_string().replace('\'', "\\u0027"))
        }
        Prop::Text(value) => format!("{key}=\"{}\"", value.replace('"', "\\\"")),
    }
}
