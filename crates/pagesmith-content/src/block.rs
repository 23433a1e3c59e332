//! CMS block tree.
//!
//! The CMS delivers page content as a root object with a `state` and an
//! ordered `content` list of blocks:
//!
//! ```json
//! {
//!   "state": "published",
//!   "content": [
//!     { "text": "<p>Intro</p>" },
//!     { "type": "SessionCard", "data": { "props": { "title": "Keynote" } } },
//!     { "type": "Grid", "children": [ { "type": "Card" } ] }
//!   ]
//! }
//! ```
//!
//! Blocks are parsed into the closed [`Block`] enum so serialization can
//! match exhaustively. Property values are classified up front into
//! [`Prop`] variants.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static NUMERIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").expect("invalid numeric regex"));

/// Content state that allows rendering.
const PUBLISHED: &str = "published";

/// Page content root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageContent {
    /// Workflow state (`published`, `draft`, ...).
    pub state: Option<String>,
    /// Top-level blocks in document order.
    pub blocks: Vec<Block>,
}

impl PageContent {
    /// Parse the content root object.
    ///
    /// Anything that is not an object yields empty, unpublished content.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(root) = value.as_object() else {
            return Self::default();
        };
        let state = root.get("state").and_then(Value::as_str).map(str::to_owned);
        let blocks = root
            .get("content")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Block::from_value).collect())
            .unwrap_or_default();
        Self { state, blocks }
    }

    /// Whether the content may be rendered.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.state.as_deref() == Some(PUBLISHED)
    }
}

/// A node of the content tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Raw text or markup, emitted verbatim.
    Raw(String),
    /// Typed component with properties and optional children.
    Component(Component),
    /// Node with neither `type` nor `text`; renders nothing.
    Unknown,
}

impl Block {
    /// Classify one JSON node.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Raw(text.clone()),
            Value::Object(node) => {
                if let Some(kind) = node
                    .get("type")
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty())
                {
                    let props = node
                        .get("data")
                        .and_then(|data| data.get("props"))
                        .and_then(Value::as_object)
                        .map(|props| {
                            props
                                .iter()
                                .filter_map(|(key, value)| {
                                    Prop::from_value(value).map(|prop| (key.clone(), prop))
                                })
                                .collect()
                        })
                        .unwrap_or_default();
                    let children = node
                        .get("children")
                        .and_then(Value::as_array)
                        .map(|items| items.iter().map(Self::from_value).collect())
                        .unwrap_or_default();
                    Self::Component(Component {
                        kind: kind.to_owned(),
                        props,
                        children,
                    })
                } else if let Some(text) = node.get("text").and_then(Value::as_str) {
                    Self::Raw(text.to_owned())
                } else {
                    Self::Unknown
                }
            }
            _ => Self::Unknown,
        }
    }
}

/// A typed component block.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    /// CMS type name in capitalized-word form (`SessionCard`).
    pub kind: String,
    /// Properties in CMS order.
    pub props: Vec<(String, Prop)>,
    /// Nested blocks; empty for inline components.
    pub children: Vec<Block>,
}

impl Component {
    /// Whether the component renders as a fenced container.
    #[must_use]
    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A classified property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Prop {
    /// Boolean literal.
    Bool(bool),
    /// Number or numeric-looking string, kept in its textual form.
    Number(String),
    /// Object or array.
    Structured(Value),
    /// Any other string.
    Text(String),
}

impl Prop {
    /// Classify a property value; `null` properties are dropped.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.to_string())),
            Value::String(s) if NUMERIC_PATTERN.is_match(s) => Some(Self::Number(s.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Some(Self::Structured(value.clone())),
        }
    }
}
