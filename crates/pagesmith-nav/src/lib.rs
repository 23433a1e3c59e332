//! Navigation tree reconstruction.
//!
//! Rebuilds a navigation forest from the flat, ordered page list the content
//! generator materializes per language (`pages.json`). The list must be
//! ordered so that every page is immediately followed by all of its
//! descendants; the reconstruction relies on that and never re-sorts.
//!
//! Paths carry the language as their first segment (`/en/guide`). The
//! language root (`/en`) is not part of the forest; pages directly below it
//! are first-level items.
//!
//! # Example
//!
//! ```
//! use pagesmith_nav::{NavPage, Show, build_navigation};
//!
//! let page = |path: &str| NavPage {
//!     page_id: path.to_owned(),
//!     path: path.to_owned(),
//!     label: path.to_owned(),
//!     sort: 0,
//!     show: Show::Default,
//!     unpublished: false,
//! };
//! let pages = vec![page("/en"), page("/en/a"), page("/en/a/x"), page("/en/b")];
//!
//! let nav = build_navigation(&pages);
//! assert_eq!(nav.len(), 2);
//! assert_eq!(nav[0].children[0].path, "/en/a/x");
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Navigation visibility of a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Show {
    /// Always listed.
    Always,
    /// Never listed.
    Never,
    /// Listed according to the host's defaults.
    #[default]
    #[serde(other)]
    Default,
}

/// One entry of a materialized page list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavPage {
    /// CMS page identifier.
    pub page_id: String,
    /// Public path, language first (`/en/news`).
    pub path: String,
    /// Display label.
    pub label: String,
    /// Ordering key among siblings.
    #[serde(default)]
    pub sort: i64,
    /// Navigation visibility.
    #[serde(default)]
    pub show: Show,
    /// No document was written for this page.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unpublished: bool,
}

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavNode {
    /// CMS page identifier.
    pub page_id: String,
    /// Link target path.
    pub path: String,
    /// Display label.
    pub label: String,
    /// Ordering key among siblings.
    pub sort: i64,
    /// Navigation visibility.
    pub show: Show,
    /// No document exists at `path`; render as a label rather than a link.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unpublished: bool,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

impl From<&NavPage> for NavNode {
    fn from(page: &NavPage) -> Self {
        Self {
            page_id: page.page_id.clone(),
            path: page.path.clone(),
            label: page.label.clone(),
            sort: page.sort,
            show: page.show,
            unpublished: page.unpublished,
            children: Vec::new(),
        }
    }
}

/// Ordering violation detected in strict mode.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// A page shows up after its parent's subtree was already closed.
    #[error("page {path} appears after the subtree of {parent} was closed")]
    Unsorted {
        /// Offending page path.
        path: String,
        /// Parent path whose descendants were expected to be contiguous.
        parent: String,
    },
    /// A page below first level does not directly follow its parent's
    /// subtree in the preceding sequence.
    #[error("page {path} has no parent page before it")]
    Orphan {
        /// Offending page path.
        path: String,
    },
}

/// Build the navigation forest in one pass.
///
/// Out-of-order input is not rejected; it produces a tree that mirrors the
/// disorder (pages without a parent in reach become top-level items).
#[must_use]
pub fn build_navigation(pages: &[NavPage]) -> Vec<NavNode> {
    let mut builder = ForestBuilder::new(false);
    for (i, page) in pages.iter().enumerate() {
        // Lenient mode never reports errors.
        let _ = builder.push(page, pages.get(i + 1));
    }
    builder.finish()
}

/// Build the navigation forest, rejecting input that breaks the ordering
/// invariant.
///
/// # Errors
///
/// Returns [`NavigationError`] on the first page that is orphaned or shows up
/// after its parent's subtree was closed.
pub fn build_navigation_strict(pages: &[NavPage]) -> Result<Vec<NavNode>, NavigationError> {
    let mut builder = ForestBuilder::new(true);
    for (i, page) in pages.iter().enumerate() {
        builder.push(page, pages.get(i + 1))?;
    }
    Ok(builder.finish())
}

/// Number of `/` separators in a path.
fn depth(path: &str) -> usize {
    path.bytes().filter(|&b| b == b'/').count()
}

/// Whether `path` lies strictly below `ancestor`.
fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with('/')
}

/// Path of the immediate parent (`/en/a/x` -> `/en/a`).
fn parent_path(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}

/// Incremental forest construction.
///
/// `open` holds the chain of pages whose children are still arriving; its
/// last element is the current parent cursor.
struct ForestBuilder {
    forest: Vec<NavNode>,
    open: Vec<NavNode>,
    strict: bool,
    closed: HashSet<String>,
}

impl ForestBuilder {
    fn new(strict: bool) -> Self {
        Self {
            forest: Vec::new(),
            open: Vec::new(),
            strict,
            closed: HashSet::new(),
        }
    }

    fn push(&mut self, page: &NavPage, next: Option<&NavPage>) -> Result<(), NavigationError> {
        if depth(&page.path) < 2 {
            return Ok(());
        }

        while self
            .open
            .last()
            .is_some_and(|cursor| !is_descendant(&page.path, &cursor.path))
        {
            self.close_cursor();
        }

        if self.strict {
            self.check_order(page)?;
        }

        let node = NavNode::from(page);
        let opens_subtree = next.is_some_and(|next| {
            next.path != page.path && is_descendant(&next.path, &page.path)
        });

        if opens_subtree {
            self.open.push(node);
        } else {
            self.attach(node);
        }
        Ok(())
    }

    fn check_order(&self, page: &NavPage) -> Result<(), NavigationError> {
        if depth(&page.path) == 2 {
            return Ok(());
        }
        let parent = parent_path(&page.path);
        if self.closed.contains(parent) {
            return Err(NavigationError::Unsorted {
                path: page.path.clone(),
                parent: parent.to_owned(),
            });
        }
        if self.open.last().map(|cursor| cursor.path.as_str()) != Some(parent) {
            return Err(NavigationError::Orphan {
                path: page.path.clone(),
            });
        }
        Ok(())
    }

    fn close_cursor(&mut self) {
        if let Some(node) = self.open.pop() {
            if self.strict {
                self.closed.insert(node.path.clone());
            }
            self.attach(node);
        }
    }

    fn attach(&mut self, node: NavNode) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.forest.push(node),
        }
    }

    fn finish(mut self) -> Vec<NavNode> {
        while !self.open.is_empty() {
            self.close_cursor();
        }
        self.forest
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(path: &str) -> NavPage {
        NavPage {
            page_id: format!("id{path}"),
            path: path.to_owned(),
            label: path.rsplit('/').next().unwrap_or_default().to_owned(),
            sort: 0,
            show: Show::Default,
            unpublished: false,
        }
    }

    fn pages(paths: &[&str]) -> Vec<NavPage> {
        paths.iter().map(|p| page(p)).collect()
    }

    fn shape(nodes: &[NavNode]) -> Vec<(String, Vec<String>)> {
        nodes
            .iter()
            .map(|n| {
                (
                    n.label.clone(),
                    n.children.iter().map(|c| c.label.clone()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_list_returns_empty_forest() {
        assert!(build_navigation(&[]).is_empty());
    }

    #[test]
    fn test_root_excluded_and_children_nested() {
        let nav = build_navigation(&pages(&["/en", "/en/a", "/en/a/x", "/en/b"]));

        assert_eq!(
            shape(&nav),
            vec![
                ("a".to_owned(), vec!["x".to_owned()]),
                ("b".to_owned(), vec![]),
            ]
        );
    }

    #[test]
    fn test_deep_nesting_and_reset_to_shallower_level() {
        let nav = build_navigation(&pages(&[
            "/en/a",
            "/en/a/b",
            "/en/a/b/c",
            "/en/a/d",
            "/en/e",
        ]));

        assert_eq!(nav.len(), 2);
        let a = &nav[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].path, "/en/a/b");
        assert_eq!(a.children[0].children[0].path, "/en/a/b/c");
        assert_eq!(a.children[1].path, "/en/a/d");
        assert!(nav[1].children.is_empty());
    }

    #[test]
    fn test_prefix_without_segment_boundary_is_not_a_parent() {
        let nav = build_navigation(&pages(&["/en/news", "/en/newsletter"]));

        assert_eq!(nav.len(), 2);
        assert!(nav[0].children.is_empty());
    }

    #[test]
    fn test_trailing_subtree_is_flushed() {
        let nav = build_navigation(&pages(&["/en/a", "/en/a/x", "/en/a/x/y"]));

        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].children[0].children[0].path, "/en/a/x/y");
    }

    #[test]
    fn test_lenient_orphan_becomes_top_level() {
        let nav = build_navigation(&pages(&["/en/a", "/en/b/x"]));

        assert_eq!(nav.len(), 2);
        assert_eq!(nav[1].path, "/en/b/x");
    }

    #[test]
    fn test_strict_accepts_well_ordered_input() {
        let nav =
            build_navigation_strict(&pages(&["/en", "/en/a", "/en/a/x", "/en/b"])).unwrap();
        assert_eq!(nav.len(), 2);
    }

    #[test]
    fn test_strict_rejects_orphan() {
        let err = build_navigation_strict(&pages(&["/en/a", "/en/b/x"])).unwrap_err();
        assert_eq!(
            err,
            NavigationError::Orphan {
                path: "/en/b/x".to_owned()
            }
        );
    }

    #[test]
    fn test_strict_rejects_missing_intermediate_parent() {
        let list = pages(&["/en/a", "/en/a/x/y"]);

        let err = build_navigation_strict(&list).unwrap_err();
        assert_eq!(
            err,
            NavigationError::Orphan {
                path: "/en/a/x/y".to_owned()
            }
        );
        assert_eq!(build_navigation(&list)[0].children[0].path, "/en/a/x/y");
    }

    #[test]
    fn test_strict_rejects_non_contiguous_descendant() {
        let err = build_navigation_strict(&pages(&["/en/a", "/en/a/x", "/en/b", "/en/a/y"]))
            .unwrap_err();
        assert_eq!(
            err,
            NavigationError::Unsorted {
                path: "/en/a/y".to_owned(),
                parent: "/en/a".to_owned(),
            }
        );
    }

    #[test]
    fn test_node_keeps_page_fields() {
        let mut input = pages(&["/en/a"]);
        input[0].sort = 3;
        input[0].show = Show::Never;

        let nav = build_navigation(&input);

        assert_eq!(nav[0].page_id, "id/en/a");
        assert_eq!(nav[0].sort, 3);
        assert_eq!(nav[0].show, Show::Never);
    }

    #[test]
    fn test_nav_page_deserializes_camel_case_and_unknown_show() {
        let page: NavPage = serde_json::from_str(
            r#"{"pageId":"7","path":"/en/a","label":"A","sort":2,"show":"sometimes"}"#,
        )
        .unwrap();

        assert_eq!(page.page_id, "7");
        assert_eq!(page.show, Show::Default);
        assert!(!page.unpublished);
    }

    #[test]
    fn test_unpublished_flag_carries_into_tree() {
        let mut list = pages(&["/en/a", "/en/a/x"]);
        list[1].unpublished = true;

        let nav = build_navigation(&list);
        let json = serde_json::to_value(&nav[0]).unwrap();

        assert!(!nav[0].unpublished);
        assert!(nav[0].children[0].unpublished);
        assert!(json.get("unpublished").is_none());
        assert_eq!(json["children"][0]["unpublished"], true);
    }

    #[test]
    fn test_nav_node_serialization_skips_empty_children() {
        let nav = build_navigation(&pages(&["/en/a"]));
        let json = serde_json::to_value(&nav[0]).unwrap();

        assert_eq!(json["pageId"], "id/en/a");
        assert_eq!(json["show"], "default");
        assert!(json.get("children").is_none());
    }
}
