//! Dynamic page expansion.
//!
//! Turns a language's raw navigation entries into concrete pages: static
//! entries pass through, templates with `:entity.field` segments expand into
//! one page per entity record of their resolver. Order is preserved and
//! expanded pages take the template's position.

use tracing::{debug, warn};

use crate::entity::{self, EntityRef, expand_entity};
use crate::layout::is_path_extension;
use crate::page::{EntityBinding, Page};
use crate::resolver::ResolverRegistry;

/// A page ready for layout and rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct ConcretePage {
    /// The page, with entity fields substituted when it was expanded.
    pub page: Page,
    /// Whether the page has children and is written as a folder index.
    pub directory: bool,
    /// Entity placeholder still present in the page after expansion.
    pub unresolved: Option<EntityRef>,
}

/// Expand navigation entries into concrete pages.
///
/// Directory status is decided on the raw entries: an entry is a directory
/// when the next entry's sorted path extends its own. Expanded pages inherit
/// the status of their template. Templates without a registered resolver
/// are kept as a single page with their placeholders intact.
#[must_use]
pub fn expand_pages(entries: &[Page], registry: &ResolverRegistry) -> Vec<ConcretePage> {
    let mut pages = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let directory = entries
            .get(i + 1)
            .is_some_and(|next| is_path_extension(entry.ordering_path(), next.ordering_path()));

        let Some(primary) = entity::primary_entity(&entry.path) else {
            pages.push(ConcretePage {
                page: entry.clone(),
                directory,
                unresolved: None,
            });
            continue;
        };

        let Some(resolver) = registry.get(&primary.entity) else {
            warn!(
                entity = %primary.entity,
                path = %entry.path,
                "No dynamic page resolver, keeping template page"
            );
            pages.push(ConcretePage {
                page: entry.clone(),
                directory,
                unresolved: Some(primary),
            });
            continue;
        };

        let records = resolver.resolve();
        debug!(
            "Expanding {} into {} pages of \"{}\"",
            entry.path,
            records.len(),
            primary.entity
        );
        for record in records {
            let name = primary.entity.as_str();
            let page = Page {
                id: entry.id.clone(),
                path: expand_entity(&entry.path, name, &record),
                sorted_path: expand_entity(&entry.sorted_path, name, &record),
                label: expand_entity(&entry.label, name, &record),
                sort: entry.sort,
                show: entry.show,
                access: entry.access.clone(),
                entity: Some(EntityBinding {
                    name: name.to_owned(),
                    value: record,
                }),
            };
            let unresolved = entity::primary_entity(&page.path);
            pages.push(ConcretePage {
                page,
                directory,
                unresolved,
            });
        }
    }

    pages
}
