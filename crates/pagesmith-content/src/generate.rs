//! Per-language content generation.
//!
//! For every language record the generator mirrors labels, navigation and
//! auxiliary endpoints into JSON sidecar files, expands the navigation into
//! concrete pages, and renders each page's content into an MDC document with
//! YAML front matter. A flat site index of all written pages is written once
//! every language is done.
//!
//! Pages are processed strictly in navigation order. Any page with an
//! invalid path, or two pages sharing one document file, aborts the run
//! before that language's pages are written.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use pagesmith_client::{ContentSource, FetchResponse};
use pagesmith_config::{Config, EndpointConfig};
use pagesmith_nav::{NavPage, Show};
use pagesmith_storage::ContentStore;

use crate::block::PageContent;
use crate::entity::display_label;
use crate::error::GenerateError;
use crate::expand::{ConcretePage, expand_pages};
use crate::front_matter::FrontMatter;
use crate::layout::{
    DIR_MARKER, DIR_MARKER_CONTENT, document_path, local_sorted_path, public_path, validate_path,
};
use crate::mdc::to_mdc;
use crate::page::Page;
use crate::placeholder::{resolve_query, resolve_str};
use crate::resolver::{DynamicPageResolver, ResolveStrategy, ResolverRegistry};
use crate::substitute::substitute_entity;

/// Summary of a generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Language codes in processing order.
    pub languages: Vec<String>,
    /// Documents written.
    pub pages_written: usize,
    /// Pages without published content.
    pub pages_skipped: usize,
    /// Pages still carrying entity placeholders after expansion.
    pub unresolved_templates: usize,
    /// Navigation marker files written for hidden directory pages.
    pub markers_written: usize,
}

/// Outcome of rendering one page.
enum Rendered {
    Written { index_line: String },
    Skipped,
}

/// Content generator.
///
/// Borrows its collaborators; the same source and store can be reused across
/// runs.
pub struct Generator<'a> {
    source: &'a dyn ContentSource,
    store: &'a dyn ContentStore,
    config: &'a Config,
}

impl<'a> Generator<'a> {
    /// Create a generator.
    #[must_use]
    pub fn new(
        source: &'a dyn ContentSource,
        store: &'a dyn ContentStore,
        config: &'a Config,
    ) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    /// Run the whole pipeline for every language.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] on the first fetch, validation or write
    /// failure. Output written before the failure is left in place.
    pub fn run(&self) -> Result<GenerateReport, GenerateError> {
        let endpoint = &self.config.endpoints.languages;
        let response = self.fetch(endpoint, &json!({}))?;
        let selected = select(&response.json, &endpoint.items, "languages")?;
        self.write_json(&self.data_dir().join("languages.json"), selected)?;

        let languages = selected.as_array().ok_or_else(|| GenerateError::MissingItems {
            endpoint: "languages".to_owned(),
            pointer: endpoint.items.clone(),
        })?;

        let mut report = GenerateReport::default();
        let mut index_lines = Vec::new();
        for language in languages {
            let code = language
                .get("code")
                .and_then(Value::as_str)
                .filter(|code| !code.is_empty())
                .ok_or_else(|| GenerateError::MissingLanguageCode(language.to_string()))?;
            self.generate_language(code, language, &mut report, &mut index_lines)?;
            report.languages.push(code.to_owned());
        }

        let mut index = index_lines.join("\n");
        index.push('\n');
        self.store
            .write(&self.config.output_resolved.site_index, &index)?;

        info!(
            languages = report.languages.len(),
            written = report.pages_written,
            skipped = report.pages_skipped,
            "Generation finished"
        );
        Ok(report)
    }

    fn generate_language(
        &self,
        code: &str,
        language: &Value,
        report: &mut GenerateReport,
        index_lines: &mut Vec<String>,
    ) -> Result<(), GenerateError> {
        info!("Generating language {code}");
        let context = json!({ "lang": language });
        let data_dir = self.data_dir().join(code);
        let endpoints = &self.config.endpoints;

        let labels = self.fetch(&endpoints.labels, &context)?;
        let labels = select(&labels.json, &endpoints.labels.items, "labels")?;
        self.write_json(&data_dir.join("labels.json"), labels)?;

        let navigation = self.fetch(&endpoints.navigation, &context)?;
        let navigation = select(&navigation.json, &endpoints.navigation.items, "navigation")?;
        self.write_json(&data_dir.join("navigation.json"), navigation)?;
        let entries: Vec<Page> = serde_json::from_value(navigation.clone()).map_err(|source| {
            GenerateError::InvalidNavigation {
                language: code.to_owned(),
                source,
            }
        })?;

        for (name, endpoint) in &self.config.mirrors {
            let response = self.fetch(endpoint, &context)?;
            let selected = select(&response.json, &endpoint.items, name)?;
            self.write_json(&data_dir.join(format!("{name}.json")), selected)?;
        }

        let mut registry = ResolverRegistry::new();
        for (entity, endpoint) in &self.config.dynamic_pages {
            let response = self.fetch(endpoint, &context)?;
            let strategy = ResolveStrategy::Pointer(endpoint.items.clone());
            registry.register(entity, DynamicPageResolver::new(response.json, strategy))?;
        }

        let pages = expand_pages(&entries, &registry);
        for concrete in &pages {
            validate_path(&concrete.page.path)?;
        }
        check_unique_documents(&pages)?;
        info!("{} navigation entries expanded into {} pages", entries.len(), pages.len());

        let mut nav_pages = Vec::with_capacity(pages.len());
        for concrete in &pages {
            if concrete.unresolved.is_some() {
                report.unresolved_templates += 1;
            }
            let unpublished = match self.render_page(language, concrete, report)? {
                Rendered::Written { index_line } => {
                    report.pages_written += 1;
                    index_lines.push(index_line);
                    false
                }
                Rendered::Skipped => {
                    report.pages_skipped += 1;
                    true
                }
            };
            let page = &concrete.page;
            nav_pages.push(NavPage {
                page_id: page.id.clone(),
                path: public_path(&local_sorted_path(page.ordering_path())),
                label: page.label.clone(),
                sort: page.sort,
                show: page.show,
                unpublished,
            });
        }
        self.write_json(&data_dir.join("pages.json"), &nav_pages)?;

        Ok(())
    }

    fn render_page(
        &self,
        language: &Value,
        concrete: &ConcretePage,
        report: &mut GenerateReport,
    ) -> Result<Rendered, GenerateError> {
        let page = &concrete.page;
        let local_path = local_sorted_path(page.ordering_path());
        let content_dir = &self.config.output_resolved.content_dir;

        if concrete.directory {
            let dir = content_dir.join(local_path.trim_matches('/'));
            self.store.ensure_dir(&dir)?;
            if page.show == Show::Never {
                self.store.write(&dir.join(DIR_MARKER), DIR_MARKER_CONTENT)?;
                report.markers_written += 1;
            }
        }

        let mut context = json!({
            "lang": language,
            "page": {
                "id": page.id,
                "path": page.path,
                "sortedPath": page.sorted_path,
                "label": page.label,
            },
        });
        if let (Some(binding), Some(fields)) = (&page.entity, context.as_object_mut()) {
            fields.insert(binding.name.clone(), Value::Object(binding.value.clone()));
        }

        let endpoint = &self.config.endpoints.page;
        let FetchResponse { mut json, url } = self.fetch(endpoint, &context)?;
        if let Some(binding) = &page.entity {
            substitute_entity(&mut json, binding);
        }

        let Some(root) = select_content(&json, &endpoint.items) else {
            debug!("No content for {}, skipping", page.path);
            return Ok(Rendered::Skipped);
        };
        let content = PageContent::from_value(root);
        let Some(body) = to_mdc(&content, concrete.unresolved.as_ref()) else {
            debug!("Content of {} is not published, skipping", page.path);
            return Ok(Rendered::Skipped);
        };

        let document = FrontMatter::new(page.show, &page.access, &url).render(&body)?;
        let file = content_dir.join(document_path(&local_path, concrete.directory));
        self.store.write(&file, &document)?;
        debug!("Wrote {}", file.display());

        Ok(Rendered::Written {
            index_line: format!(
                "- [{}]({})",
                display_label(&page.label),
                public_path(&local_path)
            ),
        })
    }

    fn fetch(
        &self,
        endpoint: &EndpointConfig,
        context: &Value,
    ) -> Result<FetchResponse, GenerateError> {
        let path = resolve_str(&endpoint.path, context);
        let query = resolve_query(&endpoint.query, context);
        debug!("Fetching {path}{query}");
        Ok(self.source.fetch(&path, &query)?)
    }

    fn data_dir(&self) -> &Path {
        &self.config.output_resolved.data_dir
    }

    fn write_json(&self, path: &Path, value: &impl Serialize) -> Result<(), GenerateError> {
        let mut json = serde_json::to_string_pretty(value)?;
        json.push('\n');
        self.store.write(path, &json)?;
        Ok(())
    }
}

/// Fails when two pages would be written to the same document file.
fn check_unique_documents(pages: &[ConcretePage]) -> Result<(), GenerateError> {
    let mut documents: HashMap<String, &str> = HashMap::with_capacity(pages.len());
    for concrete in pages {
        let page = &concrete.page;
        let document = document_path(
            &local_sorted_path(page.ordering_path()),
            concrete.directory,
        );
        if let Some(first) = documents.insert(document.clone(), &page.path) {
            return Err(GenerateError::DuplicateDocument {
                document,
                first: first.to_owned(),
                second: page.path.clone(),
            });
        }
    }
    Ok(())
}

/// Value at `pointer`, or [`GenerateError::MissingItems`].
fn select<'v>(json: &'v Value, pointer: &str, endpoint: &str) -> Result<&'v Value, GenerateError> {
    json.pointer(pointer).ok_or_else(|| GenerateError::MissingItems {
        endpoint: endpoint.to_owned(),
        pointer: pointer.to_owned(),
    })
}

/// Content root of a page response: the value at `pointer`, or the first
/// element when that value is a list.
fn select_content<'v>(json: &'v Value, pointer: &str) -> Option<&'v Value> {
    match json.pointer(pointer)? {
        Value::Array(items) => items.first(),
        Value::Null => None,
        other => Some(other),
    }
}
