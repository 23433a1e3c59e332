//! CMS page graph to static content tree synthesis.
//!
//! The pipeline turns a headless CMS's navigation and page content into a
//! file-based content store:
//!
//! - [`placeholder`]: `{a.b}` substitution in paths, query templates and text
//! - [`entity`]: `:entity.field` expansion and path decomposition
//! - [`block`] and [`mdc`]: the CMS block tree and its depth-fenced markup form
//! - [`resolver`] and [`expand`]: dynamic page templates expanded per entity
//! - [`layout`]: path validation and on-disk layout
//! - [`Generator`]: per-language orchestration of fetch, render and write
//!
//! # Example
//!
//! ```ignore
//! use pagesmith_client::CmsClient;
//! use pagesmith_config::Config;
//! use pagesmith_content::Generator;
//! use pagesmith_storage::FsStore;
//!
//! let config = Config::load(None, None)?;
//! let client = CmsClient::new(&config.api.base_url, config.api.token.as_deref(), 30);
//! let store = FsStore::new(config.root_dir.clone());
//! let report = Generator::new(&client, &store, &config).run()?;
//! ```

pub mod block;
pub mod entity;
mod error;
pub mod expand;
mod front_matter;
mod generate;
pub mod layout;
pub mod mdc;
pub mod page;
pub mod placeholder;
pub mod resolver;
mod substitute;

pub use error::GenerateError;
pub use generate::{GenerateReport, Generator};
pub use pagesmith_nav::Show;
