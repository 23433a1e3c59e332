//! Headless CMS API client for pagesmith.
//!
//! Provides a blocking HTTP client ([`CmsClient`]) for the CMS REST API and
//! the [`ContentSource`] trait the content pipeline fetches through, so the
//! pipeline can be exercised against in-memory fixtures.

mod client;
mod error;
mod source;

pub use client::CmsClient;
pub use error::ClientError;
pub use source::{ContentSource, FetchResponse};
