//! Content fetch abstraction.

use serde_json::Value;

use crate::ClientError;

/// Response of a single CMS fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchResponse {
    /// Parsed JSON body.
    pub json: Value,
    /// Fully resolved request URL (recorded in front matter as the source).
    pub url: String,
}

/// Source of CMS data.
///
/// `path` is an endpoint path (e.g. `/pages`) and `query` an already encoded
/// query string that is either empty or starts with `?`. Transport and parse
/// failures surface as [`ClientError`]; callers do not retry.
pub trait ContentSource {
    /// Fetch and parse one JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, status or JSON errors.
    fn fetch(&self, path: &str, query: &str) -> Result<FetchResponse, ClientError>;
}
