//! Error types for content generation.

use pagesmith_client::ClientError;
use pagesmith_storage::StorageError;

/// Error aborting a generation run.
///
/// Missing resolvers and unpublished content are not errors: the former
/// falls back to the literal template page, the latter skips the page.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Page path contains characters outside the allowed set.
    #[error("invalid page path \"{path}\": must match {pattern}")]
    InvalidPath {
        /// Offending path.
        path: String,
        /// Validation pattern.
        pattern: &'static str,
    },

    /// Two pages of one language map to the same document file.
    #[error("pages \"{first}\" and \"{second}\" would both be written to \"{document}\"")]
    DuplicateDocument {
        /// Document path relative to the content directory.
        document: String,
        /// Page path that claimed the document first.
        first: String,
        /// Page path that collided with it.
        second: String,
    },

    /// Two resolvers registered for the same entity type in one language.
    #[error("dynamic page resolver for \"{entity}\" is already registered")]
    DuplicateResolver {
        /// Entity-type name.
        entity: String,
    },

    /// Response had nothing at the configured JSON pointer.
    #[error("{endpoint}: nothing found at JSON pointer \"{pointer}\"")]
    MissingItems {
        /// Endpoint name (e.g. "navigation").
        endpoint: String,
        /// Configured pointer.
        pointer: String,
    },

    /// Language record without a usable `code`.
    #[error("language record has no \"code\" field: {0}")]
    MissingLanguageCode(String),

    /// Navigation payload is not a list of pages.
    #[error("invalid navigation payload for language \"{language}\": {source}")]
    InvalidNavigation {
        /// Language code.
        language: String,
        /// Deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// CMS request failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Writing output failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Front matter encoding failed.
    #[error("front matter error: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}
