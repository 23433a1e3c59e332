//! Configuration management for pagesmith.
//!
//! Parses `pagesmith.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `api.base_url`
//! - `api.token`
//!
//! ## Endpoints
//!
//! Every CMS request is described by an [`EndpointConfig`]: a path, a query
//! template whose values may contain `{a.b}` placeholders, and a JSON pointer
//! selecting the interesting part of the response.

mod expand;

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override CMS API base URL.
    pub base_url: Option<String>,
    /// Override content output directory.
    pub content_dir: Option<PathBuf>,
    /// Override JSON sidecar output directory.
    pub data_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pagesmith.toml";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CMS API connection settings.
    pub api: ApiConfig,
    /// Output layout (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Core CMS endpoints.
    pub endpoints: EndpointsConfig,
    /// Auxiliary endpoints mirrored verbatim into one JSON file per language.
    pub mirrors: BTreeMap<String, EndpointConfig>,
    /// Dynamic page resolvers keyed by entity-type name.
    pub dynamic_pages: BTreeMap<String, EndpointConfig>,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Directory all output paths are relative to (set after loading).
    #[serde(skip)]
    pub root_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// CMS API connection settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Optional bearer token.
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Raw output configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    content_dir: Option<String>,
    data_dir: Option<String>,
    site_index: Option<String>,
}

/// Resolved output layout, relative to [`Config::root_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory receiving markup documents.
    pub content_dir: PathBuf,
    /// Directory receiving JSON sidecar files.
    pub data_dir: PathBuf,
    /// Site index document path.
    pub site_index: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            data_dir: PathBuf::from("data"),
            site_index: PathBuf::from("pages.md"),
        }
    }
}

/// A single CMS request description.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Path appended to `api.base_url`; may contain `{a.b}` placeholders.
    pub path: String,
    /// Query parameter templates. Keys resolving to an empty value are omitted.
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    /// JSON pointer into the response (empty selects the whole document).
    #[serde(default)]
    pub items: String,
}

impl EndpointConfig {
    /// Endpoint with the given path, a `locale={lang.code}` query and `/data` pointer.
    #[must_use]
    pub fn localized(path: &str) -> Self {
        Self {
            path: path.to_owned(),
            query: BTreeMap::from([("locale".to_owned(), "{lang.code}".to_owned())]),
            items: "/data".to_owned(),
        }
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "{field}.path must start with '/'"
            )));
        }
        if !self.items.is_empty() && !self.items.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "{field}.items must be empty or a JSON pointer starting with '/'"
            )));
        }
        Ok(())
    }
}

/// Core CMS endpoints.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Language records; each record must carry a `code` field.
    pub languages: EndpointConfig,
    /// Per-language UI labels.
    pub labels: EndpointConfig,
    /// Per-language navigation listing.
    pub navigation: EndpointConfig,
    /// Per-page content (`{state, content}` root object).
    pub page: EndpointConfig,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        let mut page = EndpointConfig::localized("/pages");
        page.query
            .insert("path".to_owned(), "{page.path}".to_owned());
        Self {
            languages: EndpointConfig {
                path: "/languages".to_owned(),
                query: BTreeMap::new(),
                items: "/data".to_owned(),
            },
            labels: EndpointConfig::localized("/labels"),
            navigation: EndpointConfig::localized("/navigation"),
            page,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`api.token`").
        field: String,
        /// Error message (e.g., "${`CMS_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require an output path to stay inside the project directory.
fn require_relative(path: &Path, field: &str) -> Result<(), ConfigError> {
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{field} must be a relative path inside the project directory"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pagesmith.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The final
    /// configuration is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.api.base_url.clone_from(base_url);
        }
        if let Some(content_dir) = &settings.content_dir {
            self.output_resolved.content_dir.clone_from(content_dir);
        }
        if let Some(data_dir) = &settings.data_dir {
            self.output_resolved.data_dir.clone_from(data_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config rooted at the current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config rooted at the given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            api: ApiConfig::default(),
            output: OutputConfigRaw::default(),
            endpoints: EndpointsConfig::default(),
            mirrors: BTreeMap::new(),
            dynamic_pages: BTreeMap::new(),
            output_resolved: OutputConfig::default(),
            root_dir: base.to_path_buf(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_api()?;
        self.validate_output()?;
        self.validate_endpoints()?;
        Ok(())
    }

    fn validate_api(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.api.base_url, "api.base_url")?;
        require_http_url(&self.api.base_url, "api.base_url")?;
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_output(&self) -> Result<(), ConfigError> {
        require_relative(&self.output_resolved.content_dir, "output.content_dir")?;
        require_relative(&self.output_resolved.data_dir, "output.data_dir")?;
        require_relative(&self.output_resolved.site_index, "output.site_index")?;
        Ok(())
    }

    fn validate_endpoints(&self) -> Result<(), ConfigError> {
        self.endpoints
            .languages
            .validate("endpoints.languages")?;
        self.endpoints.labels.validate("endpoints.labels")?;
        self.endpoints
            .navigation
            .validate("endpoints.navigation")?;
        self.endpoints.page.validate("endpoints.page")?;
        for (name, endpoint) in &self.mirrors {
            endpoint.validate(&format!("mirrors.{name}"))?;
        }
        for (name, endpoint) in &self.dynamic_pages {
            endpoint.validate(&format!("dynamic_pages.{name}"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.api.base_url = expand::expand_env(&self.api.base_url, "api.base_url")?;
        if let Some(ref token) = self.api.token {
            self.api.token = Some(expand::expand_env(token, "api.token")?);
        }
        // An empty token after expansion means "no authentication".
        if self.api.token.as_deref() == Some("") {
            self.api.token = None;
        }
        Ok(())
    }

    /// Record the project directory and resolve output paths from raw strings.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = OutputConfig::default();
        let resolve = |raw: Option<&str>, default: PathBuf| raw.map_or(default, PathBuf::from);

        self.root_dir = config_dir.to_path_buf();
        self.output_resolved = OutputConfig {
            content_dir: resolve(self.output.content_dir.as_deref(), defaults.content_dir),
            data_dir: resolve(self.output.data_dir.as_deref(), defaults.data_dir),
            site_index: resolve(self.output.site_index.as_deref(), defaults.site_index),
        };
    }
}
