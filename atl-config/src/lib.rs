//! Shared configuration loader for the atl client.
//!
//! `defaults/atl.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Callers layer config files, `ATL_CLI_*`
//! environment variables and CLI overrides on top of those defaults via
//! [`Loader`] before deserializing into [`AtlConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/atl.default.toml");

/// Prefix shared by every environment variable atl reads.
pub const ENV_PREFIX: &str = "ATL_CLI";

/// Environment variables carrying the credentials, in validation order.
pub const CREDENTIAL_VARS: [&str; 3] = ["ATL_CLI_SITE", "ATL_CLI_EMAIL", "ATL_CLI_TOKEN"];

/// Top-level configuration consumed by atl.
#[derive(Clone, Deserialize)]
pub struct AtlConfig {
    /// Atlassian site host, e.g. `example.atlassian.net`.
    pub site: String,
    pub email: String,
    pub token: String,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

/// Controls how results are printed.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
    pub body_format: String,
}

/// A required credential is missing or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub variable: &'static str,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} environment variable is required", self.variable)
    }
}

impl std::error::Error for ValidationError {}

impl AtlConfig {
    /// Check that site, email and token are all present, in that order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.credential_status().into_iter().find(|(_, set)| !set) {
            Some((variable, _)) => Err(ValidationError { variable }),
            None => Ok(()),
        }
    }

    /// Whether each credential variable has a non-blank value.
    pub fn credential_status(&self) -> [(&'static str, bool); 3] {
        let set = |value: &str| !value.trim().is_empty();
        [
            (CREDENTIAL_VARS[0], set(&self.site)),
            (CREDENTIAL_VARS[1], set(&self.email)),
            (CREDENTIAL_VARS[2], set(&self.token)),
        ]
    }

    /// The site host with any scheme and trailing slashes removed.
    pub fn site_host(&self) -> &str {
        let site = self.site.trim();
        let site = site.strip_prefix("https://").unwrap_or(site);
        site.trim_end_matches('/')
    }

    /// Root URL every API path is appended to.
    ///
    /// An explicit `http://` site is kept as-is so the HTTP layer can refuse it.
    pub fn base_url(&self) -> String {
        let site = self.site.trim();
        if site.starts_with("http://") {
            return site.trim_end_matches('/').to_string();
        }
        format!("https://{}", self.site_host())
    }
}

impl fmt::Debug for AtlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("AtlConfig")
            .field("site", &self.site)
            .field("email", &self.email)
            .field("token", &token)
            .field("http", &self.http)
            .field("output", &self.output)
            .finish()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `ATL_CLI_*` variables from the process environment.
    ///
    /// `ATL_CLI_SITE` maps to `site`; nested keys use a double underscore,
    /// so `ATL_CLI_HTTP__TIMEOUT_SECS` maps to `http.timeout_secs`.
    pub fn with_env(self) -> Self {
        self.with_env_source(None)
    }

    /// Same as [`Loader::with_env`] but reads from the given map instead of the process.
    pub fn with_env_map(self, vars: HashMap<String, String>) -> Self {
        self.with_env_source(Some(vars))
    }

    fn with_env_source(mut self, vars: Option<HashMap<String, String>>) -> Self {
        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(vars);
        self.builder = self.builder.add_source(env);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AtlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AtlConfig, ConfigError> {
    Loader::new().build()
}
