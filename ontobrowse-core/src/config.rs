// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Configuration for the ontology browser core
//!
//! Everything here is built once at process start and handed to the
//! classifier and label resolver by reference. Nothing is read from global
//! state after construction.

use crate::error::ConfigError;
use crate::vocab;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of URIs per label query
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Result sets with at most this many rows are never filtered
pub const DEFAULT_FILTER_THRESHOLD: usize = 20;

/// Default per-request timeout against the store, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Connection settings for the GraphDB repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Server base URL (e.g., "http://localhost:7200")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Repository id
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Basic-auth user
    #[serde(default)]
    pub username: Option<String>,

    /// Basic-auth password (requires username)
    #[serde(default)]
    pub password: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl EndpointConfig {
    /// `{base_url}/repositories/{repository}`
    pub fn query_url(&self) -> String {
        format!(
            "{}/repositories/{}",
            self.base_url.trim_end_matches('/'),
            self.repository
        )
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            repository: default_repository(),
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Namespace set, allow-list and label vocabulary
///
/// Static for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Prefixes of system (vocabulary-internal) namespaces
    #[serde(default = "default_system_namespaces")]
    pub system_namespaces: Vec<String>,

    /// Exact URIs that are always shown
    #[serde(default = "default_core_resources")]
    pub core_resources: Vec<String>,

    /// Substrings that mark a URI as domain content
    #[serde(default = "default_domain_markers")]
    pub domain_markers: Vec<String>,

    /// Label predicates in rank order
    #[serde(default = "default_label_predicates")]
    pub label_predicates: Vec<String>,

    /// Preferred label language
    #[serde(default = "default_primary_language")]
    pub primary_language: String,

    /// Used only when no primary-language label exists
    #[serde(default = "default_secondary_language")]
    pub secondary_language: String,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            system_namespaces: default_system_namespaces(),
            core_resources: default_core_resources(),
            domain_markers: default_domain_markers(),
            label_predicates: default_label_predicates(),
            primary_language: default_primary_language(),
            secondary_language: default_secondary_language(),
        }
    }
}

/// Tunables for batching and filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// URIs per label query
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Row sets at or below this size skip system filtering
    #[serde(default = "default_filter_threshold")]
    pub filter_threshold: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            filter_threshold: default_filter_threshold(),
        }
    }
}

// Default values
fn default_base_url() -> String {
    "http://localhost:7200".to_string()
}

fn default_repository() -> String {
    "ontology".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("ontobrowse/{}", env!("CARGO_PKG_VERSION"))
}

fn default_system_namespaces() -> Vec<String> {
    vocab::SYSTEM_NAMESPACES.iter().map(|s| s.to_string()).collect()
}

fn default_core_resources() -> Vec<String> {
    vocab::CORE_RESOURCES.iter().map(|s| s.to_string()).collect()
}

fn default_domain_markers() -> Vec<String> {
    vocab::DOMAIN_MARKERS.iter().map(|s| s.to_string()).collect()
}

fn default_label_predicates() -> Vec<String> {
    vocab::LABEL_PREDICATES.iter().map(|s| s.to_string()).collect()
}

fn default_primary_language() -> String {
    vocab::PRIMARY_LANGUAGE.to_string()
}

fn default_secondary_language() -> String {
    vocab::SECONDARY_LANGUAGE.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_filter_threshold() -> usize {
    DEFAULT_FILTER_THRESHOLD
}

const ENV_ENDPOINT: &str = "ONTOBROWSE_ENDPOINT";
const ENV_REPOSITORY: &str = "ONTOBROWSE_REPOSITORY";
const ENV_USERNAME: &str = "ONTOBROWSE_USERNAME";
const ENV_PASSWORD: &str = "ONTOBROWSE_PASSWORD";
const ENV_TIMEOUT: &str = "ONTOBROWSE_TIMEOUT_SECS";

impl BrowserConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides on top of `self`
    ///
    /// Supported environment variables:
    /// - ONTOBROWSE_ENDPOINT: GraphDB base URL (default: http://localhost:7200)
    /// - ONTOBROWSE_REPOSITORY: Repository id (default: ontology)
    /// - ONTOBROWSE_USERNAME / ONTOBROWSE_PASSWORD: Basic-auth credentials
    /// - ONTOBROWSE_TIMEOUT_SECS: Per-request timeout (default: 10)
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_ENDPOINT) {
            self.endpoint.base_url = url;
        }
        if let Some(repo) = lookup(ENV_REPOSITORY) {
            self.endpoint.repository = repo;
        }
        if let Some(user) = lookup(ENV_USERNAME) {
            self.endpoint.username = Some(user);
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.endpoint.password = Some(password);
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            match timeout.parse() {
                Ok(val) => self.endpoint.timeout_secs = val,
                Err(_) => tracing::warn!("Ignoring invalid {}: {:?}", ENV_TIMEOUT, timeout),
            }
        }
        self
    }

    /// Load configuration with priority: file > env > defaults
    ///
    /// Environment variables only override values when they are set.
    pub fn load(config_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) if path.exists() => {
                tracing::info!("Loading configuration from file: {:?}", path);
                Self::from_file(&path)?
            }
            Some(path) => {
                tracing::warn!("Config file not found: {:?}, using defaults", path);
                Self::default()
            }
            None => Self::default(),
        };

        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the resolver cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint.base_url is empty".into()));
        }
        if self.endpoint.repository.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint.repository is empty".into()));
        }
        if self.endpoint.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "endpoint.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.endpoint.password.is_some() && self.endpoint.username.is_none() {
            return Err(ConfigError::Invalid(
                "endpoint.password is set without endpoint.username".into(),
            ));
        }
        if self.resolver.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "resolver.batch_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
