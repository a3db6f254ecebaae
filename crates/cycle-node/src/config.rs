// config.rs — Connector configuration.
//
// A repository setup lists its connectors in a TOML file:
//
//   [[connector]]
//   id = "signavio"
//   kind = "signavio"
//   name = "Process models"
//   client_base_url = "https://editor.example.com/p/model"
//
// Connector implementations hold their `ConnectorConfig` and expose it
// through `RepositoryConnector::config`, which is where client URLs and
// connector ids for logging come from.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::NodeError;

/// Top-level configuration: the set of configured connectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleConfig {
    #[serde(default, rename = "connector")]
    pub connectors: Vec<ConnectorConfig>,
}

/// Configuration for one repository connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Unique connector id, used in logs and diagnostics.
    pub id: String,

    /// Human-readable name. Falls back to `id` when absent.
    #[serde(default)]
    pub name: Option<String>,

    /// Backend kind, e.g. "signavio", "filesystem", "view".
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Base URL clients use to browse nodes; node ids are appended to it.
    #[serde(default)]
    pub client_base_url: Option<String>,

    /// Backend-specific settings passed through untouched.
    #[serde(default)]
    pub properties: IndexMap<String, String>,
}

fn default_kind() -> String {
    "generic".to_string()
}

impl ConnectorConfig {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind: kind.into(),
            client_base_url: None,
            properties: IndexMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_client_base_url(mut self, url: impl Into<String>) -> Self {
        self.client_base_url = Some(url.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Build the client URL for a node id, if a base URL is configured.
    ///
    /// Exactly one `/` separates the base and the id.
    pub fn client_url_for(&self, node_id: &str) -> Option<String> {
        let base = self.client_base_url.as_deref()?;
        Some(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            node_id.trim_start_matches('/')
        ))
    }
}

impl CycleConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, NodeError> {
        let config: CycleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path).map_err(|source| NodeError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            connectors = config.connectors.len(),
            "loaded connector config"
        );
        Ok(config)
    }

    /// Try to load config, returning an empty config if the file doesn't
    /// exist. Parse and validation errors are still reported.
    pub fn load_or_default(path: &Path) -> Result<Self, NodeError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Look up a connector by id.
    pub fn connector(&self, id: &str) -> Option<&ConnectorConfig> {
        self.connectors.iter().find(|c| c.id == id)
    }

    /// Reject empty and duplicate connector ids.
    pub fn validate(&self) -> Result<(), NodeError> {
        let mut seen = HashSet::new();
        for connector in &self.connectors {
            if connector.id.trim().is_empty() {
                return Err(NodeError::InvalidConfig(
                    "connector id must not be empty".to_string(),
                ));
            }
            if !seen.insert(connector.id.as_str()) {
                return Err(NodeError::InvalidConfig(format!(
                    "duplicate connector id '{}'",
                    connector.id
                )));
            }
        }
        Ok(())
    }
}
