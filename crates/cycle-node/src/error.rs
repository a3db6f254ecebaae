// error.rs — Error types for the repository node core.
//
// Two enums live here: `NodeError` for failures raised by the node layer
// itself, and `ConnectorError` for failures raised by backend connectors.
// The node layer never masks connector errors: `NodeError::Connector` is
// transparent, so `?` carries them through with their original message.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the node/metadata layer and its configuration.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The node's current connector was read before one was bound.
    ///
    /// This indicates a missing construction or rehydration step, not a
    /// user-actionable condition.
    #[error("item {node} is not connected to any repository")]
    NotConnected { node: String },

    /// The original connector was already bound and cannot be replaced.
    #[error("node '{node_id}' already has original connector '{connector_id}'")]
    OriginalAlreadyBound {
        node_id: String,
        connector_id: String,
    },

    /// A backend connector failed; passed through unchanged.
    #[error(transparent)]
    Connector(#[from] ConnectorError),

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration parsed but is not usable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Errors raised by connector implementations.
///
/// Concrete backends pick the variant that fits; anything backend-specific
/// goes into [`ConnectorError::Backend`].
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// No node with this id exists in the backend.
    #[error("node '{id}' not found in repository '{connector}'")]
    NotFound { connector: String, id: String },

    /// Children were requested for a node that is not a folder.
    #[error("node '{id}' is not a folder")]
    NotAFolder { id: String },

    /// The backend refused access to the node.
    #[error("permission denied for node '{id}'")]
    PermissionDenied { id: String },

    /// The backend could not be reached.
    #[error("repository '{connector}' unreachable: {reason}")]
    Unreachable { connector: String, reason: String },

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}
