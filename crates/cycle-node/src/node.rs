// node.rs — RepositoryNode: a file or folder inside a content repository.
//
// A node carries a backend-local `id`, an optional client-facing URL, its
// metadata, and two connector bindings:
//
//   current  — the connector that should service the node right now; may be
//              rebound, e.g. when a filtering view wraps the node
//   original — the connector that first produced the node; bound once
//
// Actions that need the unfiltered backend's addressing scheme go through
// `original_connector()`; everything else goes through `connector()`.
//
// Only identity and metadata cross a process boundary. Connector handles
// are skipped during serialization, so a deserialized node arrives unbound
// and the receiving side must call `rehydrate()` (or the two setters).

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::binding::ConnectorBindings;
use crate::connector::ConnectorRef;
use crate::error::NodeError;
use crate::metadata::Metadata;

/// Whether a node is a folder or a file-like artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Folder,
    Artifact,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Folder => write!(f, "Folder"),
            NodeKind::Artifact => write!(f, "Artifact"),
        }
    }
}

/// A node in a repository, bound to the connector that services it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryNode {
    kind: NodeKind,

    /// Backend-local identifier; opaque to the core.
    #[serde(default)]
    id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    client_url: Option<String>,

    #[serde(default)]
    metadata: Metadata,

    #[serde(skip)]
    bindings: ConnectorBindings,
}

impl RepositoryNode {
    /// Create a node with no connector bound and empty metadata.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: String::new(),
            client_url: None,
            metadata: Metadata::new(),
            bindings: ConnectorBindings::unbound(),
        }
    }

    /// Create a node produced by `connector`, which becomes both the
    /// current and the original connector.
    pub fn with_connector(kind: NodeKind, connector: ConnectorRef) -> Self {
        Self {
            bindings: ConnectorBindings::bound_to(connector),
            ..Self::new(kind)
        }
    }

    pub fn folder() -> Self {
        Self::new(NodeKind::Folder)
    }

    pub fn artifact() -> Self {
        Self::new(NodeKind::Artifact)
    }

    /// Builder-style id setter.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// The connector currently responsible for this node.
    ///
    /// Fails with [`NodeError::NotConnected`] if none has been bound.
    pub fn connector(&self) -> Result<ConnectorRef, NodeError> {
        self.bindings.current().ok_or_else(|| {
            tracing::warn!(node_id = %self.id, "node read before a connector was bound");
            NodeError::NotConnected {
                node: self.to_string(),
            }
        })
    }

    pub fn is_connected(&self) -> bool {
        self.bindings.current().is_some()
    }

    /// Rebind the current connector. The original connector is untouched.
    ///
    /// Takes `&self` so a shared node can be rebound while other threads
    /// read it; readers see either the old or the new connector.
    pub fn overwrite_connector(&self, connector: ConnectorRef) {
        let to = connector.connector_id().to_string();
        let previous = self.bindings.rebind(connector);
        tracing::debug!(
            node_id = %self.id,
            from = previous.as_ref().map(|c| c.connector_id()).unwrap_or("<none>"),
            to = %to,
            "rebound node connector"
        );
    }

    /// The connector that first produced this node, if bound.
    pub fn original_connector(&self) -> Option<ConnectorRef> {
        self.bindings.original()
    }

    /// Bind the original connector of a node that has none yet.
    ///
    /// For bootstrapping, e.g. after deserialization. General rebinding goes
    /// through [`overwrite_connector`](Self::overwrite_connector).
    pub fn set_original_connector(&self, connector: ConnectorRef) -> Result<(), NodeError> {
        let connector_id = connector.connector_id().to_string();
        self.bindings.bind_original(connector).map_err(|_| {
            let existing = self
                .bindings
                .original()
                .map(|c| c.connector_id().to_string())
                .unwrap_or_default();
            NodeError::OriginalAlreadyBound {
                node_id: self.id.clone(),
                connector_id: existing,
            }
        })?;
        tracing::debug!(node_id = %self.id, connector = %connector_id, "bound original connector");
        Ok(())
    }

    /// Reattach a transferred node to a live connector, binding it as both
    /// original and current.
    pub fn rehydrate(&self, connector: ConnectorRef) -> Result<(), NodeError> {
        self.set_original_connector(connector.clone())?;
        self.overwrite_connector(connector);
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn client_url(&self) -> Option<&str> {
        self.client_url.as_deref()
    }

    pub fn set_client_url(&mut self, url: impl Into<String>) {
        self.client_url = Some(url.into());
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Mutable access for backends filling in metadata lazily.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Flattened string view of the metadata; a fresh snapshot per call.
    pub fn metadata_as_map(&self) -> IndexMap<String, String> {
        self.metadata.as_map()
    }
}

/// Diagnostic form only; never parse it or compare nodes by it.
impl fmt::Display for RepositoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [id={};metadata={}]", self.kind, self.id, self.metadata)
    }
}
