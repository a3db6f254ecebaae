// Test doubles shared by the integration tests.
//
// `MemoryConnector` is a tiny in-memory backend; `FilterView` wraps another
// connector and hides children whose id matches a predicate, rebinding the
// nodes it hands out to itself.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use cycle_node::{
    ConnectorConfig, ConnectorError, ConnectorRef, FetchState, Metadata, NodeError, NodeKind,
    RepositoryConnector, RepositoryNode,
};

pub struct MemoryConnector {
    config: ConnectorConfig,
    nodes: HashMap<String, (NodeKind, Metadata)>,
    children: HashMap<String, Vec<String>>,
}

impl MemoryConnector {
    pub fn new(id: &str) -> Self {
        Self {
            config: ConnectorConfig::new(id, "memory")
                .with_client_base_url(format!("https://{}.example.com/nodes", id)),
            nodes: HashMap::new(),
            children: HashMap::new(),
        }
    }

    pub fn with_folder(mut self, id: &str, children: &[&str]) -> Self {
        let mut md = Metadata::new();
        md.set_name(id);
        md.record_fetch(FetchState::FullyDetailed);
        self.nodes.insert(id.to_string(), (NodeKind::Folder, md));
        self.children.insert(
            id.to_string(),
            children.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn with_artifact(mut self, id: &str, name: &str) -> Self {
        let mut md = Metadata::new();
        md.set_name(name);
        md.set_last_author("alice");
        md.record_fetch(FetchState::FullyDetailed);
        self.nodes.insert(id.to_string(), (NodeKind::Artifact, md));
        self
    }

    pub fn shared(self) -> ConnectorRef {
        Arc::new(self)
    }
}

impl RepositoryConnector for MemoryConnector {
    fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    fn fetch_metadata(&self, node_id: &str) -> Result<Metadata, ConnectorError> {
        self.nodes
            .get(node_id)
            .map(|(_, md)| md.clone())
            .ok_or_else(|| ConnectorError::NotFound {
                connector: self.config.id.clone(),
                id: node_id.to_string(),
            })
    }

    fn list_children(&self, folder_id: &str) -> Result<Vec<String>, ConnectorError> {
        match self.nodes.get(folder_id) {
            Some((NodeKind::Folder, _)) => {
                Ok(self.children.get(folder_id).cloned().unwrap_or_default())
            }
            Some((NodeKind::Artifact, _)) => Err(ConnectorError::NotAFolder {
                id: folder_id.to_string(),
            }),
            None => Err(ConnectorError::NotFound {
                connector: self.config.id.clone(),
                id: folder_id.to_string(),
            }),
        }
    }
}

pub struct FilterView {
    config: ConnectorConfig,
    inner: ConnectorRef,
    hidden_prefix: String,
}

impl FilterView {
    pub fn wrap(inner: ConnectorRef, hidden_prefix: &str) -> ConnectorRef {
        Arc::new(Self {
            config: ConnectorConfig::new(format!("view-{}", inner.connector_id()), "view"),
            inner,
            hidden_prefix: hidden_prefix.to_string(),
        })
    }
}

impl RepositoryConnector for FilterView {
    fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    fn fetch_metadata(&self, node_id: &str) -> Result<Metadata, ConnectorError> {
        self.inner.fetch_metadata(node_id)
    }

    fn list_children(&self, folder_id: &str) -> Result<Vec<String>, ConnectorError> {
        Ok(self
            .inner
            .list_children(folder_id)?
            .into_iter()
            .filter(|id| !id.starts_with(&self.hidden_prefix))
            .collect())
    }

    fn client_url(&self, node_id: &str) -> Option<String> {
        self.inner.client_url(node_id)
    }
}

/// Produce a node the way a backend does: bound to `connector`, header
/// fields fetched, client URL assigned.
pub fn load_node(
    connector: &ConnectorRef,
    kind: NodeKind,
    id: &str,
) -> Result<RepositoryNode, NodeError> {
    let mut node = RepositoryNode::with_connector(kind, connector.clone()).with_id(id);
    if let Some(url) = connector.client_url(id) {
        node.set_client_url(url);
    }
    let mut header = Metadata::new();
    if let Some(name) = connector.fetch_metadata(id)?.name() {
        header.set_name(name);
    }
    header.record_fetch(FetchState::HeaderOnly);
    node.metadata_mut().merge(header);
    Ok(node)
}

/// Fill in the remaining metadata through whichever connector currently
/// services the node.
pub fn refresh_details(node: &mut RepositoryNode) -> Result<(), NodeError> {
    let details = node.connector()?.fetch_metadata(node.id())?;
    node.metadata_mut().merge(details);
    Ok(())
}
