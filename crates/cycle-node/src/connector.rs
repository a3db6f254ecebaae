// connector.rs — RepositoryConnector: the capability every backend provides.
//
// The node core never calls into a connector; it only stores and returns
// handles to one. Backends (remote stores, filesystems, composed views)
// implement this trait and hand out `ConnectorRef`s to the nodes they
// produce.

use std::fmt;
use std::sync::Arc;

use crate::config::ConnectorConfig;
use crate::error::ConnectorError;
use crate::metadata::Metadata;

/// A queryable backend for repository nodes.
///
/// Node ids are opaque to the core; each backend decides what they mean
/// (a UUID, a path relative to a configured root, ...).
pub trait RepositoryConnector: Send + Sync + 'static {
    /// The configuration this connector was created from.
    fn config(&self) -> &ConnectorConfig;

    /// Connector id used in logs and diagnostics.
    fn connector_id(&self) -> &str {
        &self.config().id
    }

    /// Fetch (or refresh) the metadata of a node.
    fn fetch_metadata(&self, node_id: &str) -> Result<Metadata, ConnectorError>;

    /// List the ids of a folder's children.
    fn list_children(&self, folder_id: &str) -> Result<Vec<String>, ConnectorError>;

    /// The client-facing URL for a node. By default derived from the
    /// configured `client_base_url`.
    fn client_url(&self, node_id: &str) -> Option<String> {
        self.config().client_url_for(node_id)
    }
}

impl fmt::Debug for dyn RepositoryConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config();
        f.debug_struct("RepositoryConnector")
            .field("id", &config.id)
            .field("kind", &config.kind)
            .finish()
    }
}

/// Process-local, shareable handle to a connector.
pub type ConnectorRef = Arc<dyn RepositoryConnector>;

/// Whether two handles point at the same connector instance.
///
/// Two connectors with equal configuration are still different connectors.
pub fn same_connector(a: &ConnectorRef, b: &ConnectorRef) -> bool {
    Arc::ptr_eq(a, b)
}
