//! # cycle-node
//!
//! Repository node model for pluggable content repositories.
//!
//! A [`RepositoryNode`] is a file or folder that lives in one of several
//! backends: a UUID-addressed remote store, a local filesystem, or a view
//! composed from others. Client code gets one identity and metadata contract
//! for every node, while each backend decides how nodes are addressed and
//! how eagerly they are loaded.
//!
//! ## Key components
//!
//! - [`RepositoryNode`] — identity (`id`, client URL), [`Metadata`], and two
//!   connector bindings: the *current* connector, which can be rebound, and
//!   the *original* connector, which is bound once.
//! - [`Metadata`] — insertion-ordered key/value data with a [`FetchState`]
//!   tracking lazy loading.
//! - [`RepositoryConnector`] — the trait every backend implements. Nodes hold
//!   it as an opaque [`ConnectorRef`].
//! - [`CycleConfig`] — TOML connector configuration.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use cycle_node::{NodeKind, RepositoryNode};
//!
//! let node = RepositoryNode::with_connector(NodeKind::Artifact, signavio.clone())
//!     .with_id("abc");
//!
//! // A filtering view takes over generic operations...
//! node.overwrite_connector(view.clone());
//! assert!(cycle_node::same_connector(&node.connector()?, &view));
//!
//! // ...while backend-specific actions still reach the original.
//! let native = node.original_connector();
//! ```

pub mod binding;
pub mod config;
pub mod connector;
pub mod error;
pub mod metadata;
pub mod node;

pub use binding::ConnectorBindings;
pub use config::{ConnectorConfig, CycleConfig};
pub use connector::{same_connector, ConnectorRef, RepositoryConnector};
pub use error::{ConnectorError, NodeError};
pub use metadata::{FetchState, Metadata, MetadataValue};
pub use node::{NodeKind, RepositoryNode};
