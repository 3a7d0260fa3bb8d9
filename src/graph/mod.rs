//! Property graph collaborator
//!
//! This module implements the graph side of the triple view:
//! - Nodes identified by (type, key) with primitive attribute maps
//! - Typed directed relationships, duplicates allowed
//! - The reference index used to enumerate every node
//! - [`GraphBackend`], the contract the RDF layer consumes, and
//!   [`GraphStore`], its in-memory implementation

pub mod backend;
pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use backend::{GraphBackend, INSTANCE_EDGE, REFERENCE_ROOT_KEY, REFERENCE_TYPE};
pub use edge::{Edge, Relationship, Relationships};
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, EdgeType, Label, NodeId, NodeRef};
