//! Graph storage contract consumed by the RDF layer
//!
//! Any store that can look nodes up by `(type, key)`, hold primitive
//! attributes, keep typed directed relationships and enumerate every node
//! through the reference index can back a [`TripleStore`](crate::rdf::TripleStore).

use super::edge::Relationships;
use super::property::{PropertyMap, PropertyValue};
use super::store::GraphResult;
use super::types::{EdgeId, EdgeType, Label, NodeRef};

/// Node type of the root and per-type category nodes of the reference index
pub const REFERENCE_TYPE: &str = "reference";

/// Key of the single root reference node
pub const REFERENCE_ROOT_KEY: &str = "reference";

/// Relationship type linking root → category and category → instance
pub const INSTANCE_EDGE: &str = "instance";

/// Storage operations the triple view needs from a property graph
///
/// The reference index is structural: [`reference_node`](Self::reference_node)
/// returns a root whose outgoing [`INSTANCE_EDGE`] relationships target one
/// category node per node type (keyed by the type name), and each category
/// node's outgoing [`INSTANCE_EDGE`] relationships target every node of that
/// type.
pub trait GraphBackend {
    /// Look a node up by type and key; fails with a not-found error if absent
    fn get_node(&self, node_type: &Label, key: &str) -> GraphResult<NodeRef>;

    /// Create a node and register it in the reference index; the
    /// [`REFERENCE_TYPE`] type is refused
    fn create_node(&mut self, node_type: &Label, key: &str) -> GraphResult<NodeRef>;

    /// Create a directed relationship; duplicates are allowed
    fn create_relationship(
        &mut self,
        rel_type: &EdgeType,
        source: &NodeRef,
        target: &NodeRef,
    ) -> GraphResult<EdgeId>;

    fn delete_relationship(&mut self, id: EdgeId) -> GraphResult<()>;

    /// Root of the reference index
    fn reference_node(&self) -> GraphResult<NodeRef>;

    /// Snapshot of every attribute on a node
    fn attributes(&self, node: &NodeRef) -> GraphResult<PropertyMap>;

    fn attribute(&self, node: &NodeRef, key: &str) -> GraphResult<Option<PropertyValue>> {
        Ok(self.attributes(node)?.get(key).cloned())
    }

    /// Set an attribute, returning the previous value
    fn set_attribute(
        &mut self,
        node: &NodeRef,
        key: &str,
        value: PropertyValue,
    ) -> GraphResult<Option<PropertyValue>>;

    fn remove_attribute(&mut self, node: &NodeRef, key: &str) -> GraphResult<Option<PropertyValue>>;

    /// Persist pending attribute mutations on a node
    fn commit(&mut self, node: &NodeRef) -> GraphResult<()>;

    /// All relationships touching a node, of every type
    fn relationships(&self, node: &NodeRef) -> GraphResult<Relationships>;

    /// Relationships of one type touching a node
    fn relationships_of_type(&self, node: &NodeRef, rel_type: &EdgeType) -> GraphResult<Relationships>;
}
