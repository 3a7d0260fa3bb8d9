//! In-memory graph storage implementation
//!
//! Nodes and edges live in id-indexed arenas with adjacency lists on both
//! ends. A `(type, key)` index answers lookups, and the reference index
//! (root → category → instance edges) is maintained as real nodes and edges
//! so full scans can walk it like any other relationship.

use super::backend::{GraphBackend, INSTANCE_EDGE, REFERENCE_ROOT_KEY, REFERENCE_TYPE};
use super::edge::{Edge, Relationship, Relationships};
use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeType, Label, NodeId, NodeRef};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Node {node_type}:{key} not found")]
    NodeKeyNotFound { node_type: Label, key: String },

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Node {node_type}:{key} already exists")]
    NodeAlreadyExists { node_type: Label, key: String },

    #[error("Node type {0} is reserved for the reference index")]
    ReservedType(Label),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),
}

impl GraphError {
    /// Whether this error means the addressed node or edge is absent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GraphError::NodeNotFound(_) | GraphError::NodeKeyNotFound { .. } | GraphError::EdgeNotFound(_)
        )
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - nodes: NodeId -> Node
/// - edges: EdgeId -> Edge
/// - outgoing / incoming: NodeId -> Vec<EdgeId> (adjacency lists)
/// - key_index: (type, key) -> NodeId
#[derive(Debug)]
pub struct GraphStore {
    /// Node storage, slot per NodeId (None = never used or deleted)
    nodes: Vec<Option<Node>>,

    /// Edge storage, slot per EdgeId
    edges: Vec<Option<Edge>>,

    /// Outgoing edges for each node (adjacency list)
    outgoing: Vec<Vec<EdgeId>>,

    /// Incoming edges for each node (adjacency list)
    incoming: Vec<Vec<EdgeId>>,

    /// (type, key) lookup
    key_index: FxHashMap<(Label, String), NodeId>,

    /// Root of the reference index
    reference_root: NodeId,

    /// Next node ID
    next_node_id: u64,

    /// Next edge ID
    next_edge_id: u64,
}

impl GraphStore {
    /// Create a new graph store holding only the reference root
    pub fn new() -> Self {
        let mut store = GraphStore {
            nodes: Vec::with_capacity(1024),
            edges: Vec::with_capacity(4096),
            outgoing: Vec::with_capacity(1024),
            incoming: Vec::with_capacity(1024),
            key_index: FxHashMap::default(),
            reference_root: NodeId::new(0),
            next_node_id: 1,
            next_edge_id: 1,
        };
        store.reference_root = store.insert_node(Label::new(REFERENCE_TYPE), REFERENCE_ROOT_KEY.to_string());
        store
    }

    fn insert_node(&mut self, node_type: Label, key: String) -> NodeId {
        let node_id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        let idx = node_id.as_u64() as usize;

        // Ensure storage capacity
        if idx >= self.nodes.len() {
            self.nodes.resize(idx + 1, None);
            self.outgoing.resize(idx + 1, Vec::new());
            self.incoming.resize(idx + 1, Vec::new());
        }

        self.key_index.insert((node_type.clone(), key.clone()), node_id);
        self.nodes[idx] = Some(Node::new(node_id, node_type, key));
        node_id
    }

    fn insert_edge(&mut self, source: NodeId, target: NodeId, edge_type: EdgeType) -> GraphResult<EdgeId> {
        // Validate nodes exist
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }

        let edge_id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        let idx = edge_id.as_u64() as usize;

        if idx >= self.edges.len() {
            self.edges.resize(idx + 1, None);
        }

        // Update adjacency lists
        self.outgoing[source.as_u64() as usize].push(edge_id);
        self.incoming[target.as_u64() as usize].push(edge_id);

        self.edges[idx] = Some(Edge::new(edge_id, source, target, edge_type));
        Ok(edge_id)
    }

    /// Category node for a type, created and linked from the root on first use
    fn category_node(&mut self, node_type: &Label) -> GraphResult<NodeId> {
        let reference = Label::new(REFERENCE_TYPE);
        if let Some(id) = self.key_index.get(&(reference.clone(), node_type.as_str().to_string())) {
            return Ok(*id);
        }

        let category = self.insert_node(reference, node_type.as_str().to_string());
        self.insert_edge(self.reference_root, category, EdgeType::new(INSTANCE_EDGE))?;
        debug!("Created reference category for type {}", node_type);
        Ok(category)
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.as_u64() as usize).and_then(|slot| slot.as_ref())
    }

    /// Get a mutable node by ID
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.as_u64() as usize).and_then(|slot| slot.as_mut())
    }

    /// Get a node by type and key
    pub fn get_node_by_key(&self, node_type: &Label, key: &str) -> Option<&Node> {
        self.key_index
            .get(&(node_type.clone(), key.to_string()))
            .and_then(|id| self.get_node(*id))
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    /// Get an edge by ID
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_u64() as usize).and_then(|slot| slot.as_ref())
    }

    /// Outgoing edges of a node
    pub fn get_outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.outgoing
            .get(node_id.as_u64() as usize)
            .map(|ids| ids.iter().filter_map(|id| self.get_edge(*id)).collect())
            .unwrap_or_default()
    }

    /// Incoming edges of a node
    pub fn get_incoming_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.incoming
            .get(node_id.as_u64() as usize)
            .map(|ids| ids.iter().filter_map(|id| self.get_edge(*id)).collect())
            .unwrap_or_default()
    }

    /// Number of stored nodes, reference index nodes included
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of stored edges, reference index edges included
    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|slot| slot.is_some()).count()
    }

    fn node_ref(&self, id: NodeId) -> GraphResult<NodeRef> {
        self.get_node(id)
            .map(Node::to_ref)
            .ok_or(GraphError::NodeNotFound(id))
    }

    fn checked_node(&self, node: &NodeRef) -> GraphResult<&Node> {
        self.get_node(node.id).ok_or(GraphError::NodeNotFound(node.id))
    }

    fn checked_node_mut(&mut self, node: &NodeRef) -> GraphResult<&mut Node> {
        self.get_node_mut(node.id).ok_or(GraphError::NodeNotFound(node.id))
    }

    fn resolve(&self, edge: &Edge) -> GraphResult<Relationship> {
        Ok(Relationship {
            id: edge.id,
            rel_type: edge.edge_type.clone(),
            source: self.node_ref(edge.source)?,
            target: self.node_ref(edge.target)?,
        })
    }

    fn collect_relationships(
        &self,
        node: &NodeRef,
        rel_type: Option<&EdgeType>,
    ) -> GraphResult<Relationships> {
        self.checked_node(node)?;
        let keep = |edge: &&Edge| rel_type.map_or(true, |t| &edge.edge_type == t);

        let outgoing = self
            .get_outgoing_edges(node.id)
            .into_iter()
            .filter(keep)
            .map(|edge| self.resolve(edge))
            .collect::<GraphResult<Vec<_>>>()?;
        let incoming = self
            .get_incoming_edges(node.id)
            .into_iter()
            .filter(keep)
            .map(|edge| self.resolve(edge))
            .collect::<GraphResult<Vec<_>>>()?;

        Ok(Relationships::new(outgoing, incoming))
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBackend for GraphStore {
    fn get_node(&self, node_type: &Label, key: &str) -> GraphResult<NodeRef> {
        self.get_node_by_key(node_type, key)
            .map(Node::to_ref)
            .ok_or_else(|| GraphError::NodeKeyNotFound {
                node_type: node_type.clone(),
                key: key.to_string(),
            })
    }

    fn create_node(&mut self, node_type: &Label, key: &str) -> GraphResult<NodeRef> {
        // Reference nodes are only ever created by the index itself
        if node_type.as_str() == REFERENCE_TYPE {
            return Err(GraphError::ReservedType(node_type.clone()));
        }
        if self.key_index.contains_key(&(node_type.clone(), key.to_string())) {
            return Err(GraphError::NodeAlreadyExists {
                node_type: node_type.clone(),
                key: key.to_string(),
            });
        }

        let node_id = self.insert_node(node_type.clone(), key.to_string());
        let category = self.category_node(node_type)?;
        self.insert_edge(category, node_id, EdgeType::new(INSTANCE_EDGE))?;

        self.node_ref(node_id)
    }

    fn create_relationship(
        &mut self,
        rel_type: &EdgeType,
        source: &NodeRef,
        target: &NodeRef,
    ) -> GraphResult<EdgeId> {
        self.insert_edge(source.id, target.id, rel_type.clone())
    }

    fn delete_relationship(&mut self, id: EdgeId) -> GraphResult<()> {
        let edge = self
            .edges
            .get_mut(id.as_u64() as usize)
            .and_then(|slot| slot.take())
            .ok_or(GraphError::EdgeNotFound(id))?;

        if let Some(list) = self.outgoing.get_mut(edge.source.as_u64() as usize) {
            list.retain(|e| *e != id);
        }
        if let Some(list) = self.incoming.get_mut(edge.target.as_u64() as usize) {
            list.retain(|e| *e != id);
        }
        Ok(())
    }

    fn reference_node(&self) -> GraphResult<NodeRef> {
        self.node_ref(self.reference_root)
    }

    fn attributes(&self, node: &NodeRef) -> GraphResult<PropertyMap> {
        Ok(self.checked_node(node)?.properties.clone())
    }

    fn attribute(&self, node: &NodeRef, key: &str) -> GraphResult<Option<PropertyValue>> {
        Ok(self.checked_node(node)?.get_property(key).cloned())
    }

    fn set_attribute(
        &mut self,
        node: &NodeRef,
        key: &str,
        value: PropertyValue,
    ) -> GraphResult<Option<PropertyValue>> {
        Ok(self.checked_node_mut(node)?.set_property(key, value))
    }

    fn remove_attribute(&mut self, node: &NodeRef, key: &str) -> GraphResult<Option<PropertyValue>> {
        Ok(self.checked_node_mut(node)?.remove_property(key))
    }

    fn commit(&mut self, node: &NodeRef) -> GraphResult<()> {
        // Writes are applied on assignment; committing only stamps the node
        self.checked_node_mut(node)?.touch();
        Ok(())
    }

    fn relationships(&self, node: &NodeRef) -> GraphResult<Relationships> {
        self.collect_relationships(node, None)
    }

    fn relationships_of_type(&self, node: &NodeRef, rel_type: &EdgeType) -> GraphResult<Relationships> {
        self.collect_relationships(node, Some(rel_type))
    }
}
