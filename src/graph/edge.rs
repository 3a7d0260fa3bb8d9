//! Relationship implementation for the property graph
//!
//! [`Edge`] is the stored form (ids only). [`Relationship`] is the resolved
//! snapshot a backend hands out, with both endpoints as [`NodeRef`]s, and
//! [`Relationships`] groups them by direction for one node.

use super::types::{EdgeId, EdgeType, NodeId, NodeRef};
use serde::{Deserialize, Serialize};

/// A directed, typed edge between two nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Type of relationship
    pub edge_type: EdgeType,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        edge_type: impl Into<EdgeType>,
    ) -> Self {
        Edge {
            id,
            source,
            target,
            edge_type: edge_type.into(),
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A relationship with both endpoints resolved
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub id: EdgeId,
    pub rel_type: EdgeType,
    pub source: NodeRef,
    pub target: NodeRef,
}

/// Relationships touching one node, split by direction
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    outgoing: Vec<Relationship>,
    incoming: Vec<Relationship>,
}

impl Relationships {
    pub fn new(outgoing: Vec<Relationship>, incoming: Vec<Relationship>) -> Self {
        Self { outgoing, incoming }
    }

    /// Relationships whose source is the node
    pub fn outgoing(&self) -> &[Relationship] {
        &self.outgoing
    }

    /// Relationships whose target is the node
    pub fn incoming(&self) -> &[Relationship] {
        &self.incoming
    }

    pub fn into_outgoing(self) -> Vec<Relationship> {
        self.outgoing
    }

    pub fn into_incoming(self) -> Vec<Relationship> {
        self.incoming
    }

    /// Outgoing relationships whose target node has the given key.
    ///
    /// Keys are only unique within a node type, so callers that care must
    /// also check `target.node_type`.
    pub fn with_target<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.outgoing.iter().filter(move |rel| rel.target.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64, node_type: &str, key: &str) -> NodeRef {
        NodeRef::new(NodeId::new(id), node_type, key)
    }

    fn rel(id: u64, source: NodeRef, target: NodeRef) -> Relationship {
        Relationship {
            id: EdgeId::new(id),
            rel_type: EdgeType::new("knows"),
            source,
            target,
        }
    }

    #[test]
    fn test_edge_direction() {
        let edge = Edge::new(EdgeId::new(2), NodeId::new(10), NodeId::new(20), "follows");

        assert_eq!(edge.source, NodeId::new(10));
        assert_eq!(edge.target, NodeId::new(20));
        assert_eq!(edge.edge_type.as_str(), "follows");
    }

    #[test]
    fn test_multiple_edges_are_distinct() {
        let edge1 = Edge::new(EdgeId::new(1), NodeId::new(1), NodeId::new(2), "knows");
        let edge2 = Edge::new(EdgeId::new(2), NodeId::new(1), NodeId::new(2), "knows");
        assert_ne!(edge1, edge2);
    }

    #[test]
    fn test_with_target_matches_key_across_types() {
        let alice = node(1, "person", "alice");
        let bob_person = node(2, "person", "bob");
        let bob_robot = node(3, "robot", "bob");
        let carol = node(4, "person", "carol");

        let rels = Relationships::new(
            vec![
                rel(1, alice.clone(), bob_person),
                rel(2, alice.clone(), bob_robot),
                rel(3, alice.clone(), carol),
            ],
            vec![],
        );

        let targets: Vec<&str> = rels
            .with_target("bob")
            .map(|r| r.target.node_type.as_str())
            .collect();
        assert_eq!(targets, vec!["person", "robot"]);
        assert_eq!(rels.outgoing().len(), 3);
        assert!(rels.incoming().is_empty());
        assert!(!rels.is_empty());
    }
}
