//! Node implementation for the property graph
//!
//! A node is identified by its type and a key unique within that type, and
//! holds a map of primitive attributes.

use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId, NodeRef};
use serde::{Deserialize, Serialize};

/// A node in the property graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Node type (category)
    pub node_type: Label,

    /// Key, unique within `node_type`
    pub key: String,

    /// Attributes associated with this node
    pub properties: PropertyMap,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Node {
    /// Create a new node without attributes
    pub fn new(id: NodeId, node_type: impl Into<Label>, key: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();

        Node {
            id,
            node_type: node_type.into(),
            key: key.into(),
            properties: PropertyMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Handle used to address this node through a backend
    pub fn to_ref(&self) -> NodeRef {
        NodeRef::new(self.id, self.node_type.clone(), self.key.clone())
    }

    /// Set a property value, returning the previous one
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        let old = self.properties.insert(key.into(), value.into());
        self.touch();
        old
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Remove a property
    pub fn remove_property(&mut self, key: &str) -> Option<PropertyValue> {
        let removed = self.properties.shift_remove(key);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_node() {
        let node = Node::new(NodeId::new(1), "person", "alice");
        assert_eq!(node.id, NodeId::new(1));
        assert_eq!(node.node_type, Label::new("person"));
        assert_eq!(node.key, "alice");
        assert_eq!(node.property_count(), 0);
        assert_eq!(node.created_at, node.updated_at);
    }

    #[test]
    fn test_node_properties() {
        let mut node = Node::new(NodeId::new(4), "person", "bob");

        node.set_property("name", "Bob");
        node.set_property("age", 30i64);
        node.set_property("active", true);

        assert_eq!(node.get_property("name"), Some(&PropertyValue::from("Bob")));
        assert_eq!(node.get_property("age"), Some(&PropertyValue::Integer(30)));
        assert_eq!(node.property_count(), 3);

        // Overwrite returns the old value
        let old = node.set_property("age", 31i64);
        assert_eq!(old, Some(PropertyValue::Integer(30)));

        let removed = node.remove_property("age");
        assert!(removed.is_some());
        assert_eq!(node.property_count(), 2);
        assert!(!node.has_property("age"));
        assert!(node.remove_property("age").is_none());
    }

    #[test]
    fn test_node_ref() {
        let node = Node::new(NodeId::new(9), "company", "acme");
        let handle = node.to_ref();
        assert_eq!(handle.id, NodeId::new(9));
        assert_eq!(handle.node_type.as_str(), "company");
        assert_eq!(handle.key, "acme");
    }

    #[test]
    fn test_node_equality() {
        let node1 = Node::new(NodeId::new(7), "person", "a");
        let node2 = Node::new(NodeId::new(7), "person", "b");
        let node3 = Node::new(NodeId::new(8), "person", "a");

        assert_eq!(node1, node2); // Same ID
        assert_ne!(node1, node3); // Different ID
    }
}
