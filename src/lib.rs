//! Graph RDF
//!
//! An RDF triple store view over a property graph: nodes addressed by
//! `(type, key)` with primitive attributes, connected by typed directed
//! relationships.
//!
//! # Architecture
//!
//! - `graph`: the property graph contract ([`GraphBackend`]) and an
//!   in-memory implementation ([`GraphStore`]) that maintains the reference
//!   index used for full scans
//! - `rdf`: RDF terms, namespace registry, URI ↔ node mapping, the
//!   [`TripleStore`] pattern dispatcher and Turtle / N-Triples I/O
//! - `config`: adapter configuration ([`AdapterConfig`])
//!
//! # Mapping
//!
//! - Subject/object URI → node: namespace → node type, local name → key
//! - Predicate URI → attribute key or relationship type, verbatim
//! - Literal object → attribute on the subject node
//! - URI object → relationship from subject to object
//!
//! ## Example Usage
//!
//! ```rust
//! use graph_rdf::{TripleStore, Triple, TriplePattern, NamedNode, RdfPredicate};
//!
//! let mut store = TripleStore::in_memory();
//!
//! let alice = NamedNode::new("http://example.org/people#alice").unwrap();
//! let bob = NamedNode::new("http://example.org/people#bob").unwrap();
//! let knows = RdfPredicate::new("http://xmlns.com/foaf/0.1/knows").unwrap();
//!
//! store.add(&Triple::new(alice.clone().into(), knows.clone(), bob.clone().into())).unwrap();
//!
//! // Who knows bob?
//! let pattern = TriplePattern::new(None, Some(knows), Some(bob.into()));
//! let subjects: Vec<_> = store
//!     .triples(&pattern)
//!     .unwrap()
//!     .map(|t| t.unwrap().subject)
//!     .collect();
//! assert_eq!(subjects, vec![alice.into()]);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod rdf;

// Re-export main types for convenience
pub use config::{AdapterConfig, ConfigError, ConfigResult};

pub use graph::{
    EdgeId, EdgeType, GraphBackend, GraphError, GraphResult, GraphStore, Label, Node, NodeId,
    NodeRef, PropertyMap, PropertyValue, Relationship, Relationships,
};

pub use rdf::{
    TripleStore, TripleStoreError, TripleStoreResult, TripleIterator,
    NamedNode, BlankNode, Literal, Triple, TriplePattern,
    RdfTerm, RdfSubject, RdfPredicate, RdfObject,
    NamespaceRegistry, Namespace,
    RdfFormat, RdfParser, RdfSerializer,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
