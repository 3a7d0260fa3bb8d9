//! RDF view of the property graph
//!
//! This module exposes a [`GraphBackend`](crate::graph::GraphBackend) as an
//! RDF triple store:
//! - RDF terms and triple patterns (wrappers over `oxrdf`)
//! - Namespace registry (prefix ↔ namespace)
//! - URI ↔ node translation and literal ↔ attribute conversion
//! - Triple pattern queries (eight lookup strategies with full-scan fallback)
//! - Turtle / N-Triples parsing and serialization
//!
//! # Example
//!
//! ```rust
//! use graph_rdf::rdf::{TripleStore, Triple, TriplePattern, NamedNode, Literal, RdfPredicate};
//!
//! let mut store = TripleStore::in_memory();
//!
//! let alice = NamedNode::new("http://example.org/people#alice").unwrap();
//! let name = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let triple = Triple::new(alice.clone().into(), name.clone(), Literal::new_simple_literal("Alice").into());
//! store.add(&triple).unwrap();
//!
//! let pattern = TriplePattern::new(Some(alice.into()), Some(name), None);
//! let results: Vec<_> = store.triples(&pattern).unwrap().collect::<Result<_, _>>().unwrap();
//! assert_eq!(results, vec![triple]);
//! ```

mod types;
mod store;
mod mapping;
mod namespace;
mod serialization;

pub use types::{
    RdfError, RdfResult,
    RdfTerm, RdfSubject, RdfPredicate, RdfObject,
    NamedNode, BlankNode, Literal, Triple, TriplePattern,
};

pub use store::{
    TripleStore, TripleStoreError, TripleStoreResult,
    TripleIterator,
};

pub use mapping::{
    UriMapper, NodeDef, MappingError, MappingResult,
    split_uri, is_absolute_iri, literal_to_value, value_to_literal,
};

pub use namespace::{
    Namespace, NamespaceRegistry, PrefixError, PrefixResult,
};

pub use serialization::{
    RdfFormat, RdfParser, RdfSerializer,
    ParseError, ParseResult, SerializeError, SerializeResult,
};
