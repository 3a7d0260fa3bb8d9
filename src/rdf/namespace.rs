//! Namespace registry
//!
//! Bidirectional prefix ↔ namespace bindings. The triple store uses the
//! prefix as the node type for every URI in the bound namespace.

use std::collections::HashMap;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug, PartialEq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Prefix ↔ namespace bindings
///
/// Re-binding a prefix (or a namespace) overwrites the earlier binding in
/// that direction; the last writer wins.
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegistry {
    /// Prefix → IRI mappings
    namespaces: HashMap<String, String>,
    /// IRI → prefix mappings
    prefixes: HashMap<String, String>,
}

impl NamespaceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the common RDF/RDFS/OWL prefixes bound
    pub fn with_common_prefixes() -> Self {
        let mut registry = Self::new();

        registry.bind("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        registry.bind("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
        registry.bind("xsd", "http://www.w3.org/2001/XMLSchema#");
        registry.bind("owl", "http://www.w3.org/2002/07/owl#");
        registry.bind("foaf", "http://xmlns.com/foaf/0.1/");
        registry.bind("dc", "http://purl.org/dc/elements/1.1/");
        registry.bind("dcterms", "http://purl.org/dc/terms/");

        registry
    }

    /// Bind a prefix to a namespace
    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        let prefix = prefix.into();
        let namespace = namespace.into();
        self.prefixes.insert(namespace.clone(), prefix.clone());
        self.namespaces.insert(prefix, namespace);
    }

    /// Namespace bound to a prefix
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.namespaces.get(prefix).map(|s| s.as_str())
    }

    /// Prefix bound to a namespace
    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.prefixes.get(namespace).map(|s| s.as_str())
    }

    /// All bindings, in no particular order
    pub fn namespaces(&self) -> Vec<Namespace> {
        self.namespaces
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        if let Some(pos) = compact_iri.find(':') {
            let prefix = &compact_iri[..pos];
            let local = &compact_iri[pos + 1..];
            let iri = self
                .namespace(prefix)
                .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))?;
            Ok(format!("{}{}", iri, local))
        } else {
            Err(PrefixError::InvalidIri(compact_iri.to_string()))
        }
    }

    /// Compact an IRI using the longest matching bound namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.namespaces
            .iter()
            .filter(|(_, namespace_iri)| iri.starts_with(namespace_iri.as_str()))
            .max_by_key(|(_, namespace_iri)| namespace_iri.len())
            .map(|(prefix, namespace_iri)| format!("{}:{}", prefix, &iri[namespace_iri.len()..]))
    }
}
