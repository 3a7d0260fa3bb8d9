//! Triple store view over a property graph
//!
//! Literal objects live as node attributes keyed by the predicate; URI
//! objects live as relationships typed by the predicate. Queries pick one of
//! eight strategies from the bound positions of the pattern and fall back to
//! enumerating every node through the reference index when nothing bound can
//! be looked up directly.

use crate::config::AdapterConfig;
use crate::graph::{
    EdgeId, EdgeType, GraphBackend, GraphError, GraphStore, NodeRef, PropertyValue, Relationship,
    INSTANCE_EDGE, REFERENCE_TYPE,
};
use super::mapping::{literal_to_value, value_to_literal, MappingError, UriMapper};
use super::namespace::Namespace;
use super::serialization::{ParseError, RdfFormat, RdfParser, RdfSerializer, SerializeError};
use super::types::{Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfSubject, RdfTerm, Triple, TriplePattern};
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Attribute keys with this prefix are internal to the graph
const RESERVED_PREFIX: &str = "__";

/// Triple store errors
#[derive(Error, Debug)]
pub enum TripleStoreError {
    /// Graph backend error
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// URI ↔ node translation error
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Term in the wrong triple position
    #[error("Term error: {0}")]
    Term(#[from] RdfError),

    /// Term kind with no graph counterpart
    #[error("Unsupported term: {0}")]
    UnsupportedTerm(String),

    /// Write addressed at a node of the reference index
    #[error("Node {0} belongs to the reference index")]
    ReservedNode(String),

    /// Input could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Output could not be serialized
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

pub type TripleStoreResult<T> = Result<T, TripleStoreError>;

/// Lazy, finite stream of matching triples
///
/// Each triple is translated when it is pulled. Re-running the query is the
/// only way to start over.
pub struct TripleIterator<'a> {
    inner: Box<dyn Iterator<Item = TripleStoreResult<Triple>> + 'a>,
}

impl<'a> TripleIterator<'a> {
    fn new(inner: impl Iterator<Item = TripleStoreResult<Triple>> + 'a) -> Self {
        Self { inner: Box::new(inner) }
    }

    /// A stream with nothing in it
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl<'a> Iterator for TripleIterator<'a> {
    type Item = TripleStoreResult<Triple>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A bound object position
#[derive(Clone, Copy)]
enum BoundObject<'p> {
    Literal(&'p Literal),
    Node(&'p NamedNode),
}

fn is_reserved(key: &str) -> bool {
    key.starts_with(RESERVED_PREFIX)
}

/// Flatten per-node batches, surfacing a failed batch as a single error
fn flatten(batch: TripleStoreResult<Vec<Triple>>) -> Vec<TripleStoreResult<Triple>> {
    match batch {
        Ok(triples) => triples.into_iter().map(Ok).collect(),
        Err(e) => vec![Err(e)],
    }
}

/// RDF triple store backed by a property graph
pub struct TripleStore<B: GraphBackend = GraphStore> {
    backend: B,
    mapper: UriMapper,
    ignored_types: FxHashSet<String>,
}

impl TripleStore<GraphStore> {
    /// Triple store over a fresh in-memory graph
    pub fn in_memory() -> Self {
        Self::new(GraphStore::new())
    }
}

impl Default for TripleStore<GraphStore> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<B: GraphBackend> TripleStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, AdapterConfig::default())
    }

    pub fn with_config(backend: B, config: AdapterConfig) -> Self {
        info!(
            "Creating triple store (node base {}, relationship base {}, ignoring {:?})",
            config.node_namespace_base, config.relationship_namespace_base, config.ignored_types
        );
        Self {
            backend,
            mapper: UriMapper::new(config.node_namespace_base, config.relationship_namespace_base),
            ignored_types: config.ignored_types.into_iter().collect(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn mapper(&self) -> &UriMapper {
        &self.mapper
    }

    // ---- ignored types ----

    pub fn ignore_reference_nodes(&self) -> bool {
        self.is_ignored(REFERENCE_TYPE)
    }

    pub fn set_ignore_reference_nodes(&mut self, ignore: bool) {
        if ignore {
            self.ignore(REFERENCE_TYPE);
        } else {
            self.unignore(REFERENCE_TYPE);
        }
    }

    /// Hide every node of a type from queries
    pub fn ignore(&mut self, node_type: impl Into<String>) {
        self.ignored_types.insert(node_type.into());
    }

    /// Make a type visible again; returns whether it was ignored
    pub fn unignore(&mut self, node_type: &str) -> bool {
        self.ignored_types.remove(node_type)
    }

    pub fn is_ignored(&self, node_type: &str) -> bool {
        self.ignored_types.contains(node_type)
    }

    /// Ignored types, sorted
    pub fn ignored_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.ignored_types.iter().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    // ---- namespaces ----

    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.mapper.bind(prefix, namespace);
    }

    pub fn namespace(&self, prefix: &str) -> Option<String> {
        self.mapper.namespace(prefix)
    }

    pub fn prefix(&self, namespace: &str) -> Option<String> {
        self.mapper.prefix(namespace)
    }

    pub fn namespaces(&self) -> Vec<Namespace> {
        self.mapper.namespaces()
    }

    // ---- node resolution ----

    /// Existing node for a URI
    pub fn node(&self, uri: &NamedNode) -> TripleStoreResult<NodeRef> {
        let def = self.mapper.uri_to_node_def(uri)?;
        debug!("Looking up node: {} => {}", def.node_type, def.key);
        Ok(self.backend.get_node(&def.node_type, &def.key)?)
    }

    /// Node for a URI, created on a miss when `create` is set.
    ///
    /// Creating lookups refuse reference index nodes.
    pub fn uri_to_node(&mut self, uri: &NamedNode, create: bool) -> TripleStoreResult<NodeRef> {
        let def = self.mapper.uri_to_node_def(uri)?;
        debug!("Looking up node: {} => {}", def.node_type, def.key);
        if create && def.node_type.as_str() == REFERENCE_TYPE {
            return Err(TripleStoreError::ReservedNode(uri.to_string()));
        }
        match self.backend.get_node(&def.node_type, &def.key) {
            Ok(node) => Ok(node),
            Err(e) if create && e.is_not_found() => {
                let node = self.backend.create_node(&def.node_type, &def.key)?;
                debug!("Created node: {}", node);
                Ok(node)
            }
            Err(e) => Err(e.into()),
        }
    }

    // ---- mutation ----

    /// Store a triple.
    ///
    /// A literal object overwrites the subject's attribute for the predicate;
    /// a URI object adds a relationship, even if an identical one exists.
    pub fn add(&mut self, triple: &Triple) -> TripleStoreResult<()> {
        let subject = match &triple.subject {
            RdfSubject::NamedNode(n) => n,
            RdfSubject::BlankNode(b) => return Err(TripleStoreError::UnsupportedTerm(format!("blank node {}", b))),
        };
        if let RdfObject::BlankNode(b) = &triple.object {
            return Err(TripleStoreError::UnsupportedTerm(format!("blank node {}", b)));
        }

        let rel_type = self.mapper.uri_to_rel_type(&triple.predicate);
        let s_node = self.uri_to_node(subject, true)?;

        match &triple.object {
            RdfObject::Literal(literal) => {
                debug!("Setting {} on {}", rel_type, s_node);
                self.backend.set_attribute(&s_node, rel_type.as_str(), literal_to_value(literal))?;
            }
            RdfObject::NamedNode(object) => {
                let o_node = self.uri_to_node(object, true)?;
                debug!("Creating relationship of type {} from {} to {}", rel_type, s_node, o_node);
                self.backend.create_relationship(&rel_type, &s_node, &o_node)?;
            }
            RdfObject::BlankNode(_) => {}
        }
        Ok(())
    }

    /// Store a triple given as untyped terms
    pub fn add_terms(&mut self, subject: RdfTerm, predicate: RdfTerm, object: RdfTerm) -> TripleStoreResult<()> {
        let triple = Triple::try_from_terms(subject, predicate, object)?;
        self.add(&triple)
    }

    /// Delete every triple matching a pattern; returns how many graph
    /// entries (attributes plus relationships) were deleted.
    ///
    /// A literal is only deleted if the attribute still holds the matched
    /// value when its turn comes. A bound subject must exist.
    pub fn remove(&mut self, pattern: &TriplePattern) -> TripleStoreResult<usize> {
        if let Some(RdfSubject::NamedNode(subject)) = &pattern.subject {
            self.uri_to_node(subject, false)?;
        }
        let matches = self.triples(pattern)?.collect::<TripleStoreResult<Vec<_>>>()?;
        let mut removed = 0;

        for triple in matches {
            debug!("Removing {}", triple);
            let subject = match &triple.subject {
                RdfSubject::NamedNode(n) => n,
                RdfSubject::BlankNode(_) => continue,
            };
            let s_node = self.uri_to_node(subject, false)?;
            let rel_types = self.mapper.rel_types_for(&triple.predicate);

            match &triple.object {
                RdfObject::Literal(literal) => {
                    let expected = literal_to_value(literal);
                    for rel_type in rel_types.iter().filter(|t| !is_reserved(t.as_str())) {
                        let current = self.backend.attribute(&s_node, rel_type.as_str())?;
                        if current.as_ref() == Some(&expected) {
                            debug!("Deleting {} from {}", rel_type, s_node);
                            self.backend.remove_attribute(&s_node, rel_type.as_str())?;
                            self.backend.commit(&s_node)?;
                            removed += 1;
                        }
                    }
                }
                RdfObject::NamedNode(object) => {
                    let def = self.mapper.uri_to_node_def(object)?;
                    if self.is_ignored(def.node_type.as_str()) {
                        continue;
                    }
                    let mut doomed: Vec<EdgeId> = Vec::new();
                    for rel_type in &rel_types {
                        doomed.extend(
                            self.backend
                                .relationships_of_type(&s_node, rel_type)?
                                .with_target(&def.key)
                                .filter(|rel| rel.target.node_type == def.node_type)
                                .map(|rel| rel.id),
                        );
                    }
                    for id in doomed {
                        self.backend.delete_relationship(id)?;
                        debug!("Deleted relationship {}", id);
                        removed += 1;
                    }
                }
                RdfObject::BlankNode(_) => {}
            }
        }

        Ok(removed)
    }

    // ---- queries ----

    /// Number of visible triples
    pub fn len(&self) -> TripleStoreResult<usize> {
        self.triples(&TriplePattern::any())?
            .try_fold(0, |count, triple| triple.map(|_| count + 1))
    }

    pub fn is_empty(&self) -> TripleStoreResult<bool> {
        Ok(self.triples(&TriplePattern::any())?.next().transpose()?.is_none())
    }

    /// Triples matching a pattern.
    ///
    /// A bound subject or object that names no existing node yields an empty
    /// stream, as does a bound blank node.
    pub fn triples(&self, pattern: &TriplePattern) -> TripleStoreResult<TripleIterator<'_>> {
        debug!("Looking for triple {}", pattern);

        let subject = match &pattern.subject {
            None => None,
            Some(RdfSubject::NamedNode(n)) => Some(n),
            Some(RdfSubject::BlankNode(_)) => return Ok(TripleIterator::empty()),
        };
        let predicate = pattern.predicate.as_ref();
        let object = match &pattern.object {
            None => None,
            Some(RdfObject::Literal(l)) => Some(BoundObject::Literal(l)),
            Some(RdfObject::NamedNode(n)) => Some(BoundObject::Node(n)),
            Some(RdfObject::BlankNode(_)) => return Ok(TripleIterator::empty()),
        };

        let result = match (subject, predicate, object) {
            (Some(s), Some(p), Some(o)) => self.triples_by_spo(s, p, o),
            (Some(s), Some(p), None) => self.triples_by_sp(s, p),
            (None, Some(p), Some(o)) => self.triples_by_po(p, o),
            (None, Some(p), None) => self.triples_by_p(p),
            (Some(s), None, Some(o)) => self.triples_by_so(s, o),
            (Some(s), None, None) => self.triples_by_s(s),
            (None, None, Some(o)) => self.triples_by_o(o),
            (None, None, None) => self.all_triples(),
        };

        match result {
            Err(TripleStoreError::Graph(e)) if e.is_not_found() => {
                debug!("Failed to find any triples: {}", e);
                Ok(TripleIterator::empty())
            }
            other => other,
        }
    }

    /// Triples matching a pattern given as untyped terms; a literal subject
    /// or a non-IRI predicate matches nothing
    pub fn triples_for_terms(
        &self,
        subject: Option<RdfTerm>,
        predicate: Option<RdfTerm>,
        object: Option<RdfTerm>,
    ) -> TripleStoreResult<TripleIterator<'_>> {
        match TriplePattern::from_terms(subject, predicate, object) {
            Some(pattern) => self.triples(&pattern),
            None => Ok(TripleIterator::empty()),
        }
    }

    /// Parse a document and add every triple; returns the triple count
    pub fn load(&mut self, input: &str, format: RdfFormat) -> TripleStoreResult<usize> {
        let triples = RdfParser::parse(input, format)?;
        for triple in &triples {
            self.add(triple)?;
        }
        info!("Loaded {} triples", triples.len());
        Ok(triples.len())
    }

    /// Serialize the matches of a pattern
    pub fn dump(&self, pattern: &TriplePattern, format: RdfFormat) -> TripleStoreResult<String> {
        let triples = self.triples(pattern)?.collect::<TripleStoreResult<Vec<_>>>()?;
        Ok(RdfSerializer::serialize(&triples, format)?)
    }

    fn triples_by_spo(
        &self,
        subject: &NamedNode,
        predicate: &RdfPredicate,
        object: BoundObject<'_>,
    ) -> TripleStoreResult<TripleIterator<'_>> {
        debug!("Finding triple by spo");
        let rel_types = self.mapper.rel_types_for(predicate);
        let s_node = self.node(subject)?;
        if self.is_ignored(s_node.node_type.as_str()) {
            return Ok(TripleIterator::empty());
        }

        let mut found = false;
        let object = match object {
            BoundObject::Literal(literal) => {
                let value = literal_to_value(literal);
                for rel_type in rel_types.iter().filter(|t| !is_reserved(t.as_str())) {
                    if self.backend.attribute(&s_node, rel_type.as_str())?.as_ref() == Some(&value) {
                        found = true;
                        break;
                    }
                }
                RdfObject::Literal(literal.clone())
            }
            BoundObject::Node(object) => {
                let def = self.mapper.uri_to_node_def(object)?;
                if self.is_ignored(def.node_type.as_str()) {
                    return Ok(TripleIterator::empty());
                }
                for rel_type in &rel_types {
                    if self
                        .backend
                        .relationships_of_type(&s_node, rel_type)?
                        .with_target(&def.key)
                        .any(|rel| rel.target.node_type == def.node_type)
                    {
                        found = true;
                        break;
                    }
                }
                RdfObject::NamedNode(object.clone())
            }
        };

        if !found {
            return Ok(TripleIterator::empty());
        }
        let triple = Triple::new(subject.clone().into(), predicate.clone(), object);
        debug!("Found {}", triple);
        Ok(TripleIterator::new(std::iter::once(Ok(triple))))
    }

    fn triples_by_sp(&self, subject: &NamedNode, predicate: &RdfPredicate) -> TripleStoreResult<TripleIterator<'_>> {
        debug!("Finding triple by sp");
        let s_node = self.node(subject)?;
        if self.is_ignored(s_node.node_type.as_str()) {
            return Ok(TripleIterator::empty());
        }

        let mut outgoing = Vec::new();
        let mut attributes = Vec::new();
        for rel_type in self.mapper.rel_types_for(predicate) {
            outgoing.extend(self.backend.relationships_of_type(&s_node, &rel_type)?.into_outgoing());
            let key = rel_type.as_str();
            if !is_reserved(key) {
                if let Some(value) = self.backend.attribute(&s_node, key)? {
                    attributes.push((key.to_string(), value));
                }
            }
        }

        let relationships = outgoing
            .into_iter()
            .filter(move |rel| !self.is_ignored(rel.target.node_type.as_str()))
            .map(move |rel| self.relationship_triple(&rel));
        let literals = attributes
            .into_iter()
            .map(move |(key, value)| self.attribute_triple(&s_node, &key, &value));

        Ok(TripleIterator::new(relationships.chain(literals)))
    }

    fn triples_by_po(&self, predicate: &RdfPredicate, object: BoundObject<'_>) -> TripleStoreResult<TripleIterator<'_>> {
        debug!("Finding triple by po");
        let rel_types = self.mapper.rel_types_for(predicate);

        match object {
            BoundObject::Literal(literal) => {
                warn!(strategy = "po", "Query requires full graph traversal");
                let keys: Vec<String> = rel_types
                    .iter()
                    .map(|t| t.as_str().to_string())
                    .filter(|key| !is_reserved(key))
                    .collect();
                if keys.is_empty() {
                    return Ok(TripleIterator::empty());
                }
                let value = literal_to_value(literal);
                self.scan(move |node| {
                    let mut triples = Vec::new();
                    for key in &keys {
                        if let Some(found) = self.backend.attribute(node, key)? {
                            if found == value {
                                triples.push(self.attribute_triple(node, key, &found)?);
                            }
                        }
                    }
                    Ok(triples)
                })
            }
            BoundObject::Node(object) => {
                let o_node = self.node(object)?;
                if self.is_ignored(o_node.node_type.as_str()) {
                    return Ok(TripleIterator::empty());
                }
                let mut incoming = Vec::new();
                for rel_type in &rel_types {
                    incoming.extend(self.backend.relationships_of_type(&o_node, rel_type)?.into_incoming());
                }
                Ok(TripleIterator::new(
                    incoming
                        .into_iter()
                        .filter(move |rel| !self.is_ignored(rel.source.node_type.as_str()))
                        .map(move |rel| self.relationship_triple(&rel)),
                ))
            }
        }
    }

    fn triples_by_so(&self, subject: &NamedNode, object: BoundObject<'_>) -> TripleStoreResult<TripleIterator<'_>> {
        debug!("Finding triple by so");
        let s_node = self.node(subject)?;
        if self.is_ignored(s_node.node_type.as_str()) {
            return Ok(TripleIterator::empty());
        }

        match object {
            BoundObject::Literal(literal) => {
                let value = literal_to_value(literal);
                let attributes = self.backend.attributes(&s_node)?;
                Ok(TripleIterator::new(
                    attributes
                        .into_iter()
                        .filter(move |(key, found)| !is_reserved(key) && *found == value)
                        .map(move |(key, found)| self.attribute_triple(&s_node, &key, &found)),
                ))
            }
            BoundObject::Node(object) => {
                let o_node = self.node(object)?;
                if self.is_ignored(o_node.node_type.as_str()) {
                    return Ok(TripleIterator::empty());
                }
                let outgoing = self.backend.relationships(&s_node)?.into_outgoing();
                Ok(TripleIterator::new(
                    outgoing
                        .into_iter()
                        .filter(move |rel| rel.target.id == o_node.id)
                        .map(move |rel| self.relationship_triple(&rel)),
                ))
            }
        }
    }

    fn triples_by_s(&self, subject: &NamedNode) -> TripleStoreResult<TripleIterator<'_>> {
        debug!("Finding triple by s");
        let s_node = self.node(subject)?;
        if self.is_ignored(s_node.node_type.as_str()) {
            return Ok(TripleIterator::empty());
        }
        let outgoing = self.backend.relationships(&s_node)?.into_outgoing();
        let attributes = self.backend.attributes(&s_node)?;

        let relationships = outgoing
            .into_iter()
            .filter(move |rel| !self.is_ignored(rel.target.node_type.as_str()))
            .map(move |rel| self.relationship_triple(&rel));
        let literals = attributes
            .into_iter()
            .filter(|(key, _)| !is_reserved(key))
            .map(move |(key, value)| self.attribute_triple(&s_node, &key, &value));

        Ok(TripleIterator::new(relationships.chain(literals)))
    }

    fn triples_by_p(&self, predicate: &RdfPredicate) -> TripleStoreResult<TripleIterator<'_>> {
        debug!("Finding triple by p");
        warn!(strategy = "p", "Query requires full graph traversal");
        let rel_types = self.mapper.rel_types_for(predicate);

        self.scan(move |node| {
            let mut triples = Vec::new();
            for rel_type in &rel_types {
                for rel in self.backend.relationships_of_type(node, rel_type)?.outgoing() {
                    if self.is_ignored(rel.target.node_type.as_str()) {
                        continue;
                    }
                    triples.push(self.relationship_triple(rel)?);
                }
            }
            for rel_type in &rel_types {
                let key = rel_type.as_str();
                if !is_reserved(key) {
                    if let Some(value) = self.backend.attribute(node, key)? {
                        triples.push(self.attribute_triple(node, key, &value)?);
                    }
                }
            }
            Ok(triples)
        })
    }

    fn triples_by_o(&self, object: BoundObject<'_>) -> TripleStoreResult<TripleIterator<'_>> {
        debug!("Finding triple by o");
        match object {
            BoundObject::Literal(literal) => {
                warn!(strategy = "o", "Query requires full graph traversal");
                let value = literal_to_value(literal);
                self.scan(move |node| {
                    let mut triples = Vec::new();
                    for (key, found) in self.backend.attributes(node)? {
                        if !is_reserved(&key) && found == value {
                            triples.push(self.attribute_triple(node, &key, &found)?);
                        }
                    }
                    Ok(triples)
                })
            }
            BoundObject::Node(object) => {
                let o_node = self.node(object)?;
                if self.is_ignored(o_node.node_type.as_str()) {
                    return Ok(TripleIterator::empty());
                }
                let incoming = self.backend.relationships(&o_node)?.into_incoming();
                Ok(TripleIterator::new(
                    incoming
                        .into_iter()
                        .filter(move |rel| !self.is_ignored(rel.source.node_type.as_str()))
                        .map(move |rel| self.relationship_triple(&rel)),
                ))
            }
        }
    }

    fn all_triples(&self) -> TripleStoreResult<TripleIterator<'_>> {
        debug!("Finding all triples");
        warn!(strategy = "all", "Query requires full graph traversal");
        self.scan(move |node| self.node_triples(node))
    }

    /// Every outgoing relationship and visible attribute of one node
    fn node_triples(&self, node: &NodeRef) -> TripleStoreResult<Vec<Triple>> {
        let mut triples = Vec::new();
        for rel in self.backend.relationships(node)?.outgoing() {
            if self.is_ignored(rel.target.node_type.as_str()) {
                continue;
            }
            triples.push(self.relationship_triple(rel)?);
        }
        for (key, value) in self.backend.attributes(node)? {
            if is_reserved(&key) {
                continue;
            }
            triples.push(self.attribute_triple(node, &key, &value)?);
        }
        Ok(triples)
    }

    /// Run `per_node` over every visible node, lazily
    fn scan<'a, F>(&'a self, mut per_node: F) -> TripleStoreResult<TripleIterator<'a>>
    where
        F: FnMut(&NodeRef) -> TripleStoreResult<Vec<Triple>> + 'a,
    {
        let nodes = self.all_nodes()?;
        Ok(TripleIterator::new(
            nodes.flat_map(move |node| flatten(node.and_then(|node| per_node(&node)))),
        ))
    }

    /// Walk the reference index: root → category per type → instances
    fn all_nodes(&self) -> TripleStoreResult<impl Iterator<Item = TripleStoreResult<NodeRef>> + '_> {
        let instance = EdgeType::new(INSTANCE_EDGE);
        let root = self.backend.reference_node()?;
        let categories = self.backend.relationships_of_type(&root, &instance)?.into_outgoing();

        Ok(categories
            .into_iter()
            .filter(move |category| !self.is_ignored(&category.target.key))
            .flat_map(move |category| {
                match self.backend.relationships_of_type(&category.target, &instance) {
                    Ok(instances) => instances
                        .into_outgoing()
                        .into_iter()
                        .map(|rel| rel.target)
                        .filter(|node| !self.is_ignored(node.node_type.as_str()))
                        .map(Ok)
                        .collect::<Vec<TripleStoreResult<NodeRef>>>(),
                    Err(e) => vec![Err(TripleStoreError::from(e))],
                }
            }))
    }

    fn relationship_triple(&self, rel: &Relationship) -> TripleStoreResult<Triple> {
        let subject = self.mapper.node_to_uri(&rel.source)?;
        let predicate = self.mapper.rel_type_to_uri(&rel.rel_type)?;
        let object = self.mapper.node_to_uri(&rel.target)?;
        let triple = Triple::new(subject.into(), predicate, object.into());
        debug!("Found {}", triple);
        Ok(triple)
    }

    fn attribute_triple(&self, node: &NodeRef, key: &str, value: &PropertyValue) -> TripleStoreResult<Triple> {
        let subject = self.mapper.node_to_uri(node)?;
        let predicate = self.mapper.rel_type_to_uri(&EdgeType::new(key))?;
        let triple = Triple::new(subject.into(), predicate, value_to_literal(value).into());
        debug!("Found {}", triple);
        Ok(triple)
    }
}
