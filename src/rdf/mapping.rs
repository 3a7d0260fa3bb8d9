//! Property graph ↔ RDF mapping
//!
//! Translates between URIs and graph addresses.
//!
//! # Mapping Strategy
//!
//! ## Nodes
//!
//! A subject/object URI splits into namespace + local name. The namespace's
//! bound prefix is the node type and the local name is the node key. Unbound
//! namespaces are *munged* into a type label: the node namespace base is
//! stripped, the trailing separator dropped and `/` replaced by `_`. The
//! reverse (*unmunging*) turns `_` back into `/`, appends `#` and re-adds the
//! base unless the result already carries a scheme. Either direction binds
//! the pair in the registry, so a namespace keeps its label for the life of
//! the mapper. Two namespaces that munge alike (`…/people#` and `…/people/`)
//! get distinct labels: the later one takes a numeric suffix.
//!
//! ## Predicates
//!
//! A predicate URI is the relationship type (and attribute key) verbatim.
//! Types that are not absolute IRIs are exposed under the relationship
//! namespace base, and that base is stripped again on the way in. A
//! predicate under the base therefore names two types, the stripped one and
//! the verbatim one; lookups consult both.
//!
//! ## Literals
//!
//! Literals are stored as primitive attribute values, converted by datatype,
//! whenever the primitive converts back to the same literal. Anything else
//! keeps its lexical form, datatype and language tag.

use crate::graph::{EdgeType, Label, NodeRef, PropertyValue};
use super::namespace::{Namespace, NamespaceRegistry};
use super::types::{Literal, NamedNode, RdfError, RdfPredicate};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use oxiri::Iri;
use oxrdf::vocab::xsd;
use std::cell::RefCell;
use thiserror::Error;
use tracing::debug;

/// Mapping errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    /// No namespace / local name split point
    #[error("Can't split URI into namespace and local name: {0}")]
    UnsplittableUri(String),

    /// A node or relationship that does not form a valid IRI
    #[error(transparent)]
    Rdf(#[from] RdfError),
}

pub type MappingResult<T> = Result<T, MappingError>;

/// Characters allowed in a local name besides letters and digits
const ALLOWED_NAME_CHARS: [char; 8] = ['\u{00B7}', '\u{0387}', '-', '.', '_', '%', '(', ')'];

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || ALLOWED_NAME_CHARS.contains(&c)
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Whether a string parses as an absolute IRI
pub fn is_absolute_iri(s: &str) -> bool {
    Iri::parse(s).is_ok()
}

/// Split a URI into namespace and local name.
///
/// The local name starts at the first letter or `_` following the last
/// character that cannot appear in a name.
pub fn split_uri(uri: &str) -> MappingResult<(&str, &str)> {
    let unsplittable = || MappingError::UnsplittableUri(uri.to_string());

    let boundary = uri
        .char_indices()
        .rev()
        .find(|(_, c)| !is_name_char(*c))
        .map(|(i, _)| i)
        .ok_or_else(unsplittable)?;

    let split = uri[boundary..]
        .char_indices()
        .find(|(_, c)| is_name_start(*c))
        .map(|(i, _)| boundary + i)
        .ok_or_else(unsplittable)?;

    Ok((&uri[..split], &uri[split..]))
}

/// Graph address of a subject/object URI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeDef {
    pub node_type: Label,
    pub key: String,
}

/// URI ↔ graph translator
///
/// Owns the namespace registry. Bindings are recorded while translating,
/// including during reads, hence the interior mutability.
#[derive(Debug)]
pub struct UriMapper {
    node_namespace_base: String,
    relationship_namespace_base: String,
    registry: RefCell<NamespaceRegistry>,
}

impl UriMapper {
    /// Create a mapper with an empty registry
    pub fn new(node_namespace_base: impl Into<String>, relationship_namespace_base: impl Into<String>) -> Self {
        Self::with_registry(node_namespace_base, relationship_namespace_base, NamespaceRegistry::new())
    }

    /// Create a mapper seeded with existing bindings
    pub fn with_registry(
        node_namespace_base: impl Into<String>,
        relationship_namespace_base: impl Into<String>,
        registry: NamespaceRegistry,
    ) -> Self {
        Self {
            node_namespace_base: node_namespace_base.into(),
            relationship_namespace_base: relationship_namespace_base.into(),
            registry: RefCell::new(registry),
        }
    }

    pub fn node_namespace_base(&self) -> &str {
        &self.node_namespace_base
    }

    pub fn relationship_namespace_base(&self) -> &str {
        &self.relationship_namespace_base
    }

    /// Turn a namespace into a node type label
    pub fn munge_namespace(&self, namespace: &str) -> String {
        let local = namespace
            .strip_prefix(self.node_namespace_base.as_str())
            .unwrap_or(namespace);

        // Drop the trailing separator
        let mut chars = local.chars();
        chars.next_back();
        chars.as_str().replace('/', "_")
    }

    /// Turn a node type label back into a namespace
    pub fn unmunge_node_type(&self, node_type: &str) -> String {
        let namespace = format!("{}#", node_type.replace('_', "/"));
        if namespace.contains("://") {
            namespace
        } else {
            format!("{}{}", self.node_namespace_base, namespace)
        }
    }

    /// Resolve a URI to the (type, key) of its node
    pub fn uri_to_node_def(&self, uri: &NamedNode) -> MappingResult<NodeDef> {
        let (namespace, key) = split_uri(uri.as_str())?;

        let mut registry = self.registry.borrow_mut();
        let bound = registry.prefix(namespace).map(str::to_string);
        let node_type = match bound {
            Some(prefix) => prefix,
            None => {
                let munged = self.munge_namespace(namespace);
                let mut node_type = munged.clone();
                let mut suffix = 1;
                while registry.namespace(&node_type).is_some_and(|claimed| claimed != namespace) {
                    suffix += 1;
                    node_type = format!("{}{}", munged, suffix);
                }
                debug!("Bound namespace {} to node type {}", namespace, node_type);
                registry.bind(node_type.clone(), namespace);
                node_type
            }
        };

        Ok(NodeDef {
            node_type: Label::new(node_type),
            key: key.to_string(),
        })
    }

    /// URI of a node
    pub fn node_to_uri(&self, node: &NodeRef) -> MappingResult<NamedNode> {
        let node_type = node.node_type.as_str();

        let mut registry = self.registry.borrow_mut();
        let bound = registry.namespace(node_type).map(str::to_string);
        let namespace = match bound {
            Some(namespace) => namespace,
            None => {
                let namespace = self.unmunge_node_type(node_type);
                // A namespace already claimed by another type keeps its label
                if registry.prefix(&namespace).is_none() {
                    debug!("Bound node type {} to namespace {}", node_type, namespace);
                    registry.bind(node_type, namespace.clone());
                }
                namespace
            }
        };

        Ok(NamedNode::new(&format!("{}{}", namespace, node.key))?)
    }

    /// Relationship type (and attribute key) a predicate is written as
    pub fn uri_to_rel_type(&self, predicate: &RdfPredicate) -> EdgeType {
        let iri = predicate.as_str();
        if let Some(rest) = iri.strip_prefix(self.relationship_namespace_base.as_str()) {
            if !rest.is_empty() && !is_absolute_iri(rest) {
                return EdgeType::new(rest);
            }
        }
        EdgeType::new(iri)
    }

    /// Every relationship type that reads back as this predicate, the
    /// written one first.
    ///
    /// Under the relationship base both `foo` and the verbatim `<base>foo`
    /// map to the same predicate.
    pub fn rel_types_for(&self, predicate: &RdfPredicate) -> Vec<EdgeType> {
        let written = self.uri_to_rel_type(predicate);
        let verbatim = EdgeType::new(predicate.as_str());
        if written == verbatim {
            vec![written]
        } else {
            vec![written, verbatim]
        }
    }

    /// Predicate for a relationship type (or attribute key)
    pub fn rel_type_to_uri(&self, rel_type: &EdgeType) -> MappingResult<RdfPredicate> {
        let name = rel_type.as_str();
        if is_absolute_iri(name) {
            Ok(RdfPredicate::new(name)?)
        } else {
            Ok(RdfPredicate::new(&format!("{}{}", self.relationship_namespace_base, name))?)
        }
    }

    pub fn bind(&self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.registry.borrow_mut().bind(prefix, namespace);
    }

    pub fn namespace(&self, prefix: &str) -> Option<String> {
        self.registry.borrow().namespace(prefix).map(str::to_string)
    }

    pub fn prefix(&self, namespace: &str) -> Option<String> {
        self.registry.borrow().prefix(namespace).map(str::to_string)
    }

    pub fn namespaces(&self) -> Vec<Namespace> {
        self.registry.borrow().namespaces()
    }

    /// Snapshot of the registry
    pub fn registry(&self) -> NamespaceRegistry {
        self.registry.borrow().clone()
    }
}

const INTEGER_TYPES: [&str; 13] = [
    "integer",
    "int",
    "long",
    "short",
    "byte",
    "nonNegativeInteger",
    "positiveInteger",
    "negativeInteger",
    "nonPositiveInteger",
    "unsignedInt",
    "unsignedLong",
    "unsignedShort",
    "unsignedByte",
];

const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

fn parse_datetime(lexical: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(lexical) {
        return Some(dt.timestamp_millis());
    }
    // xsd:dateTime without a timezone is read as UTC
    NaiveDateTime::parse_from_str(lexical, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Attribute value stored for a literal.
///
/// The primitive form is used only when it converts back to the very same
/// literal. Language tags, unknown datatypes and non-canonical lexical forms
/// (`"1"^^xsd:int`, `"1.0E0"^^xsd:double`) are kept as [`PropertyValue::Lexical`].
pub fn literal_to_value(literal: &Literal) -> PropertyValue {
    match primitive_value(literal) {
        Some(value) if value_to_literal(&value) == *literal => value,
        _ => PropertyValue::Lexical {
            value: literal.value().to_string(),
            datatype: literal.datatype_iri().to_string(),
            language: literal.language().map(str::to_string),
        },
    }
}

fn primitive_value(literal: &Literal) -> Option<PropertyValue> {
    let lexical = literal.value();
    if literal.language().is_some() {
        return None;
    }
    if literal.datatype_iri() == xsd::STRING.as_str() {
        return Some(PropertyValue::String(lexical.to_string()));
    }

    let datatype = literal.datatype_iri();
    let local = datatype.strip_prefix(XSD_NS).unwrap_or("");

    if INTEGER_TYPES.contains(&local) {
        lexical.trim().parse::<i64>().ok().map(PropertyValue::Integer)
    } else if datatype == xsd::DOUBLE.as_str()
        || datatype == xsd::FLOAT.as_str()
        || datatype == xsd::DECIMAL.as_str()
    {
        match lexical.trim() {
            "INF" | "+INF" => Some(PropertyValue::Float(f64::INFINITY)),
            "-INF" => Some(PropertyValue::Float(f64::NEG_INFINITY)),
            other => other.parse::<f64>().ok().map(PropertyValue::Float),
        }
    } else if datatype == xsd::BOOLEAN.as_str() {
        match lexical.trim() {
            "true" | "1" => Some(PropertyValue::Boolean(true)),
            "false" | "0" => Some(PropertyValue::Boolean(false)),
            _ => None,
        }
    } else if datatype == xsd::DATE_TIME.as_str() {
        parse_datetime(lexical.trim()).map(PropertyValue::DateTime)
    } else {
        None
    }
}

fn typed(value: String, datatype: oxrdf::NamedNodeRef<'static>) -> Literal {
    Literal::from(oxrdf::Literal::new_typed_literal(value, datatype))
}

/// Literal for a stored attribute value
pub fn value_to_literal(value: &PropertyValue) -> Literal {
    match value {
        PropertyValue::String(s) => Literal::new_simple_literal(s.as_str()),
        PropertyValue::Integer(i) => typed(i.to_string(), xsd::INTEGER),
        PropertyValue::Float(f) => {
            let lexical = if f.is_nan() {
                "NaN".to_string()
            } else if f.is_infinite() {
                if *f > 0.0 { "INF" } else { "-INF" }.to_string()
            } else {
                f.to_string()
            };
            typed(lexical, xsd::DOUBLE)
        }
        PropertyValue::Boolean(b) => typed(b.to_string(), xsd::BOOLEAN),
        PropertyValue::DateTime(ms) => match Utc.timestamp_millis_opt(*ms).single() {
            Some(dt) => typed(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true), xsd::DATE_TIME),
            None => typed(ms.to_string(), xsd::INTEGER),
        },
        PropertyValue::Lexical { value, language: Some(language), .. } => Literal::from(
            oxrdf::Literal::new_language_tagged_literal_unchecked(value.as_str(), language.as_str()),
        ),
        PropertyValue::Lexical { value, datatype, language: None } => Literal::from(
            oxrdf::Literal::new_typed_literal(value.as_str(), oxrdf::NamedNode::new_unchecked(datatype.as_str())),
        ),
        PropertyValue::Null => Literal::new_simple_literal(""),
    }
}
