/// End-to-end behaviour of the triple view over the in-memory graph.
///
/// Covers round trips for literals and relationships, removal, overwrite
/// semantics, ignored types, namespace stability, agreement of every lookup
/// strategy with a brute-force scan, and empty results for unknown nodes.
use graph_rdf::rdf::{MappingError, TripleStoreError};
use graph_rdf::{
    AdapterConfig, GraphBackend, GraphStore, Literal, NamedNode, PropertyValue, RdfObject, RdfPredicate,
    RdfSubject, Triple, TriplePattern, TripleStore,
};
use std::collections::HashSet;

const ALICE: &str = "http://example.org/people#alice";
const BOB: &str = "http://example.org/people#bob";
const CAROL: &str = "http://example.org/people#carol";
const NAME: &str = "http://xmlns.com/foaf/0.1/name";
const AGE: &str = "http://xmlns.com/foaf/0.1/age";
const KNOWS: &str = "http://xmlns.com/foaf/0.1/knows";
const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

fn iri(s: &str) -> NamedNode {
    NamedNode::new(s).unwrap()
}

fn pred(s: &str) -> RdfPredicate {
    RdfPredicate::new(s).unwrap()
}

fn typed(value: &str, datatype: &str) -> Literal {
    Literal::new_typed_literal(value, iri(&format!("{}{}", XSD, datatype)))
}

fn triple(s: &str, p: &str, o: impl Into<RdfObject>) -> Triple {
    Triple::new(iri(s).into(), pred(p), o.into())
}

fn pattern(s: Option<&str>, p: Option<&str>, o: Option<RdfObject>) -> TriplePattern {
    TriplePattern::new(s.map(|s| iri(s).into()), p.map(pred), o)
}

fn query(store: &TripleStore, pattern: &TriplePattern) -> Vec<Triple> {
    store
        .triples(pattern)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn query_set(store: &TripleStore, pattern: &TriplePattern) -> HashSet<Triple> {
    query(store, pattern).into_iter().collect()
}

/// alice -name-> "Alice", alice -age-> 30, alice -knows-> bob
fn small_graph() -> TripleStore {
    let mut store = TripleStore::in_memory();
    store.add(&triple(ALICE, NAME, Literal::new_simple_literal("Alice"))).unwrap();
    store.add(&triple(ALICE, AGE, typed("30", "integer"))).unwrap();
    store.add(&triple(ALICE, KNOWS, iri(BOB))).unwrap();
    store
}

#[test]
fn test_literal_round_trip() {
    let values = vec![
        Literal::new_simple_literal("Alice"),
        Literal::new_simple_literal(""),
        typed("42", "integer"),
        typed("-7", "integer"),
        typed("2.5", "double"),
        typed("true", "boolean"),
        typed("2020-01-02T03:04:05Z", "dateTime"),
        Literal::new_language_tagged_literal("bonjour", "fr").unwrap(),
        Literal::new_typed_literal("x", iri("http://example.org/dt")),
        typed("1", "int"),
        typed("1.0E0", "double"),
        typed("2020-01-02T04:04:05+01:00", "dateTime"),
    ];

    for value in values {
        let mut store = TripleStore::in_memory();
        let expected = triple(ALICE, NAME, value.clone());
        store.add(&expected).unwrap();

        let found = query(&store, &pattern(Some(ALICE), Some(NAME), None));
        assert_eq!(found, vec![expected], "round trip of {}", value);
    }
}

#[test]
fn test_relationship_round_trip() {
    let store = small_graph();
    let knows = triple(ALICE, KNOWS, iri(BOB));

    assert_eq!(query(&store, &TriplePattern::exact(&knows)), vec![knows.clone()]);
    assert!(query(&store, &pattern(Some(ALICE), Some(KNOWS), None)).contains(&knows));
}

#[test]
fn test_duplicate_relationships_are_kept() {
    let mut store = small_graph();
    store.add(&triple(ALICE, KNOWS, iri(BOB))).unwrap();

    // Two edges, but the exact lookup reports the statement once
    assert_eq!(query(&store, &pattern(Some(ALICE), Some(KNOWS), None)).len(), 2);
    assert_eq!(query(&store, &TriplePattern::exact(&triple(ALICE, KNOWS, iri(BOB)))).len(), 1);
}

#[test]
fn test_removal_precision() {
    let mut store = TripleStore::in_memory();
    store.add(&triple(ALICE, KNOWS, iri(BOB))).unwrap();
    store.add(&triple(ALICE, KNOWS, iri(CAROL))).unwrap();

    let removed = store.remove(&TriplePattern::exact(&triple(ALICE, KNOWS, iri(BOB)))).unwrap();
    assert_eq!(removed, 1);

    let remaining = query(&store, &pattern(Some(ALICE), Some(KNOWS), None));
    assert_eq!(remaining, vec![triple(ALICE, KNOWS, iri(CAROL))]);
}

#[test]
fn test_remove_ignores_stale_literal() {
    let mut store = small_graph();
    let removed = store
        .remove(&TriplePattern::exact(&triple(ALICE, NAME, Literal::new_simple_literal("Bob"))))
        .unwrap();
    assert_eq!(removed, 0);
    assert_eq!(query(&store, &pattern(Some(ALICE), Some(NAME), None)).len(), 1);
}

#[test]
fn test_literal_kinds_stay_distinct() {
    let mut store = TripleStore::in_memory();
    store.add(&triple(ALICE, AGE, typed("1", "int"))).unwrap();

    // Same number, different literal
    let canonical = TriplePattern::exact(&triple(ALICE, AGE, typed("1", "integer")));
    assert!(query(&store, &canonical).is_empty());
    assert_eq!(store.remove(&canonical).unwrap(), 0);

    let stored = triple(ALICE, AGE, typed("1", "int"));
    assert_eq!(query(&store, &pattern(None, None, Some(typed("1", "int").into()))), vec![stored.clone()]);
    assert_eq!(store.remove(&TriplePattern::exact(&stored)).unwrap(), 1);
}

#[test]
fn test_remove_on_missing_subject_is_an_error() {
    let mut store = small_graph();
    let ghost = "http://example.org/people#ghost";

    for p in [pattern(Some(ghost), Some(NAME), None), pattern(Some(ghost), None, None)] {
        match store.remove(&p) {
            Err(TripleStoreError::Graph(e)) => assert!(e.is_not_found()),
            other => panic!("expected a not-found error, got {:?}", other.map(|_| ())),
        }
    }
    assert_eq!(store.len().unwrap(), 3);
}

#[test]
fn test_remove_by_subject_clears_everything_it_matched() {
    let mut store = small_graph();
    let removed = store.remove(&pattern(Some(ALICE), None, None)).unwrap();
    assert_eq!(removed, 3);
    assert!(store.is_empty().unwrap());

    // The nodes themselves stay behind
    assert!(store.node(&iri(ALICE)).is_ok());
    assert!(store.node(&iri(BOB)).is_ok());
}

#[test]
fn test_literal_overwrite() {
    let mut store = TripleStore::in_memory();
    store.add(&triple(ALICE, NAME, Literal::new_simple_literal("a"))).unwrap();
    store.add(&triple(ALICE, NAME, Literal::new_simple_literal("b"))).unwrap();

    let found = query(&store, &pattern(Some(ALICE), Some(NAME), None));
    assert_eq!(found, vec![triple(ALICE, NAME, Literal::new_simple_literal("b"))]);
}

#[test]
fn test_ignored_type_invisibility() {
    const SECRET: &str = "http://example.org/secret#s1";
    let mut store = small_graph();
    store.add(&triple(ALICE, KNOWS, iri(SECRET))).unwrap();
    store.add(&triple(SECRET, NAME, Literal::new_simple_literal("Alice"))).unwrap();
    store.add(&triple(SECRET, KNOWS, iri(ALICE))).unwrap();

    let secret_type = store.node(&iri(SECRET)).unwrap().node_type.as_str().to_string();
    let visible = query_set(&store, &TriplePattern::any());
    assert_eq!(visible.len(), 6);

    store.ignore(secret_type.clone());

    let mentions_secret = |t: &Triple| {
        t.subject == RdfSubject::from(iri(SECRET)) || t.object == RdfObject::from(iri(SECRET))
    };
    let patterns = vec![
        TriplePattern::any(),
        pattern(Some(SECRET), None, None),
        pattern(Some(SECRET), Some(NAME), None),
        pattern(None, None, Some(iri(SECRET).into())),
        pattern(None, Some(KNOWS), None),
        pattern(None, Some(KNOWS), Some(iri(SECRET).into())),
        pattern(None, Some(KNOWS), Some(iri(ALICE).into())),
        pattern(Some(ALICE), None, None),
        pattern(Some(ALICE), Some(KNOWS), None),
        pattern(Some(ALICE), None, Some(iri(SECRET).into())),
        pattern(None, None, Some(Literal::new_simple_literal("Alice").into())),
        pattern(None, Some(NAME), Some(Literal::new_simple_literal("Alice").into())),
        TriplePattern::exact(&triple(ALICE, KNOWS, iri(SECRET))),
    ];
    for p in &patterns {
        let found = query(&store, p);
        assert!(!found.iter().any(mentions_secret), "{} leaked an ignored node", p);
    }
    assert_eq!(store.len().unwrap(), 3);

    // Removal leaves ignored relationships alone
    assert_eq!(store.remove(&TriplePattern::exact(&triple(ALICE, KNOWS, iri(SECRET)))).unwrap(), 0);

    assert!(store.unignore(&secret_type));
    assert_eq!(query_set(&store, &TriplePattern::any()), visible);
}

#[test]
fn test_namespace_stability() {
    let mut store = TripleStore::in_memory();
    store.add(&triple("http://example.org/things/widget", NAME, Literal::new_simple_literal("w"))).unwrap();
    store.add(&triple("http://example.org/things/gadget", NAME, Literal::new_simple_literal("g"))).unwrap();

    let widget = store.node(&iri("http://example.org/things/widget")).unwrap();
    let gadget = store.node(&iri("http://example.org/things/gadget")).unwrap();
    assert_eq!(widget.node_type, gadget.node_type);
    assert_eq!(
        store.namespace(widget.node_type.as_str()).as_deref(),
        Some("http://example.org/things/")
    );

    let uri = store.mapper().node_to_uri(&widget).unwrap();
    assert_eq!(uri.as_str(), "http://example.org/things/widget");

    // Subjects come back in their original namespace
    let subjects: HashSet<RdfSubject> = query(&store, &TriplePattern::any())
        .into_iter()
        .map(|t| t.subject)
        .collect();
    assert!(subjects.contains(&iri("http://example.org/things/gadget").into()));
}

#[test]
fn test_namespaces_that_munge_alike_stay_apart() {
    const HASH_ALICE: &str = "http://example.org/people#alice";
    const SLASH_BOB: &str = "http://example.org/people/bob";

    let mut store = TripleStore::in_memory();
    let alice = triple(HASH_ALICE, NAME, Literal::new_simple_literal("A"));
    let bob = triple(SLASH_BOB, NAME, Literal::new_simple_literal("B"));
    store.add(&alice).unwrap();
    store.add(&bob).unwrap();

    let hash_type = store.node(&iri(HASH_ALICE)).unwrap().node_type;
    let slash_type = store.node(&iri(SLASH_BOB)).unwrap().node_type;
    assert_ne!(hash_type, slash_type);
    assert_eq!(store.namespace(hash_type.as_str()).as_deref(), Some("http://example.org/people#"));
    assert_eq!(store.namespace(slash_type.as_str()).as_deref(), Some("http://example.org/people/"));

    // The same key in the other namespace is a different node
    assert!(store.node(&iri("http://example.org/people/alice")).is_err());

    let expected: HashSet<Triple> = [alice, bob].into_iter().collect();
    assert_eq!(query_set(&store, &TriplePattern::any()), expected);
}

#[test]
fn test_nodes_under_the_base_use_short_types() {
    let mut store = TripleStore::in_memory();
    let subject = "http://graph-rdf.local/nodes/person#dave";
    store.add(&triple(subject, NAME, Literal::new_simple_literal("Dave"))).unwrap();

    let dave = store.node(&iri(subject)).unwrap();
    assert_eq!(dave.node_type.as_str(), "person");

    // A node created directly in the graph maps back under the base
    let erin = store
        .backend_mut()
        .create_node(&"person".into(), "erin")
        .unwrap();
    assert_eq!(
        store.mapper().node_to_uri(&erin).unwrap().as_str(),
        "http://graph-rdf.local/nodes/person#erin"
    );
}

#[test]
fn test_wildcard_completeness() {
    let store = small_graph();
    let all = query_set(&store, &TriplePattern::any());
    assert_eq!(all.len(), 3);

    for t in &all {
        for mask in 0..8u8 {
            let p = TriplePattern::new(
                (mask & 0b100 != 0).then(|| t.subject.clone()),
                (mask & 0b010 != 0).then(|| t.predicate.clone()),
                (mask & 0b001 != 0).then(|| t.object.clone()),
            );
            let expected: HashSet<Triple> = all.iter().filter(|c| p.matches(c)).cloned().collect();
            assert_eq!(query_set(&store, &p), expected, "pattern {}", p);
        }
    }
}

#[test]
fn test_empty_on_missing() {
    let store = small_graph();
    let ghost = "http://example.org/people#ghost";

    assert!(query(&store, &pattern(Some(ghost), None, None)).is_empty());
    assert!(query(&store, &pattern(Some(ghost), Some(NAME), None)).is_empty());
    assert!(query(&store, &pattern(Some(ghost), Some(KNOWS), Some(iri(BOB).into()))).is_empty());
    assert!(query(&store, &pattern(None, None, Some(iri(ghost).into()))).is_empty());
    assert!(query(&store, &pattern(Some(ALICE), None, Some(iri(ghost).into()))).is_empty());
    assert!(query(&store, &pattern(None, Some(KNOWS), Some(iri(ghost).into()))).is_empty());
}

#[test]
fn test_literal_positions_match_nothing() {
    let store = small_graph();
    let results = store
        .triples_for_terms(None, Some(Literal::new_simple_literal(NAME).into()), None)
        .unwrap()
        .count();
    assert_eq!(results, 0);
}

#[test]
fn test_unsplittable_uri_is_an_error() {
    let store = small_graph();
    let err = store
        .triples(&pattern(Some("http://example.org/items/42"), None, None))
        .err()
        .unwrap();
    assert!(matches!(err, TripleStoreError::Mapping(MappingError::UnsplittableUri(_))));
}

#[test]
fn test_config_drives_bases_and_ignored_types() {
    let config = AdapterConfig::from_yaml_str(
        "relationship_namespace_base: http://example.org/rel/\nignored_types: []\n",
    )
    .unwrap();
    let mut store = TripleStore::with_config(GraphStore::new(), config);
    assert!(!store.ignore_reference_nodes());

    store.add(&triple(ALICE, KNOWS, iri(BOB))).unwrap();
    let alice = store.node(&iri(ALICE)).unwrap();

    // Graph-native relationship types surface under the configured base
    let found = query(&store, &pattern(None, None, Some(iri(ALICE).into())));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].predicate.as_str(), "http://example.org/rel/instance");

    store
        .backend_mut()
        .set_attribute(&alice, "nickname", PropertyValue::String("Al".to_string()))
        .unwrap();
    let nick = query(&store, &pattern(Some(ALICE), Some("http://example.org/rel/nickname"), None));
    assert_eq!(nick.len(), 1);
}
