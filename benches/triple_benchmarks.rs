use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graph_rdf::{Literal, NamedNode, RdfPredicate, Triple, TriplePattern, TripleStore};

fn person(i: usize) -> NamedNode {
    NamedNode::new(&format!("http://example.org/people#p{}", i)).unwrap()
}

fn predicate(iri: &str) -> RdfPredicate {
    RdfPredicate::new(iri).unwrap()
}

/// A ring of people, each with a name and a link to the next
fn build_store(size: usize) -> TripleStore {
    let name = predicate("http://xmlns.com/foaf/0.1/name");
    let knows = predicate("http://xmlns.com/foaf/0.1/knows");

    let mut store = TripleStore::in_memory();
    for i in 0..size {
        store
            .add(&Triple::new(
                person(i).into(),
                name.clone(),
                Literal::new_simple_literal(format!("Person{}", i)).into(),
            ))
            .unwrap();
        store
            .add(&Triple::new(person(i).into(), knows.clone(), person((i + 1) % size).into()))
            .unwrap();
    }
    store
}

/// Benchmark add throughput (attributes and relationships)
fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for size in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| build_store(size));
        });
    }
    group.finish();
}

/// Benchmark targeted lookups against the full-scan fallback
fn bench_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("patterns");
    let name = predicate("http://xmlns.com/foaf/0.1/name");

    for size in [100, 1000].iter() {
        let store = build_store(*size);

        let by_s = TriplePattern::new(Some(person(size / 2).into()), None, None);
        group.bench_with_input(BenchmarkId::new("by_s", size), &by_s, |b, p| {
            b.iter(|| store.triples(p).unwrap().count());
        });

        let by_o = TriplePattern::new(None, None, Some(person(size / 2).into()));
        group.bench_with_input(BenchmarkId::new("by_o_node", size), &by_o, |b, p| {
            b.iter(|| store.triples(p).unwrap().count());
        });

        let by_po = TriplePattern::new(
            None,
            Some(name.clone()),
            Some(Literal::new_simple_literal("Person7").into()),
        );
        group.bench_with_input(BenchmarkId::new("by_po_literal_scan", size), &by_po, |b, p| {
            b.iter(|| store.triples(p).unwrap().count());
        });

        group.bench_with_input(BenchmarkId::new("all", size), &TriplePattern::any(), |b, p| {
            b.iter(|| store.triples(p).unwrap().count());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_patterns);
criterion_main!(benches);
