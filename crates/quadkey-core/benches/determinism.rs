use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quadkey_core::{build_quad_slots, normalize_node, Literal, Quad, Term};

fn bench_quad() -> Quad {
    Quad::new(
        Term::uri("http://example.org/alice"),
        Term::uri("http://xmlns.com/foaf/0.1/name"),
        Term::literal(Literal::typed("hello", "http://example.org/myType")),
        Term::uri("http://example.org/graph"),
    )
}

fn normalize_benchmarks(c: &mut Criterion) {
    let term = Term::uri("http://example.org/alice");
    c.bench_function("normalize_node_uri", |b| {
        b.iter(|| normalize_node(black_box(&term), false))
    });

    let long = Term::literal(Literal::plain("x".repeat(4096)));
    c.bench_function("normalize_node_4k_literal", |b| {
        b.iter(|| normalize_node(black_box(&long), true))
    });

    let quad = bench_quad();
    c.bench_function("build_quad_slots", |b| {
        b.iter(|| build_quad_slots(black_box(&quad), true))
    });
}

criterion_group!(benches, normalize_benchmarks);
criterion_main!(benches);
