use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use atomspace_rest::atomspace::{AtomFilter, AtomSpace, MemoryAtomSpace};
use atomspace_rest::construct::{AtomType, Handle, TruthValue};
use atomspace_rest::mapper::marshal;

// a chain of concepts where each consecutive pair is tied together by an inheritance link
fn populate(size: usize) -> (MemoryAtomSpace, Vec<Handle>) {
    let space = MemoryAtomSpace::new();
    let mut nodes = Vec::with_capacity(size);
    for i in 0..size {
        nodes.push(space.add_node(AtomType::ConceptNode, &format!("concept-{i}"), None).unwrap());
    }
    for pair in nodes.windows(2) {
        space.add_link(AtomType::InheritanceLink, pair, None).unwrap();
    }
    (space, nodes)
}

fn bench_get_and_marshal(c: &mut Criterion) {
    let (space, nodes) = populate(10_000);
    let handle = nodes[nodes.len() / 2];
    c.bench_function("get + marshal", |b| {
        b.iter(|| {
            let atom = space.get(black_box(handle)).unwrap();
            black_box(serde_json::to_string(&marshal(&atom)).unwrap())
        })
    });
}

fn bench_set_tv(c: &mut Criterion) {
    let (space, nodes) = populate(10_000);
    let tv = TruthValue::new(0.7, 12.0);
    c.bench_function("set_tv", |b| {
        b.iter(|| {
            for h in nodes.iter().take(100) {
                space.set_tv(black_box(*h), tv).unwrap();
            }
        })
    });
}

fn bench_find(c: &mut Criterion) {
    let (space, _) = populate(10_000);
    let filter = AtomFilter {
        atom_type: Some(AtomType::InheritanceLink),
        ..AtomFilter::default()
    };
    c.bench_function("find by type", |b| {
        b.iter(|| black_box(space.find(&filter).unwrap().len()))
    });
}

criterion_group!(benches, bench_get_and_marshal, bench_set_tv, bench_find);
criterion_main!(benches);
