#[macro_use]
extern crate criterion;

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use merkle_commit::{BincodeEncoding, Blake3Hasher, MerkleTree, verify};
use rand::{Rng, thread_rng};

fn prepare_tree(count: u64) -> (Vec<u64>, MerkleTree) {
    let leaves: Vec<u64> = (0..count).collect();
    let tree = MerkleTree::<Blake3Hasher>::build(&leaves, &BincodeEncoding)
        .unwrap()
        .expect("build tree");
    (leaves, tree)
}

fn bench(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("Merkle build");
        for size in [1u64 << 10, 1 << 14, 1 << 18] {
            let leaves: Vec<u64> = (0..size).collect();
            group.bench_with_input(BenchmarkId::new("leaves", size), &leaves, |b, leaves| {
                b.iter(|| MerkleTree::<Blake3Hasher>::build(leaves, &BincodeEncoding).unwrap());
            });
        }
    }

    c.bench_function("Merkle open", |b| {
        let (leaves, tree) = prepare_tree(1 << 18);
        let mut rng = thread_rng();
        b.iter(|| tree.open(rng.gen_range(0..leaves.len())).expect("open"));
    });

    c.bench_function("Merkle verify", |b| {
        let (leaves, tree) = prepare_tree(1 << 18);
        let root = tree.root();
        let mut rng = thread_rng();
        let openings: Vec<_> = (0..10_000)
            .map(|_| tree.open(rng.gen_range(0..leaves.len())).expect("open"))
            .collect();
        let mut i = 0;
        b.iter(|| {
            let opening = &openings[i % openings.len()];
            i += 1;
            black_box(
                verify::<Blake3Hasher, _, _>(
                    &root,
                    opening.index(),
                    opening.path(),
                    &leaves[opening.index() as usize],
                    &BincodeEncoding,
                )
                .unwrap(),
            )
        });
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
