//! Benchmarks for grid generation, store edits and the JSON codec.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use range_editor::codec;
use range_editor::ranges::{grid, Action};
use range_editor::{MemoryStorage, RangeStore, StoreConfig};

fn grid_benchmark(c: &mut Criterion) {
    c.bench_function("generate_grid", |b| b.iter(|| black_box(grid::generate())));
}

fn update_hand_benchmark(c: &mut Criterion) {
    let mut store = RangeStore::open(MemoryStorage::new(), StoreConfig::default()).unwrap();
    let hands: Vec<_> = grid::all_hands().collect();
    let mut i = 0usize;

    c.bench_function("update_hand", |b| {
        b.iter(|| {
            let hand = hands[i % hands.len()];
            let action = Action::all()[i % 3];
            store.update_hand(black_box(hand), Some(action));
            i += 1;
        })
    });
}

fn full_range_round_trip_benchmark(c: &mut Criterion) {
    let mut store = RangeStore::open(MemoryStorage::new(), StoreConfig::default()).unwrap();
    for (i, hand) in grid::all_hands().enumerate() {
        store.update_hand(hand, Some(Action::all()[i % 3]));
    }

    c.bench_function("export_import_full_range", |b| {
        b.iter(|| {
            let bytes = codec::export(store.ranges()).unwrap();
            black_box(codec::import(&bytes).unwrap())
        })
    });
}

criterion_group!(
    benches,
    grid_benchmark,
    update_hand_benchmark,
    full_range_round_trip_benchmark
);
criterion_main!(benches);
