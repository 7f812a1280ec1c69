//! Benchmarks for the placement engine.
//!
//! Run with: cargo bench -p gridsnap-layout

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gridsnap_layout::{
    BreakpointKey, GridEngine, GridPos, GridRect, GridSize, InteractionModifiers, Item, ItemId,
    OccupancyMatrix,
};
use std::hint::black_box;

const BP: BreakpointKey = BreakpointKey::new(12);

/// `n` items with mixed sizes, deliberately piled onto a few columns so
/// `adjust` has real work to do.
fn make_items(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| {
            let w = (i % 4) as i32 + 1;
            let h = (i % 3) as i32 + 1;
            let x = ((i * 5) % 9) as i32;
            let y = (i / 3) as i32;
            Item::new(ItemId::new(i as u64 + 1)).with_rect(BP, GridRect::new(x, y, w, h))
        })
        .collect()
}

fn bench_adjust(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/adjust");
    let engine = GridEngine::default();

    for n in [8, 32, 128] {
        let items = make_items(n);
        group.bench_with_input(BenchmarkId::new("piled", n), &items, |b, items| {
            b.iter(|| black_box(engine.adjust(items, BP)))
        });
        let compact = engine.adjust(&items, BP).items;
        group.bench_with_input(BenchmarkId::new("compact", n), &compact, |b, items| {
            b.iter(|| black_box(engine.adjust(items, BP)))
        });
    }

    group.finish();
}

fn bench_find_free_space(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/find_free_space");

    for rows in [16usize, 64, 256] {
        // Checkerboard of 1x1 blockers leaves no 2x2 hole until the last row.
        let mut matrix = OccupancyMatrix::new(rows, 12);
        for y in 0..rows as i32 - 2 {
            for x in (0..12).filter(|x| (x + y) % 2 == 0) {
                matrix.set(x, y, Some(ItemId::new(1)));
            }
        }
        group.bench_with_input(BenchmarkId::new("checkerboard", rows), &matrix, |b, matrix| {
            b.iter(|| black_box(matrix.find_free_space(GridSize::new(2, 2), GridPos::ORIGIN)))
        });
    }

    group.finish();
}

fn bench_drag_and_drop(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/drag_drop");
    let engine = GridEngine::default();
    let none = InteractionModifiers::none();

    for n in [8, 32, 128] {
        let items = engine.adjust(&make_items(n), BP).items;
        let Some(rect) = items[0].rect(BP) else {
            continue;
        };
        let candidate =
            Item::new(items[0].id).with_rect(BP, rect.with_pos(GridPos::new(rect.x + 1, rect.y)));

        group.bench_with_input(BenchmarkId::new("move_item", n), &items, |b, items| {
            b.iter(|| black_box(engine.move_item(items, &candidate, BP, none)))
        });
        group.bench_with_input(BenchmarkId::new("move_then_place", n), &items, |b, items| {
            b.iter_batched(
                || engine.move_item(items, &candidate, BP, none).items,
                |moved| black_box(engine.place_items(&moved, candidate.id, BP, none)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_adjust, bench_find_free_space, bench_drag_and_drop);
criterion_main!(benches);
