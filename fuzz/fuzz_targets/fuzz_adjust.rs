#![no_main]

use gridsnap_layout::{BreakpointKey, GridEngine, GridRect, Item, ItemId, overlapping_pairs};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the column count (1..=16), then 4 bytes per item.
    let Some((&cols, rest)) = data.split_first() else {
        return;
    };
    let cols = u32::from(cols % 16) + 1;
    let bp = BreakpointKey::new(cols);

    let items: Vec<Item> = rest
        .chunks_exact(4)
        .take(64)
        .enumerate()
        .map(|(idx, chunk)| {
            let rect = GridRect::new(
                i32::from(chunk[0] % 24) - 4,
                i32::from(chunk[1] % 24) - 4,
                i32::from(chunk[2] % 8) + 1,
                i32::from(chunk[3] % 8) + 1,
            );
            Item::new(ItemId::new(idx as u64 + 1)).with_rect(bp, rect)
        })
        .collect();

    let engine = GridEngine::default();
    let outcome = engine.adjust(&items, bp);
    assert_eq!(outcome.items.len(), items.len());

    // Items too wide for the grid are reported, everything else must fit.
    if items.iter().all(|item| item.rect(bp).is_some_and(|r| r.w as u32 <= cols)) {
        assert!(outcome.is_clean(), "issues: {:?}", outcome.issues);
        assert!(overlapping_pairs(&outcome.items, bp).is_empty());
        for item in &outcome.items {
            let Some(rect) = item.rect(bp) else { continue };
            assert!(rect.x >= 0 && rect.y >= 0, "negative rect {rect:?}");
            assert!(rect.right() <= cols as i32, "rect past last column {rect:?}");
        }

        // A compacted layout is a fixed point.
        let again = engine.adjust(&outcome.items, bp);
        for item in &again.items {
            let before = outcome.items.iter().find(|other| other.id == item.id);
            assert_eq!(before.and_then(|other| other.rect(bp)), item.rect(bp));
        }
    }
});
