#![no_main]

use arbitrary::Arbitrary;
use gridsnap_layout::{
    BreakpointKey, GridEngine, GridPos, GridRect, InteractionModifiers, Item, ItemId,
    ItemLayout,
};
use libfuzzer_sys::fuzz_target;

const BP: BreakpointKey = BreakpointKey::new(12);

#[derive(Debug, Arbitrary)]
struct FuzzItem {
    x: u8,
    y: u8,
    w: u8,
    h: u8,
    fixed: bool,
    is_static: bool,
}

#[derive(Debug, Arbitrary)]
struct Drag {
    pick: u8,
    x: i8,
    y: i8,
    fullscreen: bool,
    proportional: bool,
}

#[derive(Debug, Arbitrary)]
struct Input {
    items: Vec<FuzzItem>,
    drags: Vec<Drag>,
}

fuzz_target!(|input: Input| {
    if input.items.is_empty() || input.items.len() > 32 || input.drags.len() > 16 {
        return;
    }
    let engine = GridEngine::default();
    let mut items: Vec<Item> = input
        .items
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let rect = GridRect::new(
                i32::from(raw.x % 12),
                i32::from(raw.y % 16),
                i32::from(raw.w % 6) + 1,
                i32::from(raw.h % 6) + 1,
            );
            let layout = ItemLayout::new(rect)
                .with_fixed(raw.fixed)
                .with_static(raw.is_static);
            Item::new(ItemId::new(idx as u64 + 1)).with_layout(BP, layout)
        })
        .collect();

    for drag in &input.drags {
        let picked = items[usize::from(drag.pick) % items.len()].clone();
        let Some(rect) = picked.rect(BP) else { continue };
        let candidate = Item::new(picked.id).with_rect(
            BP,
            rect.with_pos(GridPos::new(i32::from(drag.x), i32::from(drag.y))),
        );
        let modifiers = InteractionModifiers {
            fullscreen: drag.fullscreen,
            proportional: drag.proportional,
        };

        let moved = engine.move_item(&items, &candidate, BP, modifiers);
        assert_eq!(moved.items.len(), items.len());
        let dropped = engine.place_items(&moved.items, picked.id, BP, modifiers);
        assert_eq!(dropped.items.len(), items.len());
        assert!(dropped.items.iter().all(|item| item.edge_link().is_empty()));
        items = dropped.items;
    }

    let normalized = engine.normalize(&items, BP);
    assert_eq!(normalized.items.len(), items.len());
    assert!(normalized.items.iter().all(|item| item.edge_link().is_empty()));
});
