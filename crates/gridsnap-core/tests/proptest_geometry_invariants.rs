//! Property-based invariant tests for grid geometry primitives.
//!
//! 1. Overlap is symmetric.
//! 2. Overlap agrees with intersection (overlap ↔ non-empty intersection).
//! 3. Intersection fits within both inputs.
//! 4. Union contains both inputs.
//! 5. Manhattan distance is symmetric and zero only on equal points.

use gridsnap_core::geometry::{GridPos, GridRect};
use proptest::prelude::*;

fn rect_strategy() -> impl Strategy<Value = GridRect> {
    (-50i32..=50, -50i32..=50, 1i32..=20, 1i32..=20)
        .prop_map(|(x, y, w, h)| GridRect::new(x, y, w, h))
}

fn pos_strategy() -> impl Strategy<Value = GridPos> {
    (-100i32..=100, -100i32..=100).prop_map(|(x, y)| GridPos::new(x, y))
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn overlap_agrees_with_intersection(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(
            a.overlaps(&b),
            a.intersection_opt(&b).is_some(),
            "a={:?}, b={:?}",
            a,
            b
        );
    }

    #[test]
    fn intersection_fits_within_both(a in rect_strategy(), b in rect_strategy()) {
        if let Some(i) = a.intersection_opt(&b) {
            for r in [a, b] {
                prop_assert!(i.x >= r.x && i.y >= r.y);
                prop_assert!(i.right() <= r.right() && i.bottom() <= r.bottom());
            }
        }
    }

    #[test]
    fn union_contains_both(a in rect_strategy(), b in rect_strategy()) {
        let u = a.union(&b);
        for r in [a, b] {
            prop_assert!(u.x <= r.x && u.y <= r.y);
            prop_assert!(u.right() >= r.right() && u.bottom() >= r.bottom());
        }
    }

    #[test]
    fn manhattan_symmetric(a in pos_strategy(), b in pos_strategy()) {
        prop_assert_eq!(a.manhattan(b), b.manhattan(a));
        prop_assert_eq!(a.manhattan(b) == 0, a == b);
    }
}
