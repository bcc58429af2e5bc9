//! Property-based tests for the line scroll engine.
//! Verifies clamping and drag accumulation for arbitrary histories and finger paths.

#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::arithmetic_side_effects)]

use proptest::prelude::*;
use shell::ScrollState;

const LINE: u32 = 16;

fn state(total: usize, top: i32, bottom: i32) -> ScrollState {
    let mut s = ScrollState::new(LINE);
    s.set_viewport(top, bottom);
    s.set_total_lines(total);
    s
}

proptest! {
    /// After any drag the offset stays within `0..=max_offset`.
    #[test]
    fn drag_stays_clamped(
        total in 0usize..80,
        height in 0i32..200,
        start_at_bottom in any::<bool>(),
        path in proptest::collection::vec(-300i32..300, 0..40),
    ) {
        let mut s = state(total, 40, 40 + height);
        if start_at_bottom {
            s.snap_to_bottom();
        }
        for y in path {
            s.drag_to(y);
            prop_assert!(s.offset() <= s.max_offset());
            prop_assert!(s.residue().abs() < LINE as i32);
        }
    }

    /// The window never exceeds the viewport or the line count.
    #[test]
    fn window_within_bounds(total in 0usize..80, height in 0i32..200, steps in -100i32..100) {
        let mut s = state(total, 40, 40 + height);
        s.scroll_by(steps);
        let window = s.window();
        prop_assert!(window.end <= total);
        prop_assert!(window.len() <= s.visible_lines());
        prop_assert_eq!(window.start, s.offset());
    }

    /// Sub-line moves that add up to one line height scroll exactly one line
    /// and leave nothing behind.
    #[test]
    fn sub_line_drags_make_one_step(
        cuts in proptest::collection::btree_set(1i32..16, 0..8),
        upward in any::<bool>(),
    ) {
        let mut s = state(30, 40, 120);
        s.snap_to_bottom();
        if upward {
            s.scroll_by(-10);
        }
        let before = s.offset();
        let sign = if upward { -1 } else { 1 };

        s.begin_drag(100);
        for cut in &cuts {
            prop_assert!(!s.drag_to(100 + sign * cut));
        }
        prop_assert!(s.drag_to(100 + sign * 16));
        prop_assert_eq!(s.residue(), 0);

        let expected = if upward { before + 1 } else { before - 1 };
        prop_assert_eq!(s.offset(), expected);
    }

    /// Snapping shows the last lines.
    #[test]
    fn snap_shows_last_lines(total in 0usize..80, height in 0i32..200) {
        let mut s = state(total, 40, 40 + height);
        s.snap_to_bottom();
        prop_assert_eq!(s.offset(), s.max_offset());
        prop_assert_eq!(s.window().end, total.min(s.offset() + s.visible_lines()));
    }
}
