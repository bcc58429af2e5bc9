//! Property-based tests for touch edge detection.
//! Checks sample classification for arbitrary poll sequences.

#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::arithmetic_side_effects)]

use embedded_graphics::prelude::Point;
use platform::TouchTracker;
use proptest::prelude::*;

fn reading() -> impl Strategy<Value = Option<(i32, i32)>> {
    proptest::option::of((0i32..320, 0i32..240))
}

proptest::proptest! {
    /// Every sample is exactly one of press / hold / release / idle.
    #[test]
    fn samples_classify_exactly_once(readings in proptest::collection::vec(reading(), 0..64)) {
        let mut tracker = TouchTracker::new();
        for (tick, r) in readings.into_iter().enumerate() {
            let s = tracker.update(r.map(|(x, y)| Point::new(x, y)), tick as u64);
            let count = [s.is_press(), s.is_hold(), s.is_release(), s.is_idle()]
                .iter()
                .filter(|b| **b)
                .count();
            prop_assert_eq!(count, 1);
        }
    }

    /// `was_pressed` always mirrors the previous sample's `pressed`.
    #[test]
    fn was_pressed_tracks_previous(readings in proptest::collection::vec(reading(), 1..64)) {
        let mut tracker = TouchTracker::new();
        let mut previous = false;
        for r in readings {
            let s = tracker.update(r.map(|(x, y)| Point::new(x, y)), 0);
            prop_assert_eq!(s.was_pressed, previous);
            previous = s.pressed;
        }
    }

    /// A release reports the last point the finger was seen at.
    #[test]
    fn release_reports_last_pressed_point(
        points in proptest::collection::vec((0i32..320, 0i32..240), 1..16),
    ) {
        let mut tracker = TouchTracker::new();
        for &(x, y) in &points {
            tracker.update(Some(Point::new(x, y)), 0);
        }
        let release = tracker.update(None, 0);
        prop_assert!(release.is_release());
        let (x, y) = points[points.len() - 1];
        prop_assert_eq!(release.point, Point::new(x, y));
    }
}
