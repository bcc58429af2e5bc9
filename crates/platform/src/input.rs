//! Touch input
//!
//! The panel is polled once per tick. [`TouchTracker`] remembers the previous
//! poll so each tick can be classified as press-down, hold, release or idle.

use embedded_graphics::prelude::Point;

/// Polled resistive/capacitive touch panel.
pub trait TouchInput {
    /// Current touch point in screen coordinates, `None` when not touched.
    fn read(&mut self) -> Option<Point>;
}

/// One polling tick's worth of touch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchSample {
    /// Finger is on the panel this tick
    pub pressed: bool,
    /// Finger was on the panel last tick
    pub was_pressed: bool,
    /// Touch point (last pressed point on release)
    pub point: Point,
    /// Monotonic tick time in milliseconds
    pub now_ms: u64,
}

impl TouchSample {
    /// A sample with explicit state, mainly for tests and trace replay.
    pub const fn new(pressed: bool, was_pressed: bool, point: Point, now_ms: u64) -> Self {
        Self {
            pressed,
            was_pressed,
            point,
            now_ms,
        }
    }

    /// Finger went down this tick.
    pub const fn is_press(&self) -> bool {
        self.pressed && !self.was_pressed
    }

    /// Finger stayed down.
    pub const fn is_hold(&self) -> bool {
        self.pressed && self.was_pressed
    }

    /// Finger lifted this tick.
    pub const fn is_release(&self) -> bool {
        !self.pressed && self.was_pressed
    }

    /// Nothing touching, nothing changed.
    pub const fn is_idle(&self) -> bool {
        !self.pressed && !self.was_pressed
    }
}

/// Edge detector turning raw polls into [`TouchSample`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchTracker {
    was_pressed: bool,
    last_point: Point,
}

impl TouchTracker {
    /// New tracker, finger up.
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_point: Point::zero(),
        }
    }

    /// Fold one raw reading into a sample.
    pub fn update(&mut self, reading: Option<Point>, now_ms: u64) -> TouchSample {
        let was_pressed = self.was_pressed;
        let pressed = reading.is_some();
        if let Some(point) = reading {
            self.last_point = point;
        }
        self.was_pressed = pressed;
        TouchSample {
            pressed,
            was_pressed,
            point: self.last_point,
            now_ms,
        }
    }

    /// Poll `input` and fold the reading.
    pub fn poll<T: TouchInput>(&mut self, input: &mut T, now_ms: u64) -> TouchSample {
        let reading = input.read();
        self.update(reading, now_ms)
    }
}
