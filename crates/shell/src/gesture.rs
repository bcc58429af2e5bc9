//! Touch gesture classifier.
//!
//! A small hierarchical state machine (`idle` → `pending` → `dragging`)
//! turns per-tick touch samples into discrete gestures: selection changes,
//! drag moves, drag commits, taps and long presses.
//!
//! ```text
//!            press (hit)                 |dx|,|dy| > threshold
//!   idle ───────────────────▶ pending ─────────────────────────▶ dragging
//!    ▲   press (armed item)       │      or held ≥ hold_ms          │
//!    │  ─────────────────────────────────────────────────────────▶  │
//!    │           release: tap / long press                          │
//!    └───────────────────────────┘◀──── release: commit / long press┘
//! ```
//!
//! A press held past `hold_ms` lifts the item so it follows the finger.
//! Releasing a lifted item that never travelled past the distance
//! threshold is still a long press; the context menu opens.

use embedded_graphics::prelude::Point;
use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::{config::GestureConfig, geometry::saturating_sub_point, items::App};

/// Scene hit-test result for a press-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    /// Item under the finger
    pub app: App,
    /// Press landed on the icon body rather than the label padding
    pub on_body: bool,
    /// Item origin at press time
    pub origin: Point,
}

/// One tick of input for the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureInput {
    /// Finger went down
    Press {
        /// Tick time
        now_ms: u64,
        /// Touch point
        point: Point,
        /// Item under the finger
        hit: Option<Hit>,
    },
    /// Finger is still down
    Hold {
        /// Tick time
        now_ms: u64,
        /// Touch point
        point: Point,
    },
    /// Finger lifted
    Release {
        /// Tick time
        now_ms: u64,
        /// Last touch point
        point: Point,
    },
    /// Start the next press on `app` as a confirmed drag
    ArmForceDrag {
        /// Item to drag
        app: App,
    },
}

/// Classified gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// Selection changed (`None` clears it)
    Select(Option<App>),
    /// Item should move so its origin is at `origin` (unclamped)
    DragMove {
        /// Dragged item
        app: App,
        /// Requested origin
        origin: Point,
    },
    /// A drag ended
    DragCommitted {
        /// Dragged item
        app: App,
    },
    /// Short press without movement
    Tap {
        /// Tapped item
        app: App,
        /// Second tap on the same item within the double-tap window
        double: bool,
    },
    /// Long press without movement
    LongPress {
        /// Pressed item
        app: App,
        /// Release point (menu anchor)
        at: Point,
    },
}

/// Gestures produced by one input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureOutput {
    /// Emitted gestures, in order
    pub gestures: [Option<Gesture>; 2],
}

impl GestureOutput {
    /// Emitted gestures, in order.
    pub fn iter(&self) -> impl Iterator<Item = Gesture> + '_ {
        self.gestures.iter().flatten().copied()
    }

    /// Nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.gestures.iter().all(Option::is_none)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    gestures: [Option<Gesture>; 2],
}

impl DispatchContext {
    fn emit(&mut self, gesture: Gesture) {
        for slot in &mut self.gestures {
            if slot.is_none() {
                *slot = Some(gesture);
                return;
            }
        }
    }

    fn finish(self) -> GestureOutput {
        GestureOutput {
            gestures: self.gestures,
        }
    }
}

/// Why a session entered the dragging state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lift {
    Distance,
    Hold,
    Forced,
}

#[derive(Clone, Copy, Debug)]
struct Session {
    app: App,
    on_body: bool,
    press_point: Point,
    offset: Point,
    pressed_at: u64,
    lift: Option<Lift>,
    travelled: bool,
}

fn beyond(from: Point, to: Point, threshold: u32) -> bool {
    let d = saturating_sub_point(to, from);
    d.x.unsigned_abs() > threshold || d.y.unsigned_abs() > threshold
}

struct GestureHsm {
    config: GestureConfig,
    session: Option<Session>,
    last_tap: Option<(App, u64)>,
    force_drag: Option<App>,
}

impl GestureHsm {
    fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
            last_tap: None,
            force_drag: None,
        }
    }

    fn begin(
        &mut self,
        context: &mut DispatchContext,
        now_ms: u64,
        point: Point,
        hit: Option<Hit>,
    ) -> Outcome<State> {
        let armed = self.force_drag.take();
        let Some(hit) = hit else {
            self.session = None;
            self.last_tap = None;
            context.emit(Gesture::Select(None));
            return Transition(State::idle());
        };

        context.emit(Gesture::Select(Some(hit.app)));
        let forced = armed == Some(hit.app);
        self.session = Some(Session {
            app: hit.app,
            on_body: hit.on_body,
            press_point: point,
            offset: if hit.on_body {
                saturating_sub_point(point, hit.origin)
            } else {
                Point::zero()
            },
            pressed_at: now_ms,
            lift: forced.then_some(Lift::Forced),
            travelled: false,
        });

        if forced {
            tracing::debug!(app = ?hit.app, "forced drag started");
            Transition(State::dragging())
        } else {
            Transition(State::pending())
        }
    }

    fn tap_or_long_press(&mut self, context: &mut DispatchContext, now_ms: u64, point: Point) {
        let Some(session) = self.session.take() else {
            return;
        };
        let held = now_ms.saturating_sub(session.pressed_at);
        if held < self.config.hold_ms {
            let double = matches!(
                self.last_tap,
                Some((app, at)) if app == session.app
                    && now_ms.saturating_sub(at) <= self.config.double_tap_ms
            );
            self.last_tap = if double {
                None
            } else {
                Some((session.app, now_ms))
            };
            context.emit(Gesture::Tap {
                app: session.app,
                double,
            });
        } else {
            self.last_tap = None;
            context.emit(Gesture::LongPress {
                app: session.app,
                at: point,
            });
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state(superstate = "armable")]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureInput) -> Outcome<State> {
        match event {
            GestureInput::Press { now_ms, point, hit } => {
                self.begin(context, *now_ms, *point, *hit)
            }
            GestureInput::Hold { .. } | GestureInput::Release { .. } => Handled,
            GestureInput::ArmForceDrag { .. } => Super,
        }
    }

    #[state(superstate = "armable")]
    fn pending(&mut self, context: &mut DispatchContext, event: &GestureInput) -> Outcome<State> {
        match event {
            GestureInput::Press { now_ms, point, hit } => {
                self.begin(context, *now_ms, *point, *hit)
            }
            GestureInput::Hold { now_ms, point } => {
                let config = self.config;
                let Some(session) = self.session.as_mut() else {
                    return Transition(State::idle());
                };
                // Label presses only drag once the menu armed them.
                if !session.on_body {
                    return Handled;
                }
                let travelled = beyond(session.press_point, *point, config.drag_threshold_px);
                let held = now_ms.saturating_sub(session.pressed_at) >= config.hold_ms;
                if !travelled && !held {
                    return Handled;
                }

                session.lift = Some(if travelled { Lift::Distance } else { Lift::Hold });
                session.travelled = travelled;
                let app = session.app;
                let origin = saturating_sub_point(*point, session.offset);
                self.last_tap = None;
                tracing::debug!(?app, travelled, "drag confirmed");
                context.emit(Gesture::DragMove { app, origin });
                Transition(State::dragging())
            }
            GestureInput::Release { now_ms, point } => {
                self.tap_or_long_press(context, *now_ms, *point);
                Transition(State::idle())
            }
            GestureInput::ArmForceDrag { .. } => Super,
        }
    }

    #[state(superstate = "armable")]
    fn dragging(&mut self, context: &mut DispatchContext, event: &GestureInput) -> Outcome<State> {
        match event {
            GestureInput::Press { now_ms, point, hit } => {
                self.begin(context, *now_ms, *point, *hit)
            }
            GestureInput::Hold { point, .. } => {
                let threshold = self.config.drag_threshold_px;
                let Some(session) = self.session.as_mut() else {
                    return Transition(State::idle());
                };
                session.travelled |= beyond(session.press_point, *point, threshold);
                context.emit(Gesture::DragMove {
                    app: session.app,
                    origin: saturating_sub_point(*point, session.offset),
                });
                Handled
            }
            GestureInput::Release { point, .. } => {
                if let Some(session) = self.session.take() {
                    if session.lift == Some(Lift::Hold) && !session.travelled {
                        self.last_tap = None;
                        context.emit(Gesture::LongPress {
                            app: session.app,
                            at: *point,
                        });
                    } else {
                        context.emit(Gesture::DragCommitted { app: session.app });
                    }
                }
                Transition(State::idle())
            }
            GestureInput::ArmForceDrag { .. } => Super,
        }
    }

    #[superstate]
    fn armable(&mut self, event: &GestureInput) -> Outcome<State> {
        match event {
            GestureInput::ArmForceDrag { app } => {
                self.force_drag = Some(*app);
                Handled
            }
            _ => Handled,
        }
    }
}

/// Gesture classifier for the desktop.
pub struct GestureClassifier {
    machine: statig::blocking::StateMachine<GestureHsm>,
}

impl GestureClassifier {
    /// New classifier with no session.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            machine: GestureHsm::new(config).state_machine(),
        }
    }

    /// Feed one input and collect the resulting gestures.
    pub fn handle(&mut self, input: GestureInput) -> GestureOutput {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&input, &mut context);
        context.finish()
    }

    /// Make the next press on `app` start as a confirmed drag.
    pub fn arm_force_drag(&mut self, app: App) {
        let _ = self.handle(GestureInput::ArmForceDrag { app });
    }

    /// Item armed for a forced drag, if any.
    pub fn armed(&self) -> Option<App> {
        self.machine.inner().force_drag
    }

    /// Item of the current press session.
    pub fn session_app(&self) -> Option<App> {
        self.machine.inner().session.map(|s| s.app)
    }

    /// The current session is a confirmed drag.
    pub fn is_dragging(&self) -> bool {
        self.machine
            .inner()
            .session
            .is_some_and(|s| s.lift.is_some())
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    fn hit(app: App, on_body: bool) -> Option<Hit> {
        Some(Hit {
            app,
            on_body,
            origin: app.spec().home,
        })
    }

    fn press(g: &mut GestureClassifier, now_ms: u64, x: i32, y: i32, hit: Option<Hit>) -> GestureOutput {
        g.handle(GestureInput::Press {
            now_ms,
            point: Point::new(x, y),
            hit,
        })
    }

    fn hold(g: &mut GestureClassifier, now_ms: u64, x: i32, y: i32) -> GestureOutput {
        g.handle(GestureInput::Hold {
            now_ms,
            point: Point::new(x, y),
        })
    }

    fn release(g: &mut GestureClassifier, now_ms: u64, x: i32, y: i32) -> GestureOutput {
        g.handle(GestureInput::Release {
            now_ms,
            point: Point::new(x, y),
        })
    }

    fn only(out: GestureOutput) -> Gesture {
        let mut it = out.iter();
        let first = it.next();
        assert!(it.next().is_none(), "expected a single gesture: {out:?}");
        match first {
            Some(g) => g,
            None => panic!("expected a gesture"),
        }
    }

    #[test]
    fn test_press_on_item_selects() {
        let mut g = GestureClassifier::default();
        let out = press(&mut g, 0, 30, 50, hit(App::Chat, true));
        assert_eq!(only(out), Gesture::Select(Some(App::Chat)));
        assert_eq!(g.session_app(), Some(App::Chat));
    }

    #[test]
    fn test_press_on_empty_clears_selection() {
        let mut g = GestureClassifier::default();
        let out = press(&mut g, 0, 300, 10, None);
        assert_eq!(only(out), Gesture::Select(None));
        assert_eq!(g.session_app(), None);
        assert!(release(&mut g, 50, 300, 10).is_empty());
    }

    #[test]
    fn test_quick_still_press_is_tap() {
        let mut g = GestureClassifier::default();
        press(&mut g, 0, 30, 50, hit(App::Chat, true));
        assert!(hold(&mut g, 100, 33, 52).is_empty());
        let out = release(&mut g, 200, 33, 52);
        assert_eq!(
            only(out),
            Gesture::Tap {
                app: App::Chat,
                double: false
            }
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut g = GestureClassifier::default();
        press(&mut g, 0, 30, 50, hit(App::Chat, true));
        // Exactly 10 px is not a drag.
        assert!(hold(&mut g, 50, 40, 60).is_empty());
        assert!(!g.is_dragging());
        let out = hold(&mut g, 60, 41, 60);
        assert_eq!(
            only(out),
            Gesture::DragMove {
                app: App::Chat,
                origin: Point::new(35, 50)
            }
        );
        assert!(g.is_dragging());
    }

    #[test]
    fn test_drag_follows_offset_and_commits() {
        let mut g = GestureClassifier::default();
        // Grab Chat (home 24,40) at (30,50): offset (6,10).
        press(&mut g, 0, 30, 50, hit(App::Chat, true));
        hold(&mut g, 20, 60, 50);
        let out = hold(&mut g, 40, 106, 110);
        assert_eq!(
            only(out),
            Gesture::DragMove {
                app: App::Chat,
                origin: Point::new(100, 100)
            }
        );
        let out = release(&mut g, 60, 106, 110);
        assert_eq!(only(out), Gesture::DragCommitted { app: App::Chat });
        assert!(!g.is_dragging());
    }

    #[test]
    fn test_drag_to_extreme_coordinates_saturates() {
        let mut g = GestureClassifier::default();
        press(&mut g, 0, 30, 50, hit(App::Chat, true));
        let out = hold(&mut g, 10, i32::MIN, 50);
        assert_eq!(
            only(out),
            Gesture::DragMove {
                app: App::Chat,
                origin: Point::new(i32::MIN, 40)
            }
        );
        let out = hold(&mut g, 20, i32::MAX, i32::MIN);
        assert_eq!(
            only(out),
            Gesture::DragMove {
                app: App::Chat,
                origin: Point::new(i32::MAX - 6, i32::MIN)
            }
        );
        assert_eq!(
            only(release(&mut g, 30, i32::MAX, i32::MIN)),
            Gesture::DragCommitted { app: App::Chat }
        );
    }

    #[test]
    fn test_press_far_from_item_origin_saturates() {
        let mut g = GestureClassifier::default();
        let far = Some(Hit {
            app: App::Chat,
            on_body: true,
            origin: Point::new(i32::MAX, i32::MAX),
        });
        press(&mut g, 0, i32::MIN, i32::MIN, far);
        let out = hold(&mut g, 10, i32::MIN + 20, i32::MIN);
        assert_eq!(
            only(out),
            Gesture::DragMove {
                app: App::Chat,
                // The grab offset saturated to (MIN, MIN).
                origin: Point::new(20, 0)
            }
        );
    }

    #[test]
    fn test_long_hold_without_moving_is_long_press() {
        let mut g = GestureClassifier::default();
        press(&mut g, 0, 24, 40, hit(App::Chat, true));
        for t in (20..=400).step_by(20) {
            let out = hold(&mut g, t, 24, 40);
            for gesture in out.iter() {
                assert!(!matches!(gesture, Gesture::Tap { .. }));
            }
        }
        let out = release(&mut g, 400, 24, 40);
        assert_eq!(
            only(out),
            Gesture::LongPress {
                app: App::Chat,
                at: Point::new(24, 40)
            }
        );
    }

    #[test]
    fn test_long_press_without_hold_samples() {
        let mut g = GestureClassifier::default();
        press(&mut g, 0, 24, 40, hit(App::Chat, true));
        let out = release(&mut g, 380, 25, 41);
        assert_eq!(
            only(out),
            Gesture::LongPress {
                app: App::Chat,
                at: Point::new(25, 41)
            }
        );
    }

    #[test]
    fn test_hold_lift_then_travel_is_drag() {
        let mut g = GestureClassifier::default();
        press(&mut g, 0, 24, 40, hit(App::Chat, true));
        hold(&mut g, 400, 24, 40);
        assert!(g.is_dragging());
        hold(&mut g, 420, 80, 90);
        let out = release(&mut g, 440, 80, 90);
        assert_eq!(only(out), Gesture::DragCommitted { app: App::Chat });
    }

    #[test]
    fn test_padding_press_ignores_hold() {
        let mut g = GestureClassifier::default();
        press(&mut g, 0, 10, 95, hit(App::Chat, false));
        assert!(hold(&mut g, 50, 100, 150).is_empty());
        assert!(hold(&mut g, 500, 100, 150).is_empty());
        let out = release(&mut g, 500, 100, 150);
        assert_eq!(
            only(out),
            Gesture::LongPress {
                app: App::Chat,
                at: Point::new(100, 150)
            }
        );
    }

    #[test]
    fn test_double_tap_flag() {
        let mut g = GestureClassifier::default();
        press(&mut g, 0, 30, 50, hit(App::Chat, true));
        release(&mut g, 50, 30, 50);
        press(&mut g, 200, 30, 50, hit(App::Chat, true));
        let out = release(&mut g, 250, 30, 50);
        assert_eq!(
            only(out),
            Gesture::Tap {
                app: App::Chat,
                double: true
            }
        );

        // Different app never pairs.
        press(&mut g, 300, 100, 50, hit(App::Internet, true));
        let out = release(&mut g, 320, 100, 50);
        assert_eq!(
            only(out),
            Gesture::Tap {
                app: App::Internet,
                double: false
            }
        );
    }

    #[test]
    fn test_double_tap_window_expires() {
        let mut g = GestureClassifier::default();
        press(&mut g, 0, 30, 50, hit(App::Chat, true));
        release(&mut g, 50, 30, 50);
        press(&mut g, 600, 30, 50, hit(App::Chat, true));
        let out = release(&mut g, 650, 30, 50);
        assert_eq!(
            only(out),
            Gesture::Tap {
                app: App::Chat,
                double: false
            }
        );
    }

    #[test]
    fn test_empty_press_clears_double_tap_memory() {
        let mut g = GestureClassifier::default();
        press(&mut g, 0, 30, 50, hit(App::Chat, true));
        release(&mut g, 50, 30, 50);
        press(&mut g, 100, 300, 10, None);
        release(&mut g, 120, 300, 10);
        press(&mut g, 200, 30, 50, hit(App::Chat, true));
        let out = release(&mut g, 250, 30, 50);
        assert_eq!(
            only(out),
            Gesture::Tap {
                app: App::Chat,
                double: false
            }
        );
    }

    #[test]
    fn test_force_drag_starts_moved() {
        let mut g = GestureClassifier::default();
        g.arm_force_drag(App::Chat);
        assert_eq!(g.armed(), Some(App::Chat));

        press(&mut g, 0, 30, 95, hit(App::Chat, false));
        assert_eq!(g.armed(), None, "arm is consumed by the press");
        assert!(g.is_dragging());

        // Padding press: no offset, origin follows the finger.
        let out = hold(&mut g, 10, 32, 96);
        assert_eq!(
            only(out),
            Gesture::DragMove {
                app: App::Chat,
                origin: Point::new(32, 96)
            }
        );
        let out = release(&mut g, 20, 32, 96);
        assert_eq!(only(out), Gesture::DragCommitted { app: App::Chat });
    }

    #[test]
    fn test_force_drag_consumed_by_other_target() {
        let mut g = GestureClassifier::default();
        g.arm_force_drag(App::Chat);
        press(&mut g, 0, 100, 50, hit(App::Internet, true));
        assert!(!g.is_dragging());
        release(&mut g, 20, 100, 50);

        press(&mut g, 100, 30, 50, hit(App::Chat, true));
        assert!(!g.is_dragging());
    }

    #[test]
    fn test_press_resets_stale_session() {
        let mut g = GestureClassifier::default();
        press(&mut g, 0, 30, 50, hit(App::Chat, true));
        hold(&mut g, 10, 80, 50);
        assert!(g.is_dragging());
        let out = press(&mut g, 20, 100, 50, hit(App::Internet, true));
        assert_eq!(only(out), Gesture::Select(Some(App::Internet)));
        assert!(!g.is_dragging());
        assert_eq!(g.session_app(), Some(App::Internet));
    }
}
