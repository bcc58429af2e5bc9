//! Chat scenarios driven through the `Shell` router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::arithmetic_side_effects)]

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use platform::{
    mocks::{CannedBackend, RecordingSurface, ScriptedKeyboard},
    SolidWallpaper, TouchSample,
};
use proptest::prelude::*;
use shell::{ChatView, Devices, Screen, Shell, ShellConfig};

const SCREEN: Size = Size::new(320, 240);
const CHAT_ICON: Point = Point::new(30, 50);
const BACK: Point = Point::new(270, 10);

struct Rig {
    surface: RecordingSurface,
    wallpaper: SolidWallpaper,
    keyboard: ScriptedKeyboard,
    backend: CannedBackend,
    shell: Shell,
    down: bool,
    now_ms: u64,
}

impl Rig {
    fn new() -> Self {
        Self {
            surface: RecordingSurface::new(SCREEN),
            wallpaper: SolidWallpaper::new(SCREEN, Rgb565::BLACK),
            keyboard: ScriptedKeyboard::default(),
            backend: CannedBackend::new(),
            shell: Shell::new(&ShellConfig::default()),
            down: false,
            now_ms: 0,
        }
    }

    fn touch(&mut self, pressed: bool, point: Point) {
        self.now_ms += 40;
        let sample = TouchSample::new(pressed, self.down, point, self.now_ms);
        self.down = pressed;
        let mut devices = Devices {
            surface: &mut self.surface,
            wallpaper: &self.wallpaper,
            keyboard: &mut self.keyboard,
            backend: &mut self.backend,
        };
        self.shell.tick(sample, &mut devices).unwrap();
    }

    fn tap(&mut self, point: Point) {
        self.touch(true, point);
        self.touch(false, point);
        // Keep taps apart so they never pair up as a double tap.
        self.now_ms += 1000;
    }

    fn chat(&self) -> &ChatView {
        self.shell.chat()
    }

    fn send(&mut self, text: &str, reply: &str) {
        self.keyboard.set_text(text);
        self.backend.push_reply(reply);
        let send = self.chat().send_button().center();
        self.tap(send);
    }
}

/// Scenario A: a sent message and its reply are kept, shown at the bottom,
/// and still there after leaving and re-entering the chat.
#[test]
fn test_send_and_reopen_preserves_history() {
    let mut rig = Rig::new();
    rig.tap(CHAT_ICON);
    assert_eq!(rig.shell.current(), Screen::Chat);

    rig.send("hello", "hi there");
    assert_eq!(rig.backend.sent(), ["hello"]);
    assert_eq!(rig.chat().history().len(), 1);
    let scroll = rig.chat().scroll();
    assert_eq!(scroll.offset(), scroll.max_offset());

    rig.tap(BACK);
    assert_eq!(rig.shell.current(), Screen::Desktop);
    assert!(!rig.keyboard.is_visible());

    rig.surface.clear();
    rig.tap(CHAT_ICON);
    assert_eq!(rig.shell.current(), Screen::Chat);
    assert_eq!(rig.chat().history().len(), 1);
    let texts = rig.surface.texts();
    assert!(texts.contains(&"You: hello"));
    assert!(texts.contains(&"AI: hi there"));
}

#[test]
fn test_history_snaps_to_newest_after_many_sends() {
    let mut rig = Rig::new();
    rig.tap(CHAT_ICON);
    for i in 0..13 {
        rig.send(&format!("question {i}"), &format!("answer {i}"));
    }

    let history = rig.chat().history();
    assert_eq!(history.len(), 12);
    assert_eq!(history.iter().next().unwrap().user.as_str(), "question 1");

    let scroll = rig.chat().scroll();
    assert_eq!(scroll.total_lines(), 24);
    assert_eq!(scroll.offset(), scroll.max_offset());
    assert!(scroll.offset() > 0);

    rig.surface.clear();
    rig.send("last", "done");
    let texts = rig.surface.texts();
    assert!(texts.contains(&"AI: done"));
    assert!(!texts.contains(&"You: question 2"));
}

#[test]
fn test_drag_up_then_down_returns_to_bottom() {
    let mut rig = Rig::new();
    rig.tap(CHAT_ICON);
    for i in 0..6 {
        rig.send(&format!("q{i}"), "a");
    }
    let bottom = rig.chat().scroll().offset();
    assert!(bottom > 0);

    // Finger down by two lines reveals two older lines.
    rig.touch(true, Point::new(100, 50));
    rig.touch(true, Point::new(100, 66));
    rig.touch(true, Point::new(100, 82));
    assert_eq!(rig.chat().scroll().offset(), bottom - 2);
    rig.touch(false, Point::new(100, 82));

    rig.touch(true, Point::new(100, 82));
    rig.touch(true, Point::new(100, 50));
    rig.touch(false, Point::new(100, 50));
    assert_eq!(rig.chat().scroll().offset(), bottom);
}

#[test]
fn test_send_without_text_is_ignored() {
    let mut rig = Rig::new();
    rig.tap(CHAT_ICON);
    let send = rig.chat().send_button().center();
    rig.tap(send);
    assert!(rig.backend.sent().is_empty());
    assert!(rig.chat().history().is_empty());
}

proptest! {
    /// Touches anywhere in the i32 plane never panic on the chat screen,
    /// and the history scroll stays within its range.
    #[test]
    fn extreme_touches_keep_scroll_in_range(
        touches in proptest::collection::vec((any::<bool>(), any::<i32>(), any::<i32>()), 1..24),
    ) {
        let mut rig = Rig::new();
        rig.tap(CHAT_ICON);
        for i in 0..6 {
            rig.send(&format!("q{i}"), "a");
        }
        for (pressed, x, y) in touches {
            rig.touch(pressed, Point::new(x, y));
            if rig.shell.current() != Screen::Chat {
                break;
            }
            let scroll = rig.chat().scroll();
            prop_assert!(scroll.offset() <= scroll.max_offset());
        }
        rig.touch(false, Point::zero());
    }
}
