//! Host stand-ins for the keyboard widget and the assistant transport.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use platform::{
    assistant::reply_from, AiBackend, BackendError, Font, Keyboard, KeyboardEvent, Reply,
    Surface, TextAlign, TextColors,
};
use tracing::{debug, info, warn};

/// Top edge of the keyboard panel.
pub const KEYBOARD_TOP: i32 = 152;

const KEY_PITCH: Point = Point::new(32, 22);
const KEY_SIZE: Size = Size::new(32, 22);
const LETTER_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl'", "zxcvbnm,.?"];

const PANEL_FILL: Rgb565 = Rgb565::new(4, 8, 4);
const KEY_FILL: Rgb565 = Rgb565::new(10, 20, 10);
const KEY_TEXT: Rgb565 = Rgb565::WHITE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Delete,
    Hide,
}

impl Key {
    fn label(self, buf: &mut [u8; 4]) -> &str {
        match self {
            Key::Char(c) => c.encode_utf8(buf),
            Key::Space => "space",
            Key::Delete => "DEL",
            Key::Hide => "HIDE",
        }
    }
}

fn cell(row: i32, col: i32, span: u32) -> Rectangle {
    Rectangle::new(
        Point::new(col * KEY_PITCH.x, KEYBOARD_TOP + row * KEY_PITCH.y),
        Size::new(KEY_SIZE.width * span, KEY_SIZE.height),
    )
}

/// Every key with its hit area, three letter rows over a control row.
fn layout() -> Vec<(Rectangle, Key)> {
    let mut keys = Vec::with_capacity(33);
    for (row, letters) in (0..).zip(LETTER_ROWS) {
        for (col, c) in (0..).zip(letters.chars()) {
            keys.push((cell(row, col, 1), Key::Char(c)));
        }
    }
    keys.push((cell(3, 0, 2), Key::Hide));
    keys.push((cell(3, 2, 6), Key::Space));
    keys.push((cell(3, 8, 2), Key::Delete));
    keys
}

pub fn key_at(point: Point) -> Option<Key> {
    layout()
        .into_iter()
        .find(|(area, _)| area.contains(point))
        .map(|(_, key)| key)
}

/// QWERTY keyboard that fires once per press.
#[derive(Debug, Default)]
pub struct SimKeyboard {
    text: String,
    visible: bool,
    down: bool,
}

impl SimKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text as if typed key by key.
    pub fn type_text(&mut self, text: &str) {
        self.text.push_str(text);
        debug!(text = %self.text, "typed");
    }
}

impl Keyboard for SimKeyboard {
    fn text(&self) -> &str {
        &self.text
    }

    fn clear(&mut self) {
        self.text.clear();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.down = false;
    }

    fn handle_touch(&mut self, pressed: bool, point: Point) -> KeyboardEvent {
        if !pressed {
            self.down = false;
            return KeyboardEvent::Unchanged;
        }
        if std::mem::replace(&mut self.down, true) {
            return KeyboardEvent::Unchanged;
        }

        let Some(key) = key_at(point) else {
            return KeyboardEvent::Unchanged;
        };
        debug!(?key, "key pressed");
        match key {
            Key::Char(c) => {
                self.text.push(c);
                KeyboardEvent::TextChanged
            }
            Key::Space => {
                self.text.push(' ');
                KeyboardEvent::TextChanged
            }
            Key::Delete => match self.text.pop() {
                Some(_) => KeyboardEvent::TextChanged,
                None => KeyboardEvent::Unchanged,
            },
            Key::Hide => KeyboardEvent::RequestHide,
        }
    }

    fn draw<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        if !self.visible {
            return Ok(());
        }
        let size = surface.size();
        let top = u32::try_from(KEYBOARD_TOP).unwrap_or(0).min(size.height);
        surface.fill_rect(
            Rectangle::new(
                Point::new(0, KEYBOARD_TOP),
                Size::new(size.width, size.height - top),
            ),
            PANEL_FILL,
        )?;

        let mut buf = [0; 4];
        for (area, key) in layout() {
            surface.fill_round_rect(area.offset(-1), 3, KEY_FILL)?;
            surface.draw_text(
                key.label(&mut buf),
                area.center(),
                TextAlign::MiddleCenter,
                Font::Small,
                TextColors::new(KEY_TEXT),
            )?;
        }
        Ok(())
    }

    fn top(&self) -> i32 {
        KEYBOARD_TOP
    }
}

/// Assistant that echoes each message back, or is offline.
#[derive(Debug, Default)]
pub struct EchoBackend {
    offline: bool,
    sent: usize,
}

impl EchoBackend {
    pub fn new(offline: bool) -> Self {
        Self { offline, sent: 0 }
    }

    /// Messages received so far.
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl AiBackend for EchoBackend {
    fn send_message(&mut self, text: &str) -> Result<Reply, BackendError> {
        self.sent += 1;
        if self.offline {
            warn!(text, "backend offline");
            return Err(BackendError::Offline);
        }
        info!(text, "assistant request");
        Ok(reply_from(&format!("echo: {text}")))
    }
}
