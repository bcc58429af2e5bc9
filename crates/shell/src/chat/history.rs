//! Bounded chat history.

use core::fmt::{self, Display, Write as _};

use platform::TextMetrics;

use crate::{
    config::{HISTORY_CAPACITY, MESSAGE_MAX_BYTES, WRAP_LINE_BYTES},
    wrap::line_count,
};

/// Stored message text, at most [`MESSAGE_MAX_BYTES`] bytes.
pub type MessageText = heapless::String<MESSAGE_MAX_BYTES>;

/// Prefix of the user's paragraph.
pub const USER_PREFIX: &str = "You: ";
/// Prefix of the assistant's paragraph.
pub const AI_PREFIX: &str = "AI:  ";

/// A rendered paragraph: prefix followed by the message text.
pub type Paragraph = heapless::String<WRAP_LINE_BYTES>;

/// Writer that keeps whole chars until the buffer is full.
struct Truncating<'a, const N: usize> {
    out: &'a mut heapless::String<N>,
    full: bool,
}

impl<const N: usize> fmt::Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.full || self.out.push(ch).is_err() {
                self.full = true;
                break;
            }
        }
        Ok(())
    }
}

fn bounded<const N: usize>(value: impl Display) -> heapless::String<N> {
    let mut out = heapless::String::new();
    let mut writer = Truncating {
        out: &mut out,
        full: false,
    };
    // The writer never fails.
    let _ = write!(writer, "{value}");
    out
}

/// Copy `text`, silently truncated at a char boundary.
pub fn bounded_text(text: &str) -> MessageText {
    bounded(text)
}

/// Render `value` with `Display`, truncated like [`bounded_text`].
pub fn bounded_display(value: &impl Display) -> MessageText {
    bounded(value)
}

/// One exchange: what the user sent and what came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// User text
    pub user: MessageText,
    /// Assistant reply, or the failure shown in its place
    pub reply: MessageText,
}

impl ChatMessage {
    /// Message from borrowed text, truncating both sides.
    pub fn new(user: &str, reply: &str) -> Self {
        Self {
            user: bounded_text(user),
            reply: bounded_text(reply),
        }
    }

    /// The two paragraphs shown in the history, user first.
    pub fn paragraphs(&self) -> [Paragraph; 2] {
        [
            bounded(format_args!("{USER_PREFIX}{}", self.user)),
            bounded(format_args!("{AI_PREFIX}{}", self.reply)),
        ]
    }

    /// Wrapped line count of both paragraphs.
    pub fn line_count<M: TextMetrics + Copy>(&self, max_width: u32, metrics: M) -> usize {
        self.paragraphs()
            .iter()
            .map(|p| line_count(p, max_width, metrics))
            .sum()
    }
}

/// Newest-last history of at most [`HISTORY_CAPACITY`] exchanges.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    messages: heapless::Vec<ChatMessage, HISTORY_CAPACITY>,
}

impl ChatHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an exchange, evicting the oldest when full.
    pub fn push(&mut self, message: ChatMessage) {
        if self.messages.is_full() {
            self.messages.remove(0);
        }
        // Room was made above.
        let _ = self.messages.push(message);
    }

    /// Number of stored exchanges.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// No exchanges yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Exchanges, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    /// Most recent exchange.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Wrapped line count of the whole history.
    pub fn total_lines<M: TextMetrics + Copy>(&self, max_width: u32, metrics: M) -> usize {
        self.iter().map(|m| m.line_count(max_width, metrics)).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use platform::{mocks::FixedMetrics, BackendError, Font};

    #[test]
    fn test_bounded_text_truncates_on_char_boundary() {
        let long = "é".repeat(300);
        let text = bounded_text(&long);
        assert!(text.len() <= MESSAGE_MAX_BYTES);
        assert_eq!(text.len(), 398);
        assert!(text.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_bounded_display_renders_error() {
        let text = bounded_display(&BackendError::Offline);
        assert_eq!(text.as_str(), "[offline] connect WiFi first");
    }

    #[test]
    fn test_paragraph_prefixes() {
        let message = ChatMessage::new("hello", "hi there");
        let [user, ai] = message.paragraphs();
        assert_eq!(user.as_str(), "You: hello");
        assert_eq!(ai.as_str(), "AI:  hi there");
    }

    #[test]
    fn test_eviction_keeps_newest() {
        let mut history = ChatHistory::new();
        for i in 0..=HISTORY_CAPACITY {
            history.push(ChatMessage::new(&format!("m{i}"), "r"));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.iter().next().unwrap().user.as_str(), "m1");
        assert_eq!(history.last().unwrap().user.as_str(), "m12");
    }

    #[test]
    fn test_total_lines() {
        let mut history = ChatHistory::new();
        assert_eq!(history.total_lines(308, FixedMetrics::new(Font::Body)), 0);

        history.push(ChatMessage::new("hello", "hi there"));
        // "You: hello" and "AI: hi there" fit on one 308 px line each.
        assert_eq!(history.total_lines(308, FixedMetrics::new(Font::Body)), 2);
        // At 35 px (5 chars): "You:" "hello" / "AI:" "hi" "there".
        assert_eq!(history.total_lines(35, FixedMetrics::new(Font::Body)), 5);
    }
}
