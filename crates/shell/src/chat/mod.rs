//! AI chat screen: bounded history, wrapped and scrolled rendering, and the
//! input bar above the on-screen keyboard.

pub mod history;
pub mod view;

pub use history::{bounded_text, ChatHistory, ChatMessage, MessageText, AI_PREFIX, USER_PREFIX};
pub use view::{input_tail, ChatEvent, ChatView};
