//! Chat assistant backend seam
//!
//! The transport (WiFi, HTTP, the remote model) lives behind [`AiBackend`].
//! The call is synchronous from the shell's point of view; an
//! implementation may block the tick until the reply arrives.

use thiserror_no_std::Error;

/// Maximum reply length in bytes kept by the backend.
pub const REPLY_CAPACITY: usize = 512;

/// Assistant reply text.
pub type Reply = heapless::String<REPLY_CAPACITY>;

/// Backend failures.
///
/// The chat view shows the `Display` form of the error in place of the
/// reply, so the messages are written for the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackendError {
    /// No network link
    #[error("[offline] connect WiFi first")]
    Offline,
    /// The request did not complete in time
    #[error("[timeout] no reply from assistant")]
    Timeout,
    /// Server answered with a non-success status
    #[error("[http {0}] request failed")]
    Http(u16),
    /// Reply could not be parsed
    #[error("[error] malformed reply")]
    Malformed,
}

/// Conversational assistant.
pub trait AiBackend {
    /// Send one user message and wait for the reply.
    fn send_message(&mut self, text: &str) -> Result<Reply, BackendError>;
}

/// Copy `text` into a [`Reply`], truncating at a char boundary.
pub fn reply_from(text: &str) -> Reply {
    let mut end = text.len().min(REPLY_CAPACITY);
    while !text.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    let mut reply = Reply::new();
    if let Some(head) = text.get(..end) {
        // Fits by construction.
        let _ = reply.push_str(head);
    }
    reply
}
