//! Screen stack.
//!
//! The desktop is the root and can never be popped. Pushing onto a full
//! stack is a silent no-op.

use heapless::Vec;

const DEPTH: usize = 4;

/// Top-level screens the shell renders itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Icon desktop (root).
    Desktop,
    /// AI chat.
    Chat,
}

/// Navigation stack bounded at [`DEPTH`] entries.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen, DEPTH>,
}

impl Navigator {
    /// Navigator showing the desktop.
    pub fn new() -> Self {
        let mut stack = Vec::new();
        // Empty stack, always room.
        stack.push(Screen::Desktop).ok();
        Navigator { stack }
    }

    /// Screen on top of the stack.
    #[must_use]
    pub fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(Screen::Desktop)
    }

    /// Show `screen` on top of the current one.
    pub fn open(&mut self, screen: Screen) {
        if self.current() == screen {
            return;
        }
        self.stack.push(screen).ok();
    }

    /// Return to the previous screen. Does nothing at the desktop.
    pub fn back(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Number of stacked screens.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
