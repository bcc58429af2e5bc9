//! Chat screen.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ AI Chat                       [BACK] │  header
//! │ You: hello                           │
//! │ AI: hi there                         │  history (drag to scroll)
//! │                              [HIDE]  │
//! │ [> input text              ] [SEND]  │  input bar
//! ├──────────────────────────────────────┤  keyboard.top()
//! │            keyboard                  │
//! └──────────────────────────────────────┘
//! ```
//!
//! The input bar sits above the keyboard while it is shown and at the
//! bottom of the screen otherwise. The history area fills the space between
//! the header and the input bar.

use core::mem;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use platform::{AiBackend, Font, Keyboard, KeyboardEvent, Surface, TextAlign, TextColors, TextMetrics, TouchSample};

use super::history::{bounded_display, bounded_text, ChatHistory, ChatMessage};
use crate::{
    config::{ChatLayout, ShellConfig},
    geometry::{contains, from_edges, px},
    palette::Palette,
    scroll::ScrollState,
    wrap::wrap,
};

const TITLE: &str = "AI Chat";
const BUTTON_RADIUS: u32 = 6;
const BACK_RADIUS: u32 = 2;

/// Event the chat screen hands back to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChatEvent {
    /// BACK pressed
    Back,
    /// A message was sent and answered
    Sent,
}

/// Longest suffix of `text` that fits `max_width`.
pub fn input_tail<M: TextMetrics>(text: &str, max_width: u32, metrics: M) -> &str {
    text.char_indices()
        .map(|(idx, _)| idx)
        .chain(core::iter::once(text.len()))
        .find_map(|idx| {
            let tail = text.get(idx..)?;
            (metrics.text_width(tail) <= max_width).then_some(tail)
        })
        .unwrap_or("")
}

/// Chat screen state: history, scroll position and layout.
pub struct ChatView {
    layout: ChatLayout,
    screen: Size,
    palette: Palette,
    history: ChatHistory,
    scroll: ScrollState,
    keyboard_visible: bool,
    keyboard_touch: bool,
    input_y: i32,
}

impl ChatView {
    /// Empty chat with the keyboard shown.
    pub fn new(config: &ShellConfig) -> Self {
        let mut view = Self {
            layout: config.chat,
            screen: config.screen,
            palette: Palette::default(),
            history: ChatHistory::new(),
            scroll: ScrollState::new(config.chat.line_height),
            keyboard_visible: true,
            keyboard_touch: false,
            input_y: 0,
        };
        view.apply_layout(px(config.screen.height));
        view
    }

    /// Stored exchanges.
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Scroll position of the history.
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Keyboard is part of the layout.
    pub fn keyboard_visible(&self) -> bool {
        self.keyboard_visible
    }

    /// Top edge of the input bar.
    pub fn input_y(&self) -> i32 {
        self.input_y
    }

    /// Bottom edge (exclusive) of the history area.
    pub fn chat_bottom(&self) -> i32 {
        self.input_y.saturating_sub(self.layout.gap)
    }

    /// BACK button.
    pub fn back_button(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.layout.back_x, self.layout.back_y),
            self.layout.back_size,
        )
    }

    /// HIDE/SHOW toggle above SEND.
    pub fn toggle_button(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.layout.button_x, self.input_y.saturating_sub(self.layout.toggle_lift)),
            Size::new(self.layout.button_width, self.layout.toggle_height),
        )
    }

    /// Input field.
    pub fn input_field(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.layout.input_x, self.input_y),
            Size::new(self.layout.input_width, self.layout.input_height),
        )
    }

    /// SEND button.
    pub fn send_button(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.layout.button_x, self.input_y),
            Size::new(self.layout.button_width, self.layout.input_height),
        )
    }

    /// History area.
    pub fn history_area(&self) -> Rectangle {
        from_edges(
            0,
            self.layout.chat_top,
            px(self.screen.width),
            self.chat_bottom(),
        )
    }

    fn apply_layout(&mut self, keyboard_top: i32) {
        let base = if self.keyboard_visible {
            keyboard_top
        } else {
            px(self.screen.height)
        };
        self.input_y = base
            .saturating_sub(px(self.layout.input_height))
            .saturating_sub(self.layout.gap);
        self.scroll.set_viewport(
            self.layout
                .chat_top
                .saturating_add(self.layout.first_line_offset),
            self.chat_bottom(),
        );
    }

    /// Full repaint, used on screen entry and relayout.
    pub fn draw<S, K>(&mut self, surface: &mut S, keyboard: &mut K) -> Result<(), S::Error>
    where
        S: Surface,
        K: Keyboard,
    {
        self.apply_layout(keyboard.top());
        surface.fill_rect(
            Rectangle::new(Point::zero(), self.screen),
            self.palette.chat_background,
        )?;
        self.draw_header(surface)?;
        self.draw_history(surface)?;
        self.draw_input_bar(surface)?;
        self.draw_input_text(surface, keyboard.text())?;

        keyboard.set_visible(self.keyboard_visible);
        if self.keyboard_visible {
            keyboard.draw(surface)?;
        }
        Ok(())
    }

    fn draw_header<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let header = Rectangle::new(
            Point::zero(),
            Size::new(self.screen.width, self.layout.header_height),
        );
        surface.fill_rect(header, self.palette.chat_header)?;
        surface.draw_text(
            TITLE,
            Point::new(10, 6),
            TextAlign::TopLeft,
            Font::Body,
            TextColors::on(self.palette.label_text, self.palette.chat_header),
        )?;

        let back = self.back_button();
        surface.fill_round_rect(back, BACK_RADIUS, self.palette.chat_button)?;
        surface.stroke_round_rect(back, BACK_RADIUS, self.palette.chat_outline)?;
        surface.draw_text(
            "BACK",
            Point::new(back.center().x, back.top_left.y.saturating_add(4)),
            TextAlign::TopCenter,
            Font::Small,
            TextColors::on(self.palette.chat_outline, self.palette.chat_button),
        )
    }

    fn draw_input_bar<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let field = self.input_field();
        surface.stroke_rect(field, self.palette.chat_outline)?;
        surface.draw_text(
            ">",
            Point::new(field.top_left.x.saturating_add(4), self.input_y.saturating_add(6)),
            TextAlign::TopLeft,
            Font::Body,
            TextColors::on(self.palette.chat_text, self.palette.chat_background),
        )?;

        let send = self.send_button();
        surface.fill_round_rect(send, BUTTON_RADIUS, self.palette.chat_send)?;
        surface.draw_text(
            "SEND",
            Point::new(send.center().x, self.input_y.saturating_add(6)),
            TextAlign::TopCenter,
            Font::Body,
            TextColors::on(Rgb565::WHITE, self.palette.chat_send),
        )?;

        let toggle = self.toggle_button();
        surface.fill_round_rect(toggle, BUTTON_RADIUS, self.palette.chat_button)?;
        surface.draw_text(
            if self.keyboard_visible { "HIDE" } else { "SHOW" },
            Point::new(toggle.center().x, toggle.top_left.y.saturating_add(4)),
            TextAlign::TopCenter,
            Font::Body,
            TextColors::on(self.palette.chat_text, self.palette.chat_button),
        )
    }

    /// Repaint the input text, keeping the tail that fits.
    fn draw_input_text<S: Surface>(&self, surface: &mut S, text: &str) -> Result<(), S::Error> {
        let x = self.layout.input_text_x;
        surface.fill_rect(
            Rectangle::new(
                Point::new(x.saturating_sub(2), self.input_y.saturating_add(2)),
                Size::new(
                    self.layout.input_text_width,
                    self.layout.input_height.saturating_sub(4),
                ),
            ),
            self.palette.chat_background,
        )?;
        let tail = input_tail(text, self.layout.input_text_width, surface.metrics(Font::Body));
        if tail.is_empty() {
            return Ok(());
        }
        surface.draw_text(
            tail,
            Point::new(x, self.input_y.saturating_add(6)),
            TextAlign::TopLeft,
            Font::Body,
            TextColors::on(self.palette.chat_text, self.palette.chat_background),
        )
    }

    fn recount<S: Surface>(&mut self, surface: &S) {
        let total = self
            .history
            .total_lines(self.layout.text_width(), surface.metrics(Font::Body));
        self.scroll.set_total_lines(total);
    }

    /// Clear the history area and draw the visible window.
    fn draw_history<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        self.recount(surface);
        self.scroll.clamp();
        self.paint_history(surface)
    }

    fn paint_history<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.fill_rect(self.history_area(), self.palette.chat_background)?;
        let window = self.scroll.window();
        self.render_window(surface, window.start, window.end)
    }

    /// Draw the logical lines `first..last` of the history, top to bottom.
    ///
    /// Paragraphs are re-wrapped on the fly; lines before `first` are
    /// counted but not drawn, and the walk stops at `last`.
    pub fn render_window<S: Surface>(
        &self,
        surface: &mut S,
        first: usize,
        last: usize,
    ) -> Result<(), S::Error> {
        let metrics = surface.metrics(Font::Body);
        let width = self.layout.text_width();
        let colors = TextColors::on(self.palette.chat_text, self.palette.chat_background);
        let mut index = 0;
        let mut y = self
            .layout
            .chat_top
            .saturating_add(self.layout.first_line_offset);

        for message in self.history.iter() {
            for paragraph in message.paragraphs() {
                for line in wrap(&paragraph, width, metrics) {
                    if index >= last {
                        return Ok(());
                    }
                    if index >= first {
                        surface.draw_text(
                            &line,
                            Point::new(self.layout.text_x0, y),
                            TextAlign::TopLeft,
                            Font::Body,
                            colors,
                        )?;
                        y = y.saturating_add(px(self.layout.line_height));
                    }
                    index = index.saturating_add(1);
                }
            }
        }
        Ok(())
    }

    /// Process one touch sample.
    pub fn handle_touch<S, K, B>(
        &mut self,
        sample: TouchSample,
        surface: &mut S,
        keyboard: &mut K,
        backend: &mut B,
    ) -> Result<Option<ChatEvent>, S::Error>
    where
        S: Surface,
        K: Keyboard,
        B: AiBackend,
    {
        if sample.is_idle() {
            return Ok(None);
        }
        self.apply_layout(keyboard.top());
        let point = sample.point;

        if sample.is_release() {
            self.scroll.end_drag();
            if mem::take(&mut self.keyboard_touch) && self.keyboard_visible {
                let event = keyboard.handle_touch(false, point);
                self.apply_keyboard_event(event, surface, keyboard)?;
            }
            return Ok(None);
        }

        if self.keyboard_visible && !self.scroll.is_dragging() && point.y >= keyboard.top() {
            if sample.is_press() {
                self.keyboard_touch = true;
            }
            if self.keyboard_touch {
                let event = keyboard.handle_touch(true, point);
                self.apply_keyboard_event(event, surface, keyboard)?;
            }
            return Ok(None);
        }

        if sample.is_press() {
            if contains(&self.back_button(), point) {
                tracing::debug!("chat back");
                return Ok(Some(ChatEvent::Back));
            }
            if contains(&self.toggle_button(), point) {
                self.set_keyboard_visible(!self.keyboard_visible, surface, keyboard)?;
                return Ok(None);
            }
            if !self.keyboard_visible && contains(&self.input_field(), point) {
                self.set_keyboard_visible(true, surface, keyboard)?;
                return Ok(None);
            }
        }

        if contains(&self.history_area(), point) {
            if self.scroll.drag_to(point.y) {
                self.paint_history(surface)?;
            }
            return Ok(None);
        }

        if sample.is_press() && contains(&self.send_button(), point) {
            let sent = self.send(surface, keyboard, backend)?;
            return Ok(sent.then_some(ChatEvent::Sent));
        }
        Ok(None)
    }

    fn set_keyboard_visible<S, K>(
        &mut self,
        visible: bool,
        surface: &mut S,
        keyboard: &mut K,
    ) -> Result<(), S::Error>
    where
        S: Surface,
        K: Keyboard,
    {
        tracing::debug!(visible, "keyboard toggled");
        self.keyboard_visible = visible;
        self.keyboard_touch = false;
        self.draw(surface, keyboard)
    }

    fn apply_keyboard_event<S, K>(
        &mut self,
        event: KeyboardEvent,
        surface: &mut S,
        keyboard: &mut K,
    ) -> Result<(), S::Error>
    where
        S: Surface,
        K: Keyboard,
    {
        match event {
            KeyboardEvent::Unchanged => Ok(()),
            KeyboardEvent::TextChanged => self.draw_input_text(surface, keyboard.text()),
            KeyboardEvent::RequestRedraw => keyboard.draw(surface),
            KeyboardEvent::RequestHide => self.set_keyboard_visible(false, surface, keyboard),
        }
    }

    /// Send the composed text and append the exchange.
    ///
    /// Blank input is ignored. A backend failure is stored in place of the
    /// reply. Returns whether anything was sent.
    pub fn send<S, K, B>(
        &mut self,
        surface: &mut S,
        keyboard: &mut K,
        backend: &mut B,
    ) -> Result<bool, S::Error>
    where
        S: Surface,
        K: Keyboard,
        B: AiBackend,
    {
        let user = bounded_text(keyboard.text().trim());
        if user.is_empty() {
            return Ok(false);
        }

        let reply = match backend.send_message(&user) {
            Ok(reply) => bounded_text(&reply),
            Err(error) => {
                tracing::warn!(%error, "assistant request failed");
                bounded_display(&error)
            }
        };
        tracing::debug!(bytes = user.len(), "message sent");
        self.history.push(ChatMessage { user, reply });
        keyboard.clear();

        self.recount(surface);
        self.scroll.snap_to_bottom();
        self.paint_history(surface)?;
        self.draw_input_bar(surface)?;
        self.draw_input_text(surface, keyboard.text())?;
        Ok(true)
    }

    /// Leave the screen: drop drag and keyboard press state.
    pub fn release(&mut self) {
        self.scroll.end_drag();
        self.keyboard_touch = false;
    }
}
