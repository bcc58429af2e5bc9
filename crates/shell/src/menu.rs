//! Long-press context menu.
//!
//! A modal popup with four fixed rows. While open it consumes every touch:
//! finger-down picks the row under the finger, dragging moves the highlight,
//! finger-up closes the popup and commits the highlighted row. A press
//! outside the popup cancels it.

use embedded_graphics::{prelude::*, primitives::Rectangle};
use platform::{Font, Surface, TextAlign, TextColors};

use crate::{
    config::MenuMetrics,
    geometry::{contains, px},
    items::App,
    palette::Palette,
};

/// Menu rows, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuRow {
    /// Launch the app
    Open,
    /// Arm a drag of the item
    Move,
    /// Show item properties
    Properties,
    /// Dismiss
    Cancel,
}

impl MenuRow {
    /// Rows in display order.
    pub const ALL: [MenuRow; 4] = [
        MenuRow::Open,
        MenuRow::Move,
        MenuRow::Properties,
        MenuRow::Cancel,
    ];

    /// Row caption.
    pub fn label(self) -> &'static str {
        match self {
            MenuRow::Open => "Open",
            MenuRow::Move => "Move",
            MenuRow::Properties => "Properties",
            MenuRow::Cancel => "Cancel",
        }
    }

    fn index(self) -> i32 {
        match self {
            MenuRow::Open => 0,
            MenuRow::Move => 1,
            MenuRow::Properties => 2,
            MenuRow::Cancel => 3,
        }
    }
}

/// Open-menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    /// Item the menu was opened on
    pub app: App,
    /// Clamped top-left corner
    pub origin: Point,
    /// Row under the finger
    pub highlighted: Option<MenuRow>,
    /// A press inside the menu is in progress
    pub finger_down: bool,
}

/// Command committed by releasing on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuCommand {
    /// Open the app
    Open(App),
    /// Start the next press on the item as a drag
    Move(App),
    /// Show the item's properties
    Properties(App),
}

/// What the caller must do after feeding the menu a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuResponse {
    /// Nothing changed
    Unchanged,
    /// Highlight changed; redraw the popup
    Redraw,
    /// Popup closed; repaint the scene under `dirty`, then run `command`
    Closed {
        /// Area the popup covered
        dirty: Rectangle,
        /// Committed row, `None` on cancel
        command: Option<MenuCommand>,
    },
}

/// The context menu.
#[derive(Debug, Clone)]
pub struct ContextMenu {
    metrics: MenuMetrics,
    screen: Size,
    state: Option<MenuState>,
}

impl ContextMenu {
    /// Closed menu for a screen of `screen` pixels.
    pub fn new(metrics: MenuMetrics, screen: Size) -> Self {
        Self {
            metrics,
            screen,
            state: None,
        }
    }

    /// Popup is showing.
    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// Current state, `None` when closed.
    pub fn state(&self) -> Option<&MenuState> {
        self.state.as_ref()
    }

    /// Popup size.
    pub fn size(&self) -> Size {
        let rows = u32::try_from(MenuRow::ALL.len()).unwrap_or(0);
        Size::new(
            self.metrics.width,
            rows.saturating_mul(self.metrics.row_height)
                .saturating_add(self.metrics.inset.saturating_mul(2)),
        )
    }

    /// Popup area when open.
    pub fn bounds(&self) -> Option<Rectangle> {
        self.state
            .as_ref()
            .map(|s| Rectangle::new(s.origin, self.size()))
    }

    fn clamp_origin(&self, anchor: Point) -> Point {
        let size = self.size();
        let margin = px(self.metrics.edge_margin);
        let mut origin = anchor;
        if origin.x.saturating_add(px(size.width)) > px(self.screen.width) {
            origin.x = px(self.screen.width)
                .saturating_sub(px(size.width))
                .saturating_sub(margin);
        }
        if origin.y.saturating_add(px(size.height)) > px(self.screen.height) {
            origin.y = px(self.screen.height)
                .saturating_sub(px(size.height))
                .saturating_sub(margin);
        }
        Point::new(origin.x.max(0), origin.y.max(0))
    }

    /// Open on `app` at `anchor`; returns the popup area to draw.
    pub fn open(&mut self, app: App, anchor: Point) -> Rectangle {
        let origin = self.clamp_origin(anchor);
        self.state = Some(MenuState {
            app,
            origin,
            highlighted: None,
            finger_down: false,
        });
        tracing::debug!(?app, x = origin.x, y = origin.y, "menu opened");
        Rectangle::new(origin, self.size())
    }

    /// Close without committing; returns the area it covered.
    pub fn close(&mut self) -> Option<Rectangle> {
        let bounds = self.bounds();
        self.state = None;
        bounds
    }

    /// Row under `point`.
    pub fn row_at(&self, point: Point) -> Option<MenuRow> {
        let state = self.state.as_ref()?;
        if !contains(&Rectangle::new(state.origin, self.size()), point) {
            return None;
        }
        let rel = point
            .y
            .saturating_sub(state.origin.y)
            .saturating_sub(px(self.metrics.inset));
        if rel < 0 {
            return None;
        }
        let index = usize::try_from(rel.checked_div(px(self.metrics.row_height).max(1))?).ok()?;
        MenuRow::ALL.get(index).copied()
    }

    /// Area of `row` when open.
    pub fn row_rect(&self, row: MenuRow) -> Option<Rectangle> {
        let state = self.state.as_ref()?;
        let inset = px(self.metrics.inset);
        let top = state
            .origin
            .y
            .saturating_add(inset)
            .saturating_add(row.index().saturating_mul(px(self.metrics.row_height)));
        Some(Rectangle::new(
            Point::new(state.origin.x.saturating_add(inset), top),
            Size::new(
                self.metrics
                    .width
                    .saturating_sub(self.metrics.inset.saturating_mul(2)),
                self.metrics.row_height,
            ),
        ))
    }

    /// Finger went down while open.
    pub fn press(&mut self, point: Point) -> MenuResponse {
        if !self.is_open() {
            return MenuResponse::Unchanged;
        }
        let Some(row) = self.row_at(point) else {
            tracing::debug!("menu cancelled by outside press");
            return self.closed(None);
        };
        if let Some(state) = self.state.as_mut() {
            state.finger_down = true;
            state.highlighted = Some(row);
        }
        MenuResponse::Redraw
    }

    /// Finger moved while down.
    pub fn hold(&mut self, point: Point) -> MenuResponse {
        let row = self.row_at(point);
        match self.state.as_mut() {
            Some(state) if state.finger_down && state.highlighted != row => {
                state.highlighted = row;
                MenuResponse::Redraw
            }
            _ => MenuResponse::Unchanged,
        }
    }

    /// Finger lifted.
    pub fn release(&mut self) -> MenuResponse {
        let Some(state) = self.state else {
            return MenuResponse::Unchanged;
        };
        if !state.finger_down {
            return MenuResponse::Unchanged;
        }
        let command = match state.highlighted {
            Some(MenuRow::Open) => Some(MenuCommand::Open(state.app)),
            Some(MenuRow::Move) => Some(MenuCommand::Move(state.app)),
            Some(MenuRow::Properties) => Some(MenuCommand::Properties(state.app)),
            Some(MenuRow::Cancel) | None => None,
        };
        tracing::debug!(?command, "menu committed");
        self.closed(command)
    }

    fn closed(&mut self, command: Option<MenuCommand>) -> MenuResponse {
        match self.close() {
            Some(dirty) => MenuResponse::Closed { dirty, command },
            None => MenuResponse::Unchanged,
        }
    }

    /// Paint the popup with its current highlight.
    // The popup is clamped inside the screen, so its edges stay far from
    // the i32 range.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn draw<S: Surface>(&self, surface: &mut S, palette: &Palette) -> Result<(), S::Error> {
        let (Some(state), Some(area)) = (self.state.as_ref(), self.bounds()) else {
            return Ok(());
        };
        let Point { x, y } = area.top_left;
        let Size { width, height } = area.size;
        let (w, h) = (px(width), px(height));

        surface.fill_rect(area, palette.menu_face)?;
        surface.fill_rect(Rectangle::new(Point::new(x, y), Size::new(width, 1)), palette.menu_light)?;
        surface.fill_rect(Rectangle::new(Point::new(x, y), Size::new(1, height)), palette.menu_light)?;
        surface.fill_rect(
            Rectangle::new(Point::new(x, y + h - 1), Size::new(width, 1)),
            palette.menu_dark,
        )?;
        surface.fill_rect(
            Rectangle::new(Point::new(x + w - 1, y), Size::new(1, height)),
            palette.menu_dark,
        )?;
        surface.stroke_rect(
            Rectangle::new(
                Point::new(x + 1, y + 1),
                Size::new(width.saturating_sub(2), height.saturating_sub(2)),
            ),
            palette.menu_shade,
        )?;

        for row in MenuRow::ALL {
            let Some(rect) = self.row_rect(row) else {
                continue;
            };
            let colors = if state.highlighted == Some(row) {
                let half = rect.size.height / 2;
                surface.fill_rect(
                    Rectangle::new(rect.top_left, Size::new(rect.size.width, half)),
                    palette.highlight_top,
                )?;
                surface.fill_rect(
                    Rectangle::new(
                        rect.top_left + Point::new(0, px(half)),
                        Size::new(rect.size.width, rect.size.height - half),
                    ),
                    palette.highlight_bottom,
                )?;
                surface.stroke_rect(rect, palette.highlight_edge)?;
                TextColors::on(palette.highlight_edge, palette.highlight_bottom)
            } else {
                TextColors::on(palette.menu_text, palette.menu_face)
            };
            let anchor = rect.top_left + Point::new(px(self.metrics.text_indent), 3);
            surface.draw_text(row.label(), anchor, TextAlign::TopLeft, Font::Body, colors)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use platform::mocks::RecordingSurface;

    const SCREEN: Size = Size::new(320, 240);

    fn menu() -> ContextMenu {
        ContextMenu::new(MenuMetrics::default(), SCREEN)
    }

    #[test]
    fn test_size() {
        assert_eq!(menu().size(), Size::new(150, 86));
    }

    #[test]
    fn test_open_in_place() {
        let mut m = menu();
        let area = m.open(App::Chat, Point::new(24, 40));
        assert_eq!(area, Rectangle::new(Point::new(24, 40), Size::new(150, 86)));
        assert!(m.is_open());
        assert_eq!(m.state().unwrap().highlighted, None);
        assert!(!m.state().unwrap().finger_down);
    }

    #[test]
    fn test_open_clamped_at_edges() {
        let mut m = menu();
        let area = m.open(App::Wifi, Point::new(300, 200));
        assert_eq!(area.top_left, Point::new(320 - 150 - 2, 240 - 86 - 2));
    }

    #[test]
    fn test_row_at() {
        let mut m = menu();
        m.open(App::Chat, Point::new(24, 40));
        assert_eq!(m.row_at(Point::new(60, 41)), None, "bevel above first row");
        assert_eq!(m.row_at(Point::new(60, 43)), Some(MenuRow::Open));
        assert_eq!(m.row_at(Point::new(60, 63)), Some(MenuRow::Move));
        assert_eq!(m.row_at(Point::new(60, 90)), Some(MenuRow::Properties));
        assert_eq!(m.row_at(Point::new(60, 122)), Some(MenuRow::Cancel));
        assert_eq!(m.row_at(Point::new(60, 124)), None, "bevel below last row");
        assert_eq!(m.row_at(Point::new(200, 60)), None);
    }

    #[test]
    fn test_press_outside_cancels() {
        let mut m = menu();
        m.open(App::Chat, Point::new(24, 40));
        let response = m.press(Point::new(250, 200));
        assert_eq!(
            response,
            MenuResponse::Closed {
                dirty: Rectangle::new(Point::new(24, 40), Size::new(150, 86)),
                command: None
            }
        );
        assert!(!m.is_open());
    }

    #[test]
    fn test_drag_over_rows_then_commit() {
        let mut m = menu();
        m.open(App::Notes, Point::new(24, 40));
        assert_eq!(m.press(Point::new(60, 50)), MenuResponse::Redraw);
        assert_eq!(m.hold(Point::new(61, 51)), MenuResponse::Unchanged);
        assert_eq!(m.hold(Point::new(60, 90)), MenuResponse::Redraw);
        assert_eq!(m.state().unwrap().highlighted, Some(MenuRow::Properties));

        let response = m.release();
        assert!(matches!(
            response,
            MenuResponse::Closed {
                command: Some(MenuCommand::Properties(App::Notes)),
                ..
            }
        ));
        assert!(!m.is_open());
    }

    #[test]
    fn test_release_outside_rows_commits_nothing() {
        let mut m = menu();
        m.open(App::Chat, Point::new(24, 40));
        m.press(Point::new(60, 50));
        assert_eq!(m.hold(Point::new(300, 10)), MenuResponse::Redraw);
        assert!(matches!(m.release(), MenuResponse::Closed { command: None, .. }));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut m = menu();
        m.open(App::Chat, Point::new(24, 40));
        assert_eq!(m.release(), MenuResponse::Unchanged);
        assert_eq!(m.hold(Point::new(60, 50)), MenuResponse::Unchanged);
        assert!(m.is_open());
    }

    #[test]
    fn test_move_and_cancel_rows() {
        let mut m = menu();
        m.open(App::Trash, Point::new(24, 40));
        m.press(Point::new(60, 63));
        assert!(matches!(
            m.release(),
            MenuResponse::Closed {
                command: Some(MenuCommand::Move(App::Trash)),
                ..
            }
        ));

        m.open(App::Trash, Point::new(24, 40));
        m.press(Point::new(60, 110));
        assert!(matches!(m.release(), MenuResponse::Closed { command: None, .. }));
    }

    #[test]
    fn test_draw_lists_rows() {
        let mut m = menu();
        let mut surface = RecordingSurface::new(SCREEN);
        m.draw(&mut surface, &Palette::default()).unwrap();
        assert_eq!(surface.op_count(), 0, "closed menu draws nothing");

        m.open(App::Chat, Point::new(24, 40));
        m.draw(&mut surface, &Palette::default()).unwrap();
        assert_eq!(surface.texts(), ["Open", "Move", "Properties", "Cancel"]);
    }
}
