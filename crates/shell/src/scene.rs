//! Desktop scene and dirty-rectangle redraw.
//!
//! The scene owns the positioned items and the context menu. Nothing is
//! ever repainted wholesale after start-up: a change repaints the union of
//! icon and label (the item's bounding box) by restoring the wallpaper under
//! it and redrawing every item and the menu that overlap.
//!
//! Wallpaper restore goes through a fixed scratch buffer of
//! [`SCRATCH_PIXELS`]. A region that does not fit is handled by a full
//! redraw instead.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use platform::{Font, Surface, TextAlign, TextColors, Wallpaper};

use crate::{
    config::{LabelMetrics, ShellConfig, SCRATCH_PIXELS},
    geometry::{clamp_item_origin, clamp_to_screen, contains, edges, intersects, item_bounds, px},
    gesture::Hit,
    items::{App, DesktopItem},
    menu::ContextMenu,
    palette::Palette,
};

const ICON_RADIUS: u32 = 8;

/// Positioned items, the popup menu and the scratch buffer.
pub struct Scene {
    items: [DesktopItem; 6],
    menu: ContextMenu,
    label: LabelMetrics,
    screen: Size,
    palette: Palette,
    scratch: [Rgb565; SCRATCH_PIXELS],
}

impl Scene {
    /// Items at their home positions, nothing selected, menu closed.
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            items: App::ALL.map(DesktopItem::at_home),
            menu: ContextMenu::new(config.menu, config.screen),
            label: config.label,
            screen: config.screen,
            palette: Palette::default(),
            scratch: [Rgb565::BLACK; SCRATCH_PIXELS],
        }
    }

    /// Replace the colours.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// All items, in draw order.
    pub fn items(&self) -> &[DesktopItem] {
        &self.items
    }

    /// The item for `app`.
    pub fn item(&self, app: App) -> Option<&DesktopItem> {
        self.items.iter().find(|item| item.app == app)
    }

    /// Currently selected app.
    pub fn selected(&self) -> Option<App> {
        self.items.iter().find(|item| item.selected).map(|item| item.app)
    }

    /// The context menu.
    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    /// Screen size the scene lays out against.
    pub fn screen(&self) -> Size {
        self.screen
    }

    fn item_bounds(&self, item: &DesktopItem) -> Rectangle {
        item_bounds(&item.icon_rect(), &self.label, self.screen)
    }

    /// On-screen bounding box (icon + label + padding) of `app`.
    pub fn bounds_of(&self, app: App) -> Rectangle {
        self.item(app)
            .map_or(Rectangle::zero(), |item| self.item_bounds(item))
    }

    /// Item under `point`: icon bodies first, then label padding.
    pub fn hit_test(&self, point: Point) -> Option<Hit> {
        let on_body = self
            .items
            .iter()
            .find(|item| contains(&item.icon_rect(), point));
        if let Some(item) = on_body {
            return Some(Hit {
                app: item.app,
                on_body: true,
                origin: item.origin,
            });
        }
        self.items
            .iter()
            .find(|item| contains(&self.item_bounds(item), point))
            .map(|item| Hit {
                app: item.app,
                on_body: false,
                origin: item.origin,
            })
    }

    /// Paint everything: background, wallpaper, items, then the menu.
    pub fn full_redraw<S, W>(&mut self, surface: &mut S, wallpaper: &W) -> Result<(), S::Error>
    where
        S: Surface,
        W: Wallpaper,
    {
        tracing::trace!("full redraw");
        surface.fill_rect(Rectangle::new(Point::zero(), self.screen), self.palette.background)?;
        self.push_wallpaper(surface, wallpaper)?;
        for item in &self.items {
            self.draw_item(surface, item)?;
        }
        self.menu.draw(surface, &self.palette)
    }

    /// Repaint `rect`: restore the wallpaper under it and redraw every item
    /// and the menu that overlap it.
    pub fn redraw_region<S, W>(
        &mut self,
        surface: &mut S,
        wallpaper: &W,
        rect: Rectangle,
    ) -> Result<(), S::Error>
    where
        S: Surface,
        W: Wallpaper,
    {
        let rect = clamp_to_screen(&rect, self.screen);
        if rect.is_zero_sized() {
            return Ok(());
        }
        let pixels = (rect.size.width as usize).saturating_mul(rect.size.height as usize);
        if pixels > SCRATCH_PIXELS {
            return self.full_redraw(surface, wallpaper);
        }

        tracing::trace!(
            x = rect.top_left.x,
            y = rect.top_left.y,
            w = rect.size.width,
            h = rect.size.height,
            "redraw region"
        );
        self.restore(surface, wallpaper, rect)?;
        for item in &self.items {
            if intersects(&rect, &self.item_bounds(item)) {
                self.draw_item(surface, item)?;
            }
        }
        if self.menu.bounds().is_some_and(|menu| intersects(&rect, &menu)) {
            self.menu.draw(surface, &self.palette)?;
        }
        Ok(())
    }

    /// Change the selection, repainting only the old and new items.
    ///
    /// Returns whether anything changed.
    pub fn set_selected<S, W>(
        &mut self,
        surface: &mut S,
        wallpaper: &W,
        app: Option<App>,
    ) -> Result<bool, S::Error>
    where
        S: Surface,
        W: Wallpaper,
    {
        let previous = self.selected();
        if previous == app {
            return Ok(false);
        }
        for item in &mut self.items {
            item.selected = Some(item.app) == app;
        }
        if let Some(old) = previous {
            let dirty = self.bounds_of(old);
            self.redraw_region(surface, wallpaper, dirty)?;
        }
        if let Some(new) = app {
            let dirty = self.bounds_of(new);
            self.redraw_region(surface, wallpaper, dirty)?;
        }
        Ok(true)
    }

    /// Move `app` so its origin is `origin` (clamped on-screen), repainting
    /// the old and then the new bounding box.
    ///
    /// Returns whether the item moved.
    pub fn move_item<S, W>(
        &mut self,
        surface: &mut S,
        wallpaper: &W,
        app: App,
        origin: Point,
    ) -> Result<bool, S::Error>
    where
        S: Surface,
        W: Wallpaper,
    {
        let label = self.label;
        let screen = self.screen;
        let Some(item) = self.items.iter_mut().find(|item| item.app == app) else {
            return Ok(false);
        };
        let clamped = clamp_item_origin(origin, item.size(), &label, screen);
        if clamped == item.origin {
            return Ok(false);
        }
        let old = item_bounds(&item.icon_rect(), &label, screen);
        item.origin = clamped;
        let new = item_bounds(&item.icon_rect(), &label, screen);

        self.redraw_region(surface, wallpaper, old)?;
        self.redraw_region(surface, wallpaper, new)?;
        Ok(true)
    }

    /// Open the context menu on `app` at `anchor` and draw it.
    pub fn open_menu<S: Surface>(
        &mut self,
        surface: &mut S,
        app: App,
        anchor: Point,
    ) -> Result<(), S::Error> {
        self.menu.open(app, anchor);
        self.menu.draw(surface, &self.palette)
    }

    /// Redraw the open menu (highlight change).
    pub fn draw_menu<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        self.menu.draw(surface, &self.palette)
    }

    /// Mutable access to the menu for touch handling.
    pub fn menu_mut(&mut self) -> &mut ContextMenu {
        &mut self.menu
    }

    /// Close the menu and repaint the scene beneath it.
    pub fn close_menu<S, W>(&mut self, surface: &mut S, wallpaper: &W) -> Result<(), S::Error>
    where
        S: Surface,
        W: Wallpaper,
    {
        match self.menu.close() {
            Some(dirty) => self.redraw_region(surface, wallpaper, dirty),
            None => Ok(()),
        }
    }

    fn restore<S, W>(&mut self, surface: &mut S, wallpaper: &W, rect: Rectangle) -> Result<(), S::Error>
    where
        S: Surface,
        W: Wallpaper,
    {
        let width = rect.size.width as usize;
        let pixels = width.saturating_mul(rect.size.height as usize);
        let Some(block) = self.scratch.get_mut(..pixels) else {
            return Ok(());
        };
        let mut row_start = rect.top_left;
        for row in block.chunks_mut(width.max(1)) {
            wallpaper.read_row(row_start, row);
            row_start.y = row_start.y.saturating_add(1);
        }
        surface.push_image(rect, block)
    }

    fn push_wallpaper<S, W>(&mut self, surface: &mut S, wallpaper: &W) -> Result<(), S::Error>
    where
        S: Surface,
        W: Wallpaper,
    {
        let area = clamp_to_screen(&Rectangle::new(Point::zero(), wallpaper.size()), self.screen);
        if area.is_zero_sized() {
            return Ok(());
        }
        let rows_per_strip = SCRATCH_PIXELS
            .checked_div(area.size.width as usize)
            .and_then(|rows| u32::try_from(rows).ok())
            .unwrap_or(1)
            .max(1);
        let (_, _, _, bottom) = edges(&area);
        let mut y = area.top_left.y;
        while y < bottom {
            let rows = rows_per_strip.min(u32::try_from(bottom.saturating_sub(y)).unwrap_or(0));
            let strip = Rectangle::new(Point::new(area.top_left.x, y), Size::new(area.size.width, rows));
            self.restore(surface, wallpaper, strip)?;
            y = y.saturating_add(px(rows));
        }
        Ok(())
    }

    // Item origins are clamped on-screen, so label geometry stays far from
    // the i32 range.
    #[allow(clippy::arithmetic_side_effects)]
    fn draw_item<S: Surface>(&self, surface: &mut S, item: &DesktopItem) -> Result<(), S::Error> {
        let art = item.app.spec().art;
        let icon = item.icon_rect();
        surface.fill_round_rect(icon, ICON_RADIUS, art.fill)?;
        surface.stroke_round_rect(icon, ICON_RADIUS, self.palette.icon_outline)?;
        surface.draw_text(
            art.glyph,
            icon.center(),
            TextAlign::MiddleCenter,
            Font::Large,
            TextColors::on(self.palette.icon_glyph, art.fill),
        )?;

        let (x0, _, _, y1) = edges(&icon);
        let centre = x0 + px(icon.size.width) / 2;
        self.draw_label(surface, item.label(), centre, y1 + px(self.label.gap), item.selected)
    }

    #[allow(clippy::arithmetic_side_effects)]
    fn draw_label<S: Surface>(
        &self,
        surface: &mut S,
        text: &str,
        centre: i32,
        top: i32,
        selected: bool,
    ) -> Result<(), S::Error> {
        let m = &self.label;
        let box_width = surface
            .text_width(text, Font::Small)
            .saturating_add(m.block_text_pad)
            .max(m.min_block_width)
            .min(m.width);
        let margin = px(m.edge_margin);
        let right_limit = px(self.screen.width) - margin - px(box_width);
        let x = (centre - px(box_width) / 2).max(margin).min(right_limit);
        let y = top + (px(m.height) - px(m.block_height)) / 2;
        let block = Rectangle::new(Point::new(x, y), Size::new(box_width, m.block_height));
        let text_centre = block.center();

        if selected {
            let half = m.block_height / 2;
            surface.fill_rect(
                Rectangle::new(block.top_left, Size::new(box_width, half)),
                self.palette.highlight_top,
            )?;
            surface.fill_rect(
                Rectangle::new(
                    block.top_left + Point::new(0, px(half)),
                    Size::new(box_width, m.block_height - half),
                ),
                self.palette.highlight_bottom,
            )?;
            surface.stroke_rect(block, self.palette.highlight_edge)?;
            surface.draw_text(
                text,
                text_centre,
                TextAlign::MiddleCenter,
                Font::Small,
                TextColors::on(self.palette.highlight_edge, self.palette.highlight_bottom),
            )
        } else {
            surface.draw_text(
                text,
                text_centre + Point::new(1, 1),
                TextAlign::MiddleCenter,
                Font::Small,
                TextColors::new(self.palette.label_shadow),
            )?;
            surface.draw_text(
                text,
                text_centre,
                TextAlign::MiddleCenter,
                Font::Small,
                TextColors::new(self.palette.label_text),
            )
        }
    }
}
