//! Geometry and hit-testing helpers
//!
//! Rectangles are half-open: a rect at `(x, y)` of size `(w, h)` covers
//! `x..x+w` by `y..y+h`. Touching edges do not intersect and zero-sized
//! rects never intersect anything.

use embedded_graphics::{prelude::*, primitives::Rectangle};

use crate::config::LabelMetrics;

/// Saturating `u32` → `i32` for pixel arithmetic.
pub(crate) fn px(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Component-wise `a - b`, saturating at the `i32` range.
pub fn saturating_sub_point(a: Point, b: Point) -> Point {
    Point::new(a.x.saturating_sub(b.x), a.y.saturating_sub(b.y))
}

/// Exclusive edges `(x0, y0, x1, y1)` of `rect`.
pub fn edges(rect: &Rectangle) -> (i32, i32, i32, i32) {
    let Point { x, y } = rect.top_left;
    (
        x,
        y,
        x.saturating_add(px(rect.size.width)),
        y.saturating_add(px(rect.size.height)),
    )
}

/// Rectangle from exclusive edges; zero-sized when the edges cross.
pub fn from_edges(x0: i32, y0: i32, x1: i32, y1: i32) -> Rectangle {
    let width = u32::try_from(x1.saturating_sub(x0)).unwrap_or(0);
    let height = u32::try_from(y1.saturating_sub(y0)).unwrap_or(0);
    if width == 0 || height == 0 {
        return Rectangle::new(Point::new(x0, y0), Size::zero());
    }
    Rectangle::new(Point::new(x0, y0), Size::new(width, height))
}

/// Half-open point containment.
pub fn contains(rect: &Rectangle, point: Point) -> bool {
    let (x0, y0, x1, y1) = edges(rect);
    point.x >= x0 && point.x < x1 && point.y >= y0 && point.y < y1
}

/// Strict overlap test.
pub fn intersects(a: &Rectangle, b: &Rectangle) -> bool {
    if a.is_zero_sized() || b.is_zero_sized() {
        return false;
    }
    let (ax0, ay0, ax1, ay1) = edges(a);
    let (bx0, by0, bx1, by1) = edges(b);
    ax0 < bx1 && bx0 < ax1 && ay0 < by1 && by0 < ay1
}

/// Smallest rect enclosing both; an empty operand is ignored.
pub fn union(a: &Rectangle, b: &Rectangle) -> Rectangle {
    if a.is_zero_sized() {
        return *b;
    }
    if b.is_zero_sized() {
        return *a;
    }
    let (ax0, ay0, ax1, ay1) = edges(a);
    let (bx0, by0, bx1, by1) = edges(b);
    from_edges(ax0.min(bx0), ay0.min(by0), ax1.max(bx1), ay1.max(by1))
}

/// Grow `rect` by `pad` on every side.
pub fn grow(rect: &Rectangle, pad: u32) -> Rectangle {
    let pad = px(pad);
    let (x0, y0, x1, y1) = edges(rect);
    from_edges(
        x0.saturating_sub(pad),
        y0.saturating_sub(pad),
        x1.saturating_add(pad),
        y1.saturating_add(pad),
    )
}

/// Intersection of `rect` with the screen; possibly empty.
pub fn clamp_to_screen(rect: &Rectangle, screen: Size) -> Rectangle {
    let (x0, y0, x1, y1) = edges(rect);
    from_edges(
        x0.max(0),
        y0.max(0),
        x1.min(px(screen.width)),
        y1.min(px(screen.height)),
    )
}

/// The label slot centred under `icon`.
pub fn label_slot(icon: &Rectangle, label: &LabelMetrics) -> Rectangle {
    let (x0, _, x1, y1) = edges(icon);
    let centre = x0.saturating_add(x1.saturating_sub(x0) / 2);
    Rectangle::new(
        Point::new(
            centre.saturating_sub(px(label.width) / 2),
            y1.saturating_add(px(label.gap)),
        ),
        Size::new(label.width, label.height),
    )
}

/// On-screen bounding box of an icon and its label slot, padded.
pub fn item_bounds(icon: &Rectangle, label: &LabelMetrics, screen: Size) -> Rectangle {
    let joined = union(icon, &label_slot(icon, label));
    clamp_to_screen(&grow(&joined, label.pad), screen)
}

/// Clamp an item origin so the icon stays on-screen and the label slot
/// fits under it.
///
/// The label is always drawn inside the screen horizontally, so only the
/// icon bounds the x range.
pub fn clamp_item_origin(origin: Point, icon: Size, label: &LabelMetrics, screen: Size) -> Point {
    let max_x = px(screen.width).saturating_sub(px(icon.width)).max(0);
    let below = px(icon.height)
        .saturating_add(px(label.gap))
        .saturating_add(px(label.height));
    let max_y = px(screen.height).saturating_sub(below).max(0);
    Point::new(origin.x.clamp(0, max_x), origin.y.clamp(0, max_y))
}
