//! Desktop items: one draggable icon and label per application.
//!
//! Per-application data lives in a single static table ([`ITEMS`]) indexed
//! by [`App`]; everything else (hit-testing, drawing, dragging) is generic
//! over the table row.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};

use crate::palette::rgb565;

/// Applications reachable from the desktop.
///
/// Declaration order is the hit-test and draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum App {
    /// AI chat assistant
    Chat,
    /// Drawing app
    Paint,
    /// Trash can
    Trash,
    /// Web browser
    Internet,
    /// Notes
    Notes,
    /// WiFi manager
    Wifi,
}

impl App {
    /// Every app, in table order.
    pub const ALL: [App; 6] = [
        App::Chat,
        App::Paint,
        App::Trash,
        App::Internet,
        App::Notes,
        App::Wifi,
    ];

    /// Static table row for this app.
    pub fn spec(self) -> &'static ItemSpec {
        match self {
            App::Chat => &ITEMS[0],
            App::Paint => &ITEMS[1],
            App::Trash => &ITEMS[2],
            App::Internet => &ITEMS[3],
            App::Notes => &ITEMS[4],
            App::Wifi => &ITEMS[5],
        }
    }

    /// Label shown under the icon.
    pub fn label(self) -> &'static str {
        self.spec().label
    }
}

/// How an icon body is painted.
///
/// Bitmap icon assets are supplied by the board; the shell draws a
/// rounded tile with a short glyph in their place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconArt {
    /// Text centred on the tile
    pub glyph: &'static str,
    /// Tile fill colour
    pub fill: Rgb565,
}

/// Static description of one desktop item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    /// Application identity
    pub app: App,
    /// Label text
    pub label: &'static str,
    /// Icon body size
    pub icon_size: Size,
    /// Initial top-left position
    pub home: Point,
    /// Icon artwork
    pub art: IconArt,
}

const ICON: Size = Size::new(40, 40);

/// The desktop item table.
pub static ITEMS: [ItemSpec; 6] = [
    ItemSpec {
        app: App::Chat,
        label: "Chat",
        icon_size: ICON,
        home: Point::new(24, 40),
        art: IconArt {
            glyph: "AI",
            fill: rgb565(0x001F),
        },
    },
    ItemSpec {
        app: App::Paint,
        label: "Paint",
        icon_size: ICON,
        home: Point::new(24, 100),
        art: IconArt {
            glyph: "Pt",
            fill: rgb565(0xFD20),
        },
    },
    ItemSpec {
        app: App::Trash,
        label: "Trash",
        icon_size: ICON,
        home: Point::new(24, 160),
        art: IconArt {
            glyph: "Tr",
            fill: rgb565(0x7BEF),
        },
    },
    ItemSpec {
        app: App::Internet,
        label: "Internet",
        icon_size: ICON,
        home: Point::new(90, 40),
        art: IconArt {
            glyph: "www",
            fill: rgb565(0x0410),
        },
    },
    ItemSpec {
        app: App::Notes,
        label: "Notes",
        icon_size: ICON,
        home: Point::new(90, 100),
        art: IconArt {
            glyph: "Nt",
            fill: rgb565(0xC580),
        },
    },
    ItemSpec {
        app: App::Wifi,
        label: "WiFi",
        icon_size: ICON,
        home: Point::new(90, 160),
        art: IconArt {
            glyph: "Wi",
            fill: rgb565(0x0400),
        },
    },
];

/// A positioned desktop item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopItem {
    /// Application identity
    pub app: App,
    /// Top-left corner of the icon body
    pub origin: Point,
    /// Drawn with the selection highlight
    pub selected: bool,
}

impl DesktopItem {
    /// Item at its home position, unselected.
    pub fn at_home(app: App) -> Self {
        Self {
            app,
            origin: app.spec().home,
            selected: false,
        }
    }

    /// Icon body size.
    pub fn size(&self) -> Size {
        self.app.spec().icon_size
    }

    /// Icon body rectangle.
    pub fn icon_rect(&self) -> Rectangle {
        Rectangle::new(self.origin, self.size())
    }

    /// Label text.
    pub fn label(&self) -> &'static str {
        self.app.label()
    }
}
