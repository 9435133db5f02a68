//! Centralized theme and styling values for the viewer UI
//!
//! Single source of truth for the explorer column palette and the colors and
//! dimensions of the overlays drawn on top of the 3D viewport.

use egui::{Color32, Vec2};
use once_cell::sync::Lazy;

/// Column backgrounds, indexed by `depth % COLUMN_PALETTE.len()`
pub const COLUMN_PALETTE: [Color32; 32] = [
    Color32::from_rgb(0x41, 0xB3, 0xA3),
    Color32::from_rgb(0xC3, 0x8D, 0x9E),
    Color32::from_rgb(0xE8, 0xA8, 0x7C),
    Color32::from_rgb(0x85, 0xDC, 0xB0),
    Color32::from_rgb(0xE2, 0x7D, 0x60),
    Color32::from_rgb(0x65, 0x9D, 0xBD),
    Color32::from_rgb(0xDA, 0xAD, 0x86),
    Color32::from_rgb(0xFB, 0xEE, 0xC1),
    Color32::from_rgb(0x5C, 0xDB, 0x95),
    Color32::from_rgb(0x97, 0xCA, 0xEF),
    Color32::from_rgb(0xAF, 0xD2, 0x75),
    Color32::from_rgb(0xFF, 0x63, 0x47),
    Color32::from_rgb(0xE6, 0x19, 0x4B),
    Color32::from_rgb(0x3C, 0xB4, 0x4B),
    Color32::from_rgb(0xFF, 0xE1, 0x19),
    Color32::from_rgb(0x43, 0x63, 0xD8),
    Color32::from_rgb(0xF5, 0x82, 0x31),
    Color32::from_rgb(0x91, 0x1E, 0xB4),
    Color32::from_rgb(0x46, 0xF0, 0xF0),
    Color32::from_rgb(0xF0, 0x32, 0xE6),
    Color32::from_rgb(0xBC, 0xF6, 0x0C),
    Color32::from_rgb(0xFA, 0xBE, 0xBE),
    Color32::from_rgb(0x00, 0x80, 0x80),
    Color32::from_rgb(0xE6, 0xBE, 0xFF),
    Color32::from_rgb(0x9A, 0x63, 0x24),
    Color32::from_rgb(0xFF, 0xFA, 0xC8),
    Color32::from_rgb(0x80, 0x00, 0x00),
    Color32::from_rgb(0xAA, 0xFF, 0xC3),
    Color32::from_rgb(0x80, 0x80, 0x00),
    Color32::from_rgb(0xFF, 0xD8, 0xB1),
    Color32::from_rgb(0x00, 0x00, 0x75),
    Color32::from_rgb(0x80, 0x80, 0x80),
];

/// Background color for the explorer column at `depth`
pub fn column_color(depth: usize) -> Color32 {
    COLUMN_PALETTE[depth % COLUMN_PALETTE.len()]
}

/// Color palette for the viewer chrome
pub struct Colors {
    // Explorer entries
    pub entry_text: Color32,
    pub entry_active_fill: Color32,
    pub entry_active_text: Color32,

    // Overlays
    pub overlay_background: Color32,
    pub overlay_text: Color32,
    pub error_text: Color32,
    pub panel_background: Color32,
}

impl Colors {
    /// Get the default color palette
    pub fn default() -> Self {
        Self {
            entry_text: Color32::from_rgb(20, 20, 20),
            entry_active_fill: Color32::from_rgba_unmultiplied(0, 0, 0, 90),
            entry_active_text: Color32::WHITE,

            overlay_background: Color32::from_rgba_unmultiplied(0, 0, 0, 160),
            overlay_text: Color32::from_rgb(240, 240, 240),
            error_text: Color32::from_rgb(255, 110, 90),
            panel_background: Color32::from_rgb(0xF1, 0xF1, 0xF1),
        }
    }
}

/// Dimension constants for the viewer chrome
pub struct Dimensions {
    pub entry_height: f32,
    pub entry_padding: Vec2,
    pub overlay_rounding: u8,
    pub overlay_margin: i8,
    pub spinner_size: f32,
}

impl Dimensions {
    /// Get the default dimensions
    pub fn default() -> Self {
        Self {
            entry_height: 20.0,
            entry_padding: Vec2::new(8.0, 2.0),
            overlay_rounding: 6,
            overlay_margin: 12,
            spinner_size: 48.0,
        }
    }
}

/// Complete theme containing all styling constants
pub struct Theme {
    pub colors: Colors,
    pub dimensions: Dimensions,
}

impl Theme {
    /// Get the default theme
    pub fn default() -> Self {
        Self {
            colors: Colors::default(),
            dimensions: Dimensions::default(),
        }
    }
}

static GLOBAL_THEME: Lazy<Theme> = Lazy::new(Theme::default);

/// Get the global theme
pub fn theme() -> &'static Theme {
    &GLOBAL_THEME
}

pub fn colors() -> &'static Colors {
    &theme().colors
}

pub fn dimensions() -> &'static Dimensions {
    &theme().dimensions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_color_cycles() {
        assert_eq!(column_color(0), COLUMN_PALETTE[0]);
        assert_eq!(column_color(31), COLUMN_PALETTE[31]);
        assert_eq!(column_color(32), COLUMN_PALETTE[0]);
        assert_eq!(column_color(33), column_color(1));
    }
}
