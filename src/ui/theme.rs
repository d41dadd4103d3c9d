//! Theme constants and colors for the chess UI.
//!
//! The board has one fixed size from the config; everything here is laid
//! out around it and the window never resizes the squares.

use gpui::{Rgba, rgb};

// Spacing around the fixed board, and the rows stacked under it
pub const BOARD_PADDING: f32 = 12.0;
pub const PIECE_SCALE: f32 = 1.0; // sprites fill the whole square
pub const GHOST_OPACITY: f32 = 0.4;
pub const STATUS_ROW_HEIGHT: f32 = 28.0;
pub const MOVE_LIST_WIDTH: f32 = 180.0;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xE5E5E5;
pub const DARK_SQUARE: u32 = 0xA3A3A3;

// Panel colors
pub const PANEL_BG: u32 = 0x262626;
pub const MOVE_LIST_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;

/// Get the color for a board square based on its position
pub fn square_color(row: usize, col: usize) -> Rgba {
    if (row + col) % 2 == 0 {
        rgb(LIGHT_SQUARE)
    } else {
        rgb(DARK_SQUARE)
    }
}
