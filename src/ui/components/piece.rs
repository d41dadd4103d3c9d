//! Piece rendering component.

use gpui::{SharedString, div, img, prelude::*, px};

/// Render a piece sprite filling a fixed-size square
pub fn render_piece(sprite: SharedString, piece_size: f32) -> impl IntoElement {
    div()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .child(img(sprite).size(px(piece_size)))
}
