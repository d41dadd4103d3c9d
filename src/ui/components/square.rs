//! Square rendering component.

use crate::ui::components::render_piece;
use crate::ui::theme::{GHOST_OPACITY, square_color};
use gpui::{SharedString, div, prelude::*, px};

/// Render a single board square with an optional piece sprite
pub fn render_square(
    row: usize,
    col: usize,
    sprite: Option<SharedString>,
    is_being_dragged: bool,
    square_size: f32,
    piece_size: f32,
) -> impl IntoElement {
    div()
        .flex_shrink_0()
        .size(px(square_size))
        .bg(square_color(row, col))
        .when_some(sprite, |el, sprite| {
            if is_being_dragged {
                // faded copy stays put while the sprite follows the cursor
                el.child(
                    div()
                        .size_full()
                        .opacity(GHOST_OPACITY)
                        .child(render_piece(sprite, piece_size)),
                )
            } else {
                el.child(render_piece(sprite, piece_size))
            }
        })
}
