//! Move list panel - the game's moves as numbered white/black pairs.

use gpui::{App, Div, Entity, div, prelude::*, px, rgb};

use crate::models::GameModel;
use crate::ui::theme::{BORDER_COLOR, MOVE_LIST_BG, MOVE_LIST_WIDTH, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::ui::view_models::MovePairDisplay;

/// Render the move list panel for a given game model.
pub fn render_move_list_panel(model: &Entity<GameModel>, cx: &App) -> Div {
    let move_pairs = model.read(cx).move_pairs();

    div()
        .w(px(MOVE_LIST_WIDTH))
        .h_full()
        .flex()
        .flex_col()
        .bg(rgb(MOVE_LIST_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .overflow_hidden()
        // Header (fixed)
        .child(
            div()
                .p_2()
                .text_sm()
                .text_color(rgb(TEXT_PRIMARY))
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child("Moves"),
        )
        // Scrollable moves content
        .child(
            div()
                .id("move-list-scroll")
                .flex_1()
                .overflow_y_scroll()
                .p_2()
                .flex()
                .flex_col()
                .gap_1()
                .when(move_pairs.is_empty(), |el| {
                    el.child(
                        div()
                            .text_color(rgb(TEXT_SECONDARY))
                            .text_sm()
                            .child("No moves yet"),
                    )
                })
                .children(move_pairs.into_iter().map(render_move_pair)),
        )
}

fn render_move_pair(pair: MovePairDisplay) -> impl IntoElement {
    div()
        .flex()
        .items_center()
        .gap_2()
        .text_sm()
        .child(
            div()
                .text_color(rgb(TEXT_SECONDARY))
                .w(px(32.0))
                .child(format!("{}.", pair.move_num)),
        )
        .child(
            div()
                .text_color(rgb(TEXT_PRIMARY))
                .flex_1()
                .child(pair.white_move),
        )
        .when_some(pair.black_move, |el, black_move| {
            el.child(
                div()
                    .text_color(rgb(TEXT_PRIMARY))
                    .flex_1()
                    .child(black_move),
            )
        })
}
