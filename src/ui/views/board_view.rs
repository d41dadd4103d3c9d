//! Chess board view - the board with drag-and-drop piece movement, the
//! status line and the Restart control.

use gpui::{
    Context, Entity, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Subscription,
    Window, div, img, prelude::*, px, rgb,
};
use gpui_component::button::{Button, ButtonVariants};

use crate::domain::chess::PieceKind;
use crate::domain::to_square;
use crate::models::GameModel;
use crate::ui::components::render_square;
use crate::ui::theme::{BOARD_PADDING, PANEL_BG, STATUS_ROW_HEIGHT, TEXT_PRIMARY};
use crate::ui::view_models::DragState;
use crate::ui::views::render_move_list_panel;

/// The main chess board view that observes a GameModel
pub struct ChessBoardView {
    model: Entity<GameModel>,
    _subscription: Subscription,
}

impl ChessBoardView {
    pub fn new(model: Entity<GameModel>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&model, |_, _, cx| cx.notify());
        Self {
            model,
            _subscription,
        }
    }
}

impl Render for ChessBoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let model = self.model.clone();
        let model_down = model.clone();
        let model_move = model.clone();
        let model_up = model.clone();
        let model_cancel = model.clone();
        let model_restart = model.clone();
        let model_promote = model.clone();

        let game = self.model.read(cx);
        let drag_state = game.drag_state;
        let dragging_from = drag_state.map(|d| (d.from_row, d.from_col));

        let layout = game.layout();
        let square_size = layout.square_size();
        let piece_size = layout.piece_size();
        let board_total_size = layout.board_size;
        let status_text = game.status_text();
        let promotion = game.pending_promotion();

        // Floating piece follows cursor during drag
        let floating_piece = drag_state.map(|d| {
            div()
                .absolute()
                .left(px(d.mouse_x - piece_size / 2.0))
                .top(px(d.mouse_y - piece_size / 2.0))
                .size(px(piece_size))
                .child(img(game.sprite(d.piece)).size(px(piece_size)))
        });

        // Collect sprites for rendering (can't borrow game in closure)
        let sprites: Vec<_> = (0..8)
            .flat_map(|row| (0..8).map(move |col| (row, col)))
            .map(|(row, col)| game.piece_at(row, col).map(|p| game.sprite(p)))
            .collect();

        let board = div()
            .flex_shrink_0()
            .flex()
            .flex_col()
            .w(px(board_total_size))
            .h(px(board_total_size))
            .overflow_hidden()
            .children((0..8).map(|row| {
                div().flex().flex_shrink_0().children((0..8).map(|col| {
                    let sprite = sprites[row * 8 + col].clone();
                    let is_being_dragged = dragging_from == Some((row, col));
                    render_square(row, col, sprite, is_being_dragged, square_size, piece_size)
                }))
            }));

        // Status line: one label at most, plus the Restart control
        let status_row = div()
            .w(px(board_total_size))
            .h(px(STATUS_ROW_HEIGHT))
            .flex()
            .items_center()
            .justify_between()
            .child(
                div()
                    .p_1()
                    .text_sm()
                    .text_color(rgb(TEXT_PRIMARY))
                    .child(status_text),
            )
            .child(
                Button::new("restart")
                    .label("Restart")
                    .ghost()
                    .compact()
                    .on_click(move |_, _, cx| {
                        model_restart.update(cx, |game, cx| game.restart(cx));
                    }),
            );

        // Promotion picker, shown while a pawn waits on the last rank
        let promotion_row = promotion.map(|_| {
            let choices = [
                (PieceKind::Queen, "promote-queen", "Queen"),
                (PieceKind::Rook, "promote-rook", "Rook"),
                (PieceKind::Bishop, "promote-bishop", "Bishop"),
                (PieceKind::Knight, "promote-knight", "Knight"),
            ];
            let model_cancel = model_promote.clone();
            div()
                .w(px(board_total_size))
                .h(px(STATUS_ROW_HEIGHT))
                .flex()
                .items_center()
                .gap_1()
                .children(choices.map(|(kind, id, label)| {
                    let model = model_promote.clone();
                    Button::new(id)
                        .label(label)
                        .primary()
                        .compact()
                        .on_click(move |_, _, cx| {
                            model.update(cx, |game, cx| {
                                game.choose_promotion(kind, cx);
                            });
                        })
                }))
                .child(
                    Button::new("promote-cancel")
                        .label("Cancel")
                        .ghost()
                        .compact()
                        .on_click(move |_, _, cx| {
                            model_cancel.update(cx, |game, cx| game.cancel_promotion(cx));
                        }),
                )
        });

        let board_panel = div()
            .id("board-panel")
            .relative()
            .flex()
            .flex_col()
            .child(board)
            .when_some(promotion_row, |el, row| el.child(row))
            .child(status_row)
            // Mouse down: start drag if clicking on a movable piece
            .on_mouse_down(
                MouseButton::Left,
                move |ev: &MouseDownEvent, _window, cx| {
                    model_down.update(cx, |game, cx| {
                        let pos = ev.position;
                        if let Some((row, col, _)) = game.square_at(pos.x.into(), pos.y.into()) {
                            if let Some(piece) = game.piece_at(row, col) {
                                if game.can_drag(piece) {
                                    game.drag_state = Some(DragState {
                                        piece,
                                        from_row: row,
                                        from_col: col,
                                        mouse_x: pos.x.into(),
                                        mouse_y: pos.y.into(),
                                    });
                                    cx.notify();
                                }
                            }
                        }
                    });
                },
            )
            // Mouse move: update drag position
            .on_mouse_move(move |ev: &MouseMoveEvent, _, cx| {
                model_move.update(cx, |game, cx| {
                    if let Some(ref mut drag) = game.drag_state {
                        drag.mouse_x = ev.position.x.into();
                        drag.mouse_y = ev.position.y.into();
                        cx.notify();
                    }
                });
            })
            // Mouse up: drop the piece; a rejected drop snaps back
            .on_mouse_up(MouseButton::Left, move |ev: &MouseUpEvent, _window, cx| {
                model_up.update(cx, |game, cx| {
                    if let Some(drag) = game.drag_state.take() {
                        let pos = ev.position;
                        if let Some((_, _, to)) = game.square_at(pos.x.into(), pos.y.into()) {
                            let from = to_square(drag.from_row, drag.from_col);
                            game.drop_piece(from, to, drag.piece, cx);
                        }
                        cx.notify();
                    }
                });
            })
            // Released outside the board: cancel the drag
            .on_mouse_up_out(MouseButton::Left, move |_: &MouseUpEvent, _window, cx| {
                model_cancel.update(cx, |game, cx| {
                    if game.drag_state.take().is_some() {
                        cx.notify();
                    }
                });
            });

        let move_list_panel = render_move_list_panel(&model, cx);

        div()
            .size_full()
            .relative()
            .flex()
            .gap(px(BOARD_PADDING))
            .p(px(BOARD_PADDING))
            .bg(rgb(PANEL_BG))
            .child(board_panel)
            .child(move_list_panel)
            .when_some(floating_piece, |el, fp| el.child(fp))
    }
}
