//! Game state model - the application layer around the game controller.
//!
//! Owns the opponent reply task. The task waits on the GPUI background
//! timer, then plays through a weak handle; dropping it cancels the reply.

use std::time::Duration;

use gpui::{AsyncApp, Context, SharedString, Task, WeakEntity};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use shakmaty::{Position, Square};

use crate::config::GameConfig;
use crate::domain::chess::{PieceColor, PieceKind};
use crate::domain::game::HUMAN;
use crate::domain::{GameController, Piece, ReplyOutcome, ReplyTicket, shakmaty_to_piece, to_square};
use crate::ui::BoardLayout;
use crate::ui::view_models::{DragState, MovePairDisplay, move_pairs};

/// A pawn drop onto the last rank, held until the player picks a piece
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    pub color: PieceColor,
}

/// The main game model containing all chess game state
pub struct GameModel {
    controller: GameController,
    /// Picks the opponent's moves
    rng: StdRng,
    reply_delay: Duration,
    sprite_dir: String,
    layout: BoardLayout,
    /// Drag state for piece movement
    pub drag_state: Option<DragState>,
    promotion: Option<PendingPromotion>,
    /// Pending opponent reply (dropping it cancels the reply)
    _reply_task: Option<Task<()>>,
}

impl GameModel {
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            controller: GameController::new(),
            rng,
            reply_delay: config.reply_delay(),
            sprite_dir: config.sprite_dir.clone(),
            layout: BoardLayout::new(config.board_size),
            drag_state: None,
            promotion: None,
            _reply_task: None,
        }
    }

    pub fn layout(&self) -> BoardLayout {
        self.layout
    }

    /// Get piece at row/col in the current position
    pub fn piece_at(&self, row: usize, col: usize) -> Option<Piece> {
        self.controller
            .position()
            .board()
            .piece_at(to_square(row, col))
            .map(shakmaty_to_piece)
    }

    pub fn sprite(&self, piece: Piece) -> SharedString {
        SharedString::from(piece.sprite_path(&self.sprite_dir))
    }

    /// Only the human's pieces can be picked up, and only on their turn
    pub fn can_drag(&self, piece: Piece) -> bool {
        piece.color == HUMAN.color()
            && self.controller.turn() == HUMAN
            && self.promotion.is_none()
            && !self.controller.is_game_over()
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.promotion
    }

    pub fn status_text(&self) -> &'static str {
        self.controller.status().label()
    }

    pub fn move_pairs(&self) -> Vec<MovePairDisplay> {
        move_pairs(self.controller.history())
    }

    /// A piece released over a board square. Pawn moves onto the last rank
    /// wait for a promotion choice; everything else goes to `handle_drop`.
    /// Returns false when the piece should snap back.
    pub fn drop_piece(
        &mut self,
        from: Square,
        to: Square,
        piece: Piece,
        cx: &mut Context<Self>,
    ) -> bool {
        if piece.kind == PieceKind::Pawn && self.controller.is_promotion(from, to) {
            debug!("Promotion on {} waiting for a piece choice", to);
            self.promotion = Some(PendingPromotion {
                from,
                to,
                color: piece.color,
            });
            cx.notify();
            return true;
        }
        self.handle_drop(from, to, piece.code(), cx)
    }

    /// Finish a held promotion with the chosen piece
    pub fn choose_promotion(&mut self, kind: PieceKind, cx: &mut Context<Self>) -> bool {
        let Some(pending) = self.promotion.take() else {
            return false;
        };
        let code = Piece::new(kind, pending.color).code();
        self.handle_drop(pending.from, pending.to, code, cx)
    }

    pub fn cancel_promotion(&mut self, cx: &mut Context<Self>) {
        if self.promotion.take().is_some() {
            cx.notify();
        }
    }

    /// Board drop handler. Returns false when the drop was rejected and the
    /// piece should snap back.
    pub fn handle_drop(
        &mut self,
        from: Square,
        to: Square,
        piece_code: &str,
        cx: &mut Context<Self>,
    ) -> bool {
        let accepted = self.controller.attempt_move(from, to, piece_code);
        if accepted {
            if let Some(played) = self.controller.history().last() {
                info!("White played {}", played.san);
            }
            debug!("Position: {}", self.controller.fen());
            self.schedule_reply(cx);
        }
        cx.notify();
        accepted
    }

    /// Start a new game. Any reply still waiting on its timer is dropped.
    pub fn restart(&mut self, cx: &mut Context<Self>) {
        self._reply_task = None;
        self.drag_state = None;
        self.promotion = None;
        self.controller.reset();
        info!("New game");
        cx.notify();
    }

    fn schedule_reply(&mut self, cx: &mut Context<Self>) {
        let Some(ticket) = self.controller.pending_reply() else {
            self._reply_task = None;
            return;
        };

        let delay = self.reply_delay;
        let task = cx.spawn(async move |weak_entity: WeakEntity<GameModel>, cx: &mut AsyncApp| {
            cx.background_executor().timer(delay).await;

            // Entity gone means the window closed; nothing left to play
            let _ = weak_entity.update(cx, |game, cx| {
                game.play_reply(ticket);
                cx.notify();
            });
        });
        self._reply_task = Some(task);
    }

    fn play_reply(&mut self, ticket: ReplyTicket) {
        debug!("Black to pick from {} moves", self.controller.legal_moves().len());
        match self.controller.play_reply(ticket, &mut self.rng) {
            ReplyOutcome::Played(record) => {
                info!("Black played {}", record.san);
                debug!("Position: {}", self.controller.fen());
            }
            ReplyOutcome::Stale => debug!("Dropped reply scheduled for an older position"),
            ReplyOutcome::NoMoves => debug!("Black has no legal moves"),
            ReplyOutcome::GameOver => debug!("Game over, no reply"),
            ReplyOutcome::Rejected(err) => warn!("Picked reply could not be played: {}", err),
        }
    }

    /// Board square under a window position, as a shakmaty square
    pub fn square_at(&self, x: f32, y: f32) -> Option<(usize, usize, Square)> {
        self.layout
            .pos_to_square(x, y)
            .map(|(row, col)| (row, col, to_square(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chess::Turn;
    use crate::domain::game::STARTING_FEN;
    use gpui::{AppContext as _, Entity, TestAppContext};
    use pretty_assertions::assert_eq;

    const DELAY: Duration = Duration::from_millis(500);

    fn test_config() -> GameConfig {
        GameConfig {
            reply_delay_ms: DELAY.as_millis() as u64,
            seed: Some(5),
            ..GameConfig::default()
        }
    }

    fn new_model(cx: &mut TestAppContext) -> Entity<GameModel> {
        cx.new(|_| GameModel::new(&test_config()))
    }

    fn model_from_fen(cx: &mut TestAppContext, fen: &str) -> Entity<GameModel> {
        cx.new(|_| GameModel {
            controller: GameController::from_fen(fen).unwrap(),
            ..GameModel::new(&test_config())
        })
    }

    fn white_pawn() -> Piece {
        Piece::new(PieceKind::Pawn, PieceColor::White)
    }

    #[gpui::test]
    fn test_reply_is_played_after_delay(cx: &mut TestAppContext) {
        let model = new_model(cx);
        let accepted = model.update(cx, |game, cx| {
            game.handle_drop(Square::E2, Square::E4, "wP", cx)
        });
        assert!(accepted);

        cx.executor().advance_clock(DELAY / 2);
        cx.run_until_parked();
        model.read_with(cx, |game, _| {
            assert_eq!(game.controller.turn(), Turn::Black);
            assert_eq!(game.controller.history().len(), 1);
        });

        cx.executor().advance_clock(DELAY);
        cx.run_until_parked();
        model.read_with(cx, |game, _| {
            assert_eq!(game.controller.turn(), Turn::White);
            assert_eq!(game.controller.history().len(), 2);
            assert_eq!(game.move_pairs().len(), 1);
        });
    }

    #[gpui::test]
    fn test_restart_cancels_pending_reply(cx: &mut TestAppContext) {
        let model = new_model(cx);
        model.update(cx, |game, cx| {
            assert!(game.handle_drop(Square::E2, Square::E4, "wP", cx));
            game.restart(cx);
        });

        cx.executor().advance_clock(DELAY * 2);
        cx.run_until_parked();
        model.read_with(cx, |game, _| {
            assert_eq!(game.controller.fen(), STARTING_FEN);
            assert_eq!(game.controller.turn(), Turn::White);
            assert!(game.controller.history().is_empty());
            assert_eq!(game.status_text(), "");
        });
    }

    #[gpui::test]
    fn test_rejected_drop_schedules_nothing(cx: &mut TestAppContext) {
        let model = new_model(cx);
        let accepted = model.update(cx, |game, cx| {
            game.drop_piece(Square::A2, Square::A5, white_pawn(), cx)
        });
        assert!(!accepted);

        cx.executor().advance_clock(DELAY * 2);
        cx.run_until_parked();
        model.read_with(cx, |game, _| {
            assert_eq!(game.controller.fen(), STARTING_FEN);
            assert!(game.controller.history().is_empty());
        });
    }

    #[gpui::test]
    fn test_promotion_waits_for_choice_and_underpromotes(cx: &mut TestAppContext) {
        let model = model_from_fen(cx, "8/P6k/8/8/8/8/8/K7 w - - 0 1");
        model.update(cx, |game, cx| {
            assert!(game.drop_piece(Square::A7, Square::A8, white_pawn(), cx));
        });
        model.read_with(cx, |game, _| {
            assert_eq!(
                game.pending_promotion(),
                Some(PendingPromotion {
                    from: Square::A7,
                    to: Square::A8,
                    color: PieceColor::White,
                })
            );
            assert!(!game.can_drag(Piece::new(PieceKind::King, PieceColor::White)));
            assert!(game.controller.history().is_empty());
        });

        let accepted = model.update(cx, |game, cx| game.choose_promotion(PieceKind::Knight, cx));
        assert!(accepted);
        model.read_with(cx, |game, _| {
            assert_eq!(game.pending_promotion(), None);
            assert_eq!(
                game.piece_at(0, 0),
                Some(Piece::new(PieceKind::Knight, PieceColor::White))
            );
            assert_eq!(game.controller.history()[0].promotion, Some(PieceKind::Knight));
            assert_eq!(game.controller.turn(), Turn::Black);
        });

        cx.executor().advance_clock(DELAY);
        cx.run_until_parked();
        model.read_with(cx, |game, _| {
            assert_eq!(game.controller.turn(), Turn::White);
        });
    }

    #[gpui::test]
    fn test_cancelled_promotion_leaves_pawn(cx: &mut TestAppContext) {
        let model = model_from_fen(cx, "8/P6k/8/8/8/8/8/K7 w - - 0 1");
        model.update(cx, |game, cx| {
            assert!(game.drop_piece(Square::A7, Square::A8, white_pawn(), cx));
            game.cancel_promotion(cx);
            assert!(!game.choose_promotion(PieceKind::Queen, cx));
        });
        model.read_with(cx, |game, _| {
            assert_eq!(game.piece_at(1, 0), Some(white_pawn()));
            assert_eq!(game.controller.turn(), Turn::White);
        });
    }
}
