//! View models for rendering the board and the move list.
//!
//! These types prepare game state for display in the UI. They live in the
//! UI layer, not the domain layer.

use crate::domain::{MoveRecord, Piece};

/// State for a piece being dragged
#[derive(Clone, Copy, Debug)]
pub struct DragState {
    pub piece: Piece,
    pub from_row: usize,
    pub from_col: usize,
    /// Mouse position relative to window
    pub mouse_x: f32,
    pub mouse_y: f32,
}

/// One numbered row of the move list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePairDisplay {
    pub move_num: usize,
    pub white_move: String,
    pub black_move: Option<String>,
}

/// Group a move history into numbered white/black pairs
pub fn move_pairs(history: &[MoveRecord]) -> Vec<MovePairDisplay> {
    history
        .chunks(2)
        .enumerate()
        .map(|(i, chunk)| MovePairDisplay {
            move_num: i + 1,
            white_move: chunk[0].san.clone(),
            black_move: chunk.get(1).map(|m| m.san.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameController, ReplyOutcome};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shakmaty::Square;

    #[test]
    fn test_empty_history() {
        assert!(move_pairs(&[]).is_empty());
    }

    #[test]
    fn test_pairs_with_trailing_white_move() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = GameController::new();
        assert!(game.attempt_move(Square::E2, Square::E4, "wP"));
        let ticket = game.pending_reply().unwrap();
        let ReplyOutcome::Played(reply) = game.play_reply(ticket, &mut rng) else {
            panic!("expected a reply");
        };
        assert!(game.attempt_move(Square::D2, Square::D4, "wP"));

        assert_eq!(
            move_pairs(game.history()),
            vec![
                MovePairDisplay {
                    move_num: 1,
                    white_move: "e4".to_string(),
                    black_move: Some(reply.san),
                },
                MovePairDisplay {
                    move_num: 2,
                    white_move: "d4".to_string(),
                    black_move: None,
                },
            ]
        );
    }
}
