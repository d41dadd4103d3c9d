//! Game controller errors

use shakmaty::Square;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[cfg(test)]
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("Illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },

    #[error("Not the human side's turn")]
    NotYourTurn,

    #[error("Game is over")]
    GameOver,
}
