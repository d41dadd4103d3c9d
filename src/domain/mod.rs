//! Chess domain layer: piece types, the game controller and its errors.
//!
//! This is a pure domain module with no GPUI dependencies.

pub mod chess;
pub mod error;
pub mod game;

pub use chess::{Piece, shakmaty_to_piece, to_square};
pub use game::{GameController, MoveRecord, ReplyOutcome, ReplyTicket};
