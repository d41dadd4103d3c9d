//! Game controller - the turn-driven move cycle between the human (White)
//! and the random responder (Black).
//!
//! Rules are delegated to shakmaty. The controller only owns the current
//! position, whose turn it is, and a state version used to invalidate
//! opponent replies that were scheduled against an older position.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
#[cfg(test)]
use shakmaty::fen::ParseFenError;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, EnPassantMode, File, Move, Position, Role, Square};

use super::chess::{Piece, PieceKind, Turn, shakmaty_to_piece};
use super::error::GameError;

/// The side moved by drag and drop
pub const HUMAN: Turn = Turn::White;

#[cfg(test)]
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Fifty-move rule, counted in half-moves
const FIFTY_MOVE_PLIES: u32 = 100;

/// A drop gesture turned into a move candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    /// Piece a pawn promotes to if the move turns out to be a promotion
    pub promotion: Role,
}

impl MoveRequest {
    #[cfg(test)]
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: Role::Queen,
        }
    }

    /// Build a request from a drop, reading the promotion piece from a
    /// piece code ("wQ") or a bare letter ("n"). Anything that does not name
    /// a knight, bishop, rook or queen promotes to a queen.
    pub fn with_promotion_hint(from: Square, to: Square, hint: &str) -> Self {
        let promotion = hint
            .chars()
            .last()
            .and_then(PieceKind::from_letter)
            .map(PieceKind::role)
            .filter(|role| matches!(role, Role::Knight | Role::Bishop | Role::Rook | Role::Queen))
            .unwrap_or(Role::Queen);
        Self {
            from,
            to,
            promotion,
        }
    }
}

/// A move the rules engine accepted or offers, in drag coordinates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    /// For castling this is the king's destination, not the rook square
    pub to: Square,
    pub piece: Piece,
    pub promotion: Option<PieceKind>,
    pub san: String,
}

/// Derived status of the current position, highest priority first
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Checkmate,
    Check,
    Stalemate,
    Draw,
    Normal,
}

impl GameStatus {
    pub fn label(self) -> &'static str {
        match self {
            GameStatus::Checkmate => "Checkmate!",
            GameStatus::Check => "Check!",
            GameStatus::Stalemate => "Stalemate!",
            GameStatus::Draw => "Draw!",
            GameStatus::Normal => "",
        }
    }
}

/// Permission to play one opponent reply against a specific state version
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplyTicket {
    version: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyOutcome {
    Played(MoveRecord),
    /// The game moved on (reset or another move) since the ticket was issued
    Stale,
    NoMoves,
    GameOver,
    /// The picked move could not be played on the current position
    Rejected(GameError),
}

#[derive(Clone, Debug)]
pub struct GameController {
    position: Chess,
    turn: Turn,
    version: u64,
    /// Repetition keys of every position reached, including the first
    seen: Vec<String>,
    history: Vec<MoveRecord>,
}

impl GameController {
    pub fn new() -> Self {
        Self::with_position(Chess::default())
    }

    /// Start from an arbitrary position. The side to move in the FEN
    /// becomes the controller's turn.
    #[cfg(test)]
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let fen: Fen = fen
            .parse()
            .map_err(|e: ParseFenError| GameError::InvalidFen(e.to_string()))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| GameError::InvalidFen(e.to_string()))?;
        Ok(Self::with_position(position))
    }

    fn with_position(position: Chess) -> Self {
        Self {
            turn: position.turn().into(),
            seen: vec![repetition_key(&position)],
            position,
            version: 0,
            history: Vec::new(),
        }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    #[cfg(test)]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Moves played since the last reset, in order
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// All legal moves in the current position
    pub fn legal_moves(&self) -> Vec<MoveRecord> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(|m| self.describe(m))
            .collect()
    }

    /// Whether a drop from `from` to `to` is a legal pawn promotion, so the
    /// player has to pick the new piece before the move is made
    pub fn is_promotion(&self, from: Square, to: Square) -> bool {
        self.legal_moves()
            .iter()
            .any(|m| m.from == from && m.to == to && m.promotion.is_some())
    }

    /// Handle a drop from the board. Returns false (and changes nothing)
    /// when the move is rejected, so the piece snaps back.
    pub fn attempt_move(&mut self, from: Square, to: Square, promotion_hint: &str) -> bool {
        match self.try_move(MoveRequest::with_promotion_hint(from, to, promotion_hint)) {
            Ok(_) => true,
            Err(err) => {
                debug!("Rejected drop {}{}: {}", from, to, err);
                false
            }
        }
    }

    pub fn try_move(&mut self, request: MoveRequest) -> Result<MoveRecord, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if self.turn != HUMAN {
            return Err(GameError::NotYourTurn);
        }

        let m = self.resolve(&request)?;
        let record = self.apply(m)?;

        // A finished game parks the turn where it is
        if !self.is_game_over() {
            self.turn = self.turn.flip();
        }
        Ok(record)
    }

    /// Ticket for the opponent reply, if one is due
    pub fn pending_reply(&self) -> Option<ReplyTicket> {
        (self.turn != HUMAN && !self.is_game_over()).then_some(ReplyTicket {
            version: self.version,
        })
    }

    /// Play a uniformly random legal move for the opponent
    pub fn play_reply<R: Rng + ?Sized>(&mut self, ticket: ReplyTicket, rng: &mut R) -> ReplyOutcome {
        self.apply_reply(ticket, |moves| moves.choose(rng).cloned())
    }

    fn apply_reply(
        &mut self,
        ticket: ReplyTicket,
        pick: impl FnOnce(&[Move]) -> Option<Move>,
    ) -> ReplyOutcome {
        if ticket.version != self.version || self.turn == HUMAN {
            return ReplyOutcome::Stale;
        }
        if self.is_game_over() {
            return ReplyOutcome::GameOver;
        }

        let moves = self.position.legal_moves();
        let Some(m) = pick(&moves) else {
            return ReplyOutcome::NoMoves;
        };
        match self.apply(m) {
            Ok(record) => {
                self.turn = self.turn.flip();
                ReplyOutcome::Played(record)
            }
            Err(err) => ReplyOutcome::Rejected(err),
        }
    }

    /// Back to the starting position with White to move
    pub fn reset(&mut self) {
        let position = Chess::default();
        self.seen = vec![repetition_key(&position)];
        self.position = position;
        self.turn = Turn::White;
        self.history.clear();
        self.version += 1;
    }

    pub fn status(&self) -> GameStatus {
        if self.is_checkmate() {
            GameStatus::Checkmate
        } else if self.is_check() {
            GameStatus::Check
        } else if self.is_stalemate() {
            GameStatus::Stalemate
        } else if self.is_draw() {
            GameStatus::Draw
        } else {
            GameStatus::Normal
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    /// Fifty-move rule, stalemate, insufficient material or threefold repetition
    pub fn is_draw(&self) -> bool {
        self.position.halfmoves() >= FIFTY_MOVE_PLIES
            || self.position.is_stalemate()
            || self.position.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let current = repetition_key(&self.position);
        self.seen.iter().filter(|key| **key == current).count() >= 3
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    /// Find the legal move matching a drop
    fn resolve(&self, request: &MoveRequest) -> Result<Move, GameError> {
        self.position
            .legal_moves()
            .iter()
            .filter(|m| drag_squares(m) == Some((request.from, request.to)))
            .find(|m| m.promotion().is_none_or(|role| role == request.promotion))
            .cloned()
            .ok_or(GameError::IllegalMove {
                from: request.from,
                to: request.to,
            })
    }

    fn apply(&mut self, m: Move) -> Result<MoveRecord, GameError> {
        let record = self.describe(&m).ok_or(GameError::IllegalMove {
            from: m.to(),
            to: m.to(),
        })?;
        let next = self
            .position
            .clone()
            .play(m)
            .map_err(|_| GameError::IllegalMove {
                from: record.from,
                to: record.to,
            })?;

        self.seen.push(repetition_key(&next));
        self.position = next;
        self.history.push(record.clone());
        self.version += 1;
        Ok(record)
    }

    fn describe(&self, m: &Move) -> Option<MoveRecord> {
        let (from, to) = drag_squares(m)?;
        let color = self.position.turn();
        let piece = shakmaty_to_piece(shakmaty::Piece {
            color,
            role: m.role(),
        });
        let promotion = m
            .promotion()
            .map(|role| shakmaty_to_piece(shakmaty::Piece { color, role }).kind);
        let san = San::from_move(&self.position, m.clone()).to_string();
        Some(MoveRecord {
            from,
            to,
            piece,
            promotion,
            san,
        })
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

/// Source and destination squares as the user drags them
fn drag_squares(m: &Move) -> Option<(Square, Square)> {
    match m {
        Move::Normal { from, to, .. } => Some((*from, *to)),
        Move::EnPassant { from, to, .. } => Some((*from, *to)),
        Move::Castle { king, rook } => {
            // For castling, user drags king to destination (g1/g8 or c1/c8)
            let king_dest = if rook.file() > king.file() {
                Square::from_coords(File::G, rook.rank())
            } else {
                Square::from_coords(File::C, rook.rank())
            };
            Some((*king, king_dest))
        }
        Move::Put { .. } => None,
    }
}

/// Placement, side to move, castling rights and en passant square
fn repetition_key(position: &Chess) -> String {
    let fen = Fen::from_position(position, EnPassantMode::Legal).to_string();
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}
