//! Pure chess domain types and utilities.
//! No GPUI dependencies - this is the domain layer.

use shakmaty::{Color as SColor, File, Rank, Role, Square};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Parse the type letter of a piece code, either case
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn role(self) -> Role {
        match self {
            PieceKind::Pawn => Role::Pawn,
            PieceKind::Knight => Role::Knight,
            PieceKind::Bishop => Role::Bishop,
            PieceKind::Rook => Role::Rook,
            PieceKind::Queen => Role::Queen,
            PieceKind::King => Role::King,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceColor {
    White,
    Black,
}

/// Whose move the controller is waiting for
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Turn {
    #[default]
    White,
    Black,
}

impl Turn {
    pub fn flip(self) -> Self {
        match self {
            Turn::White => Turn::Black,
            Turn::Black => Turn::White,
        }
    }

    pub fn color(self) -> PieceColor {
        match self {
            Turn::White => PieceColor::White,
            Turn::Black => PieceColor::Black,
        }
    }
}

impl From<SColor> for Turn {
    fn from(color: SColor) -> Self {
        match color {
            SColor::White => Turn::White,
            SColor::Black => Turn::Black,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

/// Every piece the board can show, in sprite order.
pub const PIECES: [Piece; 12] = [
    Piece::new(PieceKind::Pawn, PieceColor::White),
    Piece::new(PieceKind::Knight, PieceColor::White),
    Piece::new(PieceKind::Bishop, PieceColor::White),
    Piece::new(PieceKind::Rook, PieceColor::White),
    Piece::new(PieceKind::Queen, PieceColor::White),
    Piece::new(PieceKind::King, PieceColor::White),
    Piece::new(PieceKind::Pawn, PieceColor::Black),
    Piece::new(PieceKind::Knight, PieceColor::Black),
    Piece::new(PieceKind::Bishop, PieceColor::Black),
    Piece::new(PieceKind::Rook, PieceColor::Black),
    Piece::new(PieceKind::Queen, PieceColor::Black),
    Piece::new(PieceKind::King, PieceColor::Black),
];

const CODES: [&str; 12] = [
    "wP", "wN", "wB", "wR", "wQ", "wK", "bP", "bN", "bB", "bR", "bQ", "bK",
];

impl Piece {
    pub const fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// Two-letter piece code, colour then type ("wQ", "bN", ...)
    pub fn code(&self) -> &'static str {
        let idx = PIECES
            .iter()
            .position(|p| p == self)
            .unwrap_or_default();
        CODES[idx]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        CODES.iter().position(|&c| c == code).map(|idx| PIECES[idx])
    }

    /// Sprite image for this piece, keyed by its code
    pub fn sprite_path(&self, sprite_dir: &str) -> String {
        format!("{}/{}.png", sprite_dir.trim_end_matches('/'), self.code())
    }
}

/// Convert row/col (0-indexed, row 0 = rank 8) to shakmaty Square
pub fn to_square(row: usize, col: usize) -> Square {
    let file = File::new(col as u32);
    let rank = Rank::new(7 - row as u32); // row 0 = rank 8, row 7 = rank 1
    Square::from_coords(file, rank)
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    let color = match piece.color {
        SColor::White => PieceColor::White,
        SColor::Black => PieceColor::Black,
    };
    Piece { kind, color }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_codes_match_table() {
        for (piece, code) in PIECES.iter().zip(CODES) {
            assert_eq!(piece.code(), code);
            assert_eq!(Piece::from_code(code), Some(*piece));
        }
    }

    #[test]
    fn test_from_code_rejects_garbage() {
        assert_eq!(Piece::from_code(""), None);
        assert_eq!(Piece::from_code("w"), None);
        assert_eq!(Piece::from_code("xQ"), None);
        assert_eq!(Piece::from_code("wq"), None);
        assert_eq!(Piece::from_code("wQQ"), None);
    }

    #[test]
    fn test_sprite_path() {
        let queen = Piece::new(PieceKind::Queen, PieceColor::Black);
        assert_eq!(queen.sprite_path("sprites"), "sprites/bQ.png");
        assert_eq!(queen.sprite_path("sprites/"), "sprites/bQ.png");
    }

    #[test]
    fn test_to_square_orientation() {
        assert_eq!(to_square(0, 0), Square::A8);
        assert_eq!(to_square(7, 7), Square::H1);
        assert_eq!(to_square(6, 4), Square::E2);
    }

    #[test]
    fn test_turn_flip() {
        assert_eq!(Turn::default(), Turn::White);
        assert_eq!(Turn::White.flip(), Turn::Black);
        assert_eq!(Turn::Black.flip().color(), PieceColor::White);
    }
}
