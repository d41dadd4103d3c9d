//! Board layout calculations - handles sizing and coordinate transformations.

use crate::ui::theme::{BOARD_PADDING, MOVE_LIST_WIDTH, PIECE_SCALE, STATUS_ROW_HEIGHT};

/// Handles all layout calculations for the fixed-size chess board.
/// The board sits at (BOARD_PADDING, BOARD_PADDING) in the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardLayout {
    pub board_size: f32,
}

impl BoardLayout {
    pub fn new(board_size: f32) -> Self {
        Self { board_size }
    }

    pub fn square_size(&self) -> f32 {
        self.board_size / 8.0
    }

    pub fn piece_size(&self) -> f32 {
        self.square_size() * PIECE_SCALE
    }

    /// Convert a window position to board row/col (if within board)
    pub fn pos_to_square(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let board_x = x - BOARD_PADDING;
        let board_y = y - BOARD_PADDING;

        if board_x < 0.0 || board_y < 0.0 {
            return None;
        }

        let square_size = self.square_size();
        let col = (board_x / square_size) as usize;
        let row = (board_y / square_size) as usize;

        if row < 8 && col < 8 {
            Some((row, col))
        } else {
            None
        }
    }

    pub fn window_width(&self) -> f32 {
        self.board_size + MOVE_LIST_WIDTH + BOARD_PADDING * 3.0
    }

    /// Room for the board, the promotion picker and the status line
    pub fn window_height(&self) -> f32 {
        self.board_size + STATUS_ROW_HEIGHT * 2.0 + BOARD_PADDING * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_size() {
        let layout = BoardLayout::new(320.0);
        assert_eq!(layout.square_size(), 40.0);
        assert_eq!(layout.piece_size(), 40.0 * PIECE_SCALE);
    }

    #[test]
    fn test_pos_to_square_corners() {
        let layout = BoardLayout::new(320.0);
        let origin = BOARD_PADDING;
        assert_eq!(layout.pos_to_square(origin + 1.0, origin + 1.0), Some((0, 0)));
        assert_eq!(
            layout.pos_to_square(origin + 319.0, origin + 319.0),
            Some((7, 7))
        );
        assert_eq!(layout.pos_to_square(origin + 170.0, origin + 250.0), Some((6, 4)));
    }

    #[test]
    fn test_pos_to_square_outside() {
        let layout = BoardLayout::new(320.0);
        assert_eq!(layout.pos_to_square(0.0, 0.0), None);
        assert_eq!(layout.pos_to_square(BOARD_PADDING + 321.0, BOARD_PADDING + 5.0), None);
        assert_eq!(layout.pos_to_square(BOARD_PADDING + 5.0, BOARD_PADDING + 400.0), None);
    }
}
