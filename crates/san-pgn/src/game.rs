//! Replayable game data.

use san_core::{Color, MoveDesc};
use san_engine::Board;

/// One validated half-move with the board state after it.
#[derive(Debug, Clone)]
pub struct RecordedMove {
    /// The move text as it appeared in the PGN.
    pub text: String,
    /// The parsed descriptor.
    pub desc: MoveDesc,
    /// The color that made the move.
    pub side: Color,
    /// The board after the move committed.
    pub board_after: Board,
}

/// A fully validated game.
#[derive(Debug, Clone)]
pub struct PgnGame {
    pub event: String,
    pub white: String,
    pub black: String,
    pub result: String,
    /// Validated half-moves in order.
    pub moves: Vec<RecordedMove>,
}

impl PgnGame {
    /// Returns the position after `ply` half-moves; ply 0 is the initial
    /// position. `None` when `ply` exceeds the game length.
    pub fn board_at(&self, ply: usize) -> Option<Board> {
        if ply == 0 {
            Some(Board::standard())
        } else {
            self.moves.get(ply - 1).map(|m| m.board_after.clone())
        }
    }

    /// Number of half-moves in the game.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True if the game has no moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// A collection of validated games from one PGN source.
#[derive(Debug, Clone, Default)]
pub struct PgnCollection {
    pub games: Vec<PgnGame>,
}
