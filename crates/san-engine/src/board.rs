//! Board state: piece grid, castling rights, en-passant target.

use san_core::{CastleSide, Color, File, Piece, Rank, Square};
use std::fmt;

/// The four independent castling rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    white_short: bool,
    white_long: bool,
    black_short: bool,
    black_long: bool,
}

impl CastlingRights {
    /// All four rights held (the starting position).
    pub const ALL: CastlingRights = CastlingRights {
        white_short: true,
        white_long: true,
        black_short: true,
        black_long: true,
    };

    /// No rights held.
    pub const NONE: CastlingRights = CastlingRights {
        white_short: false,
        white_long: false,
        black_short: false,
        black_long: false,
    };

    /// Returns true if `side` still holds the right to castle on `wing`.
    #[inline]
    pub const fn has(self, side: Color, wing: CastleSide) -> bool {
        match (side, wing) {
            (Color::White, CastleSide::Short) => self.white_short,
            (Color::White, CastleSide::Long) => self.white_long,
            (Color::Black, CastleSide::Short) => self.black_short,
            (Color::Black, CastleSide::Long) => self.black_long,
        }
    }

    /// Forfeits a single right. Rights are never restored.
    #[inline]
    pub fn forfeit(&mut self, side: Color, wing: CastleSide) {
        match (side, wing) {
            (Color::White, CastleSide::Short) => self.white_short = false,
            (Color::White, CastleSide::Long) => self.white_long = false,
            (Color::Black, CastleSide::Short) => self.black_short = false,
            (Color::Black, CastleSide::Long) => self.black_long = false,
        }
    }

    /// Forfeits both of a side's rights (the king moved or castled).
    #[inline]
    pub fn forfeit_both(&mut self, side: Color) {
        self.forfeit(side, CastleSide::Short);
        self.forfeit(side, CastleSide::Long);
    }
}

/// Complete board state.
///
/// An owned value type: scratch copies are independent `clone()`s, never
/// shared references. The engine mutates a `Board` in place only when a
/// fully validated move commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Piece grid, rank-major (index = rank * 8 + file).
    squares: [Option<(Piece, Color)>; 64],
    /// Castling rights for both sides.
    pub castling: CastlingRights,
    /// En-passant target square, valid for exactly one reply.
    pub en_passant: Option<Square>,
}

impl Board {
    /// Creates an empty board with no castling rights.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            castling: CastlingRights::NONE,
            en_passant: None,
        }
    }

    /// Creates the standard starting position with full castling rights
    /// and no en-passant target.
    pub fn standard() -> Self {
        let mut board = Board::empty();

        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        for (file, piece) in File::ALL.into_iter().zip(back_rank) {
            board.set(Square::new(file, Rank::R1), piece, Color::White);
            board.set(Square::new(file, Rank::R8), piece, Color::Black);
        }
        for file in File::ALL {
            board.set(Square::new(file, Rank::R2), Piece::Pawn, Color::White);
            board.set(Square::new(file, Rank::R7), Piece::Pawn, Color::Black);
        }

        board.castling = CastlingRights::ALL;
        board
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.squares[sq.index() as usize]
    }

    /// Returns true if the square is empty.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index() as usize].is_none()
    }

    /// Places a piece on a square, replacing whatever was there.
    ///
    /// Setup primitive for fixtures and tests; during validation the
    /// engine only mutates scratch copies.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Piece, color: Color) {
        self.squares[sq.index() as usize] = Some((piece, color));
    }

    /// Clears a square.
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.squares[sq.index() as usize] = None;
    }

    /// Returns the square of `side`'s king, if one is on the board.
    pub fn king_square(&self, side: Color) -> Option<Square> {
        Square::all().find(|&sq| self.piece_at(sq) == Some((Piece::King, side)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    /// Renders the board from White's perspective, uppercase for White.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            write!(f, "{}  ", rank)?;
            for file in File::ALL {
                let c = match self.piece_at(Square::new(file, rank)) {
                    Some((piece, Color::White)) => piece.to_san_char(),
                    Some((piece, Color::Black)) => {
                        piece.to_san_char().to_ascii_lowercase()
                    }
                    None => '.',
                };
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "\n   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout() {
        let board = Board::standard();
        assert_eq!(
            board.piece_at(Square::E1),
            Some((Piece::King, Color::White))
        );
        assert_eq!(
            board.piece_at(Square::E8),
            Some((Piece::King, Color::Black))
        );
        assert_eq!(
            board.piece_at(Square::A1),
            Some((Piece::Rook, Color::White))
        );
        assert_eq!(
            board.piece_at(Square::from_algebraic("d8").unwrap()),
            Some((Piece::Queen, Color::Black))
        );
        for file in File::ALL {
            assert_eq!(
                board.piece_at(Square::new(file, Rank::R2)),
                Some((Piece::Pawn, Color::White))
            );
            assert_eq!(
                board.piece_at(Square::new(file, Rank::R7)),
                Some((Piece::Pawn, Color::Black))
            );
        }
        assert!(board.is_empty(Square::from_algebraic("e4").unwrap()));
        assert_eq!(board.castling, CastlingRights::ALL);
        assert_eq!(board.en_passant, None);
    }

    #[test]
    fn set_and_clear() {
        let mut board = Board::empty();
        let e4 = Square::from_algebraic("e4").unwrap();
        board.set(e4, Piece::Queen, Color::Black);
        assert_eq!(board.piece_at(e4), Some((Piece::Queen, Color::Black)));
        board.clear(e4);
        assert!(board.is_empty(e4));
    }

    #[test]
    fn king_square_lookup() {
        let board = Board::standard();
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    fn castling_rights_forfeit() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.has(Color::White, CastleSide::Short));

        rights.forfeit(Color::White, CastleSide::Short);
        assert!(!rights.has(Color::White, CastleSide::Short));
        assert!(rights.has(Color::White, CastleSide::Long));
        assert!(rights.has(Color::Black, CastleSide::Short));

        rights.forfeit_both(Color::Black);
        assert!(!rights.has(Color::Black, CastleSide::Short));
        assert!(!rights.has(Color::Black, CastleSide::Long));
        assert!(rights.has(Color::White, CastleSide::Long));
    }

    #[test]
    fn display_renders_start_position() {
        let rendered = Board::standard().to_string();
        let first_line = rendered.lines().next().unwrap();
        assert_eq!(first_line.trim_end(), "8  r n b q k b n r");
        assert!(rendered.ends_with("   a b c d e f g h"));
    }
}
