//! Source-square resolution.
//!
//! Scans the board for pieces of the mover's kind and color that can
//! legally reach the destination, applying file/rank disambiguation hints
//! as exact-match filters. Exactly one candidate must remain: zero and
//! more-than-one are both reported errors, never silently resolved.

use crate::board::Board;
use crate::error::MoveError;
use crate::geometry;
use san_core::{Color, File, MoveDesc, Piece, Rank, Square};

/// Finds the unique source square for a non-castling, non-king move.
pub(crate) fn resolve_source(
    board: &Board,
    desc: &MoveDesc,
    piece: Piece,
    side: Color,
    dest: Square,
) -> Result<Square, MoveError> {
    // A hint character outside a-h/1-8 cannot match any square; the
    // parser never produces one, and it degrades to "no filter".
    let file_filter = desc.src_file.and_then(File::from_char);
    let rank_filter = desc.src_rank.and_then(Rank::from_char);
    let promotion_requested = desc.promotion.is_some();

    let mut found = 0usize;
    let mut source = None;

    for sq in Square::all() {
        if board.piece_at(sq) != Some((piece, side)) {
            continue;
        }
        if let Some(file) = file_filter {
            if sq.file() != file {
                continue;
            }
        }
        if let Some(rank) = rank_filter {
            if sq.rank() != rank {
                continue;
            }
        }
        if !geometry::can_move(
            board,
            piece,
            sq,
            dest,
            desc.is_capture,
            side,
            promotion_requested,
        ) {
            continue;
        }
        found += 1;
        source = Some(sq);
    }

    match (found, source) {
        (1, Some(sq)) => Ok(sq),
        (0, _) => Err(MoveError::NoMatchingSource {
            piece,
            san: desc.to_string(),
        }),
        _ => Err(MoveError::AmbiguousSource {
            piece,
            san: desc.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn unique_candidate_resolves() {
        let board = Board::standard();
        let desc = MoveDesc::new(Piece::Knight, 'f', '3');
        let src = resolve_source(&board, &desc, Piece::Knight, Color::White, sq("f3"));
        assert_eq!(src, Ok(sq("g1")));
    }

    #[test]
    fn zero_candidates_is_an_error() {
        let board = Board::standard();
        let desc = MoveDesc::new(Piece::Knight, 'e', '5');
        let err = resolve_source(&board, &desc, Piece::Knight, Color::White, sq("e5"));
        assert!(matches!(err, Err(MoveError::NoMatchingSource { .. })));
    }

    #[test]
    fn two_candidates_are_ambiguous() {
        let mut board = Board::empty();
        board.set(sq("b1"), Piece::Knight, Color::White);
        board.set(sq("f1"), Piece::Knight, Color::White);

        let desc = MoveDesc::new(Piece::Knight, 'd', '2');
        let err = resolve_source(&board, &desc, Piece::Knight, Color::White, sq("d2"));
        assert!(matches!(err, Err(MoveError::AmbiguousSource { .. })));
    }

    #[test]
    fn file_hint_disambiguates() {
        let mut board = Board::empty();
        board.set(sq("b1"), Piece::Knight, Color::White);
        board.set(sq("f1"), Piece::Knight, Color::White);

        let mut desc = MoveDesc::new(Piece::Knight, 'd', '2');
        desc.src_file = Some('b');
        let src = resolve_source(&board, &desc, Piece::Knight, Color::White, sq("d2"));
        assert_eq!(src, Ok(sq("b1")));
    }

    #[test]
    fn rank_hint_disambiguates() {
        let mut board = Board::empty();
        board.set(sq("d1"), Piece::Rook, Color::White);
        board.set(sq("d7"), Piece::Rook, Color::White);

        let mut desc = MoveDesc::new(Piece::Rook, 'd', '4');
        desc.src_rank = Some('7');
        let src = resolve_source(&board, &desc, Piece::Rook, Color::White, sq("d4"));
        assert_eq!(src, Ok(sq("d7")));
    }

    #[test]
    fn enemy_pieces_are_not_candidates() {
        let mut board = Board::empty();
        board.set(sq("b1"), Piece::Knight, Color::Black);

        let desc = MoveDesc::new(Piece::Knight, 'd', '2');
        let err = resolve_source(&board, &desc, Piece::Knight, Color::White, sq("d2"));
        assert!(matches!(err, Err(MoveError::NoMatchingSource { .. })));
    }
}
