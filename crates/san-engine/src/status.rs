//! Position classification: normal, check, checkmate, stalemate.

use crate::attacks::is_in_check;
use crate::board::Board;
use crate::geometry;
use san_core::{Color, Piece, Square};

/// The status of a position for the side to move.
///
/// Derived, never stored: recomputed per query from a board and a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    /// Not in check, at least one legal move.
    Normal,
    /// In check, at least one legal move.
    Check,
    /// In check, no legal move.
    Checkmate,
    /// Not in check, no legal move.
    Stalemate,
}

/// Classifies the position for `side` (the side to move).
pub fn evaluate_status(board: &Board, side: Color) -> PositionStatus {
    let in_check = is_in_check(board, side);
    let has_moves = has_any_legal_move(board, side);

    match (in_check, has_moves) {
        (true, true) => PositionStatus::Check,
        (true, false) => PositionStatus::Checkmate,
        (false, false) => PositionStatus::Stalemate,
        (false, true) => PositionStatus::Normal,
    }
}

/// Exhaustive witness search over every (source, destination) pair,
/// short-circuiting on the first simulated position that leaves the
/// mover's own king safe.
///
/// Promotions are resolved to a queen here: the specific piece never
/// changes whether the mover's king is attacked.
pub(crate) fn has_any_legal_move(board: &Board, side: Color) -> bool {
    for src in Square::all() {
        let piece = match board.piece_at(src) {
            Some((piece, color)) if color == side => piece,
            _ => continue,
        };

        for dst in Square::all() {
            if dst == src {
                continue;
            }
            let dest_piece = board.piece_at(dst);
            if matches!(dest_piece, Some((_, color)) if color == side) {
                continue;
            }

            let mut is_capture = dest_piece.is_some();
            let mut en_passant_capture = false;
            if piece == Piece::Pawn && dest_piece.is_none() && board.en_passant == Some(dst) {
                if let Some(jumped) = dst.offset(0, -side.pawn_direction()) {
                    if board.piece_at(jumped) == Some((Piece::Pawn, side.opposite())) {
                        is_capture = true;
                        en_passant_capture = true;
                    }
                }
            }

            let promoting =
                piece == Piece::Pawn && dst.rank().index() == side.promotion_rank();

            if !geometry::can_move(board, piece, src, dst, is_capture, side, promoting) {
                continue;
            }

            let mut scratch = board.clone();
            scratch.clear(src);
            if en_passant_capture {
                if let Some(jumped) = dst.offset(0, -side.pawn_direction()) {
                    scratch.clear(jumped);
                }
            }
            scratch.set(dst, if promoting { Piece::Queen } else { piece }, side);

            if !is_in_check(&scratch, side) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn starting_position_is_normal() {
        let board = Board::standard();
        assert_eq!(evaluate_status(&board, Color::White), PositionStatus::Normal);
        assert_eq!(evaluate_status(&board, Color::Black), PositionStatus::Normal);
    }

    #[test]
    fn check_with_escape() {
        let mut board = Board::empty();
        board.set(sq("e1"), Piece::King, Color::White);
        board.set(sq("e8"), Piece::Rook, Color::Black);
        board.set(sq("a8"), Piece::King, Color::Black);

        assert_eq!(evaluate_status(&board, Color::White), PositionStatus::Check);
    }

    #[test]
    fn back_rank_checkmate() {
        let mut board = Board::empty();
        board.set(sq("g8"), Piece::King, Color::Black);
        board.set(sq("f7"), Piece::Pawn, Color::Black);
        board.set(sq("g7"), Piece::Pawn, Color::Black);
        board.set(sq("h7"), Piece::Pawn, Color::Black);
        board.set(sq("a8"), Piece::Rook, Color::White);
        board.set(sq("g1"), Piece::King, Color::White);

        assert_eq!(
            evaluate_status(&board, Color::Black),
            PositionStatus::Checkmate
        );
    }

    #[test]
    fn cornered_king_stalemate() {
        // White king h6, white queen g6, black king h8: black has no move
        // and is not in check.
        let mut board = Board::empty();
        board.set(sq("h6"), Piece::King, Color::White);
        board.set(sq("g6"), Piece::Queen, Color::White);
        board.set(sq("h8"), Piece::King, Color::Black);

        assert_eq!(
            evaluate_status(&board, Color::Black),
            PositionStatus::Stalemate
        );
        // White, to move, is fine.
        assert_eq!(evaluate_status(&board, Color::White), PositionStatus::Normal);
    }

    #[test]
    fn en_passant_witness_separates_stalemate_from_normal() {
        // White king boxed in on h1, white pawn e5 blocked: the only
        // possible move is exd6 en passant.
        let mut board = Board::empty();
        board.set(sq("h1"), Piece::King, Color::White);
        board.set(sq("e5"), Piece::Pawn, Color::White);
        board.set(sq("d5"), Piece::Pawn, Color::Black);
        board.set(sq("e6"), Piece::Pawn, Color::Black);
        board.set(sq("f2"), Piece::Queen, Color::Black);
        board.set(sq("a8"), Piece::King, Color::Black);

        board.en_passant = Some(sq("d6"));
        assert!(has_any_legal_move(&board, Color::White));

        board.en_passant = None;
        assert_eq!(
            evaluate_status(&board, Color::White),
            PositionStatus::Stalemate
        );
    }

    #[test]
    fn promotion_counts_as_a_move() {
        // Same boxed king; the a7 pawn's promotion push is the only
        // witness the scan can find.
        let mut board = Board::empty();
        board.set(sq("h1"), Piece::King, Color::White);
        board.set(sq("a7"), Piece::Pawn, Color::White);
        board.set(sq("f2"), Piece::Queen, Color::Black);
        board.set(sq("e8"), Piece::King, Color::Black);

        assert!(has_any_legal_move(&board, Color::White));

        // Remove the pawn and the position collapses to stalemate.
        let mut without = board.clone();
        without.clear(sq("a7"));
        assert!(!has_any_legal_move(&without, Color::White));
    }

    #[test]
    fn degenerate_board_without_king_is_normal() {
        let mut board = Board::empty();
        board.set(sq("e4"), Piece::Pawn, Color::White);
        assert_eq!(evaluate_status(&board, Color::White), PositionStatus::Normal);
    }
}
