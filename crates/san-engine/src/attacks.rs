//! Attack oracle: is a square attacked by a given side?
//!
//! Five attacker classes are evaluated independently, first hit wins.
//! This is the sole primitive behind check detection and the castling
//! transit rule.

use crate::board::Board;
use san_core::{Color, Piece, Square};

/// Knight move offsets as (file, rank) deltas.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
];

/// Orthogonal ray directions (rook/queen).
const STRAIGHT_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal ray directions (bishop/queen).
const DIAGONAL_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Returns true if `square` is attacked by any piece of `by_side`.
pub fn is_square_attacked(board: &Board, square: Square, by_side: Color) -> bool {
    // Pawns attack diagonally forward, so look one rank back from the
    // target in the attacker's advance direction.
    let pawn_dir = by_side.pawn_direction();
    for d_file in [-1, 1] {
        if let Some(sq) = square.offset(d_file, -pawn_dir) {
            if board.piece_at(sq) == Some((Piece::Pawn, by_side)) {
                return true;
            }
        }
    }

    // Knights.
    for (d_file, d_rank) in KNIGHT_OFFSETS {
        if let Some(sq) = square.offset(d_file, d_rank) {
            if board.piece_at(sq) == Some((Piece::Knight, by_side)) {
                return true;
            }
        }
    }

    // Straight rays, stopped by the first occupied square.
    for (d_file, d_rank) in STRAIGHT_DIRS {
        let mut next = square.offset(d_file, d_rank);
        while let Some(sq) = next {
            if let Some((piece, color)) = board.piece_at(sq) {
                if color == by_side && matches!(piece, Piece::Rook | Piece::Queen) {
                    return true;
                }
                break;
            }
            next = sq.offset(d_file, d_rank);
        }
    }

    // Diagonal rays.
    for (d_file, d_rank) in DIAGONAL_DIRS {
        let mut next = square.offset(d_file, d_rank);
        while let Some(sq) = next {
            if let Some((piece, color)) = board.piece_at(sq) {
                if color == by_side && matches!(piece, Piece::Bishop | Piece::Queen) {
                    return true;
                }
                break;
            }
            next = sq.offset(d_file, d_rank);
        }
    }

    // Adjacent enemy king.
    for d_file in -1..=1 {
        for d_rank in -1..=1 {
            if d_file == 0 && d_rank == 0 {
                continue;
            }
            if let Some(sq) = square.offset(d_file, d_rank) {
                if board.piece_at(sq) == Some((Piece::King, by_side)) {
                    return true;
                }
            }
        }
    }

    false
}

/// Returns true if `side`'s king is in check.
///
/// A board without a king for `side` is degenerate and reported as
/// "not in check" rather than a panic.
pub fn is_in_check(board: &Board, side: Color) -> bool {
    match board.king_square(side) {
        Some(king) => is_square_attacked(board, king, side.opposite()),
        None => false,
    }
}
