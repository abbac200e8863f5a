//! Per-piece movement predicates.
//!
//! Each predicate answers "can this piece at `src` reach `dst` under the
//! current board contents", including the claimed-capture occupancy rule.
//! Castling is not handled here; the application engine dispatches it as a
//! separate branch before any geometry check.

use crate::board::Board;
use san_core::{Color, Piece, Square};

/// File and rank deltas from `src` to `dst`.
#[inline]
fn deltas(src: Square, dst: Square) -> (i8, i8) {
    (
        dst.file().index() as i8 - src.file().index() as i8,
        dst.rank().index() as i8 - src.rank().index() as i8,
    )
}

/// Destination occupancy rule shared by every piece except the pawn:
/// a claimed capture needs an enemy piece on the square, a quiet move
/// needs the square empty.
#[inline]
fn destination_ok(board: &Board, dst: Square, is_capture: bool, side: Color) -> bool {
    match board.piece_at(dst) {
        Some((_, color)) => is_capture && color != side,
        None => !is_capture,
    }
}

/// Returns true if every square strictly between `src` and `dst` is empty.
///
/// Only meaningful for aligned (straight or diagonal) pairs; callers check
/// alignment first.
fn path_is_clear(board: &Board, src: Square, dst: Square) -> bool {
    let (d_file, d_rank) = deltas(src, dst);
    let step_f = d_file.signum();
    let step_r = d_rank.signum();

    let mut next = src.offset(step_f, step_r);
    while let Some(sq) = next {
        if sq == dst {
            return true;
        }
        if !board.is_empty(sq) {
            return false;
        }
        next = sq.offset(step_f, step_r);
    }
    false
}

/// Dispatches to the predicate matching `piece`.
pub(crate) fn can_move(
    board: &Board,
    piece: Piece,
    src: Square,
    dst: Square,
    is_capture: bool,
    side: Color,
    promotion_requested: bool,
) -> bool {
    match piece {
        Piece::Pawn => can_pawn_move(board, src, dst, is_capture, side, promotion_requested),
        Piece::Knight => can_knight_move(board, src, dst, is_capture, side),
        Piece::Bishop => can_bishop_move(board, src, dst, is_capture, side),
        Piece::Rook => can_rook_move(board, src, dst, is_capture, side),
        Piece::Queen => can_queen_move(board, src, dst, is_capture, side),
        Piece::King => can_king_move(board, src, dst, is_capture, side),
    }
}

/// Pawn movement: single or double push, diagonal capture, en passant,
/// and promotion consistency (reaching the last rank requires a promotion
/// request and vice versa).
pub(crate) fn can_pawn_move(
    board: &Board,
    src: Square,
    dst: Square,
    is_capture: bool,
    side: Color,
    promotion_requested: bool,
) -> bool {
    let dir = side.pawn_direction();
    let (d_file, d_rank) = deltas(src, dst);

    if is_capture {
        // One diagonal step in the advance direction.
        if d_rank != dir || d_file.abs() != 1 {
            return false;
        }
        match board.piece_at(dst) {
            Some((_, color)) => {
                if color == side {
                    return false;
                }
            }
            None => {
                // Empty destination: only legal as an en-passant capture.
                if board.en_passant != Some(dst) {
                    return false;
                }
                // The captured pawn sits on the square the capturer steps past.
                let jumped = match dst.offset(0, -dir) {
                    Some(sq) => sq,
                    None => return false,
                };
                match board.piece_at(jumped) {
                    Some((Piece::Pawn, color)) if color != side => {}
                    _ => return false,
                }
            }
        }
    } else {
        if d_file != 0 {
            return false;
        }
        if d_rank == dir {
            if !board.is_empty(dst) {
                return false;
            }
        } else if d_rank == 2 * dir && src.rank().index() == side.pawn_start_rank() {
            let intermediate = match src.offset(0, dir) {
                Some(sq) => sq,
                None => return false,
            };
            if !board.is_empty(intermediate) || !board.is_empty(dst) {
                return false;
            }
        } else {
            return false;
        }
    }

    // Promotion is mandatory on the last rank and impossible elsewhere.
    let reaching_last = dst.rank().index() == side.promotion_rank();
    if promotion_requested != reaching_last {
        return false;
    }

    true
}

/// Knight movement: the (2,1)/(1,2) L-pattern.
pub(crate) fn can_knight_move(
    board: &Board,
    src: Square,
    dst: Square,
    is_capture: bool,
    side: Color,
) -> bool {
    let (d_file, d_rank) = deltas(src, dst);
    let (d_file, d_rank) = (d_file.abs(), d_rank.abs());

    if !((d_rank == 2 && d_file == 1) || (d_rank == 1 && d_file == 2)) {
        return false;
    }
    destination_ok(board, dst, is_capture, side)
}

/// Bishop movement: exact diagonal with a clear path.
pub(crate) fn can_bishop_move(
    board: &Board,
    src: Square,
    dst: Square,
    is_capture: bool,
    side: Color,
) -> bool {
    let (d_file, d_rank) = deltas(src, dst);
    if d_rank.abs() != d_file.abs() {
        return false;
    }
    if !path_is_clear(board, src, dst) {
        return false;
    }
    destination_ok(board, dst, is_capture, side)
}

/// Rook movement: along a rank or file with a clear path.
pub(crate) fn can_rook_move(
    board: &Board,
    src: Square,
    dst: Square,
    is_capture: bool,
    side: Color,
) -> bool {
    if src.rank() != dst.rank() && src.file() != dst.file() {
        return false;
    }
    if !path_is_clear(board, src, dst) {
        return false;
    }
    destination_ok(board, dst, is_capture, side)
}

/// Queen movement: rook-like or bishop-like with a clear path.
pub(crate) fn can_queen_move(
    board: &Board,
    src: Square,
    dst: Square,
    is_capture: bool,
    side: Color,
) -> bool {
    let (d_file, d_rank) = deltas(src, dst);
    let rook_like = src.rank() == dst.rank() || src.file() == dst.file();
    let bishop_like = d_rank.abs() == d_file.abs();

    if !rook_like && !bishop_like {
        return false;
    }
    if !path_is_clear(board, src, dst) {
        return false;
    }
    destination_ok(board, dst, is_capture, side)
}

/// King movement: at most one step on each axis. Castling is not routed
/// through this predicate.
pub(crate) fn can_king_move(
    board: &Board,
    src: Square,
    dst: Square,
    is_capture: bool,
    side: Color,
) -> bool {
    let (d_file, d_rank) = deltas(src, dst);
    let (d_file, d_rank) = (d_file.abs(), d_rank.abs());

    if d_rank > 1 || d_file > 1 || (d_rank == 0 && d_file == 0) {
        return false;
    }
    destination_ok(board, dst, is_capture, side)
}
