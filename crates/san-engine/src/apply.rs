//! Legality and application engine.
//!
//! One move attempt runs Resolve -> Simulate -> ValidateKingSafety ->
//! ValidateAnnotation -> Commit. All work happens on a scratch clone of
//! the board; the real board is overwritten only when every check passes,
//! so a rejection of any kind leaves it untouched.

use crate::attacks::{is_in_check, is_square_attacked};
use crate::board::Board;
use crate::error::MoveError;
use crate::geometry;
use crate::resolve::resolve_source;
use crate::status::has_any_legal_move;
use san_core::{CastleSide, Color, File, MoveDesc, Piece, Rank, Square};

/// Validates `desc` for `side` against `board` and commits it on success.
///
/// The check/mate annotation on the descriptor is treated as an assertion
/// to be verified, not advisory: a move whose annotation disagrees with
/// the computed post-move status is rejected.
pub fn apply_move(board: &mut Board, desc: &MoveDesc, side: Color) -> Result<(), MoveError> {
    // Castling never goes through the general piece-move path.
    if let Some(wing) = desc.castle {
        let mut scratch = board.clone();
        castle_on(&mut scratch, wing, side)?;

        // The transit checks inside castle_on already guarantee this;
        // verify the final position again before committing.
        if is_in_check(&scratch, side) {
            return Err(MoveError::SelfCheck(desc.to_string()));
        }

        *board = scratch;
        return Ok(());
    }

    let piece = desc.piece;
    let dest = destination(desc)?;

    // Promotion pre-checks, before any source resolution.
    if piece == Piece::Pawn {
        let reaching_last = dest.rank().index() == side.promotion_rank();
        match (desc.promotion.is_some(), reaching_last) {
            (false, true) => return Err(MoveError::PromotionRequired(desc.to_string())),
            (true, false) => {
                return Err(MoveError::PromotionOutsideLastRank(desc.to_string()))
            }
            _ => {}
        }
    }

    // Locate the source square. The king is found directly; every other
    // piece goes through the disambiguating resolver.
    let src = if piece == Piece::King {
        let king = board
            .king_square(side)
            .ok_or_else(|| MoveError::NoMatchingSource {
                piece,
                san: desc.to_string(),
            })?;
        if !geometry::can_king_move(board, king, dest, desc.is_capture, side) {
            return Err(MoveError::IllegalKingMove(desc.to_string()));
        }
        king
    } else {
        resolve_source(board, desc, piece, side, dest)?
    };

    // Simulate on a scratch board.
    let mut scratch = board.clone();
    let captured = scratch.piece_at(dest);

    // Never reachable from a legal position; rejected anyway.
    if matches!(captured, Some((Piece::King, color)) if color != side) {
        return Err(MoveError::KingCapture);
    }

    let en_passant_capture = piece == Piece::Pawn
        && desc.is_capture
        && captured.is_none()
        && board.en_passant == Some(dest);

    update_rights_on_move(&mut scratch, side, piece, src);
    if let Some((captured_piece, captured_color)) = captured {
        update_rights_on_capture(&mut scratch, captured_piece, captured_color, dest);
    }

    scratch.clear(src);

    if en_passant_capture {
        // The captured pawn sits one rank behind the destination.
        if let Some(jumped) = dest.offset(0, -side.pawn_direction()) {
            scratch.clear(jumped);
        }
    }

    let mut placed = piece;
    if piece == Piece::Pawn {
        if let Some(promo) = desc.promotion {
            if !promo.is_promotion_target() {
                return Err(MoveError::InvalidPromotionPiece(promo));
            }
            placed = promo;
        }
    }
    scratch.set(dest, placed, side);

    // The en-passant window lasts exactly one half-move: cleared on every
    // commit unless this move is a pawn double push, which re-opens it on
    // the intermediate square.
    scratch.en_passant = None;
    if piece == Piece::Pawn && !desc.is_capture {
        let d_rank = dest.rank().index() as i8 - src.rank().index() as i8;
        if d_rank == 2 * side.pawn_direction() {
            scratch.en_passant = src.offset(0, side.pawn_direction());
        }
    }

    // One rule subsumes pins, discovered checks, and moving into check.
    if is_in_check(&scratch, side) {
        return Err(MoveError::SelfCheck(desc.to_string()));
    }

    verify_annotation(&scratch, desc, side)?;

    *board = scratch;
    Ok(())
}

/// Extracts and validates the destination square from the descriptor.
fn destination(desc: &MoveDesc) -> Result<Square, MoveError> {
    let (file_char, rank_char) = match (desc.dest_file, desc.dest_rank) {
        (Some(f), Some(r)) => (f, r),
        _ => {
            return Err(MoveError::MalformedDescriptor(format!(
                "{} has no destination square",
                desc
            )))
        }
    };
    match (File::from_char(file_char), Rank::from_char(rank_char)) {
        (Some(file), Some(rank)) => Ok(Square::new(file, rank)),
        _ => Err(MoveError::OffBoard(desc.to_string())),
    }
}

/// Validates and performs castling on the given (scratch) board.
fn castle_on(board: &mut Board, wing: CastleSide, side: Color) -> Result<(), MoveError> {
    if !board.castling.has(side, wing) {
        return Err(MoveError::CastlingRightLost { side, wing });
    }

    let back = match side {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    };
    let king_from = Square::new(File::E, back);
    let (rook_from, king_to, rook_to) = match wing {
        CastleSide::Short => (
            Square::new(File::H, back),
            Square::new(File::G, back),
            Square::new(File::F, back),
        ),
        CastleSide::Long => (
            Square::new(File::A, back),
            Square::new(File::C, back),
            Square::new(File::D, back),
        ),
    };

    if board.piece_at(king_from) != Some((Piece::King, side))
        || board.piece_at(rook_from) != Some((Piece::Rook, side))
    {
        return Err(MoveError::CastlingPiecesMoved);
    }

    // Every square strictly between king and rook must be empty.
    let step: i8 = if rook_from.file().index() > king_from.file().index() {
        1
    } else {
        -1
    };
    let mut next = king_from.offset(step, 0);
    while let Some(sq) = next {
        if sq == rook_from {
            break;
        }
        if !board.is_empty(sq) {
            return Err(MoveError::CastlingBlocked);
        }
        next = sq.offset(step, 0);
    }

    if is_in_check(board, side) {
        return Err(MoveError::CastlingInCheck);
    }

    // The king's transit, start and end squares included, must not be
    // attacked.
    let enemy = side.opposite();
    let transit = match wing {
        CastleSide::Short => [File::E, File::F, File::G],
        CastleSide::Long => [File::E, File::D, File::C],
    };
    for file in transit {
        if is_square_attacked(board, Square::new(file, back), enemy) {
            return Err(MoveError::CastlingThroughCheck);
        }
    }

    // Move king and rook atomically; both rights are spent.
    board.clear(king_from);
    board.clear(rook_from);
    board.set(king_to, Piece::King, side);
    board.set(rook_to, Piece::Rook, side);
    board.castling.forfeit_both(side);
    board.en_passant = None;

    Ok(())
}

/// Castling-rights bookkeeping for the moving piece.
fn update_rights_on_move(board: &mut Board, side: Color, piece: Piece, src: Square) {
    match piece {
        Piece::King => board.castling.forfeit_both(side),
        Piece::Rook if src.rank().index() == side.back_rank() => match src.file() {
            File::A => board.castling.forfeit(side, CastleSide::Long),
            File::H => board.castling.forfeit(side, CastleSide::Short),
            _ => {}
        },
        _ => {}
    }
}

/// A rook captured on its original corner forfeits its owner's right,
/// regardless of who captured it.
fn update_rights_on_capture(board: &mut Board, piece: Piece, color: Color, dest: Square) {
    if piece != Piece::Rook || dest.rank().index() != color.back_rank() {
        return;
    }
    match dest.file() {
        File::A => board.castling.forfeit(color, CastleSide::Long),
        File::H => board.castling.forfeit(color, CastleSide::Short),
        _ => {}
    }
}

/// Verifies the descriptor's check/mate annotation against the computed
/// post-move status.
fn verify_annotation(scratch: &Board, desc: &MoveDesc, side: Color) -> Result<(), MoveError> {
    let enemy = side.opposite();
    let enemy_in_check = is_in_check(scratch, enemy);
    let enemy_has_reply = has_any_legal_move(scratch, enemy);

    if desc.claims_check() && !enemy_in_check {
        return Err(MoveError::SpuriousCheckAnnotation(desc.to_string()));
    }
    if !desc.claims_check() && enemy_in_check {
        return Err(MoveError::MissingCheckAnnotation(desc.to_string()));
    }
    if desc.is_mate && enemy_in_check && enemy_has_reply {
        return Err(MoveError::SpuriousMateAnnotation(desc.to_string()));
    }
    if !desc.is_mate && enemy_in_check && !enemy_has_reply {
        return Err(MoveError::MissingMateAnnotation(desc.to_string()));
    }

    Ok(())
}
