//! SAN parser: token sequence to move descriptor.

use crate::lexer::{tokenize, Token};
use crate::NotationError;
use san_core::{CastleSide, MoveDesc, Piece};

/// Parses one SAN move into a [`MoveDesc`].
pub fn parse_move(input: &str) -> Result<MoveDesc, NotationError> {
    let tokens = tokenize(input)?;
    parse_tokens(&tokens, input.trim())
}

/// Parses an already-tokenized move. `raw` is kept on the descriptor for
/// diagnostics.
pub fn parse_tokens(tokens: &[Token], raw: &str) -> Result<MoveDesc, NotationError> {
    match tokens.first() {
        Some(Token::CastleShort) => return parse_castle(CastleSide::Short, &tokens[1..], raw),
        Some(Token::CastleLong) => return parse_castle(CastleSide::Long, &tokens[1..], raw),
        None => return Err(NotationError::Empty),
        _ => {}
    }

    let (piece, rest) = match tokens {
        [Token::Piece(piece), rest @ ..] => (*piece, rest),
        _ => (Piece::Pawn, tokens),
    };

    // Pattern cascade, longest first. Pawns only write their source file,
    // and only on captures; pieces may carry file, rank, or full-square
    // disambiguation.
    let (src_file, src_rank, is_capture, dest_file, dest_rank, rest) = if piece == Piece::Pawn {
        match rest {
            // exd5
            [Token::File(sf), Token::Capture, Token::File(df), Token::Rank(dr), rest @ ..] => {
                (Some(*sf), None, true, *df, *dr, rest)
            }
            // e4
            [Token::File(df), Token::Rank(dr), rest @ ..] => (None, None, false, *df, *dr, rest),
            _ => return Err(NotationError::UnrecognizedMove(raw.to_string())),
        }
    } else {
        match rest {
            // Qh4xe1
            [Token::File(sf), Token::Rank(sr), Token::Capture, Token::File(df), Token::Rank(dr), rest @ ..] => {
                (Some(*sf), Some(*sr), true, *df, *dr, rest)
            }
            // Qh4e1
            [Token::File(sf), Token::Rank(sr), Token::File(df), Token::Rank(dr), rest @ ..] => {
                (Some(*sf), Some(*sr), false, *df, *dr, rest)
            }
            // Raxb1
            [Token::File(sf), Token::Capture, Token::File(df), Token::Rank(dr), rest @ ..] => {
                (Some(*sf), None, true, *df, *dr, rest)
            }
            // Rab1
            [Token::File(sf), Token::File(df), Token::Rank(dr), rest @ ..] => {
                (Some(*sf), None, false, *df, *dr, rest)
            }
            // N1c3
            [Token::Rank(sr), Token::File(df), Token::Rank(dr), rest @ ..] => {
                (None, Some(*sr), false, *df, *dr, rest)
            }
            // Nxd4
            [Token::Capture, Token::File(df), Token::Rank(dr), rest @ ..] => {
                (None, None, true, *df, *dr, rest)
            }
            // Nf3
            [Token::File(df), Token::Rank(dr), rest @ ..] => (None, None, false, *df, *dr, rest),
            _ => return Err(NotationError::UnrecognizedMove(raw.to_string())),
        }
    };

    // Optional promotion suffix. A bare '=' is consumed without setting a
    // promotion piece; the engine reports the missing promotion.
    let (promotion, rest) = match rest {
        [Token::Promote, Token::PromotePiece(piece), rest @ ..] => (Some(*piece), rest),
        [Token::Promote, rest @ ..] => (None, rest),
        _ => (None, rest),
    };

    let (is_check, rest) = match rest {
        [Token::Check, rest @ ..] => (true, rest),
        _ => (false, rest),
    };
    let (is_mate, rest) = match rest {
        [Token::Mate, rest @ ..] => (true, rest),
        _ => (false, rest),
    };

    if !rest.is_empty() {
        return Err(NotationError::TrailingInput(raw.to_string()));
    }

    let mut desc = MoveDesc::new(piece, dest_file, dest_rank);
    desc.src_file = src_file;
    desc.src_rank = src_rank;
    desc.is_capture = is_capture;
    desc.promotion = promotion;
    desc.is_check = is_check;
    desc.is_mate = is_mate;
    desc.raw = raw.to_string();
    Ok(desc)
}

fn parse_castle(
    side: CastleSide,
    rest: &[Token],
    raw: &str,
) -> Result<MoveDesc, NotationError> {
    let (is_check, rest) = match rest {
        [Token::Check, rest @ ..] => (true, rest),
        _ => (false, rest),
    };
    let (is_mate, rest) = match rest {
        [Token::Mate, rest @ ..] => (true, rest),
        _ => (false, rest),
    };
    if !rest.is_empty() {
        return Err(NotationError::TrailingInput(raw.to_string()));
    }

    let mut desc = MoveDesc::castling(side);
    desc.is_check = is_check;
    desc.is_mate = is_mate;
    desc.raw = raw.to_string();
    Ok(desc)
}
