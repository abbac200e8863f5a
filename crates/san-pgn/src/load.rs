//! PGN text parsing and replay validation.

use crate::{PgnCollection, PgnError, PgnGame, RecordedMove};
use san_core::Color;
use san_engine::{apply_move, Board};
use san_notation::parse_move;
use std::path::Path;
use tracing::{info, warn};

/// Loads and validates every game in a PGN file.
pub fn load_file(path: &Path) -> Result<PgnCollection, PgnError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_collection(&text))
}

/// Parses PGN text into validated games. Games that fail validation are
/// skipped with a warning.
pub fn parse_collection(text: &str) -> PgnCollection {
    let raw_games = split_games(text);
    let total = raw_games.len();
    let mut collection = PgnCollection::default();

    for (number, raw) in raw_games.into_iter().enumerate() {
        let label = format!(
            "#{} {} vs {}",
            number + 1,
            if raw.white.is_empty() { "?" } else { &raw.white },
            if raw.black.is_empty() { "?" } else { &raw.black },
        );
        match replay_moves(&raw.moves_text) {
            Ok(moves) if moves.is_empty() => {
                warn!(game = %label, "skipping PGN game: no moves");
            }
            Ok(moves) => {
                collection.games.push(PgnGame {
                    event: raw.event,
                    white: raw.white,
                    black: raw.black,
                    result: raw.result,
                    moves,
                });
            }
            Err(reject) => {
                warn!(
                    game = %label,
                    ply = reject.ply,
                    mv = %reject.text,
                    reason = %reject.reason,
                    "skipping PGN game: invalid move",
                );
            }
        }
    }

    info!(
        valid = collection.games.len(),
        invalid = total - collection.games.len(),
        "loaded PGN games",
    );
    collection
}

/// A game's tag pairs and raw move text, before validation.
#[derive(Default)]
struct RawGame {
    event: String,
    white: String,
    black: String,
    result: String,
    moves_text: String,
}

/// Splits PGN text into raw games on `[Event ...]` boundaries. Tag lines
/// are parsed as they appear; move text starts after the blank separator
/// line.
fn split_games(text: &str) -> Vec<RawGame> {
    let mut games = Vec::new();
    let mut current: Option<RawGame> = None;
    let mut in_moves = false;

    for line in text.lines() {
        let line = line.trim();

        if line.starts_with("[Event ") {
            if let Some(game) = current.take() {
                games.push(game);
            }
            current = Some(RawGame::default());
            in_moves = false;
        }

        let Some(game) = current.as_mut() else {
            continue;
        };

        if line.starts_with('[') {
            parse_tag(line, game);
            in_moves = false;
        } else if line.is_empty() {
            in_moves = true;
        } else if in_moves {
            game.moves_text.push(' ');
            game.moves_text.push_str(line);
        }
    }

    if let Some(game) = current.take() {
        games.push(game);
    }
    games
}

/// Extracts the quoted value of the tags this loader keeps.
fn parse_tag(line: &str, game: &mut RawGame) {
    let value = line.split('"').nth(1).unwrap_or("").to_string();
    if line.starts_with("[Event ") {
        game.event = value;
    } else if line.starts_with("[White ") {
        game.white = value;
    } else if line.starts_with("[Black ") {
        game.black = value;
    } else if line.starts_with("[Result ") {
        game.result = value;
    }
}

/// Strips `{...}` comments, `(...)` variations, and move numbers (digits
/// directly followed by dots) from move text. Result tokens survive
/// because their digits are not followed by a dot.
fn clean_moves_text(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_brace = false;
    let mut in_paren = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '{' => {
                in_brace = true;
                i += 1;
                continue;
            }
            '}' => {
                in_brace = false;
                i += 1;
                continue;
            }
            '(' => {
                in_paren = true;
                i += 1;
                continue;
            }
            ')' => {
                in_paren = false;
                i += 1;
                continue;
            }
            _ => {}
        }
        if in_brace || in_paren {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() {
            let mut k = i;
            while k < chars.len() && chars[k].is_ascii_digit() {
                k += 1;
            }
            if k < chars.len() && chars[k] == '.' {
                while k < chars.len() && chars[k] == '.' {
                    k += 1;
                }
                i = k;
                continue;
            }
        }

        out.push(c);
        i += 1;
    }
    out
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

/// Why a game was rejected during replay.
#[derive(Debug)]
struct Rejection {
    ply: usize,
    text: String,
    reason: String,
}

/// Replays move text from the standard starting position with alternating
/// colors, validating each half-move through the engine.
fn replay_moves(moves_text: &str) -> Result<Vec<RecordedMove>, Rejection> {
    let clean = clean_moves_text(moves_text);
    let mut board = Board::standard();
    let mut side = Color::White;
    let mut moves = Vec::new();

    for token in clean.split_whitespace() {
        if is_result_token(token) {
            break;
        }
        let ply = moves.len() + 1;

        let desc = parse_move(token).map_err(|e| Rejection {
            ply,
            text: token.to_string(),
            reason: e.to_string(),
        })?;

        apply_move(&mut board, &desc, side).map_err(|e| Rejection {
            ply,
            text: token.to_string(),
            reason: e.to_string(),
        })?;

        moves.push(RecordedMove {
            text: token.to_string(),
            desc,
            side,
            board_after: board.clone(),
        });
        side = side.opposite();
    }

    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use san_core::Piece;
    use san_core::Square;
    use san_engine::{evaluate_status, PositionStatus};

    #[test]
    fn clean_strips_comments_variations_and_numbers() {
        let cleaned = clean_moves_text("1. e4 {best by test} e5 (1... c5 2. Nf3) 2. Nf3 Nc6");
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        assert_eq!(tokens, ["e4", "e5", "Nf3", "Nc6"]);
    }

    #[test]
    fn clean_preserves_result_tokens_and_castling() {
        let cleaned = clean_moves_text("12. O-O O-O-O 1/2-1/2");
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        assert_eq!(tokens, ["O-O", "O-O-O", "1/2-1/2"]);
    }

    #[test]
    fn replay_stops_at_result_token() {
        let moves = replay_moves(" e4 e5 1-0 d4 ").unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].side, Color::White);
        assert_eq!(moves[1].side, Color::Black);
    }

    #[test]
    fn replay_rejects_illegal_games() {
        let err = replay_moves(" e4 e4 ").unwrap_err();
        assert_eq!(err.ply, 2);
        assert_eq!(err.text, "e4");

        // With the king on e2, Qh4 gives no check, so the '+' claim is
        // rejected by the engine.
        let err = replay_moves(" e4 e5 Ke2 Qh4+ ").unwrap_err();
        assert_eq!(err.ply, 4);
        assert_eq!(err.text, "Qh4+");
    }

    #[test]
    fn parse_collection_keeps_valid_games_and_headers() {
        let text = "\
[Event \"Casual Game\"]
[White \"Anderssen\"]
[Black \"Kieseritzky\"]
[Result \"1-0\"]

1. e4 e5 2. Bc4 Bc5 3. Qh5 Nf6 4. Qxf7# 1-0

[Event \"Broken Game\"]
[White \"A\"]
[Black \"B\"]
[Result \"*\"]

1. e4 e5 2. Ne5 *
";
        let collection = parse_collection(text);
        assert_eq!(collection.games.len(), 1);

        let game = &collection.games[0];
        assert_eq!(game.event, "Casual Game");
        assert_eq!(game.white, "Anderssen");
        assert_eq!(game.black, "Kieseritzky");
        assert_eq!(game.result, "1-0");
        assert_eq!(game.len(), 7);

        let last = game.board_at(7).unwrap();
        assert_eq!(
            last.piece_at(Square::from_algebraic("f7").unwrap()),
            Some((Piece::Queen, Color::White))
        );
        assert_eq!(
            evaluate_status(&last, Color::Black),
            PositionStatus::Checkmate
        );
    }

    #[test]
    fn games_without_moves_are_skipped() {
        let text = "[Event \"Empty\"]\n[Result \"*\"]\n\n*\n";
        let collection = parse_collection(text);
        assert!(collection.games.is_empty());
    }
}
