//! Standard Algebraic Notation (SAN) lexing and parsing.
//!
//! Turns move text like `Nf3`, `exd5`, `O-O`, or `e8=Q#` into a
//! [`san_core::MoveDesc`] for the legality engine. Parsing is purely
//! syntactic: a move that parses here may still be rejected by the engine.

mod lexer;
mod parser;

pub use lexer::{tokenize, Token};
pub use parser::{parse_move, parse_tokens};

use std::fmt;

/// Error type for SAN lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// The input is empty or all whitespace.
    Empty,
    /// A character that belongs to no SAN token.
    UnknownCharacter(char),
    /// The token sequence matches no move pattern.
    UnrecognizedMove(String),
    /// Well-formed move followed by leftover tokens.
    TrailingInput(String),
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::Empty => write!(f, "empty move text"),
            NotationError::UnknownCharacter(c) => {
                write!(f, "unexpected character '{}'", c)
            }
            NotationError::UnrecognizedMove(s) => {
                write!(f, "unrecognized move: {}", s)
            }
            NotationError::TrailingInput(s) => {
                write!(f, "trailing input after move: {}", s)
            }
        }
    }
}

impl std::error::Error for NotationError {}
