//! PGN game loading and replay.
//!
//! Loads one or more games from PGN text, validating every half-move
//! through the legality engine. Games that fail lexing, parsing, or
//! legality are skipped with a warning; the survivors keep a per-ply
//! board snapshot so a caller can step through them.
//!
//! Tag-pair handling is deliberately minimal: only the Event, White,
//! Black, and Result tags are kept.

mod game;
mod load;

pub use game::{PgnCollection, PgnGame, RecordedMove};
pub use load::{load_file, parse_collection};

use thiserror::Error;

/// Error type for PGN loading.
#[derive(Debug, Error)]
pub enum PgnError {
    #[error("cannot read PGN file: {0}")]
    Io(#[from] std::io::Error),
}
