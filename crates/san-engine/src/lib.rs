//! Semantic move-legality and board-state engine.
//!
//! This crate takes a parsed move description ([`san_core::MoveDesc`]) and a
//! [`Board`], decides whether the move is legal under full chess rules, and
//! either commits the resulting position or reports a precise reason for
//! rejection. It provides:
//!
//! - [`Board`] - 8x8 piece grid plus castling rights and en-passant target
//! - [`apply_move`] - resolve, simulate, validate, and commit one move
//! - [`evaluate_status`] - classify a position as normal/check/checkmate/stalemate
//! - [`is_square_attacked`] / [`is_in_check`] - the attack oracle
//!
//! # Transactional application
//!
//! Every validation works on a scratch copy of the board; the real board is
//! overwritten only after all checks pass. A rejected move leaves the board
//! byte-for-byte unchanged.
//!
//! # Example
//!
//! ```
//! use san_core::{Color, MoveDesc, Piece};
//! use san_engine::{apply_move, evaluate_status, Board, PositionStatus};
//!
//! let mut board = Board::standard();
//! let e4 = MoveDesc::new(Piece::Pawn, 'e', '4');
//! apply_move(&mut board, &e4, Color::White).unwrap();
//! assert_eq!(evaluate_status(&board, Color::Black), PositionStatus::Normal);
//! ```
//!
//! Callers must serialize calls per board instance: the engine mutates the
//! passed-in board on success and is not reentrant by design.

mod apply;
mod attacks;
mod board;
mod error;
mod geometry;
mod resolve;
mod status;

pub use apply::apply_move;
pub use attacks::{is_in_check, is_square_attacked};
pub use board::{Board, CastlingRights};
pub use error::MoveError;
pub use status::{evaluate_status, PositionStatus};
