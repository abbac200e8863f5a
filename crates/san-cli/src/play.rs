//! Interactive SAN entry loop.

use san_core::Color;
use san_engine::{apply_move, evaluate_status, Board, PositionStatus};
use san_notation::parse_move;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Reads SAN moves from stdin with an alternating side to move until the
/// game ends or the user quits. Rejected moves leave the board as it was.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut board = Board::standard();
    let mut side = Color::White;

    println!("{}\n", board);

    loop {
        print!("{} to move> ", side);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "q" || input == "quit" {
            break;
        }

        let desc = match parse_move(input) {
            Ok(desc) => desc,
            Err(e) => {
                println!("cannot parse '{}': {}", input, e);
                continue;
            }
        };
        debug!(?desc, "parsed move");

        match apply_move(&mut board, &desc, side) {
            Ok(()) => {
                println!("\n{}\n", board);
                side = side.opposite();
                match evaluate_status(&board, side) {
                    PositionStatus::Check => println!("{} is in check.", side),
                    PositionStatus::Checkmate => {
                        println!("Checkmate. {} wins.", side.opposite());
                        break;
                    }
                    PositionStatus::Stalemate => {
                        println!("Stalemate.");
                        break;
                    }
                    PositionStatus::Normal => {}
                }
            }
            Err(e) => println!("illegal move: {}", e),
        }
    }

    Ok(())
}
