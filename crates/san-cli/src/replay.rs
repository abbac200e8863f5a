//! PGN replay navigation.

use san_pgn::{load_file, PgnGame};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Loads a PGN file, lists its valid games, and steps through the one the
/// user selects.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let collection = load_file(path)?;
    if collection.games.is_empty() {
        println!("no valid games found in {}", path.display());
        return Ok(());
    }

    let stdin = io::stdin();
    loop {
        println!("\nAvailable games:");
        for (i, game) in collection.games.iter().enumerate() {
            println!(
                "[{}] {}: {} vs {} ({} moves) - {}",
                i + 1,
                if game.event.is_empty() { "Untitled" } else { &game.event },
                if game.white.is_empty() { "?" } else { &game.white },
                if game.black.is_empty() { "?" } else { &game.black },
                game.len(),
                if game.result.is_empty() { "*" } else { &game.result },
            );
        }

        print!("\nselect a game (1-{}) or 'q' to quit> ", collection.games.len());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input == "q" || input == "Q" {
            break;
        }

        match input.parse::<usize>() {
            Ok(n) if (1..=collection.games.len()).contains(&n) => {
                step_through(&collection.games[n - 1])?;
            }
            _ => println!("invalid selection"),
        }
    }

    Ok(())
}

/// Steps through one game: next/back/jump/quit.
fn step_through(game: &PgnGame) -> io::Result<()> {
    println!("\nEvent:  {}", game.event);
    println!("White:  {}", game.white);
    println!("Black:  {}", game.black);
    println!("Result: {}", game.result);
    println!("\ncommands: [enter]/'n' next, 'b' back, 'j <n>' jump, 'q' quit\n");

    let mut ply = 0usize;
    show(game, ply);

    let stdin = io::stdin();
    loop {
        print!("replay> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            "" | "n" => {
                if ply < game.len() {
                    ply += 1;
                    show(game, ply);
                } else {
                    println!("already at the last move");
                }
            }
            "b" => {
                if ply > 0 {
                    ply -= 1;
                    show(game, ply);
                } else {
                    println!("already at the initial position");
                }
            }
            "q" => break,
            _ => {
                if let Some(n) = input
                    .strip_prefix("j ")
                    .and_then(|rest| rest.trim().parse::<usize>().ok())
                {
                    if n <= game.len() {
                        ply = n;
                        show(game, ply);
                    } else {
                        println!("move out of range (0-{})", game.len());
                    }
                } else {
                    println!("unknown command; use [enter]/'n', 'b', 'j <n>', or 'q'");
                }
            }
        }
    }

    Ok(())
}

fn show(game: &PgnGame, ply: usize) {
    let Some(board) = game.board_at(ply) else {
        return;
    };
    println!("\n{}\n", board);
    if ply == 0 {
        println!("initial position (0/{} moves)", game.len());
    } else {
        let m = &game.moves[ply - 1];
        println!("move {}/{}: {} ({})", ply, game.len(), m.text, m.side);
    }
}
