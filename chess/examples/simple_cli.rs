//! A tiny two-player console game.
//!
//! Moves are entered as `r c r c`: the row and column of the piece to move,
//! then the row and column of the destination. Rows and columns count from 0,
//! with row 0 being Black's home row.

use lanechess::{Coord, Game};

use std::io::{self, BufRead, Write};

fn parse_move(line: &str) -> Option<(Coord, Coord)> {
    let mut nums = line.split_whitespace().map(|t| t.parse::<usize>().ok());
    let fr = nums.next()??;
    let fc = nums.next()??;
    let tr = nums.next()??;
    let tc = nums.next()??;
    if nums.next().is_some() || fr >= 8 || fc >= 8 || tr >= 8 || tc >= 8 {
        return None;
    }
    Some((Coord::new(fr, fc), Coord::new(tr, tc)))
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();
    let mut game = Game::initial();

    loop {
        writeln!(out, "{}", game.board())?;
        if let Some(outcome) = game.outcome() {
            writeln!(out, "{}", outcome)?;
            return Ok(());
        }
        write!(out, "{} to move> ", game.side())?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let (from, to) = match parse_move(&line) {
            Some(mv) => mv,
            None => {
                writeln!(out, "enter a move as: from_row from_col to_row to_col")?;
                continue;
            }
        };
        if let Err(err) = game.try_move(from, to) {
            writeln!(out, "illegal move: {}", err)?;
        }
    }
}
