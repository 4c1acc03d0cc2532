use anyhow::bail;
use structopt::StructOpt;

use tabia::core::{Coord, Piece};
use tabia::movegen;
use tabia::Position;

/// Prints a position and the destination squares its pieces can move to.
#[derive(Debug, StructOpt)]
struct Options {
    /// FEN representation of the position to analyze.
    #[structopt(name = "FEN")]
    fen: String,

    /// A square in algebraic notation ("e2"). Defaults to every piece of the
    /// side to move.
    #[structopt(short, long)]
    square: Option<String>,

    /// Drop moves that would leave the mover's own king in check.
    #[structopt(long)]
    legal: bool,
}

fn main() -> anyhow::Result<()> {
    let ops = Options::from_args();
    let pos = Position::from_fen(&ops.fen)?;
    print!("{}", pos);

    let pieces: Vec<Piece> = match &ops.square {
        Some(square) => {
            let at = parse_square(square)?;
            match pos.get(at.x as i32, at.y as i32)? {
                Some(piece) => vec![piece],
                None => bail!("no piece at {}", square),
            }
        }
        None => pos.pieces(pos.side_to_move()).collect(),
    };

    for piece in pieces {
        let moves = if ops.legal {
            movegen::legal_moves_for(&pos, piece)?
        } else {
            movegen::moves_for(&pos, piece)
        };
        for dest in moves {
            println!("{}{}", piece.pos, dest);
        }
    }

    Ok(())
}

fn parse_square(square: &str) -> anyhow::Result<Coord> {
    let mut chars = square.chars();
    let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
        (Some(file), Some(rank), None) => (file, rank),
        _ => bail!("malformed square: {}", square),
    };
    let rank = match rank.to_digit(10) {
        Some(rank) => rank as u8,
        None => bail!("malformed square: {}", square),
    };
    Ok(Coord::from_algebraic(file, rank)?)
}
