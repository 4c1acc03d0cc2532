use anyhow::Result;
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

use tabia::core::{Color, Coord, Piece, PieceKind};
use tabia::movegen;
use tabia::Position;

/// Plays both sides of a game at random, printing the board after each ply.
///
/// Moves are pseudo-legal only, exactly what the library generates; there is
/// no game-over detection beyond a side running out of moves.
#[derive(Debug, StructOpt)]
struct Options {
    /// FEN of the position to start from; defaults to the starting position.
    #[structopt(long)]
    fen: Option<String>,

    /// Number of plies to play.
    #[structopt(long, default_value = "40")]
    plies: u32,

    /// Seed for the move picker, for reproducible games.
    #[structopt(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::INFO)
        .with_env_filter(EnvFilter::from_env("TABIA_LOG"))
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let args = Options::from_args();
    let mut pos = match &args.fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::from_start_position(),
    };
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut to_move = pos.side_to_move();
    for ply in 0..args.plies {
        let (piece, dest) = match pick_move(&pos, to_move, &mut rng) {
            Some(picked) => picked,
            None => {
                info!(ply, "no moves available for {}", to_move);
                break;
            }
        };

        let promotion = promotion_for(piece, dest, &mut rng);
        info!(ply, "{} plays {}{}", to_move, piece.pos, dest);
        pos.apply(piece, dest.file(), dest.rank(), promotion)?;
        print!("{}", pos);
        to_move = to_move.toggle();
    }

    Ok(())
}

/// Draws random pieces until one of them has at least one move, then draws a
/// random destination for it.
fn pick_move(pos: &Position, us: Color, rng: &mut SmallRng) -> Option<(Piece, Coord)> {
    let mut pieces: Vec<Piece> = pos.pieces(us).collect();
    pieces.shuffle(rng);
    for piece in pieces {
        let moves = movegen::moves_for(pos, piece);
        if let Some(&dest) = moves.choose(rng) {
            return Some((piece, dest));
        }
    }

    None
}

fn promotion_for(piece: Piece, dest: Coord, rng: &mut SmallRng) -> Option<PieceKind> {
    if piece.kind != PieceKind::Pawn || (dest.rank() != 1 && dest.rank() != 8) {
        return None;
    }

    [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ]
    .choose(rng)
    .copied()
}
