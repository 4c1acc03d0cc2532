use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use structopt::StructOpt;

use tabia::remote::{self, MoveRecord};
use tabia::Position;

/// Replays a log of server move records and prints the resulting position.
#[derive(Debug, StructOpt)]
struct Options {
    /// A move log to replay, one JSON record per line.
    #[structopt(name = "MOVE_LOG")]
    move_log: PathBuf,

    /// FEN of the position the log starts from; defaults to the starting
    /// position.
    #[structopt(long)]
    fen: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Options::from_args();
    let mut pos = match &args.fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::from_start_position(),
    };

    let file = File::open(&args.move_log)?;
    let reader = BufReader::new(file);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: MoveRecord = serde_json::from_str(&line)?;
        remote::mirror_move(&mut pos, &record)?;
    }

    print!("{}", pos);
    println!("{}", pos.as_fen());
    Ok(())
}
