// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Mirroring of an authoritative remote game state.
//!
//! The match server is the rules arbiter: each turn it reports the last move
//! played as a record of source and destination file and rank. `mirror_move`
//! replays such a record onto the locally tracked [`Position`], so that move
//! generation sees the same board the server does. The local core's own
//! check and legality output is never treated as authoritative.

use serde::{Deserialize, Serialize};

use crate::{core::*, Position};

/// The last move made, as reported by the match server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    /// The file the piece moved from.
    pub from_file: char,
    /// The rank the piece moved from.
    pub from_rank: u8,
    /// The file the piece moved to.
    pub to_file: char,
    /// The rank the piece moved to.
    pub to_rank: u8,
    /// The piece type a pawn was promoted to, empty if no promotion occurred.
    /// The server spells these "Queen", "Rook", "Bishop" and "Knight".
    #[serde(default)]
    pub promotion: String,
    /// The standard algebraic notation of the move, when the server supplies
    /// one. Informational only.
    #[serde(default)]
    pub san: Option<String>,
}

/// Replays a server move record onto the mirrored position. Fails with
/// `EmptySquare` if no piece stands on the record's source square and with
/// `UnknownPieceType` for an unrecognized promotion name; the position is
/// unchanged on failure.
pub fn mirror_move(pos: &mut Position, record: &MoveRecord) -> Result<(), BoardError> {
    let origin = Coord::from_algebraic(record.from_file, record.from_rank)?;
    let piece = pos
        .get(origin.x as i32, origin.y as i32)?
        .ok_or(BoardError::EmptySquare {
            x: origin.x as i32,
            y: origin.y as i32,
        })?;
    let promotion = promotion_kind(&record.promotion)?;
    pos.apply(piece, record.to_file, record.to_rank, promotion)
}

/// Maps the server's promotion type names to piece kinds.
fn promotion_kind(name: &str) -> Result<Option<PieceKind>, BoardError> {
    let kind = match name {
        "" => return Ok(None),
        "Knight" => PieceKind::Knight,
        "Bishop" => PieceKind::Bishop,
        "Rook" => PieceKind::Rook,
        "Queen" => PieceKind::Queen,
        other => return Err(BoardError::UnknownPieceType(other.to_string())),
    };

    Ok(Some(kind))
}
