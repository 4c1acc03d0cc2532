// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation.
//!
//! `moves_for` enumerates the squares a piece can move to according to its
//! movement pattern, ignoring whether the move would leave the mover's own
//! king in check. `legal_moves_for` layers that filter on top. Castling and
//! en passant are not generated.
//!
//! Enumeration order is part of the contract: leapers emit their offsets in
//! the order listed below, sliders emit each ray to exhaustion in the order
//! listed below, and pawns emit forward moves before captures.

use crate::core::*;
use crate::Position;

/// Knight offsets, clockwise from one file right and two ranks up.
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
];

/// King offsets: a row-major scan of the 3x3 neighborhood, center excluded.
const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Bishop rays: NE, SE, SW, NW. Grid `y` grows toward White's side, so NE is
/// (+1, -1).
const BISHOP_RAYS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// Rook rays: E, S, W, N.
const ROOK_RAYS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Enumerates the pseudo-legal destination squares for `piece` on `pos`,
/// dispatched by piece kind.
pub fn moves_for(pos: &Position, piece: Piece) -> Vec<Coord> {
    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(pos, piece, &mut moves),
        PieceKind::Knight => leaper_moves(pos, piece, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => ray_moves(pos, piece, &BISHOP_RAYS, &mut moves),
        PieceKind::Rook => ray_moves(pos, piece, &ROOK_RAYS, &mut moves),
        PieceKind::Queen => {
            ray_moves(pos, piece, &BISHOP_RAYS, &mut moves);
            ray_moves(pos, piece, &ROOK_RAYS, &mut moves);
        }
        PieceKind::King => leaper_moves(pos, piece, &KING_OFFSETS, &mut moves),
    }

    moves
}

/// Filters `moves_for` down to moves that do not leave the mover's own king in
/// check, by simulating each candidate on a clone of the position.
///
/// Kept separate from pseudo-legal generation: callers mirroring an
/// authoritative remote state can skip the simulation entirely, and the
/// pseudo-legal contract stays uncluttered. Fails with `KingNotFound` if the
/// mover has no king to keep safe.
pub fn legal_moves_for(pos: &Position, piece: Piece) -> Result<Vec<Coord>, BoardError> {
    let mut legal = Vec::new();
    for dest in moves_for(pos, piece) {
        // The promotion kind cannot affect whether our own king is exposed,
        // so the simulation leaves pawns unpromoted.
        let mut next = pos.clone();
        next.apply(piece, dest.file(), dest.rank(), None)?;
        if !next.is_in_check(piece.color)? {
            legal.push(dest);
        }
    }

    Ok(legal)
}

/// Fixed-offset enumeration for knights and kings: each in-bounds target is a
/// destination unless a friendly piece occupies it.
fn leaper_moves(pos: &Position, piece: Piece, offsets: &[(i32, i32)], moves: &mut Vec<Coord>) {
    let (x, y) = (piece.pos.x as i32, piece.pos.y as i32);
    for &(dx, dy) in offsets {
        match pos.get(x + dx, y + dy) {
            Ok(None) => moves.push(Coord::new((x + dx) as u8, (y + dy) as u8)),
            Ok(Some(other)) if piece.is_enemy(&other) => {
                moves.push(Coord::new((x + dx) as u8, (y + dy) as u8))
            }
            _ => {}
        }
    }
}

/// Walks each ray outward from the piece: an empty cell is a destination and
/// the walk continues; an enemy cell is a destination and the walk stops; a
/// friendly cell or the board edge stops the walk.
fn ray_moves(pos: &Position, piece: Piece, rays: &[(i32, i32)], moves: &mut Vec<Coord>) {
    for &(dx, dy) in rays {
        let (mut x, mut y) = (piece.pos.x as i32 + dx, piece.pos.y as i32 + dy);
        loop {
            match pos.get(x, y) {
                Ok(None) => moves.push(Coord::new(x as u8, y as u8)),
                Ok(Some(other)) => {
                    if piece.is_enemy(&other) {
                        moves.push(Coord::new(x as u8, y as u8));
                    }
                    break;
                }
                Err(_) => break,
            }

            x += dx;
            y += dy;
        }
    }
}

/// Pawn moves: forward one if empty, forward two if the pawn has never moved
/// and both cells are empty, then the two diagonal captures in file-ascending
/// order. Diagonals are destinations only when an enemy piece stands there; a
/// diagonal onto an empty square is never generated (no en passant).
fn pawn_moves(pos: &Position, piece: Piece, moves: &mut Vec<Coord>) {
    let (x, y) = (piece.pos.x as i32, piece.pos.y as i32);
    let dy = match piece.color {
        Color::White => -1,
        Color::Black => 1,
    };

    if let Ok(None) = pos.get(x, y + dy) {
        moves.push(Coord::new(x as u8, (y + dy) as u8));
        if !piece.has_moved {
            if let Ok(None) = pos.get(x, y + 2 * dy) {
                moves.push(Coord::new(x as u8, (y + 2 * dy) as u8));
            }
        }
    }

    for dx in [-1, 1] {
        if let Ok(Some(other)) = pos.get(x + dx, y + dy) {
            if piece.is_enemy(&other) {
                moves.push(Coord::new((x + dx) as u8, (y + dy) as u8));
            }
        }
    }
}
