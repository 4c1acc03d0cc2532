// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{
    convert::TryFrom,
    fmt::{self, Write},
};

use crate::{core::*, movegen};

/// FEN encoding of the standard chess starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A chess position: an 8x8 grid of pieces plus the metadata carried by the
/// board encoding. The grid invariant is that a piece stored at `grid[y][x]`
/// has `pos == (x, y)`; every mutation in this module preserves it.
///
/// Cloning a `Position` yields a fully independent copy (every cell is a plain
/// value), so hypothetical moves can be explored on a clone without touching
/// the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    grid: [[Option<Piece>; 8]; 8],
    side_to_move: Color,
    /// Castling-rights field, carried verbatim. Move generation does not
    /// consult it; castling is not implemented.
    castling: String,
    /// En-passant target field, carried verbatim. Move generation does not
    /// consult it; en passant is not implemented.
    en_passant: String,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Position {
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> &str {
        &self.castling
    }

    pub fn en_passant(&self) -> &str {
        &self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Bounds-checked cell lookup. Fails with `OutOfBounds` if either
    /// coordinate falls outside [0, 8). All move generation goes through this
    /// accessor, so off-board probes surface uniformly as errors rather than
    /// panics.
    pub fn get(&self, x: i32, y: i32) -> Result<Option<Piece>, BoardError> {
        if (0..8).contains(&x) && (0..8).contains(&y) {
            Ok(self.grid[y as usize][x as usize])
        } else {
            Err(BoardError::OutOfBounds { x, y })
        }
    }

    /// Iterates over `color`'s pieces in decode order: rank-major from the top
    /// of the encoding.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.grid
            .iter()
            .flatten()
            .flatten()
            .copied()
            .filter(move |piece| piece.color == color)
    }

    /// Finds `color`'s king, if one is on the board. Nothing guarantees there
    /// is exactly one king per color; the first in decode order wins.
    pub fn king(&self, color: Color) -> Option<Piece> {
        self.pieces(color).find(|piece| piece.kind == PieceKind::King)
    }
}

//
// Attack and check detection.
//

impl Position {
    /// Returns true if any piece of `by` lists `target` among its destination
    /// squares.
    ///
    /// Attack detection is derived entirely from the move generator, so a
    /// square directly ahead of a pawn reads as attacked even though a pawn
    /// cannot capture straight ahead.
    pub fn is_attacked(&self, target: Coord, by: Color) -> bool {
        self.pieces(by)
            .any(|piece| movegen::moves_for(self, piece).contains(&target))
    }

    /// Returns true if `color`'s king stands on a square attacked by the
    /// opposing color. Fails with `KingNotFound` if `color` has no king.
    pub fn is_in_check(&self, color: Color) -> Result<bool, BoardError> {
        let king = self.king(color).ok_or(BoardError::KingNotFound(color))?;
        Ok(self.is_attacked(king.pos, color.toggle()))
    }
}

//
// Move application.
//

impl Position {
    /// Relocates `piece` to the given algebraic file and rank: the origin cell
    /// is cleared, any occupant of the destination is discarded (a capture),
    /// the piece lands with `has_moved` set, and its kind is replaced when a
    /// promotion is supplied.
    ///
    /// The applicator trusts its caller: it does not verify that the move
    /// generator listed this destination, and it accepts a move that leaves
    /// the mover's own king in check. Fails with `OutOfBounds` for an invalid
    /// file or rank and with `EmptySquare` if `piece` is not actually standing
    /// on its origin square; on failure the position is unchanged.
    pub fn apply(
        &mut self,
        piece: Piece,
        to_file: char,
        to_rank: u8,
        promotion: Option<PieceKind>,
    ) -> Result<(), BoardError> {
        let dest = Coord::from_algebraic(to_file, to_rank)?;
        let origin = piece.pos;
        match self.get(origin.x as i32, origin.y as i32)? {
            Some(occupant) if occupant.kind == piece.kind && occupant.color == piece.color => {}
            _ => {
                return Err(BoardError::EmptySquare {
                    x: origin.x as i32,
                    y: origin.y as i32,
                })
            }
        }

        let mut moved = piece;
        moved.pos = dest;
        moved.has_moved = true;
        if let Some(kind) = promotion {
            moved.kind = kind;
        }

        self.grid[origin.y as usize][origin.x as usize] = None;
        self.grid[dest.y as usize][dest.x as usize] = Some(moved);
        Ok(())
    }
}

//
// FEN parsing and generation.
//
// The board encoding is standard FEN: six space-separated fields, the first of
// which describes piece placement rank by rank from Black's side of the board.
//

impl Position {
    fn empty() -> Position {
        Position {
            grid: [[None; 8]; 8],
            side_to_move: Color::White,
            castling: String::new(),
            en_passant: String::new(),
            halfmove_clock: 0,
            fullmove_number: 0,
        }
    }

    pub fn from_start_position() -> Position {
        Position::from_fen(START_FEN).unwrap()
    }

    /// Constructs a new position from a FEN representation of a board
    /// position.
    pub fn from_fen(fen: impl AsRef<str>) -> Result<Position, BoardError> {
        let text = fen.as_ref();
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(BoardError::MalformedEncoding(
                "expected six space-separated fields",
            ));
        }

        let mut pos = Position::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(BoardError::MalformedEncoding(
                "expected eight ranks in the placement field",
            ));
        }

        for (y, rank) in ranks.iter().enumerate() {
            let mut x: usize = 0;
            for c in rank.chars() {
                if let Some(run) = c.to_digit(10) {
                    // A digit inserts that many empty cells.
                    x += run as usize;
                } else if c.is_ascii_alphabetic() {
                    let kind = PieceKind::try_from(c)?;
                    if x >= 8 {
                        return Err(BoardError::MalformedEncoding(
                            "rank does not expand to eight cells",
                        ));
                    }

                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    pos.grid[y][x] = Some(Piece {
                        kind,
                        color,
                        pos: Coord::new(x as u8, y as u8),
                        has_moved: false,
                    });
                    x += 1;
                } else {
                    return Err(BoardError::MalformedEncoding(
                        "unexpected character in placement field",
                    ));
                }
            }

            if x != 8 {
                return Err(BoardError::MalformedEncoding(
                    "rank does not expand to eight cells",
                ));
            }
        }

        pos.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(BoardError::MalformedEncoding("invalid side to move")),
        };
        pos.castling = fields[2].to_string();
        pos.en_passant = fields[3].to_string();
        pos.halfmove_clock = fields[4]
            .parse()
            .map_err(|_| BoardError::MalformedEncoding("invalid halfmove clock"))?;
        pos.fullmove_number = fields[5]
            .parse()
            .map_err(|_| BoardError::MalformedEncoding("invalid fullmove number"))?;
        Ok(pos)
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for y in 0..8 {
            let mut empty_cells = 0;
            for x in 0..8 {
                if let Some(piece) = self.grid[y][x] {
                    if empty_cells != 0 {
                        write!(&mut buf, "{}", empty_cells).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_cells = 0;
                } else {
                    empty_cells += 1;
                }
            }

            if empty_cells != 0 {
                write!(&mut buf, "{}", empty_cells).unwrap();
            }

            if y != 7 {
                buf.push('/');
            }
        }

        buf.push(' ');
        match self.side_to_move {
            Color::White => buf.push('w'),
            Color::Black => buf.push('b'),
        }
        write!(
            &mut buf,
            " {} {} {} {}",
            self.castling, self.en_passant, self.halfmove_clock, self.fullmove_number
        )
        .unwrap();
        buf
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "   +{}+", "-".repeat(24))?;
        for y in 0..8 {
            write!(f, " {} |", 8 - y)?;
            for x in 0..8 {
                if let Some(piece) = self.grid[y][x] {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "|")?;
        }

        writeln!(f, "   +{}+", "-".repeat(24))?;
        writeln!(f, "     a  b  c  d  e  f  g  h")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    mod fen {
        use crate::{core::*, position::Position};

        #[test]
        fn fen_smoke() {
            let pos = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 0").unwrap();

            assert_eq!(Color::White, pos.side_to_move());
            assert_eq!("-", pos.castling());
            assert_eq!("-", pos.en_passant());
            assert_eq!(0, pos.halfmove_clock());
            assert_eq!(0, pos.fullmove_number());
            assert_eq!(0, pos.pieces(Color::White).count());
            assert_eq!(0, pos.pieces(Color::Black).count());
        }

        #[test]
        fn starting_position_census() {
            let pos = Position::from_start_position();

            assert_eq!(16, pos.pieces(Color::White).count());
            assert_eq!(16, pos.pieces(Color::Black).count());

            // White pawns stand on rank 2, Black pawns on rank 7.
            for color in [Color::White, Color::Black] {
                let pawns: Vec<Piece> = pos
                    .pieces(color)
                    .filter(|p| p.kind == PieceKind::Pawn)
                    .collect();
                assert_eq!(8, pawns.len());
                let rank = if color == Color::White { 2 } else { 7 };
                assert!(pawns.iter().all(|p| p.pos.rank() == rank));
            }

            let king = pos.king(Color::White).unwrap();
            assert_eq!(Coord::from_algebraic('e', 1).unwrap(), king.pos);
            let queen_cell = pos.get(3, 0).unwrap().unwrap();
            assert_eq!(PieceKind::Queen, queen_cell.kind);
            assert_eq!(Color::Black, queen_cell.color);
        }

        #[test]
        fn grid_coordinate_invariant() {
            let pos = Position::from_start_position();
            for y in 0..8 {
                for x in 0..8 {
                    if let Some(piece) = pos.get(x, y).unwrap() {
                        assert_eq!(Coord::new(x as u8, y as u8), piece.pos);
                    }
                }
            }
        }

        #[test]
        fn missing_field() {
            let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0").unwrap_err();
            assert_eq!(
                BoardError::MalformedEncoding("expected six space-separated fields"),
                err
            );
        }

        #[test]
        fn wrong_rank_count() {
            let err = Position::from_fen("8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
            assert_eq!(
                BoardError::MalformedEncoding("expected eight ranks in the placement field"),
                err
            );
        }

        #[test]
        fn unknown_piece() {
            let err = Position::from_fen("z7/8/8/8/8/8/8/8 w - - 0 0").unwrap_err();
            assert_eq!(BoardError::UnknownPieceType("z".to_string()), err);
        }

        #[test]
        fn rank_too_narrow() {
            let err = Position::from_fen("pppp3/8/8/8/8/8/8/8 w - - 0 0").unwrap_err();
            assert_eq!(
                BoardError::MalformedEncoding("rank does not expand to eight cells"),
                err
            );
        }

        #[test]
        fn rank_too_wide() {
            let err = Position::from_fen("pppp5/8/8/8/8/8/8/8 w - - 0 0").unwrap_err();
            assert_eq!(
                BoardError::MalformedEncoding("rank does not expand to eight cells"),
                err
            );
        }

        #[test]
        fn stray_character() {
            let err = Position::from_fen("4!3/8/8/8/8/8/8/8 w - - 0 0").unwrap_err();
            assert_eq!(
                BoardError::MalformedEncoding("unexpected character in placement field"),
                err
            );
        }

        #[test]
        fn bad_side_to_move() {
            let err = Position::from_fen("8/8/8/8/8/8/8/8 c - - 0 0").unwrap_err();
            assert_eq!(BoardError::MalformedEncoding("invalid side to move"), err);
        }

        #[test]
        fn bad_halfmove() {
            let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - q 0").unwrap_err();
            assert_eq!(BoardError::MalformedEncoding("invalid halfmove clock"), err);
        }

        #[test]
        fn negative_fullmove() {
            let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 -3").unwrap_err();
            assert_eq!(
                BoardError::MalformedEncoding("invalid fullmove number"),
                err
            );
        }

        #[test]
        fn start_position_round_trip() {
            let pos = Position::from_fen(crate::position::START_FEN).unwrap();
            assert_eq!(crate::position::START_FEN, pos.as_fen());
        }

        #[test]
        fn round_trip_is_structural() {
            let fen = "1nb3nr/pppppppp/r2q1b2/8/8/4k3/PPPPPPPP/RNBQKBNR b Kq e3 12 34";
            let pos = Position::from_fen(fen).unwrap();
            let reparsed = Position::from_fen(pos.as_fen()).unwrap();
            assert_eq!(pos, reparsed);
            assert_eq!(fen, pos.as_fen());
        }
    }

    mod get {
        use crate::{core::*, position::Position};

        #[test]
        fn out_of_bounds() {
            let pos = Position::from_start_position();
            assert_eq!(
                BoardError::OutOfBounds { x: 8, y: 0 },
                pos.get(8, 0).unwrap_err()
            );
            assert_eq!(
                BoardError::OutOfBounds { x: -1, y: 3 },
                pos.get(-1, 3).unwrap_err()
            );
        }

        #[test]
        fn occupied_and_empty_cells() {
            let pos = Position::from_start_position();
            let pawn = pos.get(4, 6).unwrap().unwrap();
            assert_eq!(PieceKind::Pawn, pawn.kind);
            assert_eq!(Color::White, pawn.color);
            assert!(!pawn.has_moved);

            assert!(pos.get(4, 4).unwrap().is_none());
        }
    }

    mod check {
        use crate::{core::*, position::Position};

        #[test]
        fn rook_on_open_rank_gives_check() {
            let pos = Position::from_fen("k6R/8/8/8/8/8/8/7K b - - 0 1").unwrap();
            assert!(pos.is_in_check(Color::Black).unwrap());
            assert!(!pos.is_in_check(Color::White).unwrap());
        }

        #[test]
        fn interposed_piece_blocks_check() {
            let pos = Position::from_fen("k3n2R/8/8/8/8/8/8/7K b - - 0 1").unwrap();
            assert!(!pos.is_in_check(Color::Black).unwrap());
        }

        #[test]
        fn king_not_found() {
            let pos = Position::from_fen("8/8/8/8/8/8/8/R6K w - - 0 1").unwrap();
            assert_eq!(
                BoardError::KingNotFound(Color::Black),
                pos.is_in_check(Color::Black).unwrap_err()
            );
        }

        #[test]
        fn pawn_push_square_counts_as_attacked() {
            // Derived from the move generator: the square ahead of a pawn is
            // reported as attacked even though pawns cannot capture straight
            // ahead, and an empty diagonal is not reported at all.
            let pos = Position::from_fen("8/8/8/8/8/8/4P3/8 w - - 0 1").unwrap();
            assert!(pos.is_attacked(Coord::from_algebraic('e', 3).unwrap(), Color::White));
            assert!(!pos.is_attacked(Coord::from_algebraic('d', 3).unwrap(), Color::White));
        }
    }

    mod apply {
        use crate::{core::*, position::Position};

        #[test]
        fn quiet_move() {
            let mut pos = Position::from_start_position();
            let pawn = pos.get(4, 6).unwrap().unwrap();
            pos.apply(pawn, 'e', 4, None).unwrap();

            assert!(pos.get(4, 6).unwrap().is_none());
            let moved = pos.get(4, 4).unwrap().unwrap();
            assert_eq!(PieceKind::Pawn, moved.kind);
            assert_eq!(Coord::from_algebraic('e', 4).unwrap(), moved.pos);
            assert!(moved.has_moved);
        }

        #[test]
        fn capture_removes_occupant() {
            let mut pos = Position::from_fen("8/8/8/3p4/4B3/8/8/8 w - - 0 1").unwrap();
            let bishop = pos.get(4, 4).unwrap().unwrap();
            pos.apply(bishop, 'd', 5, None).unwrap();

            assert_eq!(0, pos.pieces(Color::Black).count());
            let captor = pos.get(3, 3).unwrap().unwrap();
            assert_eq!(PieceKind::Bishop, captor.kind);
            assert_eq!(Color::White, captor.color);
        }

        #[test]
        fn promotion_replaces_kind() {
            let mut pos = Position::from_fen("8/P7/8/8/8/8/8/8 w - - 0 1").unwrap();
            let pawn = pos.get(0, 1).unwrap().unwrap();
            pos.apply(pawn, 'a', 8, Some(PieceKind::Queen)).unwrap();

            let queen = pos.get(0, 0).unwrap().unwrap();
            assert_eq!(PieceKind::Queen, queen.kind);
            assert_eq!(Color::White, queen.color);
            assert!(queen.has_moved);
        }

        #[test]
        fn vacated_origin_is_rejected() {
            let mut pos = Position::from_start_position();
            let pawn = pos.get(4, 6).unwrap().unwrap();
            pos.apply(pawn, 'e', 4, None).unwrap();

            // The stale handle no longer matches the board; the position must
            // be left untouched.
            let before = pos.clone();
            assert_eq!(
                BoardError::EmptySquare { x: 4, y: 6 },
                pos.apply(pawn, 'e', 5, None).unwrap_err()
            );
            assert_eq!(before, pos);
        }

        #[test]
        fn bad_destination_is_rejected() {
            let mut pos = Position::from_start_position();
            let pawn = pos.get(4, 6).unwrap().unwrap();
            let before = pos.clone();
            assert_eq!(
                BoardError::OutOfBounds { x: 8, y: 4 },
                pos.apply(pawn, 'i', 4, None).unwrap_err()
            );
            assert_eq!(before, pos);
        }
    }
}
