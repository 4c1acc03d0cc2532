// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{convert::TryFrom, fmt};

use thiserror::Error;

/// Errors produced by the board core. All of these are recoverable conditions
/// for the caller; a failed operation leaves the position it was invoked on
/// unchanged.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum BoardError {
    #[error("coordinate out of bounds: ({x}, {y})")]
    OutOfBounds { x: i32, y: i32 },
    #[error("malformed position encoding: {0}")]
    MalformedEncoding(&'static str),
    #[error("no {0} king on the board")]
    KingNotFound(Color),
    #[error("unknown piece type: {0}")]
    UnknownPieceType(String),
    #[error("no piece at ({x}, {y})")]
    EmptySquare { x: i32, y: i32 },
}

/// A coordinate on the 8x8 grid. `x` counts files left to right from White's
/// perspective; `y` counts ranks top to bottom, so `y == 0` is Black's back
/// rank, the first rank of the board encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Coord {
        debug_assert!(x < 8 && y < 8);
        Coord { x, y }
    }

    /// Converts an algebraic file ('a' through 'h') and rank (1 through 8) to
    /// a grid coordinate. Fails with `OutOfBounds` if either is out of range.
    pub fn from_algebraic(file: char, rank: u8) -> Result<Coord, BoardError> {
        if !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return Err(BoardError::OutOfBounds {
                x: file as i32 - 'a' as i32,
                y: 8 - rank as i32,
            });
        }

        Ok(Coord {
            x: file as u8 - b'a',
            y: 8 - rank,
        })
    }

    /// The algebraic file letter of this coordinate.
    pub fn file(self) -> char {
        (b'a' + self.x) as char
    }

    /// The algebraic rank number of this coordinate, counted from White's side
    /// of the board.
    pub fn rank(self) -> u8 {
        8 - self.y
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl TryFrom<char> for PieceKind {
    type Error = BoardError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let kind = match value.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(BoardError::UnknownPieceType(value.to_string())),
        };

        Ok(kind)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        write!(f, "{}", c)
    }
}

/// A piece on the board. `pos` mirrors the grid cell the piece occupies; the
/// `Position` methods keep the two in sync.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub pos: Coord,
    /// Set permanently true by the first successful move. Needed for pawn
    /// double-step eligibility.
    pub has_moved: bool,
}

impl Piece {
    pub fn is_enemy(&self, other: &Piece) -> bool {
        self.color != other.color
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        let c = match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        };

        write!(f, "{}", c)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::*;

    #[test]
    fn algebraic_round_trip() {
        let e4 = Coord::from_algebraic('e', 4).unwrap();
        assert_eq!(Coord::new(4, 4), e4);
        assert_eq!('e', e4.file());
        assert_eq!(4, e4.rank());
        assert_eq!("e4", e4.to_string());

        assert_eq!(Coord::new(0, 0), Coord::from_algebraic('a', 8).unwrap());
        assert_eq!(Coord::new(7, 7), Coord::from_algebraic('h', 1).unwrap());
    }

    #[test]
    fn algebraic_out_of_range() {
        assert_eq!(
            BoardError::OutOfBounds { x: 8, y: 4 },
            Coord::from_algebraic('i', 4).unwrap_err()
        );
        assert_eq!(
            BoardError::OutOfBounds { x: 0, y: 8 },
            Coord::from_algebraic('a', 0).unwrap_err()
        );
        assert_eq!(
            BoardError::OutOfBounds { x: 0, y: -1 },
            Coord::from_algebraic('a', 9).unwrap_err()
        );
    }

    #[test]
    fn piece_kind_letters() {
        assert_eq!(PieceKind::Knight, PieceKind::try_from('n').unwrap());
        assert_eq!(PieceKind::Knight, PieceKind::try_from('N').unwrap());
        assert_eq!(
            BoardError::UnknownPieceType("z".to_string()),
            PieceKind::try_from('z').unwrap_err()
        );
    }
}
