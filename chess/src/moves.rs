//! Moves and their application to the board

use crate::board::Board;
use crate::geometry;
use crate::types::{Cell, Coord, CoordParseError, Piece};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error parsing [`Move`] from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    /// String must contain exactly two squares, like `e2e4`
    #[error("invalid string length")]
    BadLength,
    /// Source square is invalid
    #[error("bad source: {0}")]
    BadSrc(CoordParseError),
    /// Destination square is invalid
    #[error("bad destination: {0}")]
    BadDst(CoordParseError),
}

/// Target piece for promotion
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum PromotePiece {
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    #[default]
    Queen = 5,
}

impl From<PromotePiece> for Piece {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Knight => Piece::Knight,
            PromotePiece::Bishop => Piece::Bishop,
            PromotePiece::Rook => Piece::Rook,
            PromotePiece::Queen => Piece::Queen,
        }
    }
}

impl TryFrom<Piece> for PromotePiece {
    type Error = ();

    #[inline]
    fn try_from(p: Piece) -> Result<Self, Self::Error> {
        match p {
            Piece::Knight => Ok(PromotePiece::Knight),
            Piece::Bishop => Ok(PromotePiece::Bishop),
            Piece::Rook => Ok(PromotePiece::Rook),
            Piece::Queen => Ok(PromotePiece::Queen),
            _ => Err(()),
        }
    }
}

/// Chess move
///
/// A move is just a pair of squares. It doesn't remember which piece moves, so it only makes
/// sense together with the board it was produced for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    src: Coord,
    dst: Coord,
}

impl Move {
    #[inline]
    pub const fn new(src: Coord, dst: Coord) -> Move {
        Move { src, dst }
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Returns `true` if the move takes a pawn to its last rank
    #[inline]
    pub fn is_promote(&self, b: &Board) -> bool {
        let cell = b.get(self.src);
        match (cell.color(), cell.piece()) {
            (Some(c), Some(Piece::Pawn)) => self.dst.rank() == geometry::promote_dst_rank(c),
            _ => false,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(ParseError::BadLength);
        }
        let src = Coord::from_str(&s[0..2]).map_err(ParseError::BadSrc)?;
        let dst = Coord::from_str(&s[2..4]).map_err(ParseError::BadDst)?;
        Ok(Move { src, dst })
    }
}

/// Moves the piece from `mv.src()` to `mv.dst()` and returns what was standing on `mv.dst()`
///
/// This is a plain relocation: no checks are made, and pawns reaching the last rank stay pawns.
#[inline]
pub fn relocate(b: &mut Board, mv: Move) -> Cell {
    let moved = b.get(mv.src);
    let captured = b.get(mv.dst);
    b.put(mv.src, Cell::EMPTY);
    b.put(mv.dst, moved);
    captured
}

/// Same as [`relocate()`], but a pawn reaching the last rank is replaced with `promote`
///
/// Returns what was standing on `mv.dst()`.
pub fn apply(b: &mut Board, mv: Move, promote: PromotePiece) -> Cell {
    let is_promote = mv.is_promote(b);
    let captured = relocate(b, mv);
    if is_promote {
        if let Some(c) = b.get(mv.dst).color() {
            b.put(mv.dst, Cell::from_parts(c, promote.into()));
        }
    }
    captured
}
