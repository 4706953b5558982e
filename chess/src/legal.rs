//! Legal move filtering
//!
//! A destination is legal if moving the piece there doesn't leave the king of the moving side
//! attacked. The check is done by simulation: the piece is relocated on a copy of the board,
//! and then the [attack oracle](crate::movegen::is_square_attacked) is asked about the king.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::{self, Move};
use crate::movegen;
use crate::types::{Color, Coord};

use std::ops::Deref;
use std::slice;

use arrayvec::ArrayVec;
use log::debug;
use thiserror::Error;

/// Maximum number of destinations a single piece can have (queen in the center of an empty board)
pub const MAX_DESTINATIONS: usize = 27;

/// What to do if the moving side has no king on the board
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KingPolicy {
    /// Every pseudo-legal destination is considered legal
    #[default]
    AssumeSafe,
    /// Fail with [`LegalityError::NoKing`]
    Require,
}

/// Error filtering legal moves
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LegalityError {
    #[error("no king of color {0:?}")]
    NoKing(Color),
}

/// List of legal destinations for one piece
///
/// Squares are stored in ascending [`Coord::index()`] order.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Destinations(ArrayVec<Coord, MAX_DESTINATIONS>);

impl Destinations {
    #[inline]
    pub fn new() -> Destinations {
        Destinations(ArrayVec::new())
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.0.contains(&coord)
    }

    /// Returns the destinations as a square set
    #[inline]
    pub fn as_bitboard(&self) -> Bitboard {
        self.0.iter().copied().collect()
    }

    // pseudo-legal destinations never exceed MAX_DESTINATIONS, so the collect cannot overflow
    fn from_pseudo(pseudo: Bitboard) -> Destinations {
        Destinations(pseudo.into_iter().collect())
    }
}

impl Deref for Destinations {
    type Target = [Coord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Destinations {
    type Item = &'a Coord;
    type IntoIter = slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Destinations {
    type Item = Coord;
    type IntoIter = arrayvec::IntoIter<Coord, MAX_DESTINATIONS>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn is_king_safe_after(b: &Board, mv: Move, c: Color) -> bool {
    let mut copy = *b;
    moves::relocate(&mut copy, mv);
    match copy.king_pos(c) {
        Some(king) => !movegen::is_square_attacked(&copy, king, c.inv()),
        None => true,
    }
}

/// Returns the legal destinations for the piece on `src`
///
/// If the moving side has no king, all the pseudo-legal destinations are returned. Use
/// [`legal_destinations_with()`] to change this behaviour. If `src` is empty, the result is
/// empty.
///
/// # Example
///
/// ```
/// # use kibitz::{legal, Board, Coord};
/// #
/// let b = Board::initial();
/// let dsts = legal::legal_destinations(&b, Coord::from_row_col(6, 4));
/// assert_eq!(&dsts[..], &[Coord::from_row_col(4, 4), Coord::from_row_col(5, 4)]);
/// ```
pub fn legal_destinations(b: &Board, src: Coord) -> Destinations {
    let c = match b.get(src).color() {
        Some(c) => c,
        None => return Destinations::new(),
    };
    let pseudo = movegen::pseudo_destinations(b, src);
    if b.king_pos(c).is_none() {
        debug!("no {c:?} king on board, accepting all moves from {src}");
        return Destinations::from_pseudo(pseudo);
    }
    Destinations(
        pseudo
            .into_iter()
            .filter(|&dst| is_king_safe_after(b, Move::new(src, dst), c))
            .collect(),
    )
}

/// Same as [`legal_destinations()`], but handles a missing king as specified by `policy`
///
/// An empty `src` gives an empty result, and the policy is not consulted.
pub fn legal_destinations_with(
    b: &Board,
    src: Coord,
    policy: KingPolicy,
) -> Result<Destinations, LegalityError> {
    if policy == KingPolicy::Require {
        if let Some(c) = b.get(src).color() {
            if b.king_pos(c).is_none() {
                return Err(LegalityError::NoKing(c));
            }
        }
    }
    Ok(legal_destinations(b, src))
}

/// Returns `true` if `mv` is legal on `b`
///
/// The move is legal if there is a piece on its source square, and the destination is among
/// [`legal_destinations()`] for it.
pub fn is_legal(b: &Board, mv: Move) -> bool {
    match b.get(mv.src()).color() {
        Some(c) => {
            movegen::pseudo_destinations(b, mv.src()).has(mv.dst()) && is_king_safe_after(b, mv, c)
        }
        None => false,
    }
}
