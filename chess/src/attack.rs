//! Precomputed destination masks for the pieces that move by a fixed set of offsets
//!
//! The masks contain every in-bounds square reachable from the given one, regardless of
//! occupancy. They are generated by the build script from [`geometry`](crate::geometry).

use crate::bitboard::Bitboard;
use crate::types::Coord;

#[inline]
const fn bb(val: u64) -> Bitboard {
    Bitboard::from_raw(val)
}

include!(concat!(env!("OUT_DIR"), "/near_moves.rs"));

#[inline]
pub fn king(coord: Coord) -> Bitboard {
    KING_STEPS[coord.index()]
}

#[inline]
pub fn knight(coord: Coord) -> Bitboard {
    KNIGHT_JUMPS[coord.index()]
}
