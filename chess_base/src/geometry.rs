//! Movement geometry shared by the move generator and the build script
//!
//! All offsets are `(delta_file, delta_rank)` pairs, in the same order as the arguments of
//! [`Coord::try_shift()`](crate::types::Coord::try_shift). Rank index grows towards White's
//! side, so a positive `delta_rank` moves down the diagram.

use crate::types::{Color, Rank};

pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-1, -2),
    (1, -2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, 2),
    (1, 2),
];

pub const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const DIAG_DIRS: [(isize, isize); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

pub const LINE_DIRS: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Rank delta of a single pawn step
pub const fn pawn_forward(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// Rank from which a pawn may advance two squares
pub const fn double_move_src_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

/// Rank on which a pawn of color `c` promotes
pub const fn promote_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}
