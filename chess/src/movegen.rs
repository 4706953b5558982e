//! Pseudo-legal move generation and attack detection
//!
//! A destination is _pseudo-legal_ if the piece's movement pattern allows it, regardless of
//! whether the move would leave the own king attacked. Use [`legal`](crate::legal) to get
//! only the moves that keep the king safe.
//!
//! A square is _attacked_ by a color if some piece of this color has the square among its
//! pseudo-legal destinations. Note that this follows the movement rules literally: a pawn
//! attacks the empty square in front of it, and no piece attacks a square occupied by a
//! piece of its own color.

use crate::attack;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::types::{Color, Coord, Piece};

fn own_color(b: &Board, coord: Coord, c: Color) -> bool {
    b.get(coord).color() == Some(c)
}

fn gen_pawn(b: &Board, src: Coord, c: Color) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    let forward = geometry::pawn_forward(c);

    if let Some(dst) = src.try_shift(0, forward) {
        if b.get(dst).is_empty() {
            res.set(dst);
            if src.rank() == geometry::double_move_src_rank(c) {
                if let Some(dst2) = dst.try_shift(0, forward) {
                    if b.get(dst2).is_empty() {
                        res.set(dst2);
                    }
                }
            }
        }
    }

    for delta_file in [-1, 1] {
        if let Some(dst) = src.try_shift(delta_file, forward) {
            if b.get(dst).color() == Some(c.inv()) {
                res.set(dst);
            }
        }
    }

    res
}

fn gen_near(b: &Board, mask: Bitboard, c: Color) -> Bitboard {
    mask.into_iter()
        .filter(|&dst| !own_color(b, dst, c))
        .collect()
}

fn gen_rays(b: &Board, src: Coord, c: Color, dirs: &[(isize, isize)]) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    for &(delta_file, delta_rank) in dirs {
        let mut cur = src;
        while let Some(dst) = cur.try_shift(delta_file, delta_rank) {
            match b.get(dst).color() {
                None => res.set(dst),
                Some(color) if color == c => break,
                Some(_) => {
                    res.set(dst);
                    break;
                }
            }
            cur = dst;
        }
    }
    res
}

/// Returns all the pseudo-legal destinations for the piece standing on `src`
///
/// If `src` is empty, an empty bitboard is returned.
///
/// # Example
///
/// ```
/// # use kibitz::{movegen, Board, Coord};
/// #
/// let b = Board::initial();
/// let dsts = movegen::pseudo_destinations(&b, Coord::from_row_col(7, 6));
/// assert_eq!(
///     dsts.into_iter().map(|c| c.to_string()).collect::<Vec<_>>(),
///     vec!["f3", "h3"],
/// );
/// ```
pub fn pseudo_destinations(b: &Board, src: Coord) -> Bitboard {
    let cell = b.get(src);
    let (c, p) = match (cell.color(), cell.piece()) {
        (Some(c), Some(p)) => (c, p),
        _ => return Bitboard::EMPTY,
    };
    match p {
        Piece::Pawn => gen_pawn(b, src, c),
        Piece::Knight => gen_near(b, attack::knight(src), c),
        Piece::King => gen_near(b, attack::king(src), c),
        Piece::Bishop => gen_rays(b, src, c, &geometry::DIAG_DIRS),
        Piece::Rook => gen_rays(b, src, c, &geometry::LINE_DIRS),
        Piece::Queen => {
            gen_rays(b, src, c, &geometry::DIAG_DIRS) | gen_rays(b, src, c, &geometry::LINE_DIRS)
        }
    }
}

/// Returns `true` if `coord` is attacked by any piece of color `color`
///
/// # Example
///
/// ```
/// # use kibitz::{movegen, Board, Color, Coord};
/// #
/// let b = Board::from_fen("R7/8/8/8/8/8/8/8").unwrap();
/// assert!(movegen::is_square_attacked(&b, Coord::from_row_col(0, 7), Color::White));
/// assert!(!movegen::is_square_attacked(&b, Coord::from_row_col(7, 7), Color::White));
/// ```
pub fn is_square_attacked(b: &Board, coord: Coord, color: Color) -> bool {
    b.pieces()
        .filter(|(_, cell)| cell.color() == Some(color))
        .any(|(src, _)| pseudo_destinations(b, src).has(coord))
}

/// Returns all the pieces of color `color` that attack `coord`
pub fn attackers(b: &Board, coord: Coord, color: Color) -> Bitboard {
    b.pieces()
        .filter(|(_, cell)| cell.color() == Some(color))
        .map(|(src, _)| src)
        .filter(|&src| pseudo_destinations(b, src).has(coord))
        .collect()
}
