//! Short move labels for move history
//!
//! A label consists of the piece letter (omitted for pawns), the destination square and a
//! trailing `x` if the move was a capture, like `Nf3`, `e4` or `Qd5x`. There is no
//! disambiguation: two knights that can reach the same square produce the same label.

use crate::types::{Coord, Piece};

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Style for formatting move labels
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Style {
    /// Use capital Latin letters for pieces
    #[default]
    Algebraic,
    /// Use Unicode chess symbols for pieces
    Utf8,
}

trait PieceTheme {
    fn piece_to_char(piece: Piece) -> char;
}

struct AlgebraicTheme;

impl PieceTheme for AlgebraicTheme {
    fn piece_to_char(piece: Piece) -> char {
        piece.as_char()
    }
}

struct Utf8Theme;

impl PieceTheme for Utf8Theme {
    fn piece_to_char(piece: Piece) -> char {
        match piece {
            Piece::Pawn => '♙',
            Piece::Knight => '♘',
            Piece::Bishop => '♗',
            Piece::Rook => '♖',
            Piece::Queen => '♕',
            Piece::King => '♔',
        }
    }
}

/// Label of a single move
///
/// Formats in [`Style::Algebraic`] via [`fmt::Display`]. Use [`Notation::styled()`] to pick
/// another style.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Notation {
    pub piece: Piece,
    pub dst: Coord,
    pub capture: bool,
}

/// Wrapper to format [`Notation`] with the given style
///
/// See [`Notation::styled()`] doc for details.
pub struct StyledNotation<'a>(&'a Notation, Style);

impl Notation {
    #[inline]
    pub fn new(piece: Piece, dst: Coord, capture: bool) -> Notation {
        Notation {
            piece,
            dst,
            capture,
        }
    }

    /// Returns the wrapper which formats the label with the given style `style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use kibitz::notation::{Notation, Style};
    /// # use kibitz::{Coord, Piece};
    /// #
    /// let n = Notation::new(Piece::Knight, "f3".parse::<Coord>().unwrap(), true);
    /// assert_eq!(n.styled(Style::Algebraic).to_string(), "Nf3x");
    /// assert_eq!(n.styled(Style::Utf8).to_string(), "♘f3x");
    /// ```
    #[inline]
    pub fn styled(&self, style: Style) -> StyledNotation<'_> {
        StyledNotation(self, style)
    }

    fn do_fmt<P: PieceTheme>(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.piece != Piece::Pawn {
            write!(f, "{}", P::piece_to_char(self.piece))?;
        }
        write!(f, "{}", self.dst)?;
        if self.capture {
            write!(f, "x")?;
        }
        Ok(())
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.do_fmt::<AlgebraicTheme>(f)
    }
}

impl<'a> fmt::Display for StyledNotation<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.1 {
            Style::Algebraic => self.0.do_fmt::<AlgebraicTheme>(f),
            Style::Utf8 => self.0.do_fmt::<Utf8Theme>(f),
        }
    }
}

/// Returns the label for `piece` moving to `dst`
///
/// # Example
///
/// ```
/// # use kibitz::{notation, Coord, Piece};
/// #
/// assert_eq!(notation::describe_move(Piece::Pawn, Coord::from_row_col(4, 4), false), "e4");
/// assert_eq!(notation::describe_move(Piece::Queen, Coord::from_row_col(3, 3), true), "Qd5x");
/// ```
pub fn describe_move(piece: Piece, dst: Coord, was_capture: bool) -> String {
    Notation::new(piece, dst, was_capture).to_string()
}
