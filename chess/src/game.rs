//! Game controller built on top of the legality engine
//!
//! [`Game`] owns the board, tracks whose turn it is and keeps the history of played moves. It
//! does not detect checkmate or stalemate, only reports whether the side to move is in check.

use crate::bitboard::Bitboard;
use crate::board::{self, Board};
use crate::legal::{self, Destinations};
use crate::movegen;
use crate::moves::{self, Move, PromotePiece};
use crate::notation::{Notation, Style};
use crate::types::{Cell, Color, ColorParseError, Coord, Piece};

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use thiserror::Error;

/// Error validating the starting position of a [`Game`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// One of the sides doesn't have a king
    #[error("no king of color {0:?}")]
    NoKing(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
    /// There is a pawn on the 1st or on the 8th rank
    #[error("invalid pawn position {0}")]
    InvalidPawn(Coord),
    /// Opponent's king is under attack
    #[error("opponent's king is attacked")]
    OpponentKingAttacked,
}

/// Error creating a [`Game`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LoadError {
    #[error("bad board: {0}")]
    Board(#[from] board::FenParseError),
    #[error("bad side to move: {0}")]
    Side(#[from] ColorParseError),
    #[error("invalid position: {0}")]
    Validate(#[from] ValidateError),
}

/// Error playing a move in a [`Game`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum GameError {
    /// No piece on the source square
    #[error("no piece on {0}")]
    EmptySource(Coord),
    /// Piece on the source square belongs to the other side
    #[error("piece on {src} doesn't belong to the side to move")]
    WrongSide { src: Coord, side: Color },
    /// The piece cannot go to the destination square
    #[error("move {0} is not legal")]
    NotLegal(Move),
    /// Promotion piece given for a move which is not a promotion
    #[error("move {0} is not a promotion")]
    UnexpectedPromote(Move),
}

/// Entry of the game history
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// The move itself
    pub mv: Move,
    /// Piece that was moved, as it stood before the move
    pub moved: Cell,
    /// Contents of the destination square before the move
    pub captured: Cell,
    /// Piece the pawn turned into, if the move was a promotion
    pub promote: Option<PromotePiece>,
    pub notation: Notation,
    /// Whether the opponent is in check after the move
    pub check: bool,
}

/// Sequence of moves played from a given position
///
/// # Example
///
/// ```
/// # use kibitz::{Game, Color};
/// #
/// let mut game = Game::initial();
/// game.push("e2e4".parse().unwrap(), None).unwrap();
/// game.push("e7e5".parse().unwrap(), None).unwrap();
/// assert!(game.push("e1e3".parse().unwrap(), None).is_err());
///
/// assert_eq!(game.side(), Color::White);
/// assert_eq!(game.notation_list(Default::default()).to_string(), "e4 e5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    side: Color,
    history: Vec<Record>,
}

fn validate(b: &Board, side: Color) -> Result<(), ValidateError> {
    for c in [Color::White, Color::Black] {
        match b.piece(Cell::from_parts(c, Piece::King)).len() {
            0 => return Err(ValidateError::NoKing(c)),
            1 => {}
            _ => return Err(ValidateError::TooManyKings(c)),
        }
    }

    for (coord, cell) in b.pieces() {
        if cell.piece() == Some(Piece::Pawn) && (coord.row() == 0 || coord.row() == 7) {
            return Err(ValidateError::InvalidPawn(coord));
        }
    }

    if let Some(king) = b.king_pos(side.inv()) {
        if movegen::is_square_attacked(b, king, side) {
            return Err(ValidateError::OpponentKingAttacked);
        }
    }

    Ok(())
}

impl Game {
    /// Starts a new game from position `board` with `side` to move
    pub fn new(board: Board, side: Color) -> Result<Game, ValidateError> {
        validate(&board, side)?;
        Ok(Game {
            board,
            side,
            history: Vec::new(),
        })
    }

    /// Starts a new game from the initial position
    pub fn initial() -> Game {
        Game {
            board: Board::initial(),
            side: Color::White,
            history: Vec::new(),
        }
    }

    /// Starts a new game from FEN
    ///
    /// Only the piece placement and the side to move are used. If the side to move is absent,
    /// White moves first.
    pub fn from_fen(fen: &str) -> Result<Game, LoadError> {
        let board = Board::from_fen(fen)?;
        let side = match fen.split_ascii_whitespace().nth(1) {
            Some(s) => Color::from_str(s)?,
            None => Color::White,
        };
        Ok(Game::new(board, side)?)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn history(&self) -> &[Record] {
        &self.history
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns the labels of all the moves played so far
    pub fn notation(&self) -> impl Iterator<Item = Notation> + '_ {
        self.history.iter().map(|r| r.notation)
    }

    /// Returns the wrapper which formats the move labels separated with spaces
    pub fn notation_list(&self, style: Style) -> NotationList<'_> {
        NotationList(self, style)
    }

    /// Returns the pieces of color `c` that were captured by the opponent
    pub fn captured(&self, c: Color) -> impl Iterator<Item = Piece> + '_ {
        self.history
            .iter()
            .filter(move |r| r.captured.color() == Some(c))
            .filter_map(|r| r.captured.piece())
    }

    /// Returns the total value of pieces of color `c` captured by the opponent
    pub fn material_lost(&self, c: Color) -> u32 {
        self.captured(c).map(|p| p.value()).sum()
    }

    /// Returns `true` if the king of the side to move is attacked
    pub fn is_check(&self) -> bool {
        self.checkers().is_nonempty()
    }

    /// Returns the pieces that attack the king of the side to move
    pub fn checkers(&self) -> Bitboard {
        match self.board.king_pos(self.side) {
            Some(king) => movegen::attackers(&self.board, king, self.side.inv()),
            None => Bitboard::EMPTY,
        }
    }

    /// Returns the legal destinations for the piece on `src`
    ///
    /// If the piece belongs to the side which doesn't move now, the result is empty.
    pub fn legal_destinations(&self, src: Coord) -> Destinations {
        if self.board.get(src).color() != Some(self.side) {
            return Destinations::new();
        }
        legal::legal_destinations(&self.board, src)
    }

    fn check_move(
        &self,
        mv: Move,
        promote: Option<PromotePiece>,
    ) -> Result<(Cell, Piece), GameError> {
        let cell = self.board.get(mv.src());
        let (color, piece) = match (cell.color(), cell.piece()) {
            (Some(c), Some(p)) => (c, p),
            _ => return Err(GameError::EmptySource(mv.src())),
        };
        if color != self.side {
            return Err(GameError::WrongSide {
                src: mv.src(),
                side: self.side,
            });
        }
        if !legal::is_legal(&self.board, mv) {
            return Err(GameError::NotLegal(mv));
        }
        if promote.is_some() && !mv.is_promote(&self.board) {
            return Err(GameError::UnexpectedPromote(mv));
        }
        Ok((cell, piece))
    }

    /// Plays the move `mv` for the side to move
    ///
    /// If a pawn reaches the last rank, it turns into `promote`, or into a queen if `promote`
    /// is `None`. On error, the game stays unchanged.
    pub fn push(
        &mut self,
        mv: Move,
        promote: Option<PromotePiece>,
    ) -> Result<&Record, GameError> {
        let (moved, piece) = match self.check_move(mv, promote) {
            Ok(res) => res,
            Err(e) => {
                trace!("rejected move {mv}: {e}");
                return Err(e);
            }
        };

        let promote = if mv.is_promote(&self.board) {
            Some(promote.unwrap_or_default())
        } else {
            None
        };
        let captured = moves::apply(&mut self.board, mv, promote.unwrap_or_default());
        self.side = self.side.inv();

        let notation = Notation::new(piece, mv.dst(), captured.is_occupied());
        let check = self.is_check();
        debug!(
            "{:?} played {} ({}){}",
            self.side.inv(),
            mv,
            notation,
            if check { ", check" } else { "" }
        );

        self.history.push(Record {
            mv,
            moved,
            captured,
            promote,
            notation,
            check,
        });
        Ok(&self.history[self.history.len() - 1])
    }

    /// Takes back the last move
    ///
    /// Returns `None` if no moves were played.
    pub fn pop(&mut self) -> Option<Record> {
        let r = self.history.pop()?;
        self.board.put(r.mv.src(), r.moved);
        self.board.put(r.mv.dst(), r.captured);
        self.side = self.side.inv();
        Some(r)
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::initial()
    }
}

/// Wrapper to format the moves of a [`Game`]
///
/// See [`Game::notation_list()`] doc for details.
pub struct NotationList<'a>(&'a Game, Style);

impl<'a> fmt::Display for NotationList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, n) in self.0.notation().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", n.styled(self.1))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_turns() {
        let mut game = Game::initial();
        assert_eq!(game.side(), Color::White);
        assert_eq!(&game.legal_destinations(sq("e2"))[..], &[sq("e4"), sq("e3")]);
        assert!(game.legal_destinations(sq("e7")).is_empty());
        assert!(game.legal_destinations(sq("e4")).is_empty());

        assert_eq!(
            game.push(mv("e7e5"), None),
            Err(GameError::WrongSide {
                src: sq("e7"),
                side: Color::White
            })
        );
        assert_eq!(
            game.push(mv("e4e5"), None),
            Err(GameError::EmptySource(sq("e4")))
        );
        assert_eq!(
            game.push(mv("e2e5"), None),
            Err(GameError::NotLegal(mv("e2e5")))
        );
        assert_eq!(
            game.push(mv("e2e4"), Some(PromotePiece::Queen)),
            Err(GameError::UnexpectedPromote(mv("e2e4")))
        );
        assert_eq!(game, Game::initial());

        let r = *game.push(mv("e2e4"), None).unwrap();
        assert_eq!(r.notation.to_string(), "e4");
        assert_eq!(r.captured, Cell::EMPTY);
        assert_eq!(r.promote, None);
        assert!(!r.check);
        assert_eq!(game.side(), Color::Black);
        assert_eq!(game.len(), 1);
        assert!(game.legal_destinations(sq("e4")).is_empty());
        assert_eq!(game.legal_destinations(sq("e7")).len(), 2);

        assert!(matches!(
            game.push(mv("d2d4"), None),
            Err(GameError::WrongSide { .. })
        ));
        game.push(mv("e7e5"), None).unwrap();
        assert_eq!(game.side(), Color::White);
    }

    #[test]
    fn test_check_and_captures() {
        let mut game = Game::initial();
        for m in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"] {
            let r = game.push(mv(m), None).unwrap();
            assert!(!r.check);
        }
        assert!(!game.is_check());

        let r = *game.push(mv("h5f7"), None).unwrap();
        assert_eq!(r.captured, Cell::from_parts(Color::Black, Piece::Pawn));
        assert!(r.check);
        assert!(game.is_check());
        assert_eq!(game.checkers(), Bitboard::from_coord(sq("f7")));
        assert!(game.legal_destinations(sq("e8")).is_empty());

        assert_eq!(
            game.notation_list(Style::Algebraic).to_string(),
            "e4 e5 Bc4 Nc6 Qh5 Nf6 Qf7x"
        );
        assert_eq!(
            game.notation_list(Style::Utf8).to_string(),
            "e4 e5 ♗c4 ♘c6 ♕h5 ♘f6 ♕f7x"
        );
        assert_eq!(game.captured(Color::Black).collect::<Vec<_>>(), vec![Piece::Pawn]);
        assert_eq!(game.captured(Color::White).count(), 0);
        assert_eq!(game.material_lost(Color::Black), 1);
        assert_eq!(game.material_lost(Color::White), 0);
    }

    #[test]
    fn test_material() {
        let mut game = Game::from_fen("7k/8/8/3q4/8/1n3N2/8/R5K1 w").unwrap();
        game.push(mv("f3d4"), None).unwrap();
        game.push(mv("b3a1"), None).unwrap();
        game.push(mv("g1h2"), None).unwrap();
        game.push(mv("d5d4"), None).unwrap();
        assert_eq!(
            game.captured(Color::White).collect::<Vec<_>>(),
            vec![Piece::Rook, Piece::Knight]
        );
        assert_eq!(game.material_lost(Color::White), 8);
        assert_eq!(game.material_lost(Color::Black), 0);
        assert_eq!(
            game.notation_list(Style::Algebraic).to_string(),
            "Nd4 Na1x Kh2 Qd4x"
        );
    }

    #[test]
    fn test_promote() {
        let game = Game::from_fen("7k/P7/8/8/8/8/8/K7 w").unwrap();

        let mut g = game.clone();
        let r = *g.push(mv("a7a8"), None).unwrap();
        assert_eq!(r.promote, Some(PromotePiece::Queen));
        assert_eq!(r.notation.to_string(), "a8");
        assert!(r.check);
        assert_eq!(
            g.board().get(sq("a8")),
            Cell::from_parts(Color::White, Piece::Queen)
        );
        assert_eq!(g.checkers(), Bitboard::from_coord(sq("a8")));

        let mut g = game.clone();
        let r = *g.push(mv("a7a8"), Some(PromotePiece::Knight)).unwrap();
        assert_eq!(r.promote, Some(PromotePiece::Knight));
        assert!(!r.check);
        assert_eq!(
            g.board().get(sq("a8")),
            Cell::from_parts(Color::White, Piece::Knight)
        );

        // taking back restores the pawn
        assert_eq!(g.pop(), Some(r));
        assert_eq!(g, game);
    }

    #[test]
    fn test_pop() {
        let mut game = Game::initial();
        assert_eq!(game.pop(), None);
        for m in ["e2e4", "d7d5", "e4d5"] {
            game.push(mv(m), None).unwrap();
        }
        assert_eq!(game.board().as_fen(), "rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR");

        let r = game.pop().unwrap();
        assert_eq!(r.captured, Cell::from_parts(Color::Black, Piece::Pawn));
        assert_eq!(game.side(), Color::White);
        assert_eq!(game.board().as_fen(), "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR");

        game.pop();
        game.pop();
        assert_eq!(game, Game::initial());
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            Game::new(Board::empty(), Color::White),
            Err(ValidateError::NoKing(Color::White))
        );
        assert_eq!(
            Game::from_fen("K7/8/8/8/8/8/8/K6k w"),
            Err(LoadError::Validate(ValidateError::TooManyKings(Color::White)))
        );
        assert_eq!(
            Game::from_fen("K7/8/8/8/8/8/8/8 w"),
            Err(LoadError::Validate(ValidateError::NoKing(Color::Black)))
        );
        assert_eq!(
            Game::from_fen("P6k/8/8/8/8/8/8/K7 w"),
            Err(LoadError::Validate(ValidateError::InvalidPawn(sq("a8"))))
        );
        assert_eq!(
            Game::from_fen("k7/8/8/8/8/8/8/R6K w"),
            Err(LoadError::Validate(ValidateError::OpponentKingAttacked))
        );

        let game = Game::from_fen("k7/8/8/8/8/8/8/R6K b").unwrap();
        assert!(game.is_check());
        assert_eq!(game.side(), Color::Black);
    }

    #[test]
    fn test_from_fen() {
        let game =
            Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(game, Game::initial());
        let game = Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap();
        assert_eq!(game.side(), Color::White);
        let game = Game::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b").unwrap();
        assert_eq!(game.side(), Color::Black);

        assert_eq!(
            Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x"),
            Err(LoadError::Side(ColorParseError::UnexpectedChar('x')))
        );
        assert!(matches!(
            Game::from_fen("8/8 w"),
            Err(LoadError::Board(_))
        ));
    }
}
