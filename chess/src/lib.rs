//! # kibitz
//!
//! Move legality for chess boards: which squares a piece may go to, which squares are
//! attacked, and short labels for the moves played.
//!
//! The crate works on plain snapshots of the board. Queries never modify the board passed to
//! them and keep no state between calls, so they can be used from any number of threads.
//!
//! There is no support for castling and en passant, and checkmate is not detected.
//!
//! # Example
//!
//! ```
//! use kibitz::{Board, Color, Coord, Piece};
//!
//! let board = Board::from_fen("k3r3/8/8/8/8/8/4N3/4K3").unwrap();
//!
//! // The knight is pinned by the rook
//! let knight = Coord::from_row_col(6, 4);
//! assert!(kibitz::legal_destinations(&board, knight).is_empty());
//!
//! // The rook attacks the whole e-file down to the knight
//! assert!(kibitz::is_square_attacked(&board, Coord::from_row_col(5, 4), Color::Black));
//! assert!(!kibitz::is_square_attacked(&board, Coord::from_row_col(7, 4), Color::Black));
//!
//! assert_eq!(kibitz::describe_move(Piece::Knight, Coord::from_row_col(5, 2), false), "Nc3");
//! ```

mod attack;

pub mod board;
pub mod game;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod notation;

pub use kibitz_base::{bitboard, geometry, types};

pub use bitboard::Bitboard;
pub use board::{Board, PrettyStyle};
pub use game::Game;
pub use legal::{legal_destinations, Destinations, KingPolicy};
pub use movegen::is_square_attacked;
pub use moves::{Move, PromotePiece};
pub use notation::describe_move;
pub use types::{Cell, Color, Coord, File, Piece, Rank};
