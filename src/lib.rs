//! A chess data-structure library: board representation, legal move
//! generation, make/unmake with incremental state, FEN, zobrist hashing and
//! static exchange evaluation. Standard chess and Chess960 share all code
//! paths.
//!
//! # Usage
//!
//! Create a [`Board`], generate moves, play them, take them back:
//!
//! ```
//! use rookery::Board;
//!
//! let mut board = Board::start_pos();
//! let moves = board.generate_moves();
//! for mv in &moves {
//!     board.apply_move(*mv);
//!     board.undo_move();
//! }
//! assert_eq!(moves.len(), 20);
//! ```
//!
//! Positions round-trip through FEN, including Shredder-style Chess960
//! castling fields:
//!
//! ```
//! use rookery::Board;
//!
//! let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
//! let board = Board::from_fen(fen).unwrap();
//! assert_eq!(board.fen(), fen);
//! ```
//!
//! # Safety and validity
//!
//! Applying a move that did not come from the generator for the *current*
//! position is undefined; debug builds assert, release builds do not pay
//! for checks. Screen foreign moves (transposition table, user input) with
//! [`Board::pseudo_legal_move`] and [`Board::legal_move`] first.
//!
//! The global attack and zobrist tables are built once and shared
//! read-only; [`helper::prelude::init_statics`] forces construction up
//! front.
//!
//! [`Board`]: board/struct.Board.html
//! [`Board::pseudo_legal_move`]: board/struct.Board.html#method.pseudo_legal_move
//! [`Board::legal_move`]: board/struct.Board.html#method.legal_move
//! [`helper::prelude::init_statics`]: helper/prelude/fn.init_statics.html

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;

pub mod core;

pub mod board;
pub mod helper;
pub mod tools;

pub use crate::board::castle_rights::CastleRights;
pub use crate::board::fen::{FenError, START_FEN};
pub use crate::board::movegen::MoveGen;
pub use crate::board::{Board, BoardError, RandBoard};
pub use crate::core::bitboard::BitBoard;
pub use crate::core::move_list::MoveList;
pub use crate::core::piece_move::{Move, MoveKind};
pub use crate::core::sq::Sq;
pub use crate::core::{CastleSide, File, GenKind, Piece, PieceType, Rank, Side};
