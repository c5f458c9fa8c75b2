//! A Connect 4 opponent driven by a depth-limited minimax search
//!
//! The computer player looks a fixed number of plies ahead with alpha-beta
//! pruning and scores the positions at the search horizon with a simple
//! segment-counting heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::Board, search::Searcher};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_rows(&[
//!     ".......",
//!     ".......",
//!     ".......",
//!     ".......",
//!     "XX.....",
//!     "OOO.XX.",
//! ])?;
//! let mut searcher = Searcher::seeded(5, 42);
//!
//! assert_eq!(searcher.best_move(&board)?, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod evaluate;

pub mod search;

pub mod game;

pub mod config;

pub mod error;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of tiles in a row needed to win
pub const CONNECT: usize = 4;

// a segment has to fit on the board in every orientation
const_assert!(CONNECT <= WIDTH && CONNECT <= HEIGHT);
// column digits in move strings are single characters
const_assert!(WIDTH < 10);

pub use board::{Board, Cell, GameState, Player};
pub use error::{BoardError, ConfigError, GameError, SearchError};
pub use evaluate::{evaluate, Score, SCORE_INFINITY};
pub use search::{best_move, SearchResult, Searcher, DEFAULT_DEPTH};
