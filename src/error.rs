use std::path::PathBuf;

use crate::{Player, HEIGHT, WIDTH};

/// Errors raised when a move or a position is rejected by the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {0} out of range, columns must be between 0 and {max}", max = WIDTH - 1)]
    ColumnOutOfRange(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("could not parse '{0}' as a cell")]
    InvalidCell(char),

    #[error("could not parse '{0}' as a valid move")]
    InvalidMove(char),

    #[error("expected {expected} cells in row {row}, found {found}", expected = WIDTH)]
    RowLength { row: usize, found: usize },

    #[error("expected {expected} rows, found {0}", expected = HEIGHT)]
    RowCount(usize),

    #[error("cell at row {row}, column {column} is floating above an empty cell")]
    Floating { row: usize, column: usize },
}

/// Errors raised when the search engine is called outside its contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no valid columns left to search")]
    NoValidColumns,

    #[error("search depth must be at least 1")]
    ZeroDepth,

    #[error("the position is already won by {0}")]
    GameOver(Player),
}

/// Errors raised by the turn loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid move, column {0} out of range. Columns must be between 1 and {max}", max = WIDTH)]
    OutOfRange(usize),

    #[error("invalid move, column {0} full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,

    #[error("it is not {0}'s turn")]
    NotYourTurn(Player),

    #[error("event {event} does not apply to the {screen} screen")]
    UnexpectedEvent {
        event: &'static str,
        screen: &'static str,
    },

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
