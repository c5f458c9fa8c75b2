use std::fmt;

use crate::{error::BoardError, CONNECT, HEIGHT, WIDTH};

/// One of the two sides in a game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::Human => Cell::Human,
            Player::Computer => Cell::Computer,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "Human"),
            Player::Computer => write!(f, "Computer"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    Human,
    Computer,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }

    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Human => Some(Player::Human),
            Cell::Computer => Some(Player::Computer),
            Cell::Empty => None,
        }
    }

    fn from_char(c: char) -> Result<Self, BoardError> {
        match c {
            'X' | 'x' => Ok(Cell::Human),
            'O' | 'o' => Ok(Cell::Computer),
            '.' => Ok(Cell::Empty),
            _ => Err(BoardError::InvalidCell(c)),
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Human => 'X',
            Cell::Computer => 'O',
            Cell::Empty => '.',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    HumanWin,
    ComputerWin,
    Draw,
}

impl GameState {
    pub fn is_over(self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

/// `CONNECT` cells in a line, as `(row, column)` pairs
pub type Segment = [(usize, usize); CONNECT];

/// The number of distinct segments on the board across all four orientations
pub const NUM_SEGMENTS: usize = HEIGHT * (WIDTH - CONNECT + 1)
    + WIDTH * (HEIGHT - CONNECT + 1)
    + 2 * (HEIGHT - CONNECT + 1) * (WIDTH - CONNECT + 1);

/// Every segment on the board, in the order horizontal, vertical,
/// diagonal `\` and diagonal `/`
pub static SEGMENTS: [Segment; NUM_SEGMENTS] = segments();

const fn segments() -> [Segment; NUM_SEGMENTS] {
    let mut segments = [[(0, 0); CONNECT]; NUM_SEGMENTS];
    let mut n = 0;

    // horizontal
    let mut row = 0;
    while row < HEIGHT {
        let mut column = 0;
        while column + CONNECT <= WIDTH {
            let mut i = 0;
            while i < CONNECT {
                segments[n][i] = (row, column + i);
                i += 1;
            }
            n += 1;
            column += 1;
        }
        row += 1;
    }

    // vertical
    let mut column = 0;
    while column < WIDTH {
        let mut row = 0;
        while row + CONNECT <= HEIGHT {
            let mut i = 0;
            while i < CONNECT {
                segments[n][i] = (row + i, column);
                i += 1;
            }
            n += 1;
            row += 1;
        }
        column += 1;
    }

    // diagonal \, top-left to bottom-right
    let mut row = 0;
    while row + CONNECT <= HEIGHT {
        let mut column = 0;
        while column + CONNECT <= WIDTH {
            let mut i = 0;
            while i < CONNECT {
                segments[n][i] = (row + i, column + i);
                i += 1;
            }
            n += 1;
            column += 1;
        }
        row += 1;
    }

    // diagonal /, bottom-left to top-right
    let mut row = CONNECT - 1;
    while row < HEIGHT {
        let mut column = 0;
        while column + CONNECT <= WIDTH {
            let mut i = 0;
            while i < CONNECT {
                segments[n][i] = (row - i, column + i);
                i += 1;
            }
            n += 1;
            column += 1;
        }
        row += 1;
    }

    segments
}

/// A Connect 4 position
///
/// Cells are stored top-to-bottom, left-to-right: row 0 is the top of the
/// board and pieces fall towards row `HEIGHT - 1`. The board is a plain value;
/// playing a move returns a new board and leaves the original untouched.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Parses a board from its rows, top row first
    ///
    /// `X` is a human tile, `O` a computer tile and `.` an empty cell.
    /// Positions with a tile resting above an empty cell are rejected.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        if rows.len() != HEIGHT {
            return Err(BoardError::RowCount(rows.len()));
        }

        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != WIDTH {
                return Err(BoardError::RowLength { row, found });
            }
            for (column, c) in line.chars().enumerate() {
                board.cells[row][column] = Cell::from_char(c)?;
            }
        }

        for column in 0..WIDTH {
            for row in 0..HEIGHT - 1 {
                if !board.cells[row][column].is_empty() && board.cells[row + 1][column].is_empty() {
                    return Err(BoardError::Floating { row, column });
                }
            }
        }
        Ok(board)
    }

    /// Plays a sequence of 1-indexed column digits, alternating sides
    /// starting with `first`
    pub fn from_moves<S: AsRef<str>>(moves: S, first: Player) -> Result<Self, BoardError> {
        let mut board = Self::new();
        let mut player = first;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    board = board.drop(column - 1, player)?;
                    player = player.other();
                }
                _ => return Err(BoardError::InvalidMove(column_char)),
            }
        }
        Ok(board)
    }

    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// Whether a tile can still be dropped into `column`
    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.cells[0][column].is_empty()
    }

    /// Columns that can still take a tile, in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.playable(column)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(|cell| !cell.is_empty())
    }

    /// The row a tile dropped into `column` would land on
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        (0..HEIGHT).rev().find(|&row| self.cells[row][column].is_empty())
    }

    /// Drops a tile for `player` into `column`, returning the new position
    pub fn drop(&self, column: usize, player: Player) -> Result<Self, BoardError> {
        if column >= WIDTH {
            return Err(BoardError::ColumnOutOfRange(column));
        }
        match self.landing_row(column) {
            Some(row) => {
                let mut next = *self;
                next.cells[row][column] = player.cell();
                Ok(next)
            }
            None => Err(BoardError::ColumnFull(column)),
        }
    }

    /// Drops a tile into a column already known to be playable
    pub(crate) fn play(&self, column: usize, player: Player) -> Self {
        debug_assert!(self.playable(column), "column {} is not playable", column);
        let mut next = *self;
        if let Some(row) = self.landing_row(column) {
            next.cells[row][column] = player.cell();
        }
        next
    }

    /// The cells covered by a segment, in segment order
    pub fn segment_cells(&self, segment: &Segment) -> [Cell; CONNECT] {
        let mut cells = [Cell::Empty; CONNECT];
        for (cell, &(row, column)) in cells.iter_mut().zip(segment.iter()) {
            *cell = self.cells[row][column];
        }
        cells
    }

    pub fn has_won(&self, player: Player) -> bool {
        let cell = player.cell();
        SEGMENTS.iter().any(|segment| {
            segment
                .iter()
                .all(|&(row, column)| self.cells[row][column] == cell)
        })
    }

    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::Computer) {
            Some(Player::Computer)
        } else if self.has_won(Player::Human) {
            Some(Player::Human)
        } else {
            None
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.has_won(Player::Human) || self.has_won(Player::Computer) || self.is_full()
    }

    pub fn state(&self) -> GameState {
        match self.winner() {
            Some(Player::Computer) => GameState::ComputerWin,
            Some(Player::Human) => GameState::HumanWin,
            None if self.is_full() => GameState::Draw,
            None => GameState::Playing,
        }
    }

    /// The number of tiles on the board
    pub fn num_moves(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// The same position with the human and computer tiles exchanged
    pub fn swapped(&self) -> Self {
        let mut swapped = *self;
        for cell in swapped.cells.iter_mut().flat_map(|row| row.iter_mut()) {
            *cell = match cell.player() {
                Some(player) => player.other().cell(),
                None => Cell::Empty,
            };
        }
        swapped
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: Vec<String> = row.iter().map(|cell| cell.to_char().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let numbers: Vec<String> = (1..=WIDTH).map(|x| x.to_string()).collect();
        write!(f, "{}", numbers.join(" "))
    }
}
