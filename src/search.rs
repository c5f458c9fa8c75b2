//! An agent to choose the computer's moves in Connect 4

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{board::*, error::SearchError, evaluate::*};

/// The search depth of the computer opponent, in plies
pub const DEFAULT_DEPTH: usize = 5;

/// A column chosen by the search and its score for the computer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub column: usize,
    pub score: Score,
}

/// An agent that picks moves for the computer with minimax search
///
/// # Notes
/// The game tree is explored depth-first to a fixed number of plies, with the
/// computer maximizing and the human minimizing the score. Alpha-beta pruning
/// skips branches that cannot change the result; it can be switched off with
/// [`without_pruning`](Searcher::without_pruning) without changing the score
/// returned.
///
/// # Position Scoring
/// A position the computer has won scores [`SCORE_INFINITY`], one the human has
/// won scores `-SCORE_INFINITY` and a full board scores 0. Positions still in
/// play at the search horizon are scored by [`evaluate`].
///
/// # Tie-breaking
/// Columns are tried in ascending order and a later column only replaces the
/// running best on a strictly better score. The running best column starts out
/// as a random valid column, which is what gets played when every move loses.
/// The random source is `R`; seed it for reproducible games.
#[derive(Clone, Debug)]
pub struct Searcher<R = StdRng> {
    depth: usize,
    pruning: bool,
    rng: R,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher<StdRng> {
    /// Creates a new `Searcher` with a random source seeded from OS entropy
    pub fn new(depth: usize) -> Self {
        Self::with_rng(depth, StdRng::from_entropy())
    }

    /// Creates a new `Searcher` whose tie-breaks are reproducible
    pub fn seeded(depth: usize, seed: u64) -> Self {
        Self::with_rng(depth, StdRng::seed_from_u64(seed))
    }
}

impl Default for Searcher<StdRng> {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl<R: Rng> Searcher<R> {
    /// Creates a new `Searcher` drawing tie-breaks from `rng`
    pub fn with_rng(depth: usize, rng: R) -> Self {
        Self {
            depth,
            pruning: true,
            rng,
            node_count: 0,
        }
    }

    /// Disables alpha-beta pruning, searching the full tree
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Searches `board` with the computer to move
    ///
    /// Returns the chosen column and its score
    pub fn search(&mut self, board: &Board) -> Result<SearchResult, SearchError> {
        if self.depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        if let Some(winner) = board.winner() {
            return Err(SearchError::GameOver(winner));
        }

        let start_nodes = self.node_count;
        let (column, score) =
            self.minimax(board, self.depth, -SCORE_INFINITY, SCORE_INFINITY, true);
        // a position in play with no winner only lacks a column when it is full
        let column = column.ok_or(SearchError::NoValidColumns)?;

        debug!(
            "depth {} search chose column {} (score {}, {} nodes)",
            self.depth,
            column,
            score,
            self.node_count - start_nodes
        );
        Ok(SearchResult { column, score })
    }

    /// Chooses the computer's move on `board`
    pub fn best_move(&mut self, board: &Board) -> Result<usize, SearchError> {
        Ok(self.search(board)?.column)
    }

    /// Performs game tree search
    ///
    /// Returns the best column for the side to move, or `None` at the horizon
    /// and in finished positions, along with the score of the position
    fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> (Option<usize>, Score) {
        self.node_count += 1;

        if board.has_won(Player::Computer) {
            return (None, SCORE_INFINITY);
        }
        if board.has_won(Player::Human) {
            return (None, -SCORE_INFINITY);
        }
        let columns = board.valid_columns();
        if columns.is_empty() {
            return (None, 0);
        }
        if depth == 0 {
            return (None, evaluate(board));
        }

        let mut best_column = columns[self.rng.gen_range(0..columns.len())];

        if maximizing {
            let mut best_score = -SCORE_INFINITY;
            for &column in columns.iter() {
                let next = board.play(column, Player::Computer);
                let (_, score) = self.minimax(&next, depth - 1, alpha, beta, false);
                if depth == self.depth {
                    trace!("column {} scores {}", column, score);
                }
                if score > best_score {
                    best_score = score;
                    best_column = column;
                }
                alpha = alpha.max(best_score);
                if self.pruning && alpha >= beta {
                    break;
                }
            }
            (Some(best_column), best_score)
        } else {
            let mut best_score = SCORE_INFINITY;
            for &column in columns.iter() {
                let next = board.play(column, Player::Human);
                let (_, score) = self.minimax(&next, depth - 1, alpha, beta, true);
                if score < best_score {
                    best_score = score;
                    best_column = column;
                }
                beta = beta.min(best_score);
                if self.pruning && alpha >= beta {
                    break;
                }
            }
            (Some(best_column), best_score)
        }
    }
}

/// Chooses the computer's move on `board`, searching `depth` plies with a
/// freshly seeded random source
pub fn best_move(board: &Board, depth: usize) -> Result<usize, SearchError> {
    Searcher::new(depth).best_move(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HEIGHT, WIDTH};
    use rand::rngs::mock::StepRng;

    fn board(rows: [&str; HEIGHT]) -> Board {
        Board::from_rows(&rows).unwrap()
    }

    // the human has an open three on the bottom row, so every move loses
    fn double_threat() -> Board {
        board([
            ".......",
            ".......",
            ".......",
            ".......",
            "...O...",
            ".XXX.O.",
        ])
    }

    #[test]
    fn rejects_zero_depth() {
        let mut searcher = Searcher::seeded(0, 1);
        assert_eq!(searcher.best_move(&Board::new()), Err(SearchError::ZeroDepth));
    }

    #[test]
    fn rejects_full_board() {
        let b = board([
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
        ]);
        let mut searcher = Searcher::seeded(DEFAULT_DEPTH, 1);
        assert_eq!(searcher.best_move(&b), Err(SearchError::NoValidColumns));
    }

    #[test]
    fn rejects_finished_game() {
        let b = board([
            ".......",
            ".......",
            ".......",
            ".......",
            "OOO....",
            "XXXX...",
        ]);
        let mut searcher = Searcher::seeded(DEFAULT_DEPTH, 1);
        assert_eq!(
            searcher.best_move(&b),
            Err(SearchError::GameOver(Player::Human))
        );
    }

    #[test]
    fn empty_board_gives_a_column() {
        for depth in 1..=DEFAULT_DEPTH {
            let column = Searcher::seeded(depth, depth as u64)
                .best_move(&Board::new())
                .unwrap();
            assert!(column < WIDTH);
        }
    }

    #[test]
    fn empty_board_score() {
        let result = Searcher::seeded(DEFAULT_DEPTH, 3)
            .search(&Board::new())
            .unwrap();
        assert_eq!(result.score, 10);
    }

    #[test]
    fn takes_immediate_win() {
        let b = board([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "OOO....",
        ]);
        for depth in 1..=DEFAULT_DEPTH {
            let result = Searcher::seeded(depth, 11).search(&b).unwrap();
            assert_eq!(result.column, 3);
            assert_eq!(result.score, SCORE_INFINITY);
        }
    }

    #[test]
    fn blocks_open_three() {
        let b = board([
            ".......",
            ".......",
            ".......",
            ".......",
            "OO.....",
            "XXX....",
        ]);
        for depth in 2..=DEFAULT_DEPTH {
            assert_eq!(Searcher::seeded(depth, 5).best_move(&b).unwrap(), 3);
        }
    }

    #[test]
    fn prefers_win_over_block() {
        let b = board([
            ".......",
            ".......",
            ".......",
            ".......",
            "XXX....",
            "OOO.X..",
        ]);
        assert_eq!(Searcher::seeded(DEFAULT_DEPTH, 9).best_move(&b).unwrap(), 3);
    }

    #[test]
    fn lost_position_falls_back_to_tie_break() {
        let b = double_threat();
        let result = Searcher::with_rng(2, StepRng::new(0, 0)).search(&b).unwrap();
        assert_eq!(result.score, -SCORE_INFINITY);
        // a constant generator always picks the first valid column
        assert_eq!(result.column, 0);
    }

    #[test]
    fn seeded_search_is_deterministic() {
        let b = double_threat();
        for seed in 0..20 {
            let first = Searcher::seeded(3, seed).best_move(&b).unwrap();
            let second = Searcher::seeded(3, seed).best_move(&b).unwrap();
            assert_eq!(first, second);
            assert!(b.valid_columns().contains(&first));
        }
    }

    #[test]
    fn does_not_touch_the_callers_board() {
        let b = Board::from_moves("4433", Player::Human).unwrap();
        let copy = b;
        Searcher::seeded(DEFAULT_DEPTH, 2).best_move(&b).unwrap();
        assert_eq!(b, copy);
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let b = Board::from_moves("4453", Player::Human).unwrap();
        let mut pruned = Searcher::seeded(4, 1);
        let mut full = Searcher::seeded(4, 1).without_pruning();
        let pruned_result = pruned.search(&b).unwrap();
        let full_result = full.search(&b).unwrap();
        assert_eq!(pruned_result.score, full_result.score);
        assert!(pruned.node_count < full.node_count);
    }
}
