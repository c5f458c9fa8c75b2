//! Static evaluation of positions at the search horizon
//!
//! Every segment on the board is scored once for each side: a segment counts
//! only while the other side has no tile in it, and then by how close it is to
//! being completed. The evaluation is the computer's total minus the human's,
//! so positive scores favour the computer.

use static_assertions::*;

use crate::board::{Board, Cell, Player, NUM_SEGMENTS, SEGMENTS};
use crate::CONNECT;

/// A position score from the computer's point of view
pub type Score = i32;

/// Stands in for an infinite score: a won position, or an open search bound
pub const SCORE_INFINITY: Score = i32::MAX;

/// A segment completely held by one side
pub const FOUR_SCORE: Score = 100;
/// One tile short of a complete segment, with the last cell open
pub const THREE_SCORE: Score = 10;
/// Two tiles and two open cells
pub const TWO_SCORE: Score = 5;

// the heuristic can never reach the won-position sentinel
const_assert!((NUM_SEGMENTS as i64) * (FOUR_SCORE as i64) < SCORE_INFINITY as i64);

/// Scores one segment for `player`
pub fn score_segment(cells: &[Cell; CONNECT], player: Player) -> Score {
    let own = player.cell();
    let mut count_player = 0;
    let mut count_empty = 0;

    for cell in cells.iter() {
        if *cell == own {
            count_player += 1;
        } else if cell.is_empty() {
            count_empty += 1;
        } else {
            // blocked by the other side
            return 0;
        }
    }

    if count_player == CONNECT {
        FOUR_SCORE
    } else if count_player == CONNECT - 1 && count_empty == 1 {
        THREE_SCORE
    } else if count_player == CONNECT - 2 && count_empty == 2 {
        TWO_SCORE
    } else {
        0
    }
}

/// Sum of the segment scores of every line on the board for `player`
pub fn evaluate_lines(board: &Board, player: Player) -> Score {
    SEGMENTS
        .iter()
        .map(|segment| score_segment(&board.segment_cells(segment), player))
        .sum()
}

/// Evaluates `board` for the computer
pub fn evaluate(board: &Board) -> Score {
    evaluate_lines(board, Player::Computer) - evaluate_lines(board, Player::Human)
}
