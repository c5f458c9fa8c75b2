//! The turn loop around the board and the computer opponent
//!
//! [`Game`] holds one game in progress. [`Session`] drives the screens a front
//! end moves through (choosing to play, playing, the result) as an explicit
//! state machine fed with [`Event`]s.

use log::info;
use rand::Rng;

use crate::{board::*, error::GameError, search::Searcher, WIDTH};

/// A single game between the human and the computer
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    state: GameState,
    // 1-indexed columns played so far
    moves: String,
}

impl Game {
    pub fn new(first: Player) -> Self {
        Self {
            board: Board::new(),
            to_move: first,
            state: GameState::Playing,
            moves: String::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The moves played so far as 1-indexed column digits
    pub fn moves(&self) -> &str {
        &self.moves
    }

    /// The 0-indexed column of the most recent move
    pub fn last_move(&self) -> Option<usize> {
        self.moves
            .chars()
            .last()
            .and_then(|c| c.to_digit(10))
            .map(|c| c as usize - 1)
    }

    /// Plays a column typed in by a person, counted from 1
    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState, GameError> {
        if column_one_indexed < 1 || column_one_indexed > WIDTH {
            return Err(GameError::OutOfRange(column_one_indexed));
        }
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        let column = column_one_indexed - 1;
        if !self.board.playable(column) {
            return Err(GameError::ColumnFull(column_one_indexed));
        }
        self.play(column, self.to_move)
    }

    /// Plays `column` for `player`, who must be the side to move
    pub fn play(&mut self, column: usize, player: Player) -> Result<GameState, GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        if player != self.to_move {
            return Err(GameError::NotYourTurn(player));
        }

        self.board = self.board.drop(column, player)?;
        self.moves.push_str(&(column + 1).to_string());
        info!("{} played column {}", player, column + 1);

        self.state = self.board.state();
        if self.state.is_over() {
            info!("game over after {}: {:?}", self.moves, self.state);
        } else {
            self.to_move = player.other();
        }
        Ok(self.state)
    }
}

/// The screens of the game front end
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    ModeSelect,
    Playing,
    GameOver(GameState),
    Quit,
}

impl Screen {
    fn name(self) -> &'static str {
        match self {
            Screen::ModeSelect => "mode select",
            Screen::Playing => "playing",
            Screen::GameOver(_) => "game over",
            Screen::Quit => "quit",
        }
    }
}

/// Input that moves a [`Session`] between screens
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Start a game against the computer
    Start,
    /// The human picked a column, counted from 1
    Column(usize),
    /// Let the computer make its move
    ComputerTurn,
    PlayAgain,
    /// Return to the mode select screen
    Back,
    Quit,
}

impl Event {
    fn name(self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::Column(_) => "column",
            Event::ComputerTurn => "computer turn",
            Event::PlayAgain => "play again",
            Event::Back => "back",
            Event::Quit => "quit",
        }
    }
}

/// The front end's state: the current screen, the game and the opponent
pub struct Session<R: Rng> {
    screen: Screen,
    game: Game,
    first: Player,
    computer: Searcher<R>,
}

impl<R: Rng> Session<R> {
    pub fn new(computer: Searcher<R>, first: Player) -> Self {
        Self {
            screen: Screen::ModeSelect,
            game: Game::new(first),
            first,
            computer,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn computer(&self) -> &Searcher<R> {
        &self.computer
    }

    /// Whether the front end should send [`Event::ComputerTurn`] next
    pub fn computer_to_move(&self) -> bool {
        self.screen == Screen::Playing && self.game.to_move() == Player::Computer
    }

    /// Applies one event, returning the screen it leads to
    ///
    /// A rejected move leaves the session unchanged.
    pub fn handle(&mut self, event: Event) -> Result<Screen, GameError> {
        let next = match (self.screen, event) {
            (_, Event::Quit) => Screen::Quit,
            (Screen::ModeSelect, Event::Start) | (Screen::GameOver(_), Event::PlayAgain) => {
                self.game = Game::new(self.first);
                info!("new game, {} moves first", self.first);
                Screen::Playing
            }
            (Screen::Playing, Event::Column(column)) => {
                if self.game.to_move() != Player::Human {
                    return Err(GameError::NotYourTurn(Player::Human));
                }
                Self::after_move(self.game.play_checked(column)?)
            }
            (Screen::Playing, Event::ComputerTurn) => {
                if self.game.to_move() != Player::Computer {
                    return Err(GameError::NotYourTurn(Player::Computer));
                }
                let column = self.computer.best_move(self.game.board())?;
                Self::after_move(self.game.play(column, Player::Computer)?)
            }
            (Screen::Playing, Event::Back) | (Screen::GameOver(_), Event::Back) => {
                Screen::ModeSelect
            }
            (screen, event) => {
                return Err(GameError::UnexpectedEvent {
                    event: event.name(),
                    screen: screen.name(),
                })
            }
        };
        self.screen = next;
        Ok(next)
    }

    fn after_move(state: GameState) -> Screen {
        if state.is_over() {
            Screen::GameOver(state)
        } else {
            Screen::Playing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use rand::rngs::StdRng;

    fn session(first: Player) -> Session<StdRng> {
        Session::new(Searcher::seeded(3, 17), first)
    }

    #[test]
    fn game_alternates_turns() {
        let mut game = Game::new(Player::Human);
        assert_eq!(game.play_checked(4), Ok(GameState::Playing));
        assert_eq!(game.to_move(), Player::Computer);
        assert_eq!(game.play(3, Player::Computer), Ok(GameState::Playing));
        assert_eq!(game.to_move(), Player::Human);
        assert_eq!(game.moves(), "44");
        assert_eq!(game.last_move(), Some(3));
        assert_eq!(*game.board(), Board::from_moves("44", Player::Human).unwrap());
    }

    #[test]
    fn game_rejects_bad_input() {
        let mut game = Game::new(Player::Human);
        assert_eq!(game.play_checked(0), Err(GameError::OutOfRange(0)));
        assert_eq!(game.play_checked(8), Err(GameError::OutOfRange(8)));
        assert_eq!(
            game.play(0, Player::Computer),
            Err(GameError::NotYourTurn(Player::Computer))
        );
        assert_eq!(
            game.play(9, Player::Human),
            Err(GameError::Board(BoardError::ColumnOutOfRange(9)))
        );

        for _ in 0..3 {
            game.play_checked(1).unwrap();
            game.play_checked(1).unwrap();
        }
        assert_eq!(game.play_checked(1), Err(GameError::ColumnFull(1)));
        assert_eq!(game.to_move(), Player::Human);
        assert_eq!(game.moves(), "111111");
    }

    #[test]
    fn game_ends_on_a_win() {
        let mut game = Game::new(Player::Human);
        for &column in [1, 1, 2, 2, 3, 3].iter() {
            game.play_checked(column).unwrap();
        }
        assert_eq!(game.play_checked(4), Ok(GameState::HumanWin));
        // the winner keeps the turn, nobody can move any more
        assert_eq!(game.play_checked(5), Err(GameError::GameOver));
        assert_eq!(game.play(4, Player::Computer), Err(GameError::GameOver));
    }

    #[test]
    fn session_screens() {
        let mut session = session(Player::Human);
        assert_eq!(session.screen(), Screen::ModeSelect);
        assert_eq!(session.computer().depth(), 3);
        assert_eq!(
            session.handle(Event::Column(4)),
            Err(GameError::UnexpectedEvent {
                event: "column",
                screen: "mode select"
            })
        );

        assert_eq!(session.handle(Event::Start), Ok(Screen::Playing));
        assert!(!session.computer_to_move());
        assert_eq!(
            session.handle(Event::ComputerTurn),
            Err(GameError::NotYourTurn(Player::Computer))
        );
        assert_eq!(session.handle(Event::Column(4)), Ok(Screen::Playing));
        assert!(session.computer_to_move());
        assert_eq!(
            session.handle(Event::Column(4)),
            Err(GameError::NotYourTurn(Player::Human))
        );
        assert_eq!(session.handle(Event::ComputerTurn), Ok(Screen::Playing));
        assert_eq!(session.game().board().num_moves(), 2);

        assert_eq!(session.handle(Event::Back), Ok(Screen::ModeSelect));
        assert_eq!(session.handle(Event::Start), Ok(Screen::Playing));
        assert_eq!(session.game().board().num_moves(), 0);
        assert_eq!(session.handle(Event::Quit), Ok(Screen::Quit));
    }

    #[test]
    fn rejected_move_keeps_the_screen() {
        let mut session = session(Player::Human);
        session.handle(Event::Start).unwrap();
        assert_eq!(session.handle(Event::Column(12)), Err(GameError::OutOfRange(12)));
        assert_eq!(session.screen(), Screen::Playing);
        assert_eq!(session.game().moves(), "");
    }

    #[test]
    fn computer_can_move_first() {
        let mut session = session(Player::Computer);
        session.handle(Event::Start).unwrap();
        assert!(session.computer_to_move());
        session.handle(Event::ComputerTurn).unwrap();
        assert_eq!(session.game().board().num_moves(), 1);
        assert_eq!(session.game().to_move(), Player::Human);
    }

    #[test]
    fn computer_punishes_a_careless_human() {
        let mut session = session(Player::Human);
        session.handle(Event::Start).unwrap();

        // the human keeps stacking the first column
        let mut screen = Screen::Playing;
        while screen == Screen::Playing {
            screen = if session.computer_to_move() {
                session.handle(Event::ComputerTurn).unwrap()
            } else {
                let column = session.game().board().valid_columns()[0] + 1;
                session.handle(Event::Column(column)).unwrap()
            };
        }
        assert_eq!(screen, Screen::GameOver(GameState::ComputerWin));
        assert_eq!(session.handle(Event::PlayAgain), Ok(Screen::Playing));
        assert_eq!(session.game().moves(), "");
    }
}
