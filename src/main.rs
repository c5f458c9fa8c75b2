use anyhow::Result;
use log::info;

use std::io::{stdin, stdout, Write};
use std::path::Path;

use connect4_minimax::config::{Config, DEFAULT_CONFIG_PATH};
use connect4_minimax::game::{Event, Screen, Session};
use connect4_minimax::{GameState, WIDTH};

mod terminal;

/// Reads one line from stdin, `None` once input is closed
fn read_line() -> Result<Option<String>> {
    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}

/// Asks a y/n question until it gets an answer, treating closed input as 'n'
fn ask(question: &str) -> Result<bool> {
    loop {
        print!("{} y/n: ", question);
        stdout().flush()?;

        let buffer = match read_line()? {
            Some(buffer) => buffer,
            None => return Ok(false),
        };
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load_or_default(Path::new(&config_path))?;
    info!("using {:?}", config);

    let mut session = Session::new(config.searcher(), config.first_player());

    println!("Welcome to Connect 4\n");

    loop {
        match session.screen() {
            Screen::ModeSelect => {
                let event = if ask("Play against the computer?")? {
                    Event::Start
                } else {
                    Event::Quit
                };
                session.handle(event)?;
            }

            Screen::Playing => {
                terminal::display(session.game().board())?;

                if session.computer_to_move() {
                    let spinner = terminal::thinking_spinner();
                    // pacing only, the search itself does not wait
                    std::thread::sleep(config.think_delay());
                    let result = session.handle(Event::ComputerTurn);
                    spinner.finish_and_clear();
                    result?;

                    if let Some(column) = session.game().last_move() {
                        println!("Computer played column {}", column + 1);
                    }
                    continue;
                }

                print!("Your move (1-{}, q to leave) > ", WIDTH);
                stdout().flush()?;
                let input_str = match read_line()? {
                    Some(input_str) => input_str,
                    None => {
                        session.handle(Event::Quit)?;
                        continue;
                    }
                };

                if input_str.trim().eq_ignore_ascii_case("q") {
                    session.handle(Event::Back)?;
                    continue;
                }
                let column = match input_str.trim().parse::<usize>() {
                    Err(_) => {
                        println!("Invalid number: {}", input_str.trim());
                        continue;
                    }
                    Ok(column) => column,
                };

                if let Err(err) = session.handle(Event::Column(column)) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            Screen::GameOver(state) => {
                terminal::display(session.game().board())?;
                match state {
                    GameState::HumanWin => println!("You win!"),
                    GameState::ComputerWin => println!("Computer wins!"),
                    _ => println!("It's a tie!"),
                }

                let event = if ask("Play again?")? {
                    Event::PlayAgain
                } else {
                    Event::Quit
                };
                session.handle(event)?;
            }

            Screen::Quit => break,
        }
    }
    Ok(())
}
