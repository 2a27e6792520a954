mod food;
mod game;
mod snake;
mod term;

use std::fs::File;
use std::process::exit;
use std::thread::sleep;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::Result;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::game::{GameState, SnakeGame, StepResult, MIN_TERM_HEIGHT, MIN_TERM_WIDTH};
use crate::snake::Direction;
use crate::term::TermManager;

pub type TermInt = u16;
pub type Coords = (u16, u16);
pub type Cell = (i16, i16);

pub const CELL_COUNT: i16 = 25;

const FRAME_INTERVAL_MS: u64 = 16;
const LOG_FILE: &str = "gridsnake.log";

fn main() -> Result<()> {
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_FILE)?)
        .expect("failed to initialize logging");

    let mut term = TermManager::new()?;
    let (width, height) = term.size();

    if width < MIN_TERM_WIDTH || height < MIN_TERM_HEIGHT {
        error!(
            "terminal is {}x{}, need at least {}x{}",
            width, height, MIN_TERM_WIDTH, MIN_TERM_HEIGHT
        );
        eprintln!(
            "Terminal is {}x{}, but the board needs at least {}x{}.",
            width, height, MIN_TERM_WIDTH, MIN_TERM_HEIGHT
        );
        exit(1);
    }

    term.setup()?;
    info!("gridsnake starting, {0}x{0} board", CELL_COUNT);

    let result = run(&mut term);

    term.restore()?;
    info!("terminal restored, exiting");
    result
}

fn run(term: &mut TermManager) -> Result<()> {
    let mut game = SnakeGame::new(Instant::now());
    let mut input: Option<Direction> = None;

    loop {
        sleep(Duration::from_millis(FRAME_INTERVAL_MS));

        for key_ev in term.read_key_events_queue()? {
            if is_quit(&key_ev) {
                info!("quit requested at score {}", game.score());
                return Ok(());
            }

            if game.state() == GameState::GameOver {
                // Any other key starts the next round; food stays put
                game.restart(Instant::now());
                input = None;
                continue;
            }

            match key_ev.code {
                KeyCode::Char('w') | KeyCode::Up => input = Some(Direction::Up),
                KeyCode::Char('a') | KeyCode::Left => input = Some(Direction::Left),
                KeyCode::Char('s') | KeyCode::Down => input = Some(Direction::Down),
                KeyCode::Char('d') | KeyCode::Right => input = Some(Direction::Right),
                _ => {}
            }
        }

        match game.update(input.take(), Instant::now()) {
            StepResult::Ate => term.chime()?,
            StepResult::Crashed => {
                info!("crashed at score {}", game.score());
                term.chime()?;
            }
            StepResult::Idle | StepResult::Moved => {}
        }

        game.draw(term);
        term.present()?;
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL
        } | KeyEvent {
            code: KeyCode::Esc,
            ..
        } | KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
    )
}
