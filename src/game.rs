use std::time::Instant;

use crossterm::style::Color;
use rand::rngs::StdRng;
use rand::Rng;

use crate::food::Food;
use crate::snake::{Direction, Snake};
use crate::term::TermManager;
use crate::{Cell, Coords, CELL_COUNT};

// Board placement on the screen, in character cells. The playing field
// starts at (BOARD_X, BOARD_Y) with the bordering frame one cell outside.
const BOARD_X: u16 = 2;
const BOARD_Y: u16 = 2;

pub const MIN_TERM_WIDTH: u16 = BOARD_X + CELL_COUNT as u16 + 1;
pub const MIN_TERM_HEIGHT: u16 = BOARD_Y + CELL_COUNT as u16 + 2;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

const BOARD_COLOR: Color = Color::DarkGreen;
const SNAKE_COLOR: Color = Color::DarkGreen;
const HEAD_COLOR: Color = Color::Yellow;
const FOOD_COLOR: Color = Color::Red;
const DEAD_COLOR: Color = Color::Red;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GameState {
    Running,
    GameOver,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepResult {
    Idle,
    Moved,
    Ate,
    Crashed,
}

pub struct SnakeGame<R = StdRng> {
    snake: Snake,
    food: Food<R>,
    score: u32,
    state: GameState,
}

impl SnakeGame<StdRng> {
    pub fn new(now: Instant) -> Self {
        SnakeGame::from_parts(Snake::new(now), Food::new())
    }
}

impl<R: Rng> SnakeGame<R> {
    pub fn with_rng(rng: R, now: Instant) -> SnakeGame<R> {
        SnakeGame::from_parts(Snake::new(now), Food::with_rng(rng))
    }

    pub fn update(&mut self, input: Option<Direction>, now: Instant) -> StepResult {
        if self.state == GameState::GameOver {
            return StepResult::Idle;
        }

        if !self.snake.update(input, now) {
            return StepResult::Idle;
        }

        let mut result = StepResult::Moved;

        if self.food.position() == self.snake.head() {
            self.score += 1;
            self.snake.grow();
            self.food.relocate();
            result = StepResult::Ate;
        }

        self.food.resolve_overlap(self.snake.body());

        if self.snake.is_terminal() {
            self.state = GameState::GameOver;
            result = StepResult::Crashed;
        }

        result
    }

    // Food stays where it is across rounds.
    pub fn restart(&mut self, now: Instant) {
        self.score = 0;
        self.snake.reset(now);
        self.state = GameState::Running;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn draw(&self, term: &mut TermManager) {
        term.begin_frame();

        term.print_line((BOARD_X - 1, 0), "Snake", BOARD_COLOR);
        term.draw_box(
            (BOARD_X - 1, BOARD_Y - 1),
            (CELL_COUNT as u16 + 2, CELL_COUNT as u16 + 2),
            BOARD_COLOR,
        );

        if let Some(pos) = cell_to_screen(self.food.position()) {
            term.print_colored(pos, FOOD_CHAR, FOOD_COLOR);
        }

        let dead = self.state == GameState::GameOver;

        // Tail first, so the head ends up on top of whatever it hit
        for (i, &cell) in self.snake.body().iter().enumerate().rev() {
            let pos = match cell_to_screen(cell) {
                Some(pos) => pos,
                None => continue,
            };

            if dead {
                term.print_colored(pos, DEAD_SNAKE_CHAR, DEAD_COLOR);
            } else if i == 0 {
                term.print_colored(pos, self.head_char(), HEAD_COLOR);
            } else {
                term.print_colored(pos, SNAKE_BODY_CHAR, SNAKE_COLOR);
            }
        }

        let score_row = BOARD_Y + CELL_COUNT as u16 + 1;
        term.print_line((BOARD_X - 1, score_row), &self.score.to_string(), BOARD_COLOR);

        if dead {
            self.draw_game_over(term);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn from_parts(snake: Snake, mut food: Food<R>) -> SnakeGame<R> {
        // The first placement may land on the starting body
        food.resolve_overlap(snake.body());

        SnakeGame {
            snake,
            food,
            score: 0,
            state: GameState::Running,
        }
    }

    fn head_char(&self) -> char {
        match self.snake.heading() {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }

    fn draw_game_over(&self, term: &mut TermManager) {
        let score_line = format!("Score: {}", self.score);
        let lines = ["Game over!", &score_line, "", "Press any key to replay"];

        let msg_width = lines.iter().map(|line| line.len()).max().unwrap_or(0) as u16 + 2;
        let msg_height = lines.len() as u16 + 2;
        let center = (
            BOARD_X + CELL_COUNT as u16 / 2,
            BOARD_Y + CELL_COUNT as u16 / 2,
        );
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);

        for y in 0..msg_height {
            for x in 0..msg_width {
                term.print_at((top_left.0 + x, top_left.1 + y), ' ');
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", line = line, width = msg_width as usize);
            term.print_line((top_left.0, top_left.1 + 1 + i as u16), &padded, BOARD_COLOR);
        }
    }
}

fn cell_to_screen(cell: Cell) -> Option<Coords> {
    if cell.0 < 0 || cell.0 >= CELL_COUNT || cell.1 < 0 || cell.1 >= CELL_COUNT {
        return None;
    }

    Some((BOARD_X + cell.0 as u16, BOARD_Y + cell.1 as u16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use std::time::Duration;

    const STEP: Duration = Duration::from_millis(600);

    fn new_game(seed: u64) -> (SnakeGame, Instant) {
        let t0 = Instant::now();
        (SnakeGame::with_rng(StdRng::seed_from_u64(seed), t0), t0)
    }

    fn body_vec(game: &SnakeGame) -> Vec<Cell> {
        game.snake.body().iter().copied().collect()
    }

    fn on_grid(cell: Cell) -> bool {
        cell.0 >= 0 && cell.0 < CELL_COUNT && cell.1 >= 0 && cell.1 < CELL_COUNT
    }

    #[test]
    fn one_cadence_tick_advances_the_body() {
        let (mut game, t0) = new_game(1);
        game.food.place_at((0, 0));

        assert_eq!(game.update(None, t0 + STEP), StepResult::Moved);
        assert_eq!(body_vec(&game), vec![(7, 9), (6, 9), (5, 9)]);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn reversing_input_is_ignored() {
        let (mut game, t0) = new_game(1);
        game.food.place_at((0, 0));

        game.update(Some(Direction::Left), t0 + STEP);
        assert_eq!(body_vec(&game), vec![(7, 9), (6, 9), (5, 9)]);
    }

    #[test]
    fn eating_scores_grows_and_relocates_the_food() {
        let (mut game, t0) = new_game(2);
        game.food.place_at((7, 9));

        assert_eq!(game.update(None, t0 + STEP), StepResult::Ate);
        assert_eq!(game.score(), 1);
        assert_eq!(body_vec(&game), vec![(7, 9), (6, 9), (5, 9), (4, 9)]);

        let food = game.food.position();
        assert!(on_grid(food));
        assert!(!game.snake.body().contains(&food));
    }

    #[test]
    fn crashing_into_the_wall_ends_the_round() {
        let (mut game, t0) = new_game(3);
        game.food.place_at((7, 9));

        // Eat on the first step, then run straight into the right wall
        assert_eq!(game.update(None, t0 + STEP), StepResult::Ate);
        game.food.place_at((0, 0));

        let mut last = StepResult::Idle;
        for i in 2..=19u32 {
            last = game.update(None, t0 + STEP * i);
        }

        assert_eq!(last, StepResult::Crashed);
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.snake.head(), (25, 9));
        assert_eq!(game.score(), 1);
        assert_eq!(game.food.position(), (0, 0));

        // The simulation stands still until a restart
        assert_eq!(game.update(None, t0 + STEP * 20), StepResult::Idle);
        assert_eq!(game.snake.head(), (25, 9));
    }

    #[test]
    fn restart_resets_score_and_snake_but_not_food() {
        let (mut game, t0) = new_game(4);
        game.food.place_at((7, 9));
        game.update(None, t0 + STEP);
        game.food.place_at((12, 12));

        for i in 2..=19u32 {
            game.update(None, t0 + STEP * i);
        }
        assert_eq!(game.state(), GameState::GameOver);

        game.restart(t0 + STEP * 20);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(body_vec(&game), vec![(6, 9), (5, 9), (4, 9)]);
        assert_eq!(game.food.position(), (12, 12));

        assert_eq!(game.update(None, t0 + STEP * 21), StepResult::Moved);
        assert_eq!(game.snake.head(), (7, 9));
    }

    #[test]
    fn food_never_starts_on_the_body() {
        for seed in 0..50 {
            let (game, _) = new_game(seed);
            assert!(!game.snake.body().contains(&game.food.position()));
        }
    }
}
