use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::{Cell, CELL_COUNT};
use Direction::*;

const CADENCE: Duration = Duration::from_millis(500);
const START_HEADING: Direction = Right;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> Cell {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

pub struct Snake {
    body: VecDeque<Cell>,
    heading: Direction,
    last_step: Instant,
    last_tail: Option<Cell>,
}

impl Snake {
    pub fn new(now: Instant) -> Self {
        Snake {
            body: starting_body(),
            heading: START_HEADING,
            last_step: now,
            last_tail: None,
        }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    // Steering applies right away; only movement waits for the cadence.
    pub fn steer(&mut self, new_heading: Direction) {
        match (new_heading, self.heading) {
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right) => {}
            _ => self.heading = new_heading,
        }
    }

    pub fn update(&mut self, input: Option<Direction>, now: Instant) -> bool {
        if let Some(dir) = input {
            self.steer(dir);
        }

        if now.duration_since(self.last_step) >= CADENCE {
            self.last_step = now;
            self.advance();
            true
        } else {
            false
        }
    }

    // Restores the cell the last advance dropped, so an eating step keeps
    // its tail and the body lengthens by one.
    pub fn grow(&mut self) {
        if let Some(tail) = self.last_tail.take() {
            self.body.push_back(tail);
        }
    }

    pub fn is_terminal(&self) -> bool {
        let (hx, hy) = self.head();

        if hx < 0 || hx >= CELL_COUNT || hy < 0 || hy >= CELL_COUNT {
            return true;
        }

        self.body.iter().skip(1).any(|&cell| cell == self.head())
    }

    pub fn reset(&mut self, now: Instant) {
        self.body = starting_body();
        self.heading = START_HEADING;
        self.last_step = now;
        self.last_tail = None;
    }

    ///////////////////////////////////////////////////////////////////////////

    fn advance(&mut self) {
        let (hx, hy) = self.head();
        let (dx, dy) = self.heading.delta();
        self.body.push_front((hx + dx, hy + dy));
        self.last_tail = self.body.pop_back();
    }
}

fn starting_body() -> VecDeque<Cell> {
    [(6, 9), (5, 9), (4, 9)].iter().copied().collect()
}
