use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Cell, CELL_COUNT};

// One piece of food on the grid. The generator lives here rather than in
// process-global state, so tests can seed it.
pub struct Food<R = StdRng> {
    position: Cell,
    rng: R,
}

impl Food<StdRng> {
    pub fn new() -> Self {
        Food::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> Food<R> {
    pub fn with_rng(mut rng: R) -> Food<R> {
        let position = random_cell(&mut rng);
        Food { position, rng }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn relocate(&mut self) {
        self.position = random_cell(&mut self.rng);
    }

    pub fn overlaps(&self, body: &VecDeque<Cell>) -> bool {
        body.contains(&self.position)
    }

    // Rejection sampling; the grid dwarfs any reachable body, so this
    // settles almost immediately.
    pub fn resolve_overlap(&mut self, body: &VecDeque<Cell>) {
        while self.overlaps(body) {
            self.relocate();
        }
    }

    #[cfg(test)]
    pub(crate) fn place_at(&mut self, cell: Cell) {
        self.position = cell;
    }
}

fn random_cell<R: Rng>(rng: &mut R) -> Cell {
    (rng.gen_range(0..CELL_COUNT), rng.gen_range(0..CELL_COUNT))
}
