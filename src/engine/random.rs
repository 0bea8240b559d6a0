use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Board, Move};

use super::{playable, MoveSelector};

/// Plays a uniformly random legal move.
///
/// The generator is reseeded from the engine seed and the position key on
/// every call, so a given seed always answers a position the same way.
#[derive(Clone, Copy, Debug)]
pub struct RandomEngine {
    seed: u64,
}

impl RandomEngine {
    pub const DEFAULT_SEED: u64 = 0x0057_0E5F_15B0_0001;

    pub fn new(seed: u64) -> Self {
        RandomEngine { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        RandomEngine::new(Self::DEFAULT_SEED)
    }
}

impl MoveSelector for RandomEngine {
    fn id(&self) -> &str {
        "random"
    }

    fn name(&self) -> &str {
        "Stonefish Random"
    }

    fn description(&self) -> &str {
        "Uniformly random legal move"
    }

    fn select_move(&self, position: &Board) -> Option<Move> {
        if !playable(self.id(), position) {
            return None;
        }
        let legal = position.legal_moves();
        let mut rng = StdRng::seed_from_u64(self.seed ^ position.hash());
        let mv = legal.as_slice().choose(&mut rng).copied();
        log::debug!("{}: chose {mv:?}", self.id());
        mv
    }
}
