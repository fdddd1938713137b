use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Position;

/// Random source behind mine placement.
pub trait MineSampler {
    /// Picks `amount` distinct positions out of `candidates`.
    fn sample(&mut self, candidates: &[Position], amount: usize) -> Vec<Position>;
}

/// Uniform sampling driven by a seeded `SmallRng`, the same seed always yields the same layout.
#[derive(Clone, Debug)]
pub struct SeededSampler {
    rng: SmallRng,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seed for the next game in a lineage of boards.
    pub fn next_seed(seed: u64) -> u64 {
        SmallRng::seed_from_u64(seed).random()
    }
}

impl MineSampler for SeededSampler {
    fn sample(&mut self, candidates: &[Position], amount: usize) -> Vec<Position> {
        let amount = if amount > candidates.len() {
            log::warn!(
                "Requested {} mines but only {} candidate cells, filling all of them",
                amount,
                candidates.len()
            );
            candidates.len()
        } else {
            amount
        };

        rand::seq::index::sample(&mut self.rng, candidates.len(), amount)
            .into_iter()
            .map(|index| candidates[index])
            .collect()
    }
}

/// Always hands out the same positions, skipping ones that are not candidates.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedSampler {
    mines: Vec<Position>,
}

impl FixedSampler {
    pub fn new(mines: impl Into<Vec<Position>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineSampler for FixedSampler {
    fn sample(&mut self, candidates: &[Position], amount: usize) -> Vec<Position> {
        self.mines
            .iter()
            .copied()
            .filter(|position| candidates.contains(position))
            .take(amount)
            .collect()
    }
}
