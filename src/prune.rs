//! Stochastic edge pruning for memory-bounded approximate analysis.
//!
//! [`RandomPruning`] is a [`SubsetRule`] that kills each evaluated edge with
//! probability `p`, thinning a family to a random sub-family. Pruning is
//! edge-local: the same element reached along different diagram paths draws
//! independently, so the surviving family is not a product measure over
//! elements.
//!
//! Intended for bootstrap-style workflows: run many independent pruned
//! constructions with fresh seeds and aggregate the per-run statistics.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::reference::ZddId;
use crate::rule::{Step, SubsetRule};
use crate::zdd::ZddManager;

/// Edge-pruning policy with a single owned draw stream.
///
/// The stream advances exactly once per product edge the subset driver
/// evaluates. Reproducibility therefore needs both a fixed seed and the
/// driver's fixed single-threaded traversal order; a policy instance must
/// not be shared across concurrent traversals.
pub struct RandomPruning {
    n: u32,
    prob: f64,
    rng: ChaCha8Rng,
}

impl RandomPruning {
    /// Policy over a universe of `n` elements, seeded from the clock.
    ///
    /// # Panics
    ///
    /// Panics if `prob` is outside `[0, 1]`.
    pub fn new(n: u32, prob: f64) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        Self::with_seed(n, prob, seed)
    }

    /// Policy with an explicit seed, for reproducible runs.
    ///
    /// # Panics
    ///
    /// Panics if `prob` is outside `[0, 1]`.
    pub fn with_seed(n: u32, prob: f64, seed: u64) -> Self {
        assert!(
            (0.0..=1.0).contains(&prob),
            "pruning probability must be in [0, 1], got {}",
            prob
        );
        log::debug!("random pruning: n={}, prob={}, seed={}", n, prob, seed);
        Self {
            n,
            prob,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Estimated probability that a fixed member survives at least one of
    /// `sim` independent pruned constructions, assuming survival of one run
    /// requires all `n` of its path edges to escape pruning.
    ///
    /// A reporting aid for repeated-sampling workflows; it does not affect
    /// the pruning itself.
    pub fn survival_bound(&self, sim: u32) -> f64 {
        1.0 - (1.0 - (1.0 - self.prob).powi(self.n as i32)).powi(sim as i32)
    }
}

impl SubsetRule for RandomPruning {
    fn root(&mut self) -> u32 {
        self.n
    }

    fn child(&mut self, level: u32, _take: bool) -> Step {
        // One fresh draw per edge, skip and take alike
        if self.rng.random::<f64>() < self.prob {
            return Step::Prune;
        }
        if level <= 1 {
            Step::Accept
        } else {
            Step::Descend(level - 1)
        }
    }
}

impl ZddManager {
    /// Randomly thins `f`, killing each evaluated edge with probability
    /// `prob`. `seed` fixes the draw stream; `None` seeds from the clock.
    ///
    /// The result is always a valid (possibly empty) diagram.
    pub fn prune(&self, f: ZddId, prob: f64, seed: Option<u64>) -> ZddId {
        let n = self.num_vars() as u32;
        let mut policy = match seed {
            Some(seed) => RandomPruning::with_seed(n, prob, seed),
            None => RandomPruning::new(n, prob),
        };
        self.subset(f, &mut policy)
    }
}
