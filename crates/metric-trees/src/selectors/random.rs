//! Uniform random pivot selection, without replacement.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::{all_as_pivots, PivotSelector};
use crate::{Distance, Error, Object};

/// Selects pivots by a seeded uniform sample without replacement.
///
/// Two `Random` selectors built with the same seed and run against the same
/// data produce identical output: the shuffle is a deterministic function of
/// the seed and the input order.
pub struct Random {
    rng: StdRng,
}

impl Random {
    /// Builds a selector seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl PivotSelector for Random {
    fn select(&mut self, data: &[usize], _objects: &[Object], _distance: &dyn Distance, k: usize) -> Result<(Vec<usize>, Vec<usize>), Error> {
        if k >= data.len() {
            return Ok(all_as_pivots(data));
        }

        let mut order: Vec<usize> = (0..data.len()).collect();
        order.shuffle(&mut self.rng);

        let (chosen, rest) = order.split_at(k);
        let pivots = chosen.iter().map(|&i| data[i]).collect();
        let remainder = rest.iter().map(|&i| data[i]).collect();
        Ok((pivots, remainder))
    }
}
