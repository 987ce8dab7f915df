//! Farthest-First Traversal pivot selection.

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{all_as_pivots, PivotSelector};
use crate::{Distance, Error, Object};

/// Selects pivots by Farthest-First Traversal: seed with one uniformly
/// random point, then repeatedly add the remaining point that maximizes its
/// minimum distance to the pivots chosen so far. Ties are broken by first
/// occurrence. Costs `O(k * |data|)` distance evaluations.
pub struct Fft {
    rng: StdRng,
}

impl Fft {
    /// Builds a selector seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl PivotSelector for Fft {
    fn select(&mut self, data: &[usize], objects: &[Object], distance: &dyn Distance, k: usize) -> Result<(Vec<usize>, Vec<usize>), Error> {
        if data.is_empty() || k >= data.len() {
            return Ok(all_as_pivots(data));
        }

        let mut remaining = data.to_vec();
        let seed_pos = self.rng.gen_range(0..remaining.len());
        let mut pivots = vec![remaining.remove(seed_pos)];

        while pivots.len() < k {
            let mut best_pos = 0;
            let mut best_dist = -1.0_f64;
            for (pos, &x) in remaining.iter().enumerate() {
                let mut closest = f64::INFINITY;
                for &p in &pivots {
                    let d = distance.eval(&objects[p], &objects[x])?;
                    if d < closest {
                        closest = d;
                    }
                }
                if closest > best_dist {
                    best_dist = closest;
                    best_pos = pos;
                }
            }
            pivots.push(remaining.remove(best_pos));
        }

        Ok((pivots, remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use distances::vectors::MinkowskiOrder;

    #[test]
    fn selects_distinct_pivots() {
        let data: Vec<usize> = (0..10).collect();
        let objects: Vec<Object> = (0..10).map(|i| Object::Vector(vec![f64::from(i)])).collect();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };

        let mut sel = Fft::new(3);
        let (pivots, remainder) = sel.select(&data, &objects, &distance, 4).unwrap();
        assert_eq!(pivots.len(), 4);
        assert_eq!(pivots.len() + remainder.len(), data.len());

        let mut seen = std::collections::HashSet::new();
        assert!(pivots.iter().all(|p| seen.insert(*p)));
    }
}
