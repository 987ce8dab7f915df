//! Incremental-sampling pivot selection, driven by a pluggable objective.

use super::{ObjectiveFunction, PivotSelector};
use crate::{Distance, Error, Object};

/// Selects pivots by incremental sampling: draw a candidate pool and an
/// evaluation set via two inner selectors, then greedily grow the pivot set
/// one point at a time, always appending the candidate that maximizes
/// `objective` against the evaluation set.
pub struct IncrementalSampling {
    candidate_size: usize,
    evaluation_size: usize,
    candidate_selector: Box<dyn PivotSelector>,
    evaluation_selector: Box<dyn PivotSelector>,
    objective: Box<dyn ObjectiveFunction>,
}

impl IncrementalSampling {
    /// Builds an incremental-sampling selector.
    ///
    /// - `candidate_size`/`evaluation_size`: sizes of the candidate pool and
    ///   evaluation set drawn from the input data before each `select` call.
    /// - `candidate_selector`/`evaluation_selector`: inner selectors used to
    ///   draw those two sets.
    /// - `objective`: scores a trial pivot set against the evaluation set.
    #[must_use]
    pub fn new(
        candidate_size: usize,
        evaluation_size: usize,
        candidate_selector: Box<dyn PivotSelector>,
        evaluation_selector: Box<dyn PivotSelector>,
        objective: Box<dyn ObjectiveFunction>,
    ) -> Self {
        Self {
            candidate_size,
            evaluation_size,
            candidate_selector,
            evaluation_selector,
            objective,
        }
    }
}

impl PivotSelector for IncrementalSampling {
    fn select(&mut self, data: &[usize], objects: &[Object], distance: &dyn Distance, k: usize) -> Result<(Vec<usize>, Vec<usize>), Error> {
        if data.is_empty() || k >= data.len() {
            return Ok(super::all_as_pivots(data));
        }

        let candidate_size = self.candidate_size.min(data.len());
        let (candidates, _) = self.candidate_selector.select(data, objects, distance, candidate_size)?;

        let evaluation_size = self.evaluation_size.min(data.len());
        let (eval_set, _) = self.evaluation_selector.select(data, objects, distance, evaluation_size)?;

        let mut pivots: Vec<usize> = Vec::with_capacity(k);
        for _ in 0..k {
            let mut best: Option<(usize, f64)> = None;
            for &c in &candidates {
                if pivots.contains(&c) {
                    continue;
                }
                let mut trial = pivots.clone();
                trial.push(c);
                let score = self.objective.evaluate(&eval_set, objects, distance, &trial)?;
                let improves = match best {
                    Some((_, best_score)) => score > best_score,
                    None => true,
                };
                if improves {
                    best = Some((c, score));
                }
            }
            match best {
                Some((c, _)) => pivots.push(c),
                None => {
                    ftlog::warn!("incremental sampling exhausted candidates after selecting {} of {k} pivots", pivots.len());
                    break;
                }
            }
        }

        if pivots.len() < k {
            return Err(Error::InsufficientCandidates { selected: pivots.len(), requested: k });
        }

        let remainder = data.iter().copied().filter(|i| !pivots.contains(i)).collect();
        Ok((pivots, remainder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::{RadiusSensitive, Random};
    use distances::vectors::MinkowskiOrder;

    #[test]
    fn selects_exactly_k_pivots_when_candidates_suffice() {
        let data: Vec<usize> = (0..20).collect();
        let objects: Vec<Object> = (0..20).map(|i| Object::Vector(vec![f64::from(i)])).collect();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };

        let mut selector = IncrementalSampling::new(
            10,
            15,
            Box::new(Random::new(1)),
            Box::new(Random::new(2)),
            Box::new(RadiusSensitive { radius: 2.0 }),
        );
        let (pivots, remainder) = selector.select(&data, &objects, &distance, 4).unwrap();
        assert_eq!(pivots.len(), 4);
        assert_eq!(pivots.len() + remainder.len(), data.len());
        let mut seen = std::collections::HashSet::new();
        assert!(pivots.iter().all(|p| seen.insert(*p)));
    }

    #[test]
    fn insufficient_candidates_fails() {
        let data: Vec<usize> = (0..5).collect();
        let objects: Vec<Object> = (0..5).map(|i| Object::Vector(vec![f64::from(i)])).collect();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };

        // A candidate pool smaller than k forces `InsufficientCandidates`.
        let mut selector = IncrementalSampling::new(
            2,
            5,
            Box::new(Random::new(1)),
            Box::new(Random::new(2)),
            Box::new(RadiusSensitive { radius: 0.5 }),
        );
        let err = selector.select(&data, &objects, &distance, 4).unwrap_err();
        assert!(matches!(err, Error::InsufficientCandidates { .. }));
    }
}
