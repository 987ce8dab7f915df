//! Objective functions for [`super::IncrementalSampling`].
//!
//! An objective function scores a candidate pivot set against an evaluation
//! set: larger is better. Incremental sampling calls `evaluate` once per
//! candidate per round, so its cost dominates the build time of that
//! selector.

use crate::{Distance, Error, Object};

/// Scores a pivot set against an evaluation set. Larger scores are better.
pub trait ObjectiveFunction {
    /// Projects every point in `eval_set` into pivot space (the vector of its
    /// distances to each pivot in `pivot_set`) and returns a scalar score.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if evaluating `distance` on a pair fails.
    fn evaluate(&self, eval_set: &[usize], objects: &[Object], distance: &dyn Distance, pivot_set: &[usize]) -> Result<f64, Error>;
}

/// Projects every point in `eval_set` to the vector of its distances to each
/// pivot in `pivot_set`.
fn project(eval_set: &[usize], objects: &[Object], distance: &dyn Distance, pivot_set: &[usize]) -> Result<Vec<Vec<f64>>, Error> {
    eval_set
        .iter()
        .map(|&x| pivot_set.iter().map(|&p| distance.eval(&objects[x], &objects[p])).collect::<Result<Vec<_>, _>>())
        .collect()
}

/// The Chebyshev (L-infinity) distance between two equal-length projections.
fn chebyshev(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0_f64, f64::max)
}

/// The Euclidean distance between two equal-length projections.
fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt()
}

/// Counts pairs of evaluation points whose Chebyshev distance in pivot space
/// is at least `radius`. A pivot set that spreads the evaluation set apart
/// (few pairs collapse together) scores higher.
#[derive(Debug, Clone, Copy)]
pub struct RadiusSensitive {
    /// The Chebyshev-distance threshold `r`.
    pub radius: f64,
}

impl ObjectiveFunction for RadiusSensitive {
    fn evaluate(&self, eval_set: &[usize], objects: &[Object], distance: &dyn Distance, pivot_set: &[usize]) -> Result<f64, Error> {
        if pivot_set.is_empty() {
            return Ok(0.0);
        }
        let projections = project(eval_set, objects, distance, pivot_set)?;
        let mut count = 0_u64;
        for i in 0..projections.len() {
            for j in (i + 1)..projections.len() {
                if chebyshev(&projections[i], &projections[j]) >= self.radius {
                    count += 1;
                }
            }
        }
        #[allow(clippy::cast_precision_loss)]
        Ok(count as f64)
    }
}

/// The sample variance of the pairwise Euclidean distances between
/// evaluation points in pivot space, scaled by `weight`.
#[derive(Debug, Clone, Copy)]
pub struct Variance {
    /// The scale applied to the raw sample variance.
    pub weight: f64,
}

impl ObjectiveFunction for Variance {
    fn evaluate(&self, eval_set: &[usize], objects: &[Object], distance: &dyn Distance, pivot_set: &[usize]) -> Result<f64, Error> {
        if pivot_set.is_empty() {
            return Ok(0.0);
        }
        let projections = project(eval_set, objects, distance, pivot_set)?;
        let mut pairs = Vec::new();
        for i in 0..projections.len() {
            for j in (i + 1)..projections.len() {
                pairs.push(euclidean(&projections[i], &projections[j]));
            }
        }
        Ok(super::util::sample_variance(&pairs) * self.weight)
    }
}

/// The mean of the pairwise Chebyshev distances between evaluation points in
/// pivot space (sum of pair distances divided by `|eval_set|`, matching the
/// reference implementation rather than the pair count).
#[derive(Debug, Clone, Copy)]
pub struct MaximumMean;

impl ObjectiveFunction for MaximumMean {
    fn evaluate(&self, eval_set: &[usize], objects: &[Object], distance: &dyn Distance, pivot_set: &[usize]) -> Result<f64, Error> {
        if pivot_set.is_empty() || eval_set.is_empty() {
            return Ok(0.0);
        }
        let projections = project(eval_set, objects, distance, pivot_set)?;
        let mut total = 0.0_f64;
        for i in 0..projections.len() {
            for j in (i + 1)..projections.len() {
                total += chebyshev(&projections[i], &projections[j]);
            }
        }
        #[allow(clippy::cast_precision_loss)]
        Ok(total / eval_set.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use distances::vectors::MinkowskiOrder;

    fn objects() -> Vec<Object> {
        (0..6).map(|i| Object::Vector(vec![f64::from(i)])).collect()
    }

    #[test]
    fn radius_sensitive_counts_spread_pairs() {
        let objects = objects();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };
        let eval_set: Vec<usize> = (0..6).collect();
        let f = RadiusSensitive { radius: 2.0 };
        let score_one_pivot = f.evaluate(&eval_set, &objects, &distance, &[0]).unwrap();
        assert!(score_one_pivot > 0.0);
    }

    #[test]
    fn variance_needs_two_pairs() {
        let objects = objects();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };
        let f = Variance { weight: 1.0 };
        assert_eq!(f.evaluate(&[0], &objects, &distance, &[1]).unwrap(), 0.0);
        let score = f.evaluate(&[0, 1, 2], &objects, &distance, &[3]).unwrap();
        assert!(score >= 0.0);
    }

    #[test]
    fn empty_pivot_set_scores_zero() {
        let objects = objects();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };
        let eval_set: Vec<usize> = (0..6).collect();
        assert_eq!(RadiusSensitive { radius: 1.0 }.evaluate(&eval_set, &objects, &distance, &[]).unwrap(), 0.0);
        assert_eq!(Variance { weight: 1.0 }.evaluate(&eval_set, &objects, &distance, &[]).unwrap(), 0.0);
        assert_eq!(MaximumMean.evaluate(&eval_set, &objects, &distance, &[]).unwrap(), 0.0);
    }
}
