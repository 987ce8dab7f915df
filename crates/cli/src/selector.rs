//! Builds a boxed [`metric_trees::selectors::PivotSelector`] from a
//! [`crate::config::SelectorConfig`].

use metric_trees::selectors::{Fft, IncrementalSampling, MaxVariance, MaximumMean, ObjectiveFunction, PivotSelector, RadiusSensitive, Random, Variance};
use metric_trees::{Distance, Error, Object};

use crate::config::{InnerSelectorName, ObjectiveFunctionName, SelectorConfig};
use crate::error::CliError;

/// Pivots given explicitly as dataset row indices, per spec.md §6's
/// `"Manual"` selector name. Not one of the four selectors spec.md §4.1
/// describes in the core library; this is a thin CLI-level convenience
/// implemented directly against the library's [`PivotSelector`] trait.
struct Manual {
    pivots: Vec<usize>,
}

impl PivotSelector for Manual {
    fn select(&mut self, data: &[usize], _objects: &[Object], _distance: &dyn Distance, k: usize) -> Result<(Vec<usize>, Vec<usize>), Error> {
        let data_set: std::collections::HashSet<usize> = data.iter().copied().collect();
        let pivots: Vec<usize> = self.pivots.iter().copied().filter(|p| data_set.contains(p)).take(k).collect();
        let pivot_set: std::collections::HashSet<usize> = pivots.iter().copied().collect();
        let remainder = data.iter().copied().filter(|x| !pivot_set.contains(x)).collect();
        Ok((pivots, remainder))
    }
}

fn inner_selector(name: InnerSelectorName, seed: u64) -> Box<dyn PivotSelector> {
    match name {
        InnerSelectorName::Random => Box::new(Random::new(seed)),
        InnerSelectorName::MaxVariance => Box::new(MaxVariance::new(seed)),
        InnerSelectorName::Fft => Box::new(Fft::new(seed)),
    }
}

fn objective(name: ObjectiveFunctionName, radius_threshold: Option<f64>, variance_weight: Option<f64>) -> Result<Box<dyn ObjectiveFunction>, CliError> {
    match name {
        ObjectiveFunctionName::RadiusSensitive => {
            let radius = radius_threshold.ok_or_else(|| CliError::Config("Radius-Sensitive objective requires radius_threshold".to_string()))?;
            Ok(Box::new(RadiusSensitive { radius }))
        }
        ObjectiveFunctionName::Variance => Ok(Box::new(Variance { weight: variance_weight.unwrap_or(1.0) })),
        ObjectiveFunctionName::MaximumMean => Ok(Box::new(MaximumMean)),
    }
}

/// Builds the selector named by `config`.
///
/// # Errors
///
/// Returns [`CliError::Config`] if an `Incremental Sampling` configuration
/// is missing a parameter its chosen objective function requires.
pub fn build(config: &SelectorConfig) -> Result<Box<dyn PivotSelector>, CliError> {
    match config {
        SelectorConfig::Manual { pivots } => Ok(Box::new(Manual { pivots: pivots.clone() })),
        SelectorConfig::Random { seed } => Ok(Box::new(Random::new(*seed))),
        SelectorConfig::MaxVariance { seed } => Ok(Box::new(MaxVariance::new(*seed))),
        SelectorConfig::Fft { seed } => Ok(Box::new(Fft::new(*seed))),
        SelectorConfig::IncrementalSampling {
            candidate_size,
            evaluation_size,
            objective_function,
            radius_threshold,
            variance_weight,
            candidate_selector,
            evaluation_selector,
            seed,
        } => {
            let candidate = inner_selector(*candidate_selector, *seed);
            let evaluation = inner_selector(*evaluation_selector, seed.wrapping_add(1));
            let obj = objective(*objective_function, *radius_threshold, *variance_weight)?;
            Ok(Box::new(IncrementalSampling::new(*candidate_size, *evaluation_size, candidate, evaluation, obj)))
        }
    }
}
