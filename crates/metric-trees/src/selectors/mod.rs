//! Pivot-selection strategies.
//!
//! Every selector chooses `k` pivots from a point set (given as dataset
//! indices, so callers and the incremental sampler can identify candidates
//! across passes) and returns the complement as the remainder. When `k`
//! meets or exceeds the size of the input, the entire input is returned as
//! pivots with an empty remainder.

mod fft;
mod incremental;
mod max_variance;
mod objective;
mod random;
mod util;

pub use fft::Fft;
pub use incremental::IncrementalSampling;
pub use max_variance::MaxVariance;
pub use objective::{MaximumMean, ObjectiveFunction, RadiusSensitive, Variance};
pub use random::Random;

use crate::{Distance, Error, Object};

/// Chooses a set of pivots from a slice of dataset indices.
pub trait PivotSelector {
    /// Selects `min(k, data.len())` distinct pivots from `data` and returns
    /// `(pivots, remainder)`, a partition of `data`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if evaluating `distance` on a candidate pair
    /// fails, or (for [`IncrementalSampling`]) if fewer than `k` pivots could
    /// be selected.
    fn select(
        &mut self,
        data: &[usize],
        objects: &[Object],
        distance: &dyn Distance,
        k: usize,
    ) -> Result<(Vec<usize>, Vec<usize>), Error>;
}

/// Returns the entire `data` slice as pivots with an empty remainder, the
/// shared edge case every selector exhibits when `k >= data.len()`.
fn all_as_pivots(data: &[usize]) -> (Vec<usize>, Vec<usize>) {
    (data.to_vec(), Vec::new())
}
