//! The Minkowski family of distances between equal-length real vectors.

use crate::DistanceError;

/// The order `t` of a [`minkowski`] distance.
///
/// `t = 1` is the Manhattan (city-block) distance, `t = 2` is the Euclidean
/// distance, and `t = infinity` is the Chebyshev distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinkowskiOrder {
    /// City-block distance: the sum of absolute differences.
    Manhattan,
    /// Euclidean distance: the square root of the sum of squared differences.
    Euclidean,
    /// Chebyshev distance: the maximum absolute difference.
    Chebyshev,
}

impl MinkowskiOrder {
    /// Returns the name of this order, for diagnostics and CLI display.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Manhattan => "Manhattan",
            Self::Euclidean => "Euclidean",
            Self::Chebyshev => "Chebyshev",
        }
    }
}

/// Computes the Minkowski distance of the given `order` between `x` and `y`.
///
/// # Errors
///
/// Returns [`DistanceError::LengthMismatch`] if `x` and `y` do not have the same length.
///
/// # Examples
///
/// ```
/// use distances::vectors::{minkowski, MinkowskiOrder};
///
/// let x = [0.0, 0.0];
/// let y = [3.0, 4.0];
/// let d = minkowski(MinkowskiOrder::Euclidean, &x, &y).unwrap();
/// assert!((d - 5.0).abs() < 1e-9);
/// ```
pub fn minkowski(order: MinkowskiOrder, x: &[f64], y: &[f64]) -> Result<f64, DistanceError> {
    if x.len() != y.len() {
        return Err(DistanceError::LengthMismatch { a: x.len(), b: y.len() });
    }

    let d = match order {
        MinkowskiOrder::Manhattan => x.iter().zip(y).map(|(a, b)| (a - b).abs()).sum(),
        MinkowskiOrder::Euclidean => x.iter().zip(y).map(|(a, b)| (a - b).powi(2)).sum::<f64>().sqrt(),
        MinkowskiOrder::Chebyshev => x
            .iter()
            .zip(y)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f64, f64::max),
    };

    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan() {
        let d = minkowski(MinkowskiOrder::Manhattan, &[0.0, 0.0], &[3.0, 4.0]).unwrap();
        assert!((d - 7.0).abs() < 1e-9);
    }

    #[test]
    fn euclidean() {
        let d = minkowski(MinkowskiOrder::Euclidean, &[0.0, 0.0], &[3.0, 4.0]).unwrap();
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn chebyshev() {
        let d = minkowski(MinkowskiOrder::Chebyshev, &[0.0, 0.0], &[3.0, 4.0]).unwrap();
        assert!((d - 4.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = minkowski(MinkowskiOrder::Euclidean, &[0.0], &[0.0, 1.0]).unwrap_err();
        assert_eq!(err, DistanceError::LengthMismatch { a: 1, b: 2 });
    }

    #[test]
    fn identity_symmetry_triangle() {
        let x = [1.0, -2.0, 3.5];
        let y = [-4.0, 0.5, 2.0];
        let z = [2.0, 2.0, 2.0];
        for order in [MinkowskiOrder::Manhattan, MinkowskiOrder::Euclidean, MinkowskiOrder::Chebyshev] {
            assert!((minkowski(order, &x, &x).unwrap()).abs() < 1e-12);
            let xy = minkowski(order, &x, &y).unwrap();
            let yx = minkowski(order, &y, &x).unwrap();
            assert!((xy - yx).abs() < 1e-9);
            let xz = minkowski(order, &x, &z).unwrap();
            let zy = minkowski(order, &z, &y).unwrap();
            assert!(xy <= xz + zy + 1e-9);
        }
    }
}
