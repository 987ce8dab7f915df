//! The Hamming distance between two equal-length strings.

use crate::DistanceError;

/// Computes the Hamming distance between `x` and `y`: the number of positions
/// at which the two strings have different characters.
///
/// # Errors
///
/// Returns [`DistanceError::LengthMismatch`] if `x` and `y` do not have the same
/// number of characters. Hamming distance is only a metric on equal-length
/// inputs; unequal lengths are a caller error, not a silently-coerced distance.
///
/// # Examples
///
/// ```
/// use distances::strings::hamming;
///
/// let d = hamming("karolin", "kathrin").unwrap();
/// assert_eq!(d, 3);
/// ```
pub fn hamming(x: &str, y: &str) -> Result<u32, DistanceError> {
    let xs: Vec<char> = x.chars().collect();
    let ys: Vec<char> = y.chars().collect();

    if xs.len() != ys.len() {
        return Err(DistanceError::LengthMismatch { a: xs.len(), b: ys.len() });
    }

    Ok(xs.iter().zip(ys.iter()).filter(|(a, b)| a != b).count() as u32)
}
