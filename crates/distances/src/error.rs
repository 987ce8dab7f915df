//! Errors that can arise while computing a distance.

/// An error raised by one of the functions in [`crate::vectors`] or [`crate::strings`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DistanceError {
    /// The two inputs did not have the same length, but the distance function requires it.
    #[error("inputs have mismatched lengths: {a} and {b}")]
    LengthMismatch {
        /// Length of the first input.
        a: usize,
        /// Length of the second input.
        b: usize,
    },

    /// A weighted-edit score table was missing an entry needed to score a pair of symbols.
    #[error("score table is missing an entry for the pair ({0:?}, {1:?})")]
    MissingScore(char, char),
}
