//! The error kinds that can arise while building or querying an index.

/// Every failure mode the core can surface. Failures are fatal to whichever
/// build or query raised them; the core never swallows or retries an error,
/// it propagates it to the caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An object's class did not match what the distance function requires
    /// (e.g. a string object fed to a vector-only distance).
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A domain precondition of the distance function was violated: unequal
    /// lengths for Hamming, a missing weighted-edit score-table entry, or
    /// another invalid parameter.
    #[error("domain error: {0}")]
    Domain(String),

    /// A [`crate::PivotTable`] was asked to store more points than its
    /// configured `max_leaf_size` allows.
    #[error("oversized leaf: {actual} items exceeds max_leaf_size {max}")]
    OversizedLeaf {
        /// Number of points the leaf would have had to store.
        actual: usize,
        /// The configured maximum.
        max: usize,
    },

    /// Incremental sampling exhausted its candidate pool before selecting
    /// the requested number of pivots.
    #[error("insufficient candidates: selected {selected} of {requested} pivots")]
    InsufficientCandidates {
        /// How many pivots were actually selected.
        selected: usize,
        /// How many were requested.
        requested: usize,
    },

    /// A configuration file named an unknown dataset, distance, selector, or
    /// index, or was otherwise malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A dataset file was missing, unreadable, or corrupt.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<distances::DistanceError> for Error {
    fn from(e: distances::DistanceError) -> Self {
        // Both of `DistanceError`'s variants are domain-precondition
        // failures of a specific distance function, not type mismatches.
        Self::Domain(e.to_string())
    }
}
