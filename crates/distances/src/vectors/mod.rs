//! Distance functions over fixed-dimension real vectors.
//!
//! These are the `Lp`-norms: Manhattan (`p = 1`), Euclidean (`p = 2`), and
//! Chebyshev (`p = infinity`), collectively parameterized by [`MinkowskiOrder`].

mod minkowski;

pub use minkowski::{minkowski, MinkowskiOrder};
