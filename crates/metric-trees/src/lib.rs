//! Pivot-based metric-space index structures and range search.
//!
//! This crate builds in-memory indexes over a finite set of objects drawn
//! from an arbitrary metric space and answers range queries — "every object
//! within radius `r` of a query point" — while minimizing the number of
//! times the distance function is evaluated. Distance calls are assumed to
//! dominate the cost of a query; every index trades memory and geometry
//! bookkeeping for pruning power.
//!
//! ## Index families
//!
//! - [`pivot_table::PivotTable`]: a flat leaf structure caching
//!   object-to-pivot distances.
//! - [`tree::vpt`]: the Vantage Point Tree, a single-pivot median split.
//! - [`tree::ght`]: the General Hyper-plane Tree, a two-pivot split.
//! - [`tree::mvpt`]: the Multiple Vantage Point Tree, an equi-depth split
//!   under several pivots at once.
//! - [`tree::lpt`]: the Linear Partition Tree, which generalizes MVPT to
//!   equi-depth splits under integer-weighted projections of pivot
//!   distances.
//!
//! All four tree structures share [`pivot_table::PivotTable`] as their leaf
//! and are fed by a common [`selectors::PivotSelector`] abstraction. See
//! [`Index`] for the unified build/search entry point.

pub mod distance;
pub mod error;
pub mod index;
pub mod object;
pub mod pivot_table;
pub mod selectors;
pub mod tree;

pub use distance::{Distance, Edit, Hamming, Minkowski, WeightedEdit};
pub use error::Error;
pub use index::Index;
pub use object::Object;
pub use pivot_table::PivotTable;
