//! [`Index`]: the unified build/search entry point over the five index
//! families.

use rayon::prelude::*;

use crate::pivot_table::PivotTable;
use crate::selectors::PivotSelector;
use crate::tree::{ght, lpt, mvpt, vpt};
use crate::{Distance, Error, Object};

/// A built index, owning one of the five root structures this crate
/// supports. Every variant shares the same query-phase contract: `(q, r) ->
/// (hits, distance_count)`.
pub enum Index {
    /// A flat [`PivotTable`] used directly as the whole index (no tree).
    PivotTable(Option<PivotTable>),
    /// A Vantage Point Tree.
    Vpt(Option<vpt::Node>),
    /// A General Hyper-plane Tree.
    Ght(Option<ght::Node>),
    /// A Multiple Vantage Point Tree.
    Mvpt(Option<mvpt::Node>),
    /// A Linear Partition Tree, with its fixed projection configuration.
    Lpt {
        /// The tree root.
        root: Option<lpt::Node>,
        /// The projection matrix and region count used to build and query
        /// this tree.
        projection: lpt::Projection,
    },
}

impl Index {
    /// Builds a flat [`PivotTable`] index: the entire dataset becomes one
    /// leaf.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OversizedLeaf`] if `data.len()` after pivot
    /// selection exceeds `max_leaf_size`, or propagates a distance-
    /// evaluation failure.
    pub fn build_pivot_table(
        data: &[usize],
        objects: &[Object],
        distance: &dyn Distance,
        selector: &mut dyn PivotSelector,
        max_leaf_size: usize,
        k_leaf: usize,
    ) -> Result<Self, Error> {
        if data.is_empty() {
            return Ok(Self::PivotTable(None));
        }
        let pt = PivotTable::build(data, objects, distance, selector, max_leaf_size, k_leaf)?;
        Ok(Self::PivotTable(Some(pt)))
    }

    /// Bulk-loads a Vantage Point Tree.
    ///
    /// # Errors
    ///
    /// Propagates an [`Error`] from pivot selection, distance evaluation, or
    /// an oversized leaf.
    pub fn build_vpt(
        data: &[usize],
        objects: &[Object],
        distance: &dyn Distance,
        selector: &mut dyn PivotSelector,
        max_leaf_size: usize,
        k_leaf: usize,
    ) -> Result<Self, Error> {
        Ok(Self::Vpt(vpt::build(data, objects, distance, selector, max_leaf_size, k_leaf)?))
    }

    /// Bulk-loads a General Hyper-plane Tree.
    ///
    /// # Errors
    ///
    /// Propagates an [`Error`] from pivot selection, distance evaluation, or
    /// an oversized leaf.
    pub fn build_ght(
        data: &[usize],
        objects: &[Object],
        distance: &dyn Distance,
        selector: &mut dyn PivotSelector,
        max_leaf_size: usize,
        k_leaf: usize,
    ) -> Result<Self, Error> {
        Ok(Self::Ght(ght::build(data, objects, distance, selector, max_leaf_size, k_leaf)?))
    }

    /// Bulk-loads a Multiple Vantage Point Tree.
    ///
    /// # Errors
    ///
    /// Propagates an [`Error`] from pivot selection, distance evaluation, or
    /// an oversized leaf.
    #[allow(clippy::too_many_arguments)]
    pub fn build_mvpt(
        data: &[usize],
        objects: &[Object],
        distance: &dyn Distance,
        selector: &mut dyn PivotSelector,
        max_leaf_size: usize,
        k_leaf: usize,
        regions: usize,
        n_internal: usize,
    ) -> Result<Self, Error> {
        Ok(Self::Mvpt(mvpt::build(data, objects, distance, selector, max_leaf_size, k_leaf, regions, n_internal)?))
    }

    /// Bulk-loads a Linear Partition Tree under the given `projection`.
    ///
    /// # Errors
    ///
    /// Propagates an [`Error`] from pivot selection, distance evaluation, or
    /// an oversized leaf.
    pub fn build_lpt(
        data: &[usize],
        objects: &[Object],
        distance: &dyn Distance,
        selector: &mut dyn PivotSelector,
        max_leaf_size: usize,
        k_leaf: usize,
        projection: lpt::Projection,
    ) -> Result<Self, Error> {
        let root = lpt::build(data, objects, distance, selector, max_leaf_size, k_leaf, &projection)?;
        Ok(Self::Lpt { root, projection })
    }

    /// Answers a range query: every object within `r` of `q`, and the number
    /// of distance evaluations it took.
    ///
    /// # Errors
    ///
    /// Propagates an [`Error`] from a failed distance evaluation; partial
    /// results from a failed query are discarded by the caller.
    pub fn search(&self, q: &Object, objects: &[Object], distance: &dyn Distance, r: f64) -> Result<(Vec<usize>, usize), Error> {
        match self {
            Self::PivotTable(Some(pt)) => pt.search(q, objects, distance, r),
            Self::PivotTable(None) => Ok((Vec::new(), 0)),
            Self::Vpt(Some(root)) => vpt::search(root, q, objects, distance, r),
            Self::Vpt(None) => Ok((Vec::new(), 0)),
            Self::Ght(Some(root)) => ght::search(root, q, objects, distance, r),
            Self::Ght(None) => Ok((Vec::new(), 0)),
            Self::Mvpt(Some(root)) => mvpt::search(root, q, objects, distance, r),
            Self::Mvpt(None) => Ok((Vec::new(), 0)),
            Self::Lpt { root: Some(root), projection } => lpt::search(root, q, objects, distance, r, projection),
            Self::Lpt { root: None, .. } => Ok((Vec::new(), 0)),
        }
    }

    /// Answers a batch of independent range queries in parallel over
    /// `rayon`'s global thread pool.
    ///
    /// This is the optimization spec.md §5 allows ("an implementation MAY
    /// parallelize search across independent queries... but this is an
    /// optimization, not a contract"): each query still runs
    /// [`Index::search`] sequentially, so results agree exactly with calling
    /// `search` once per query in a loop; only the across-query scheduling
    /// differs.
    pub fn par_batch_search(&self, queries: &[(Object, f64)], objects: &[Object], distance: &dyn Distance) -> Vec<Result<(Vec<usize>, usize), Error>>
    where
        Self: Sync,
    {
        queries.par_iter().map(|(q, r)| self.search(q, objects, distance, *r)).collect()
    }

    /// A short, display-friendly name for this index's structure.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PivotTable(_) => "Pivot Table",
            Self::Vpt(_) => "Vantage Point Tree",
            Self::Ght(_) => "General Hyper-plane Tree",
            Self::Mvpt(_) => "Multiple Vantage Point Tree",
            Self::Lpt { .. } => "Linear Partition Tree",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::Random;
    use distances::vectors::MinkowskiOrder;

    fn one_d(vals: &[i64]) -> Vec<Object> {
        vals.iter().map(|&v| Object::Vector(vec![v as f64])).collect()
    }

    #[test]
    fn cross_agreement_across_all_five_structures() {
        let objects = one_d(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let data: Vec<usize> = (0..10).collect();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };
        let q = Object::Vector(vec![4.5]);
        let r = 1.5;

        let pt = Index::build_pivot_table(&data, &objects, &distance, &mut Random::new(1), 10, 2).unwrap();
        let vpt = Index::build_vpt(&data, &objects, &distance, &mut Random::new(1), 2, 1).unwrap();
        let ght = Index::build_ght(&data, &objects, &distance, &mut Random::new(1), 2, 1).unwrap();
        let mvpt = Index::build_mvpt(&data, &objects, &distance, &mut Random::new(1), 2, 1, 2, 2).unwrap();
        let projection = lpt::Projection { matrix: vec![vec![1, -1], vec![1, 1]], regions: 2 };
        let lpt = Index::build_lpt(&data, &objects, &distance, &mut Random::new(1), 2, 1, projection).unwrap();

        let mut expected: Vec<usize> = data.iter().copied().filter(|&i| distance.eval(&objects[i], &q).unwrap() <= r).collect();
        expected.sort_unstable();

        for index in [&pt, &vpt, &ght, &mvpt, &lpt] {
            let (mut hits, count) = index.search(&q, &objects, &distance, r).unwrap();
            hits.sort_unstable();
            assert_eq!(hits, expected, "mismatch for {}", index.name());
            assert!(count <= data.len());
        }
    }

    #[test]
    fn par_batch_search_agrees_with_sequential_search() {
        let objects = one_d(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let data: Vec<usize> = (0..10).collect();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };
        let vpt = Index::build_vpt(&data, &objects, &distance, &mut Random::new(4), 2, 1).unwrap();

        let queries: Vec<(Object, f64)> = (0..10).map(|i| (Object::Vector(vec![f64::from(i)]), 1.5)).collect();
        let par_results = vpt.par_batch_search(&queries, &objects, &distance);

        for ((q, r), par_result) in queries.iter().zip(par_results) {
            let (mut seq_hits, seq_count) = vpt.search(q, &objects, &distance, *r).unwrap();
            let (mut par_hits, par_count) = par_result.unwrap();
            seq_hits.sort_unstable();
            par_hits.sort_unstable();
            assert_eq!(seq_hits, par_hits);
            assert_eq!(seq_count, par_count);
        }
    }
}
