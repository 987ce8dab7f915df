//! Tree structures built recursively on pivots.
//!
//! Every tree shares [`crate::pivot_table::PivotTable`] as its leaf and a
//! common bulk-load skeleton: an empty partition yields no node; a partition
//! at or under `max_leaf_size` becomes a leaf; otherwise the tree selects its
//! own internal pivots, partitions the remaining data, and recurses.

pub mod ght;
pub mod lpt;
pub mod mvpt;
pub mod vpt;

/// Splits `data` (given as dataset indices, paired with their distance/score
/// under some projection) into `regions` contiguous blocks of equal size
/// after sorting by that key, with the last block absorbing any remainder.
/// This is the equi-depth partitioning rule shared by MVPT and LPT.
pub(crate) fn equi_depth_partition(mut keyed: Vec<(usize, f64)>, regions: usize) -> Vec<Vec<usize>> {
    keyed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let n = keyed.len();
    let partition_size = n / regions;
    let mut partitions = Vec::with_capacity(regions);
    for i in 0..regions {
        let start = i * partition_size;
        let end = if i + 1 < regions { start + partition_size } else { n };
        partitions.push(keyed[start..end].iter().map(|&(idx, _)| idx).collect());
    }
    partitions
}
