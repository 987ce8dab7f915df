//! Builds a [`metric_trees::Index`] from an [`IndexConfig`].

use metric_trees::selectors::PivotSelector;
use metric_trees::tree::lpt;
use metric_trees::{Distance, Index, Object};

use crate::config::{IndexConfig, IndexName};
use crate::error::CliError;

/// Builds the index named by `config` over `data`.
///
/// # Errors
///
/// Returns [`CliError::Config`] if `config` is missing a parameter its
/// chosen index structure requires, or propagates a [`metric_trees::Error`]
/// from the underlying bulk-load.
pub fn build(
    config: &IndexConfig,
    data: &[usize],
    objects: &[Object],
    distance: &dyn Distance,
    selector: &mut dyn PivotSelector,
) -> Result<Index, CliError> {
    let index = match config.name {
        IndexName::PivotTable => Index::build_pivot_table(data, objects, distance, selector, config.max_leaf_size, config.pivot_k)?,
        IndexName::Vpt => Index::build_vpt(data, objects, distance, selector, config.max_leaf_size, config.pivot_k)?,
        IndexName::Ght => Index::build_ght(data, objects, distance, selector, config.max_leaf_size, config.pivot_k)?,
        IndexName::Mvpt => {
            let regions = config.mvpt_regions.ok_or_else(|| CliError::Config("Multiple Vantage Point Tree requires index_structure.mvpt_regions".to_string()))?;
            let n_internal = config
                .mvpt_internal_pivots
                .ok_or_else(|| CliError::Config("Multiple Vantage Point Tree requires index_structure.mvpt_internal_pivots".to_string()))?;
            Index::build_mvpt(data, objects, distance, selector, config.max_leaf_size, config.pivot_k, regions, n_internal)?
        }
        IndexName::Lpt => {
            let matrix = config.lpt_matrix_a.clone().ok_or_else(|| CliError::Config("Linear Partition Tree requires index_structure.lpt_matrix_A".to_string()))?;
            let regions = config.lpt_num_regions.ok_or_else(|| CliError::Config("Linear Partition Tree requires index_structure.lpt_num_regions".to_string()))?;
            let projection = lpt::Projection { matrix, regions };
            Index::build_lpt(data, objects, distance, selector, config.max_leaf_size, config.pivot_k, projection)?
        }
    };
    Ok(index)
}
