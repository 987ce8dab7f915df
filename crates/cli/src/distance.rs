//! Builds a boxed [`metric_trees::Distance`] from a
//! [`crate::config::DistanceFunctionConfig`] and the kind of data that was
//! loaded.

use distances::strings::{ScoreTable, GAP};
use distances::vectors::MinkowskiOrder;
use metric_trees::{Distance, Edit, Hamming, Minkowski, Object, WeightedEdit};

use crate::config::{DistanceFunctionConfig, StringDistanceName, VectorDistanceName};
use crate::data::DataKind;
use crate::error::CliError;

/// A unit-cost substitution/gap table built from every character observed
/// in `objects`: `0` for a symbol against itself, `1` otherwise, `1` for any
/// symbol against a gap. Spec.md's config keys don't name a place to supply
/// a weighted-edit score table from JSON, so this fallback, built from the
/// alphabet actually in use, is what `"Weighted Edit Distance"` resolves to
/// when the CLI drives it; a library consumer that wants a custom table
/// constructs [`ScoreTable`] directly.
fn unit_cost_table(objects: &[Object]) -> ScoreTable {
    let mut alphabet: Vec<char> = objects
        .iter()
        .filter_map(Object::as_text)
        .flat_map(str::chars)
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    alphabet.push(GAP);

    let mut table = ScoreTable::new();
    for &a in &alphabet {
        table.insert(a, GAP, 1.0);
        for &b in &alphabet {
            if a != GAP && b != GAP {
                table.insert(a, b, if a == b { 0.0 } else { 1.0 });
            }
        }
    }
    table
}

/// Builds the distance function that applies to the loaded dataset, per its
/// [`DataKind`] and the matching half of `config`.
///
/// # Errors
///
/// Returns [`CliError::Config`] if the configuration doesn't name a distance
/// for the loaded data's kind.
pub fn build(config: &DistanceFunctionConfig, kind: DataKind, objects: &[Object]) -> Result<Box<dyn Distance>, CliError> {
    match kind {
        DataKind::Vector => {
            let name = config.vector.ok_or_else(|| CliError::Config("dataset is vector-valued but distance_function.vector is not set".to_string()))?;
            let order = match name {
                VectorDistanceName::Manhattan => MinkowskiOrder::Manhattan,
                VectorDistanceName::Euclidean => MinkowskiOrder::Euclidean,
                VectorDistanceName::Chebyshev => MinkowskiOrder::Chebyshev,
            };
            Ok(Box::new(Minkowski { order }))
        }
        DataKind::Text => {
            let name = config.string.ok_or_else(|| CliError::Config("dataset is string-valued but distance_function.string is not set".to_string()))?;
            match name {
                StringDistanceName::Hamming => Ok(Box::new(Hamming)),
                StringDistanceName::Edit => Ok(Box::new(Edit)),
                StringDistanceName::WeightedEdit => Ok(Box::new(WeightedEdit { scores: unit_cost_table(objects) })),
            }
        }
    }
}
