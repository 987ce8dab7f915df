//! The JSON configuration file that binds a dataset, distance function,
//! pivot selector, and index structure into one run, per spec.md §6.

use std::path::PathBuf;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// The full configuration for one driver run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Which dataset file to load and how much of it.
    pub dataset: DatasetConfig,
    /// Which distance function to use, one side per object kind.
    pub distance_function: DistanceFunctionConfig,
    /// Which pivot-selection strategy to use and its parameters.
    pub pivot_selector: SelectorConfig,
    /// Which index structure to build and its structural parameters.
    pub index_structure: IndexConfig,
    /// Literal queries to run (used directly in `interactive` mode, and as a
    /// seed/example set alongside generated queries in any mode).
    #[serde(default)]
    pub queries: Vec<QueryConfig>,
    /// Which run mode to execute.
    pub run_mode: RunMode,
    /// The radius used for every query in `batch_query_statistics` mode.
    #[serde(default)]
    pub batch_radius: Option<f64>,
    /// The number of queries to run in `batch_query_statistics` mode.
    #[serde(default)]
    pub batch_query_num: Option<usize>,
}

/// Names and how much of a dataset file to load.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// The path to the dataset file. Its format is inferred from its
    /// extension and, for UMAD text files, its first line (see
    /// `crate::data`).
    pub name: PathBuf,
    /// How many rows/records/sequences to load from the dataset file.
    pub load_count: usize,
}

/// The two sides of the distance-function configuration; exactly one
/// applies to a given run, selected by the loaded dataset's object kind.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceFunctionConfig {
    /// The Minkowski order to use for vector datasets, if loaded.
    #[serde(default)]
    pub vector: Option<VectorDistanceName>,
    /// The string distance to use for string datasets, if loaded.
    #[serde(default)]
    pub string: Option<StringDistanceName>,
}

/// The recognized vector-distance names.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum VectorDistanceName {
    /// City-block distance (`t = 1`).
    #[serde(rename = "Manhattan Distance")]
    Manhattan,
    /// Euclidean distance (`t = 2`).
    #[serde(rename = "Euclidean Distance")]
    Euclidean,
    /// Chebyshev distance (`t = infinity`).
    #[serde(rename = "Chebyshev Distance")]
    Chebyshev,
}

/// The recognized string-distance names.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum StringDistanceName {
    /// Hamming distance (equal-length strings only).
    #[serde(rename = "Hamming")]
    Hamming,
    /// Classical Levenshtein edit distance.
    #[serde(rename = "Edit")]
    Edit,
    /// Weighted edit distance over a substitution/gap score table.
    #[serde(rename = "Weighted Edit Distance")]
    WeightedEdit,
}

/// The pivot-selector configuration: a name and its parameters, modeled as
/// an adjacently-tagged enum so a single JSON object
/// `{"name": ..., "params": {...}}` maps directly onto a Rust variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "name", content = "params")]
pub enum SelectorConfig {
    /// Pivots are given explicitly as dataset row indices.
    #[serde(rename = "Manual")]
    Manual {
        /// The dataset row indices to use as pivots, in order.
        pivots: Vec<usize>,
    },
    /// Uniform random sampling without replacement.
    #[serde(rename = "Random")]
    Random {
        /// The RNG seed.
        seed: u64,
    },
    /// Greedy maximum sample-variance selection.
    #[serde(rename = "Max Variance")]
    MaxVariance {
        /// The RNG seed used to pick the first pivot.
        seed: u64,
    },
    /// Farthest-First Traversal.
    #[serde(rename = "Farthest First Traversal")]
    Fft {
        /// The RNG seed used to pick the first pivot.
        seed: u64,
    },
    /// Incremental sampling driven by a pluggable objective function.
    #[serde(rename = "Incremental Sampling")]
    IncrementalSampling {
        /// The size of the candidate pool drawn before each `select` call.
        candidate_size: usize,
        /// The size of the evaluation set drawn before each `select` call.
        evaluation_size: usize,
        /// Which objective function scores a trial pivot set.
        objective_function: ObjectiveFunctionName,
        /// The Chebyshev-distance threshold for `Radius-Sensitive`.
        #[serde(default)]
        radius_threshold: Option<f64>,
        /// The scale applied to the raw sample variance for `Variance`.
        #[serde(default)]
        variance_weight: Option<f64>,
        /// The inner selector used to draw the candidate pool.
        candidate_selector: InnerSelectorName,
        /// The inner selector used to draw the evaluation set.
        evaluation_selector: InnerSelectorName,
        /// The RNG seed for both inner selectors.
        seed: u64,
    },
}

/// The recognized objective-function names for `Incremental Sampling`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum ObjectiveFunctionName {
    /// Counts spread-apart pairs in pivot-projected space.
    #[serde(rename = "Radius-Sensitive")]
    RadiusSensitive,
    /// Sample variance of pairwise distances in pivot-projected space.
    #[serde(rename = "Variance")]
    Variance,
    /// Mean pairwise Chebyshev distance in pivot-projected space.
    #[serde(rename = "Maximum Mean")]
    MaximumMean,
}

/// The selectors `Incremental Sampling` can use for its two inner draws.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum InnerSelectorName {
    /// Uniform random sampling.
    Random,
    /// Greedy maximum-variance selection.
    #[serde(rename = "Max Variance")]
    MaxVariance,
    /// Farthest-First Traversal.
    #[serde(rename = "Farthest First Traversal")]
    Fft,
}

/// The index-structure configuration: which structure to build, and the
/// (possibly structure-specific) parameters it needs.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Which of the five index families to build.
    pub name: IndexName,
    /// The maximum number of non-pivot points a leaf may store.
    pub max_leaf_size: usize,
    /// The number of pivots a leaf selects for itself.
    pub pivot_k: usize,
    /// MVPT only: the number of equi-depth regions per pivot.
    #[serde(default)]
    pub mvpt_regions: Option<usize>,
    /// MVPT only: the number of pivots selected at each internal node.
    #[serde(default)]
    pub mvpt_internal_pivots: Option<usize>,
    /// LPT only: the `k x n` integer projection matrix.
    #[serde(default)]
    pub lpt_matrix_a: Option<Vec<Vec<i64>>>,
    /// LPT only: the number of equi-depth regions per projection row.
    #[serde(default)]
    pub lpt_num_regions: Option<usize>,
}

/// The recognized index-structure names.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum IndexName {
    /// A flat `PivotTable`, used directly as the whole index.
    #[serde(rename = "Pivot Table")]
    PivotTable,
    /// The General Hyper-plane Tree.
    #[serde(rename = "General Hyper-plane Tree")]
    Ght,
    /// The Vantage Point Tree.
    #[serde(rename = "Vantage Point Tree")]
    Vpt,
    /// The Multiple Vantage Point Tree.
    #[serde(rename = "Multiple Vantage Point Tree")]
    Mvpt,
    /// The Linear Partition Tree.
    #[serde(rename = "Linear Partition Tree")]
    Lpt,
}

/// One query to run: a radius, a query point (literal or `"auto"`), and an
/// optional human-readable description.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// The search radius.
    pub radius: f64,
    /// The query point, or `"auto"` to use the first loaded object.
    pub query_point: QueryPoint,
    /// A human-readable label for this query, echoed in output.
    #[serde(default)]
    pub description: Option<String>,
}

/// A query point: either a literal vector/string, or the sentinel `"auto"`
/// meaning "use the first loaded object".
#[derive(Debug, Clone)]
pub enum QueryPoint {
    /// Use the first object in the loaded dataset.
    Auto,
    /// A literal real vector.
    Vector(Vec<f64>),
    /// A literal string.
    Text(String),
}

impl<'de> Deserialize<'de> for QueryPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) if s == "auto" => Ok(Self::Auto),
            serde_json::Value::String(s) => Ok(Self::Text(s)),
            serde_json::Value::Array(items) => {
                let vector = items
                    .into_iter()
                    .map(|v| v.as_f64().ok_or_else(|| D::Error::custom("query_point array entries must be numbers")))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Vector(vector))
            }
            other => Err(D::Error::custom(format!("invalid query_point: {other}"))),
        }
    }
}

/// The two run modes the driver supports.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Read query lines (or use `config.queries`) and print hits per query.
    Interactive,
    /// Run `batch_query_num` queries at `batch_radius` and report summary
    /// statistics over their hit counts and distance counts.
    BatchQueryStatistics,
}
