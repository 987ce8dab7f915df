//! Small utilities: logger setup and summary statistics for
//! `batch_query_statistics` mode.

use std::path::PathBuf;

use ftlog::appender::{FileAppender, Period};
use ftlog::{LevelFilter, LoggerGuard};

use crate::config::QueryPoint;
use crate::data::DataKind;
use crate::error::CliError;
use metric_trees::Object;

/// Configures the process-wide `ftlog` logger, writing to `logs/<file_name>`
/// with daily rotation and a separate `Warn`+ stream, mirroring the
/// teacher's `configure_logger`. Only a binary should call this; the
/// library crates only emit through the `ftlog` macros.
///
/// # Errors
///
/// Returns an error if the `logs/` directory cannot be created or the
/// logger cannot be installed (e.g. a logger is already installed).
pub fn configure_logger(file_name: &str) -> Result<(LoggerGuard, PathBuf), String> {
    let root_dir = PathBuf::from(".").canonicalize().map_err(|e| e.to_string())?;
    let logs_dir = root_dir.join("logs");
    if !logs_dir.exists() {
        std::fs::create_dir(&logs_dir).map_err(|e| e.to_string())?;
    }
    let log_path = logs_dir.join(file_name);

    let writer = FileAppender::builder().path(&log_path).rotate(Period::Day).build();

    let err_stem = log_path.file_stem().and_then(|s| s.to_str()).unwrap_or("metric-trees-cli");
    let err_path = log_path.with_file_name(format!("{err_stem}-err"));

    let guard = ftlog::Builder::new()
        .max_log_level(LevelFilter::Info)
        .root(writer)
        .filter("ftlog::appender", "ftlog-appender", LevelFilter::Warn)
        .appender("ftlog-appender", FileAppender::new(err_path))
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok((guard, log_path))
}

/// Resolves a configured [`QueryPoint`] against the loaded dataset and its
/// [`DataKind`].
///
/// # Errors
///
/// Returns [`CliError::Config`] if a literal query point's kind doesn't
/// match the loaded dataset's kind, or if `Auto` is requested against an
/// empty dataset.
pub fn resolve_query_point(point: &QueryPoint, objects: &[Object], kind: DataKind) -> Result<Object, CliError> {
    match point {
        QueryPoint::Auto => objects.first().cloned().ok_or_else(|| CliError::Config("cannot resolve an 'auto' query point against an empty dataset".to_string())),
        QueryPoint::Vector(values) => {
            if kind != DataKind::Vector {
                return Err(CliError::Config("query_point is a vector but the loaded dataset is string-valued".to_string()));
            }
            Ok(Object::Vector(values.clone()))
        }
        QueryPoint::Text(text) => {
            if kind != DataKind::Text {
                return Err(CliError::Config("query_point is a string but the loaded dataset is vector-valued".to_string()));
            }
            Ok(Object::Text(text.clone()))
        }
    }
}

/// Summary statistics (mean, population standard deviation, variance) over
/// a sequence of values, used to report distance-count and hit-count
/// summaries in `batch_query_statistics` mode.
#[derive(Debug, Clone, Copy)]
pub struct Stats {
    /// The arithmetic mean.
    pub mean: f64,
    /// The standard deviation (population, divisor `n`).
    pub std_dev: f64,
    /// The variance (population, divisor `n`).
    pub variance: f64,
}

impl Stats {
    /// Computes [`Stats`] over `values`. Returns all-zero stats for an empty
    /// input.
    #[must_use]
    pub fn compute(values: &[usize]) -> Self {
        if values.is_empty() {
            return Self { mean: 0.0, std_dev: 0.0, variance: 0.0 };
        }
        #[allow(clippy::cast_precision_loss)]
        let n = values.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
        #[allow(clippy::cast_precision_loss)]
        let variance = values.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n;
        Self { mean, std_dev: variance.sqrt(), variance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_constant_sequence_has_zero_spread() {
        let stats = Stats::compute(&[4, 4, 4, 4]);
        assert!((stats.mean - 4.0).abs() < 1e-9);
        assert!(stats.variance.abs() < 1e-9);
        assert!(stats.std_dev.abs() < 1e-9);
    }

    #[test]
    fn stats_of_empty_sequence_is_zero() {
        let stats = Stats::compute(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.variance, 0.0);
    }

    #[test]
    fn known_variance() {
        // [2, 4, 4, 4, 5, 5, 7, 9] has population variance 4.0.
        let stats = Stats::compute(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert!((stats.variance - 4.0).abs() < 1e-9);
        assert!((stats.std_dev - 2.0).abs() < 1e-9);
    }
}
