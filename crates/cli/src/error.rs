//! CLI-level errors: the core crate's [`metric_trees::Error`] plus the
//! process-level failures (argument parsing, file I/O, JSON parsing) that
//! only arise at this layer.

/// Every failure mode the driver can surface. Library failures are wrapped
/// verbatim; the CLI adds `Io` and `Config` variants of its own for loader
/// and argument-parsing failures, matching the library's layered-error
/// style (library errors are domain errors, the CLI adds process context).
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// A failure from the core index/search/selection machinery.
    #[error(transparent)]
    Core(#[from] metric_trees::Error),

    /// A dataset or config file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),

    /// The configuration file named an unknown dataset, distance, selector,
    /// or index, or was otherwise malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
