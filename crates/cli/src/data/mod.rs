//! Dataset loaders, per spec.md §6: UMAD vector text, UMAD string text,
//! FASTA, and FVECS binary.
//!
//! The format of a dataset file is inferred from its path: a `.fvecs`
//! extension is the FVECS binary format, `.fasta`/`.fa`/`.fna` is FASTA, and
//! anything else is UMAD text, further distinguished by its first line — a
//! UMAD vector file's first line is `"<dim> <count>"`; a UMAD string file's
//! first line is an ordinary data row.

mod fasta;
mod fvecs;
#[cfg(test)]
mod test_util;
mod umad;

use std::path::Path;

use metric_trees::Object;

use crate::error::CliError;

/// Whether a loaded dataset holds vectors or strings, which in turn decides
/// which half of [`crate::config::DistanceFunctionConfig`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    /// Fixed-dimension real vectors.
    Vector,
    /// Variable-length strings.
    Text,
}

/// Loads at most `load_count` objects from the dataset file at `path`,
/// inferring its format from the path and (for UMAD text) its content.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be read, or
/// [`CliError::Config`] if its format cannot be determined or it is
/// malformed.
pub fn load(path: &Path, load_count: usize) -> Result<(Vec<Object>, DataKind), CliError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("fvecs") => Ok((fvecs::load(path, load_count)?, DataKind::Vector)),
        Some("fasta" | "fa" | "fna") => Ok((fasta::load(path, load_count)?, DataKind::Text)),
        _ => {
            if umad::first_line_is_vector_header(path)? {
                Ok((umad::load_vector(path, load_count, None)?, DataKind::Vector))
            } else {
                Ok((umad::load_string(path, load_count, None)?, DataKind::Text))
            }
        }
    }
}
