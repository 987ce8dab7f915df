//! FASTA dataset loader: standard `>header` / sequence lines, with the
//! sequence body concatenated until the next header.

use std::path::Path;

use bio::io::fasta;
use metric_trees::Object;

use crate::error::CliError;

/// Loads a FASTA file, reading at most `load_count` sequences.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be opened or a record fails
/// to parse.
pub fn load(path: &Path, load_count: usize) -> Result<Vec<Object>, CliError> {
    let reader = fasta::Reader::from_file(path).map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;

    let mut sequences = Vec::new();
    for result in reader.records() {
        if sequences.len() >= load_count {
            break;
        }
        let record = result.map_err(|e| CliError::Io(format!("malformed FASTA record in {}: {e}", path.display())))?;
        let sequence = String::from_utf8_lossy(record.seq()).into_owned();
        sequences.push(Object::Text(sequence));
    }

    Ok(sequences)
}
