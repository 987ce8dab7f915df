//! UMAD text dataset loaders: a vector format with a `"<dim> <count>"`
//! header line, and a string format of one row per line.
//!
//! Grounded on `original_source/Utils/umadDataLoader.py`
//! (`load_umad_vector_data`/`load_umad_string_data`): read at most
//! `load_count` rows, optionally truncating each vector row to a narrower
//! width than the file declares.

use std::io::BufRead;
use std::path::Path;

use metric_trees::Object;

use crate::error::CliError;

fn open(path: &Path) -> Result<std::io::BufReader<std::fs::File>, CliError> {
    let file = std::fs::File::open(path)?;
    Ok(std::io::BufReader::new(file))
}

/// Returns `true` if the dataset file's first line looks like a UMAD vector
/// header (`"<dim> <count>"`, two whitespace-separated non-negative
/// integers), as opposed to a UMAD string file's first line, which is an
/// ordinary data row.
pub fn first_line_is_vector_header(path: &Path) -> Result<bool, CliError> {
    let mut reader = open(path)?;
    let mut first_line = String::new();
    reader.read_line(&mut first_line)?;
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    Ok(parts.len() == 2 && parts.iter().all(|p| p.parse::<usize>().is_ok()))
}

/// Loads a UMAD vector text file: first line `"<dim> <count>"`, then
/// `count` lines of `dim` space-separated floats.
///
/// Reads at most `min(load_count, count)` rows. If `truncate_dim` is
/// `Some(d)` with `d < dim`, each row is truncated to its first `d` values.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be read, or
/// [`CliError::Config`] if the header or a data row is malformed.
pub fn load_vector(path: &Path, load_count: usize, truncate_dim: Option<usize>) -> Result<Vec<Object>, CliError> {
    let mut reader = open(path)?;

    let mut header = String::new();
    reader.read_line(&mut header)?;
    let mut header_parts = header.split_whitespace();
    let dim: usize = header_parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CliError::Config(format!("malformed UMAD vector header in {}", path.display())))?;
    let count: usize = header_parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CliError::Config(format!("malformed UMAD vector header in {}", path.display())))?;

    let width = truncate_dim.map_or(dim, |d| d.min(dim));
    let num = load_count.min(count);

    let mut vectors = Vec::with_capacity(num);
    for _ in 0..num {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let values = line
            .split_whitespace()
            .take(width)
            .map(|s| s.parse::<f64>().map_err(|e| CliError::Config(format!("malformed UMAD vector row in {}: {e}", path.display()))))
            .collect::<Result<Vec<_>, _>>()?;
        vectors.push(Object::Vector(values));
    }

    Ok(vectors)
}

/// Loads a UMAD string text file: one string per line, blank lines skipped.
///
/// Reads at most `min(load_count, non_blank_line_count)` rows. If
/// `truncate_len` is `Some(n)`, each string is truncated to its first `n`
/// characters.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be read.
pub fn load_string(path: &Path, load_count: usize, truncate_len: Option<usize>) -> Result<Vec<Object>, CliError> {
    let reader = open(path)?;
    let mut strings = Vec::new();
    for line in reader.lines() {
        if strings.len() >= load_count {
            break;
        }
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let text = match truncate_len {
            Some(n) => line.chars().take(n).collect(),
            None => line.to_string(),
        };
        strings.push(Object::Text(text));
    }
    Ok(strings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_util::TempPath;

    #[test]
    fn loads_vector_rows_and_respects_load_count() {
        let file = TempPath::with_contents("umad_vector", "2 3\n0.0 0.0\n1.0 0.0\n0.0 1.0\n");
        assert!(first_line_is_vector_header(file.path()).unwrap());
        let vectors = load_vector(file.path(), 2, None).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], Object::Vector(vec![0.0, 0.0]));
    }

    #[test]
    fn truncates_vector_width() {
        let file = TempPath::with_contents("umad_vector_trunc", "3 1\n1.0 2.0 3.0\n");
        let vectors = load_vector(file.path(), 1, Some(2)).unwrap();
        assert_eq!(vectors[0], Object::Vector(vec![1.0, 2.0]));
    }

    #[test]
    fn loads_string_rows_skipping_blanks() {
        let file = TempPath::with_contents("umad_string", "cat\n\nbat\ncut\n");
        assert!(!first_line_is_vector_header(file.path()).unwrap());
        let strings = load_string(file.path(), 10, None).unwrap();
        assert_eq!(strings, vec![Object::Text("cat".to_string()), Object::Text("bat".to_string()), Object::Text("cut".to_string())]);
    }
}
