//! FVECS binary dataset loader: repeated records of `[int32 dim][dim x
//! float32]`, grounded on `original_source/Utils/fvecsDataLoader.py`.

use std::io::Read;
use std::path::Path;

use metric_trees::Object;

use crate::error::CliError;

/// Loads a FVECS binary file, reading at most `load_count` records.
///
/// Every record is `[i32 dim][dim x f32]`, little-endian. All records in a
/// file share the same `dim` (taken from the first record).
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be read, or
/// [`CliError::Config`] if the file is truncated mid-record.
pub fn load(path: &Path, load_count: usize) -> Result<Vec<Object>, CliError> {
    let mut bytes = Vec::new();
    std::fs::File::open(path)?.read_to_end(&mut bytes)?;

    let mut vectors = Vec::new();
    let mut offset = 0_usize;
    while offset < bytes.len() && vectors.len() < load_count {
        if offset + 4 > bytes.len() {
            return Err(CliError::Config(format!("truncated FVECS record in {}", path.display())));
        }
        let dim = i32::from_le_bytes(bytes[offset..offset + 4].try_into().expect("4 bytes")) as usize;
        offset += 4;

        let record_bytes = dim * 4;
        if offset + record_bytes > bytes.len() {
            return Err(CliError::Config(format!("truncated FVECS record in {}", path.display())));
        }

        let values = bytes[offset..offset + record_bytes]
            .chunks_exact(4)
            .map(|chunk| f64::from(f32::from_le_bytes(chunk.try_into().expect("4 bytes"))))
            .collect();
        vectors.push(Object::Vector(values));
        offset += record_bytes;
    }

    Ok(vectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_util::TempPath;

    #[test]
    fn reads_records_and_respects_load_count() {
        let mut bytes = Vec::new();
        for vals in [[1.0_f32, 2.0], [3.0, 4.0], [5.0, 6.0]] {
            bytes.extend_from_slice(&2_i32.to_le_bytes());
            for v in vals {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
        }
        let file = TempPath::with_bytes("fvecs", &bytes);

        let vectors = load(file.path(), 2).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], Object::Vector(vec![1.0, 2.0]));
        assert_eq!(vectors[1], Object::Vector(vec![3.0, 4.0]));
    }

    #[test]
    fn truncated_record_fails() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&4_i32.to_le_bytes());
        bytes.extend_from_slice(&1.0_f32.to_le_bytes());
        let file = TempPath::with_bytes("fvecs_truncated", &bytes);

        assert!(load(file.path(), 10).is_err());
    }
}
