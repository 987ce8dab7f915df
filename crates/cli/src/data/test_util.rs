//! A minimal temp-file helper shared by the loader unit tests, avoiding a
//! dependency on an external temp-file crate for something this small.

#![cfg(test)]

use std::path::{Path, PathBuf};

/// A file under [`std::env::temp_dir`] that is removed when dropped.
pub struct TempPath(PathBuf);

impl TempPath {
    /// Writes `contents` to a uniquely-named file tagged with `label`.
    pub fn with_contents(label: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!("metric-trees-cli-test-{label}-{:?}.tmp", std::thread::current().id()));
        std::fs::write(&path, contents).expect("write temp file");
        Self(path)
    }

    /// Writes raw `bytes` to a uniquely-named file tagged with `label`.
    pub fn with_bytes(label: &str, bytes: &[u8]) -> Self {
        let path = std::env::temp_dir().join(format!("metric-trees-cli-test-{label}-{:?}.tmp", std::thread::current().id()));
        std::fs::write(&path, bytes).expect("write temp file");
        Self(path)
    }

    /// The path of the temp file.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}
