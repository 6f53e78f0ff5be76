//! Temporary files for tests that exercise file-based inputs.

use std::io::Write;
use std::path::PathBuf;

/// Creates a temporary directory for test outputs.
///
/// # Returns
///
/// A `tempfile::TempDir` that will be automatically cleaned up.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Writes `contents` to `name` inside `dir` and returns the full path.
pub fn write_test_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create test file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write test file");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_test_file() {
        let dir = temp_test_dir();
        let path = write_test_file(&dir, "grid.txt", "1 2\n3 4\n");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "1 2\n3 4\n");
    }
}
