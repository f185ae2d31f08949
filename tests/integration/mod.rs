// Integration test utilities and common code

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture helper for creating temporary ftbquests folders
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a quest file (or any file) relative to the fixture root
    pub fn create_quest_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Read a file back as text
    pub fn read<P: AsRef<Path>>(&self, relative_path: P) -> String {
        fs::read_to_string(self.root_path.join(relative_path)).expect("Failed to read test file")
    }
}

/// Pull every `{<namespace>.<hex>}` key out of rewritten content, in order
pub fn reference_keys(content: &str, namespace: &str) -> Vec<String> {
    let prefix = format!("{{{namespace}.");
    let mut keys = Vec::new();
    let mut rest = content;
    while let Some(start) = rest.find(&prefix) {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                keys.push(after[..end].to_string());
                rest = &after[end..];
            }
            None => break,
        }
    }
    keys
}
