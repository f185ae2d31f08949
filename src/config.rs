use std::path::PathBuf;

/// Namespace prefixed to every generated key
pub const DEFAULT_NAMESPACE: &str = "ftbq_keygen";

/// Extension of FTB Quests quest definition files
pub const DEFAULT_EXTENSION: &str = "snbt";

/// Where the merged localization table is written
pub const DEFAULT_OUTPUT_PATH: &str = "lang.json";

/// Run-wide settings shared by discovery, processing and output
#[derive(Debug, Clone)]
pub struct KeygenConfig {
    /// Prefix of every key, `<namespace>.<hex>`
    pub namespace: String,
    /// File extension (without the dot) picked up during discovery
    pub extension: String,
    /// Path of the JSON localization table
    pub output_path: PathBuf,
    /// Maximum number of files processed at the same time
    pub workers: usize,
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            workers: num_cpus::get().max(1),
        }
    }
}

impl KeygenConfig {
    /// Worker count clamped to at least one
    pub fn worker_count(&self) -> usize {
        self.workers.max(1)
    }
}
