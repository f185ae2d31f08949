pub mod config;
pub mod discovery;
pub mod extraction;
pub mod keygen;
pub mod lang;
pub mod parallel_processing;
pub mod processor;

// Re-export main types for convenient access
pub use config::KeygenConfig;
pub use extraction::Extractor;
pub use keygen::{derive_key, reference_token, KeyGenerator};
pub use lang::{write_lang_file, CharCountTable, LangTable, Tables};

// Re-export the processing pipeline
pub use discovery::{discover_files, discover_files_async, validate_root, DiscoveredFiles, DiscoveryConfig};
pub use parallel_processing::{process_files_parallel, BatchReport, FileFailure};
pub use processor::{process_file, write_atomic, FileOutcome};
