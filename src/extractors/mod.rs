// src/extractors/mod.rs
pub mod fields;
pub mod models;
pub mod normalize;
pub mod report;
pub mod segment;
pub mod toc;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use models::{Extraction, Record, SkippedEntry, Status, TocEntry};
pub use report::ReportExtractor;
