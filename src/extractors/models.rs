// src/extractors/models.rs
use serde::{Deserialize, Serialize};

/// Sentinel used for every field that could not be located in a segment.
pub const NOT_AVAILABLE: &str = "N/A";

/// One line of the table of contents: a dotted section number and its title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub number: String,      // e.g., "1.1.1.1"
    pub description: String, // e.g., "Ensure mounting of cramfs filesystems is disabled"
}

impl TocEntry {
    /// The literal string searched for in the normalized body text.
    pub fn anchor(&self) -> String {
        format!("{} {}", self.number, self.description)
    }
}

/// Audit outcome recorded for a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "PASSED")]
    Passed,
    #[serde(rename = "SKIPPED")]
    Skipped,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Status {
    /// Parses a status word regardless of case. Anything else is `None`.
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "FAILED" => Some(Status::Failed),
            "PASSED" => Some(Status::Passed),
            "SKIPPED" => Some(Status::Skipped),
            _ => None,
        }
    }
}

/// A single extracted finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub number: String,
    pub description: String,
    #[serde(rename = "type")]
    pub status: Status,
    pub info: String,
    pub solution: String,
    pub references: Vec<String>,
    pub audit_file: String,
    pub policy_value: String,
}

/// A TOC entry that produced no record because its anchor was not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub index: usize, // position of the entry in the parsed TOC
    pub number: String,
    pub description: String,
    pub anchor: String,
    pub reason: String,
}

/// Result of one extraction run: records in TOC order plus the entries that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedEntry>,
}
