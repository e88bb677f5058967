// src/extractors/fields.rs
use crate::extractors::models::{Record, Status, TocEntry, NOT_AVAILABLE};
use once_cell::sync::Lazy;
use regex::Regex;

// --- Status Markers (Lazy Static) ---
static STATUS_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\* (FAILED|PASSED|SKIPPED) \*\*").expect("Failed to compile STATUS_MARKER_RE")
});

// Some exports print the outcome right after the Policy Value label instead of a marker.
// The status must be a whole word: "failed_login_attempts" or "Passed-through" are values.
static POLICY_VALUE_STATUS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Policy Value\s+(FAILED|PASSED|SKIPPED)(?:\s|$)").expect("Failed to compile POLICY_VALUE_STATUS_RE")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Info,
    Solution,
    References,
    AuditFile,
    PolicyValue,
}

/// A labeled block: its value runs from after `label` to the earliest terminator.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub label: &'static str,
    pub terminators: &'static [&'static str],
}

pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule { field: Field::Info, label: "Info", terminators: &["Solution"] },
    FieldRule { field: Field::Solution, label: "Solution", terminators: &["See Also", "References"] },
    FieldRule { field: Field::References, label: "References", terminators: &["Audit File", "References"] },
    FieldRule { field: Field::AuditFile, label: "Audit File", terminators: &["Policy Value"] },
    FieldRule { field: Field::PolicyValue, label: "Policy Value", terminators: &["Hosts"] },
];

impl FieldRule {
    /// Applies the rule to `segment`. Only the first occurrence of the label counts.
    pub fn apply<'s>(&self, segment: &'s str) -> Option<&'s str> {
        let label_pos = segment.find(self.label)?;
        let rest = &segment[label_pos + self.label.len()..];
        let value = rest.trim_start();

        let end = self
            .terminators
            .iter()
            .filter_map(|terminator| value.find(terminator))
            .min()
            .unwrap_or(value.len());

        Some(value[..end].trim())
    }
}

/// Finds the audit outcome of a segment.
pub fn extract_status(segment: &str) -> Status {
    STATUS_MARKER_RE
        .captures(segment)
        .or_else(|| POLICY_VALUE_STATUS_RE.captures(segment))
        .and_then(|caps| Status::from_word(&caps[1]))
        .unwrap_or(Status::NotAvailable)
}

/// Builds a record for `entry` from its segment. Absent fields become "N/A".
pub fn extract_record(entry: &TocEntry, segment: &str) -> Record {
    let mut record = Record {
        number: entry.number.clone(),
        description: entry.description.clone(),
        status: extract_status(segment),
        info: NOT_AVAILABLE.to_string(),
        solution: NOT_AVAILABLE.to_string(),
        references: vec![NOT_AVAILABLE.to_string()],
        audit_file: NOT_AVAILABLE.to_string(),
        policy_value: NOT_AVAILABLE.to_string(),
    };

    for rule in FIELD_RULES {
        let Some(value) = rule.apply(segment) else {
            continue;
        };
        match rule.field {
            Field::Info => record.info = value.to_string(),
            Field::Solution => record.solution = value.to_string(),
            Field::References => record.references = split_references(value),
            Field::AuditFile => record.audit_file = value.to_string(),
            Field::PolicyValue => record.policy_value = value.to_string(),
        }
    }

    record
}

// One reference per surviving line break
fn split_references(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
