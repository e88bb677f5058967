// src/extractors/toc.rs
use crate::extractors::models::TocEntry;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns for TOC Lines (Lazy Static) ---
// "• 1.1.1.1 Ensure mounting of cramfs filesystems is disabled ........ 12"
// The title never crosses a line; the gaps around it may.
static BULLETED_TOC_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)•\s*(\d+(?:\.\d+)+)\s+([^\n]+?)\s*\.{3,}\s*\d+")
        .expect("Failed to compile BULLETED_TOC_LINE_RE")
});

// Same structure for TOC dumps that lost their bullet glyphs
static PLAIN_TOC_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(\d+(?:\.\d+)+)\s+([^\n]+?)\s*\.{3,}\s*\d+")
        .expect("Failed to compile PLAIN_TOC_LINE_RE")
});

static LEADER_AND_PAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.{3,}\s*\d+").expect("Failed to compile LEADER_AND_PAGE_RE")
});

/// Parses TOC text into ordered entries. Duplicates are kept as separate entries.
pub fn parse_toc(toc_text: &str) -> Vec<TocEntry> {
    let mut entries = collect_entries(&BULLETED_TOC_LINE_RE, toc_text);

    if entries.is_empty() {
        tracing::debug!("No bulleted TOC lines found, retrying without bullet markers");
        entries = collect_entries(&PLAIN_TOC_LINE_RE, toc_text);
    }

    tracing::debug!("Parsed {} TOC entries", entries.len());
    entries
}

fn collect_entries(pattern: &Regex, toc_text: &str) -> Vec<TocEntry> {
    pattern
        .captures_iter(toc_text)
        .map(|caps| {
            let title = LEADER_AND_PAGE_RE.replace_all(&caps[2], "");
            TocEntry {
                number: caps[1].trim().to_string(),
                description: title.trim().to_string(),
            }
        })
        .collect()
}
