// src/extractors/normalize.rs
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// Applied in declaration order; each pass feeds the next.

// "ID\n.IM" -> "ID.IM": a stop that landed at the start of the next physical line
static BROKEN_STOP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\n\s*\.\s*").expect("Failed to compile BROKEN_STOP_RE")
});

// "exam-\nple" -> "example"
static HYPHEN_WRAP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-\s*\n\s*").expect("Failed to compile HYPHEN_WRAP_RE")
});

static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\n\s*").expect("Failed to compile LINE_BREAK_RE")
});

static WHITESPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RUN_RE")
});

/// Canonicalizes extracted body text into a single line with single spaces.
pub fn normalize_text(raw: &str) -> String {
    let text = BROKEN_STOP_RE.replace_all(raw, ".");
    let text = HYPHEN_WRAP_RE.replace_all(&text, "");
    let text = LINE_BREAK_RE.replace_all(&text, " ");
    let text = WHITESPACE_RUN_RE.replace_all(&text, " ");
    text.trim().to_string()
}
