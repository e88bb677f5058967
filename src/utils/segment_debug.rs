// src/utils/segment_debug.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::normalize::normalize_text;
use crate::extractors::segment::segment_body;
use crate::extractors::toc::parse_toc;
use crate::utils::error::AppError;

/// Writes `text` to `path` with every highlighted span wrapped in markers.
/// Each highlight is `(start, end, label)` in byte offsets of `text`.
pub fn save_debug_text(text: &str, path: &Path, highlights: &[(usize, usize, &str)]) -> Result<(), AppError> {
    let mut annotated = String::with_capacity(text.len() + highlights.len() * 32);

    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    for (start, end, label) in sorted_highlights {
        // Overlapping or out-of-range spans are dropped rather than mangling the output
        if start < last_pos || end > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            tracing::debug!("Skipping debug highlight {}..{} ({})", start, end, label);
            continue;
        }

        annotated.push_str(&text[last_pos..start]);
        annotated.push_str(&format!("\n\n[[{} @{}-{}]] ", label, start, end));
        annotated.push_str(&text[start..end]);
        annotated.push_str(" [[/]]");

        last_pos = end;
    }

    annotated.push_str(&text[last_pos..]);
    annotated.push('\n');

    fs::write(path, annotated)?;
    tracing::info!("Saved debug text to {}", path.display());
    Ok(())
}

/// Saves the normalized body and a copy with every located anchor highlighted
/// into `debug_dir`, so unmatched TOC entries can be compared against the text.
pub fn create_segment_debug(toc_text: &str, body_text: &str, debug_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(debug_dir)?;

    let body = normalize_text(body_text);
    let entries = parse_toc(toc_text);
    let segmentation = segment_body(&entries, &body)?;

    let normalized_path = debug_dir.join("normalized_body.txt");
    fs::write(&normalized_path, &body)?;

    let labels: Vec<String> = segmentation
        .segments
        .iter()
        .map(|segment| format!("#{} {}", segment.index, segment.entry.number))
        .collect();
    let highlights: Vec<(usize, usize, &str)> = segmentation
        .segments
        .iter()
        .zip(&labels)
        .map(|(segment, label)| (segment.start, segment.start + segment.entry.anchor().len(), label.as_str()))
        .collect();

    let annotated_path = debug_dir.join("annotated_body.txt");
    save_debug_text(&body, &annotated_path, &highlights)?;

    let mut paths = vec![normalized_path, annotated_path];

    if !segmentation.skipped.is_empty() {
        let skipped_path = debug_dir.join("skipped_entries.txt");
        let listing: String = segmentation
            .skipped
            .iter()
            .map(|skipped| format!("#{}\t{}\n", skipped.index, skipped.anchor))
            .collect();
        fs::write(&skipped_path, listing)?;
        paths.push(skipped_path);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_debug_text_marks_spans() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        save_debug_text("aaa 1.1 X bbb", &path, &[(4, 9, "#0 1.1")]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "aaa \n\n[[#0 1.1 @4-9]] 1.1 X [[/]] bbb\n");
    }

    #[test]
    fn test_save_debug_text_drops_overlaps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        save_debug_text("abcdef", &path, &[(0, 4, "a"), (2, 5, "b"), (3, 99, "c")]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "\n\n[[a @0-4]] abcd [[/]]ef\n");
    }

    #[test]
    fn test_create_segment_debug_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let toc = "• 1.1 Found ...... 1\n• 1.2 Lost ...... 2\n";
        let body = "1.1 Found\nInfo x";

        let paths = create_segment_debug(toc, body, dir.path()).unwrap();
        assert_eq!(paths.len(), 3);

        let normalized = fs::read_to_string(dir.path().join("normalized_body.txt")).unwrap();
        assert_eq!(normalized, "1.1 Found Info x");

        let annotated = fs::read_to_string(dir.path().join("annotated_body.txt")).unwrap();
        assert!(annotated.contains("[[#0 1.1 @0-9]] 1.1 Found [[/]] Info x"));

        let skipped = fs::read_to_string(dir.path().join("skipped_entries.txt")).unwrap();
        assert_eq!(skipped, "#1\t1.2 Lost\n");
    }
}
