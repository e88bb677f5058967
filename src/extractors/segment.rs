// src/extractors/segment.rs
use crate::extractors::models::{SkippedEntry, TocEntry};
use crate::utils::error::ExtractError;

/// A slice of the normalized body that belongs to one TOC entry.
/// `text` starts with the entry's own anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub index: usize,
    pub entry: &'a TocEntry,
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

#[derive(Debug, Default)]
pub struct Segmentation<'a> {
    pub segments: Vec<Segment<'a>>,
    pub skipped: Vec<SkippedEntry>,
}

/// Carves `body` into per-entry segments using each entry's anchor.
///
/// Anchors are searched strictly forward from the end of the last anchor that
/// was found, so an entry can never resolve to text before its predecessor.
/// An entry whose anchor is missing is dropped and reported in `skipped`; the
/// cursor stays where it was.
pub fn segment_body<'a>(entries: &'a [TocEntry], body: &'a str) -> Result<Segmentation<'a>, ExtractError> {
    let anchors: Vec<String> = entries.iter().map(TocEntry::anchor).collect();
    let mut result = Segmentation::default();
    let mut cursor = 0;

    for (index, entry) in entries.iter().enumerate() {
        let anchor = &anchors[index];

        let Some(start) = find_from(body, anchor, cursor) else {
            tracing::warn!(index, number = %entry.number, anchor = %anchor, "Could not find TOC entry in body text, skipping");
            result.skipped.push(SkippedEntry {
                index,
                number: entry.number.clone(),
                description: entry.description.clone(),
                anchor: anchor.clone(),
                reason: format!("anchor \"{}\" not found in body text", anchor),
            });
            continue;
        };

        let anchor_end = start + anchor.len();
        let end = anchors
            .get(index + 1)
            .and_then(|next| find_from(body, next, anchor_end))
            .unwrap_or(body.len());

        let text = body
            .get(start..end)
            .ok_or(ExtractError::InvalidSegment { start, end })?;

        tracing::trace!(index, start, end, "Located segment for {}", anchor);
        result.segments.push(Segment { index, entry, start, end, text });
        cursor = anchor_end;
    }

    tracing::debug!(
        "Segmented body into {} segments ({} entries skipped)",
        result.segments.len(),
        result.skipped.len()
    );
    Ok(result)
}

/// Byte offset of the first `needle` at or after `from`.
fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|pos| from + pos)
}
