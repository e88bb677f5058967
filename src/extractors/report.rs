// src/extractors/report.rs
use crate::extractors::fields::extract_record;
use crate::extractors::models::Extraction;
use crate::extractors::normalize::normalize_text;
use crate::extractors::segment::segment_body;
use crate::extractors::toc::parse_toc;
use crate::utils::error::ExtractError;

/// Turns a TOC block plus the extracted body text of an audit report into records.
/// Holds no state; a single instance can serve any number of callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportExtractor;

impl ReportExtractor {
    pub fn new() -> Self { Self {} }

    /// Runs normalization, TOC parsing, segmentation and field extraction in order.
    ///
    /// Entries whose anchor is not present in the body are left out of
    /// `records` and listed in `skipped` instead; this never fails the call.
    pub fn extract(&self, toc_text: &str, body_text: &str) -> Result<Extraction, ExtractError> {
        let body = normalize_text(body_text);
        let entries = parse_toc(toc_text);
        tracing::info!("Extracting {} TOC entries from {} bytes of normalized text", entries.len(), body.len());

        if entries.is_empty() {
            tracing::warn!("No TOC entries recognized, nothing to extract");
            return Ok(Extraction::default());
        }

        let segmentation = segment_body(&entries, &body)?;
        let records = segmentation
            .segments
            .iter()
            .map(|segment| extract_record(segment.entry, segment.text))
            .collect::<Vec<_>>();

        tracing::info!(
            "Extracted {} records ({} TOC entries skipped)",
            records.len(),
            segmentation.skipped.len()
        );

        Ok(Extraction { records, skipped: segmentation.skipped })
    }
}
