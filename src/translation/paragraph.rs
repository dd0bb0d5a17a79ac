use crate::cleanup::Cleanup;
use crate::detect::SourceDetector;
use crate::document::Paragraph;
use crate::error::ParagraphError;
use crate::markup::{decode, encode};
use crate::protect::{PipelineOutcome, ProtectionPipeline};

/// Where a paragraph ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphOutcome {
    /// Blank or a single character.
    SkippedEmpty,
    /// Nothing in the text looks like the source language.
    SkippedNoSourceMarkers,
    /// A footnote mark, field or drawing sits between runs.
    SkippedAnchoredContent,
    /// The round trip produced the same tagged text.
    Unchanged,
    /// New runs were written; `warnings` spans or attributes were dropped.
    Applied { warnings: usize },
}

impl ParagraphOutcome {
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Drives one paragraph from detection to rewritten runs.
pub struct ParagraphTranslator<'a> {
    pipeline: ProtectionPipeline<'a>,
    cleanup: &'a Cleanup,
    detector: SourceDetector,
}

impl<'a> ParagraphTranslator<'a> {
    pub const fn new(
        pipeline: ProtectionPipeline<'a>,
        cleanup: &'a Cleanup,
        detector: SourceDetector,
    ) -> Self {
        Self {
            pipeline,
            cleanup,
            detector,
        }
    }

    pub const fn detector(&self) -> SourceDetector {
        self.detector
    }

    /// Translates `paragraph` in place.
    ///
    /// On error the paragraph is left exactly as it was.
    pub async fn translate(
        &self,
        paragraph: &mut Paragraph,
    ) -> Result<ParagraphOutcome, ParagraphError> {
        let text = paragraph.text();
        if text.trim().chars().count() < 2 {
            return Ok(ParagraphOutcome::SkippedEmpty);
        }
        if !self.detector.needs_translation(&text) {
            return Ok(ParagraphOutcome::SkippedNoSourceMarkers);
        }
        if paragraph.has_anchored_inline_content() {
            log::info!("Keeping paragraph with inline fields or marks as is: {text:?}");
            return Ok(ParagraphOutcome::SkippedAnchoredContent);
        }

        let tagged = encode(paragraph);
        if tagged.span_count() == 0 || tagged.text.trim().chars().count() < 2 {
            return Err(ParagraphError::EncodingFailure);
        }

        let translated = match self.pipeline.run(&tagged.text).await? {
            PipelineOutcome::Unchanged => return Ok(ParagraphOutcome::Unchanged),
            PipelineOutcome::Translated(text) => self.cleanup.apply(&text),
        };
        if translated == tagged.text {
            return Ok(ParagraphOutcome::Unchanged);
        }

        let decoded = decode(&translated, &tagged);
        if decoded.runs.is_empty() {
            return Err(ParagraphError::NothingDecoded);
        }
        for warning in &decoded.warnings {
            log::warn!("{warning}");
        }

        let warnings = decoded.warnings.len();
        decoded.apply_to(paragraph);
        Ok(ParagraphOutcome::Applied { warnings })
    }
}
