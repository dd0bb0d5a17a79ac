//! Error taxonomy for the translation pipeline.
//!
//! Nothing here is fatal at the document level: paragraph errors abort a
//! single paragraph, decode warnings skip a single span or attribute, and
//! engine errors never leave the engine that produced them.

use thiserror::Error;

/// Reasons a single paragraph is left untouched.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ParagraphError {
    /// Tagging produced empty or degenerate output.
    #[error("tagging produced no usable markup")]
    EncodingFailure,

    /// The engine answered with nothing for non-empty input.
    #[error("translation engine returned an empty result")]
    TranslationEmpty,

    /// No span marker pair survived the round trip, so decoding would erase the paragraph.
    #[error("no run span survived translation")]
    NothingDecoded,
}

/// A single style attribute that could not be written back to a run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot apply {attribute}: {reason}")]
pub struct StyleApplicationError {
    /// Attribute name as it appears in `RunStyle`.
    pub attribute: &'static str,
    /// Why the captured value was rejected.
    pub reason: String,
}

impl StyleApplicationError {
    pub fn new(attribute: &'static str, reason: impl Into<String>) -> Self {
        Self {
            attribute,
            reason: reason.into(),
        }
    }
}

/// Recoverable problems found while decoding a translated paragraph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeWarning {
    /// A span references a run index with no captured style.
    #[error("run index {index} out of range ({available} captured styles), span skipped")]
    IndexOutOfRange { index: usize, available: usize },

    /// One attribute was dropped; the run itself was kept.
    #[error("run {index}: {source}")]
    Style {
        index: usize,
        #[source]
        source: StyleApplicationError,
    },
}

/// Failures talking to a translation service.
///
/// Engines catch these at their boundary and degrade to a fallback engine or
/// to the untranslated input.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Connection failure, timeout or unreadable body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("service responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A 2xx response whose body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Response(String),
}
