//! Masking layers that shield markup and glossary terms from the engine.

mod pipeline;
mod placeholder;

pub use pipeline::{Masked, PipelineOutcome, ProtectionPipeline, mask_tags, mask_whitespace};
pub use placeholder::{Placeholder, PlaceholderKind, PlaceholderMap};
