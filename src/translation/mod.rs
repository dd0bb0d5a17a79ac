mod document;
mod language;
mod paragraph;

pub use document::{DocumentTranslator, TranslationReport, should_skip_cell};
pub use language::{
    Language, SUPPORTED_LANGUAGES, find_language, print_languages, validate_language,
};
pub use paragraph::{ParagraphOutcome, ParagraphTranslator};
