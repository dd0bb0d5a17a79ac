use std::sync::LazyLock;

use regex::Regex;

use super::{PlaceholderKind, PlaceholderMap};
use crate::engine::Translator;
use crate::error::ParagraphError;
use crate::glossary::GlossaryProtector;
use crate::markup::tokenize;

#[allow(clippy::expect_used)]
static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid space pattern"));

/// Replaces each run of two or more spaces with a key flanked by single
/// spaces.
pub fn mask_whitespace(text: &str) -> (String, PlaceholderMap) {
    let mut map = PlaceholderMap::new();
    let masked = SPACE_RUN
        .replace_all(text, |caps: &regex::Captures<'_>| {
            format!(" {} ", map.insert(PlaceholderKind::Whitespace, &caps[0]))
        })
        .into_owned();
    (masked, map)
}

/// Replaces every span marker and inline tag with a key.
pub fn mask_tags(text: &str) -> (String, PlaceholderMap) {
    let mut map = PlaceholderMap::new();
    let mut masked = String::with_capacity(text.len());
    for token in tokenize(text) {
        if token.kind.is_markup() {
            masked.push_str(&map.insert(PlaceholderKind::Tag, token.raw));
        } else {
            masked.push_str(token.raw);
        }
    }
    (masked, map)
}

/// A tagged fragment with all three layers masked.
#[derive(Debug, Clone)]
pub struct Masked {
    pub text: String,
    whitespace: PlaceholderMap,
    tags: PlaceholderMap,
    glossary: PlaceholderMap,
}

impl Masked {
    /// Masks whitespace, then tags, then glossary terms.
    pub fn mask(tagged: &str, glossary: &GlossaryProtector) -> Self {
        let (text, whitespace) = mask_whitespace(tagged);
        let (text, tags) = mask_tags(&text);
        let (text, glossary) = glossary.protect(&text);
        Self {
            text,
            whitespace,
            tags,
            glossary,
        }
    }

    pub fn placeholder_count(&self) -> usize {
        self.whitespace.len() + self.tags.len() + self.glossary.len()
    }

    /// Restores glossary terms, then tags, then whitespace.
    pub fn unmask(&self, translated: &str) -> String {
        self.report_missing(translated);
        let text = GlossaryProtector::restore(translated, &self.glossary);
        let text = self.tags.restore(&text);
        self.whitespace.restore_absorbing_whitespace(&text)
    }

    fn report_missing(&self, translated: &str) {
        for map in [&self.glossary, &self.tags, &self.whitespace] {
            for placeholder in map.missing_in(translated) {
                log::warn!("Engine dropped placeholder {placeholder}");
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Translated(String),
    /// The unwound text equals the input.
    Unchanged,
}

/// Runs one tagged fragment through mask, translate and unmask.
pub struct ProtectionPipeline<'a> {
    glossary: &'a GlossaryProtector,
    translator: &'a dyn Translator,
    source: &'a str,
    target: &'a str,
}

impl<'a> ProtectionPipeline<'a> {
    pub const fn new(
        glossary: &'a GlossaryProtector,
        translator: &'a dyn Translator,
        source: &'a str,
        target: &'a str,
    ) -> Self {
        Self {
            glossary,
            translator,
            source,
            target,
        }
    }

    pub async fn run(&self, tagged: &str) -> Result<PipelineOutcome, ParagraphError> {
        let masked = Masked::mask(tagged, self.glossary);
        log::debug!(
            "Masked {} placeholders: {}",
            masked.placeholder_count(),
            masked.text
        );

        let translated = self
            .translator
            .translate(&masked.text, self.source, self.target)
            .await;
        if translated.trim().is_empty() && !masked.text.trim().is_empty() {
            return Err(ParagraphError::TranslationEmpty);
        }

        let restored = masked.unmask(&translated);
        if restored == tagged {
            Ok(PipelineOutcome::Unchanged)
        } else {
            Ok(PipelineOutcome::Translated(restored))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::{MockMode, MockTranslator};
    use crate::glossary::TermTable;

    fn protector(protected: &[&str], forced: &[(&str, &str)]) -> GlossaryProtector {
        GlossaryProtector::new(&TermTable {
            protected: protected.iter().map(ToString::to_string).collect(),
            forced: forced
                .iter()
                .map(|(s, t)| ((*s).to_string(), (*t).to_string()))
                .collect(),
        })
    }

    #[test]
    fn test_mask_whitespace_flanks_key_with_single_spaces() {
        let (masked, map) = mask_whitespace("a  b   c d");
        assert_eq!(masked, "a [_WS_0_] b [_WS_1_] c d");
        assert_eq!(map.get("[_WS_1_]"), Some("   "));
    }

    #[test]
    fn test_mask_tags_covers_markers_and_inline_tags() {
        let (masked, map) = mask_tags("[R0]<b>Evet</b>[/R0]");
        assert_eq!(masked, "[_TG_0_][_TG_1_]Evet[_TG_2_][_TG_3_]");
        assert_eq!(map.len(), 4);
        assert_eq!(map.get("[_TG_1_]"), Some("<b>"));
    }

    #[test]
    fn test_mask_then_unmask_is_identity() {
        let glossary = protector(&["SAP"], &[]);
        let tagged = r#"[R0]<b>SAP  kurulumu</b>[/R0][R1]<c rgb="FF0000">tamam</c>[/R1]"#;
        let masked = Masked::mask(tagged, &glossary);
        assert!(!masked.text.contains('<'));
        assert!(!masked.text.contains("[R"));
        assert_eq!(masked.unmask(&masked.text), tagged);
    }

    #[tokio::test]
    async fn test_double_spaces_survive_with_bold_wrapper() {
        let glossary = GlossaryProtector::default();
        let translator = MockTranslator::new(MockMode::Identity);
        let pipeline = ProtectionPipeline::new(&glossary, &translator, "tr", "en");
        let tagged = "[R0]<b>Kriter  çok  önemli</b>[/R0]";

        let sent = Masked::mask(tagged, &glossary).text;
        assert_eq!(sent, "[_TG_0_][_TG_1_]Kriter [_WS_0_] çok [_WS_1_] önemli[_TG_2_][_TG_3_]");

        assert_eq!(pipeline.run(tagged).await, Ok(PipelineOutcome::Unchanged));
        assert_eq!(translator.calls(), vec![sent]);
    }

    #[tokio::test]
    async fn test_double_spaces_survive_translation() {
        let glossary = GlossaryProtector::default();
        let translator = MockTranslator::new(MockMode::Replace(vec![
            ("Kriter".to_string(), "Criterion".to_string()),
            ("çok".to_string(), "very".to_string()),
            ("önemli".to_string(), "important".to_string()),
        ]));
        let pipeline = ProtectionPipeline::new(&glossary, &translator, "tr", "en");

        let outcome = pipeline.run("[R0]<b>Kriter  çok  önemli</b>[/R0]").await;
        assert_eq!(
            outcome,
            Ok(PipelineOutcome::Translated(
                "[R0]<b>Criterion  very  important</b>[/R0]".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_permuted_tag_keys_restore_every_tag() {
        let glossary = GlossaryProtector::default();
        let translator = MockTranslator::new(MockMode::ReversePlaceholders);
        let pipeline = ProtectionPipeline::new(&glossary, &translator, "tr", "en");
        let tagged = "[R0]<b>bir</b>[/R0][R1]iki[/R1]";

        let Ok(PipelineOutcome::Translated(out)) = pipeline.run(tagged).await else {
            panic!("expected a changed fragment");
        };
        assert_eq!(out, "[/R1][R1]bir[/R0]</b><b>iki[R0]");
        for tag in ["[R0]", "[/R0]", "<b>", "</b>", "[R1]", "[/R1]"] {
            assert_eq!(out.matches(tag).count(), 1, "{tag}");
        }
    }

    #[tokio::test]
    async fn test_damaged_keys_are_still_restored() {
        let glossary = protector(&["SAP"], &[("Evet", "Yes")]);
        let translator = MockTranslator::new(MockMode::DamagePlaceholders);
        let pipeline = ProtectionPipeline::new(&glossary, &translator, "tr", "en");

        let outcome = pipeline.run("[R0]Evet  SAP[/R0]").await.unwrap();
        assert_eq!(
            outcome,
            PipelineOutcome::Translated("[R0]Yes  SAP[/R0]".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_translation_is_an_error() {
        let glossary = GlossaryProtector::default();
        let translator = MockTranslator::new(MockMode::Empty);
        let pipeline = ProtectionPipeline::new(&glossary, &translator, "tr", "en");
        assert_eq!(
            pipeline.run("[R0]Merhaba[/R0]").await,
            Err(ParagraphError::TranslationEmpty)
        );
    }

    #[tokio::test]
    async fn test_forced_terms_replace_engine_output() {
        let glossary = protector(&[], &[("Orta", "Medium")]);
        let translator = MockTranslator::new(MockMode::Identity);
        let pipeline = ProtectionPipeline::new(&glossary, &translator, "tr", "en");

        let outcome = pipeline.run("[R0]Orta[/R0][R1]Ortam[/R1]").await.unwrap();
        assert_eq!(
            outcome,
            PipelineOutcome::Translated("[R0]Medium[/R0][R1]Ortam[/R1]".to_string())
        );
    }
}
