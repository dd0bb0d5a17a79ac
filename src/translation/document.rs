use crate::cleanup::Cleanup;
use crate::detect::SourceDetector;
use crate::document::{Block, Cell, Document, Paragraph};
use crate::engine::Translator;
use crate::glossary::{GlossaryProtector, TermTable};
use crate::protect::ProtectionPipeline;
use crate::ui::PassBar;

use super::paragraph::ParagraphTranslator;

const SYMBOL_FONTS: &[&str] = &["Wingdings", "Symbol", "Webdings"];
const SYMBOL_GLYPHS: &[&str] = &["✔", "✓", "❌", "✗", "●", "○"];

/// Paragraphs rewritten by each pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationReport {
    pub paragraphs: usize,
    pub cells: usize,
    pub final_pass: usize,
    /// Paragraphs left untouched because of an error.
    pub failed: usize,
}

impl TranslationReport {
    pub const fn translated(&self) -> usize {
        self.paragraphs + self.cells + self.final_pass
    }
}

/// Translates a whole document in three passes: body paragraphs, table
/// cells, then a final sweep over anything that still looks untranslated.
pub struct DocumentTranslator<'a> {
    translator: &'a dyn Translator,
    terms: TermTable,
    source: String,
    target: String,
    show_progress: bool,
}

impl<'a> DocumentTranslator<'a> {
    pub fn new(
        translator: &'a dyn Translator,
        terms: TermTable,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            translator,
            terms,
            source: source.into(),
            target: target.into(),
            show_progress: false,
        }
    }

    #[must_use]
    pub const fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub async fn translate(&self, doc: &mut Document) -> TranslationReport {
        let glossary = GlossaryProtector::new(&self.terms);
        let cleanup = Cleanup::new(&self.terms);
        let pipeline =
            ProtectionPipeline::new(&glossary, self.translator, &self.source, &self.target);
        let paragraphs = ParagraphTranslator::new(
            pipeline,
            &cleanup,
            SourceDetector::for_language(&self.source),
        );
        log::info!(
            "Translating {} -> {} with {} ({} glossary terms)",
            self.source,
            self.target,
            self.translator.name(),
            self.terms.len()
        );

        let mut report = TranslationReport::default();

        let bar = PassBar::new("Paragraphs", doc.paragraphs().count(), self.show_progress);
        for paragraph in doc.paragraphs_mut() {
            if run_one(&paragraphs, paragraph, &mut report.failed).await {
                report.paragraphs += 1;
            }
            bar.inc();
        }
        bar.finish();

        let cell_count = doc.tables().flat_map(|t| &t.rows).map(|r| r.cells.len()).sum();
        let bar = PassBar::new("Tables", cell_count, self.show_progress);
        for table in doc.tables_mut() {
            for cell in table.rows.iter_mut().flat_map(|row| &mut row.cells) {
                if !should_skip_cell(cell) {
                    for paragraph in &mut cell.paragraphs {
                        if run_one(&paragraphs, paragraph, &mut report.failed).await {
                            report.cells += 1;
                        }
                    }
                }
                bar.inc();
            }
        }
        bar.finish();

        let detector = paragraphs.detector();
        let mut pending: Vec<&mut Paragraph> = Vec::new();
        for block in &mut doc.blocks {
            match block {
                Block::Paragraph(paragraph) => pending.push(paragraph),
                Block::Table(table) => pending.extend(
                    table
                        .rows
                        .iter_mut()
                        .flat_map(|row| &mut row.cells)
                        .flat_map(|cell| &mut cell.paragraphs),
                ),
                Block::Opaque(_) => {}
            }
        }
        pending.retain(|p| detector.needs_translation(&p.text()));
        log::debug!("Final pass: {} paragraphs still need translation", pending.len());

        let bar = PassBar::new("Final pass", pending.len(), self.show_progress);
        for paragraph in pending {
            if run_one(&paragraphs, paragraph, &mut report.failed).await {
                report.final_pass += 1;
            }
            bar.inc();
        }
        bar.finish();

        report
    }
}

async fn run_one(
    translator: &ParagraphTranslator<'_>,
    paragraph: &mut Paragraph,
    failed: &mut usize,
) -> bool {
    match translator.translate(paragraph).await {
        Ok(outcome) => outcome.is_applied(),
        Err(e) => {
            log::warn!("Paragraph left untouched: {e} ({})", preview(&paragraph.text()));
            *failed += 1;
            false
        }
    }
}

fn preview(text: &str) -> String {
    let mut preview: String = text.chars().take(50).collect();
    if text.chars().count() > 50 {
        preview.push('…');
    }
    preview
}

/// Cells holding check marks, bullets or symbol-font runs are left alone.
pub fn should_skip_cell(cell: &Cell) -> bool {
    cell.runs().any(|r| {
        let run = r.run;
        run.style
            .font_name
            .as_deref()
            .is_some_and(|font| SYMBOL_FONTS.contains(&font))
            || SYMBOL_GLYPHS.contains(&run.text.trim())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::document::{Row, Run, RunStyle, Table};
    use crate::engine::{MockMode, MockTranslator};

    fn plain(text: &str) -> Run {
        Run::new(text, RunStyle::default())
    }

    fn cell(runs: Vec<Run>) -> Cell {
        Cell {
            paragraphs: vec![Paragraph::from_runs(runs)],
        }
    }

    fn sample() -> Document {
        Document {
            blocks: vec![
                Block::Paragraph(Paragraph::from_runs([plain("Düşük maliyet")])),
                Block::Paragraph(Paragraph::from_runs([plain("Already English")])),
                Block::Table(Table {
                    rows: vec![Row {
                        cells: vec![
                            cell(vec![plain("Yüksek")]),
                            cell(vec![plain("✔")]),
                            cell(vec![plain("Evet "), plain("✓")]),
                        ],
                    }],
                    source: None,
                }),
            ],
        }
    }

    #[test]
    fn test_should_skip_cell() {
        assert!(should_skip_cell(&cell(vec![plain(" ✔ ")])));
        let wingdings = RunStyle {
            font_name: Some("Wingdings".to_string()),
            ..RunStyle::default()
        };
        assert!(should_skip_cell(&cell(vec![Run::new("ü", wingdings)])));
        assert!(!should_skip_cell(&cell(vec![plain("✔ tamam")])));
    }

    #[tokio::test]
    async fn test_three_passes() {
        let translator = MockTranslator::new(MockMode::Uppercase);
        let mut doc = sample();
        let report = DocumentTranslator::new(&translator, TermTable::default(), "tr", "en")
            .translate(&mut doc)
            .await;

        // Upper-cased Turkish still carries Turkish letters, so the final
        // pass sees the body paragraph and the translated cell again; both
        // come back unchanged. The skipped symbol cell is picked up there.
        assert_eq!(report.paragraphs, 1);
        assert_eq!(report.cells, 1);
        assert_eq!(report.final_pass, 1);
        assert_eq!(report.failed, 0);

        let texts: Vec<String> = doc.paragraphs().map(Paragraph::text).collect();
        assert_eq!(texts, vec!["DÜŞÜK MALIYET", "Already English"]);
        let cells: Vec<String> = doc
            .tables()
            .flat_map(|t| &t.rows[0].cells)
            .map(Cell::text)
            .collect();
        assert_eq!(cells, vec!["YÜKSEK", "✔", "EVET ✓"]);
    }

    #[tokio::test]
    async fn test_final_pass_is_idempotent() {
        let translator = MockTranslator::new(MockMode::Identity);
        let mut doc = sample();
        let driver = DocumentTranslator::new(&translator, TermTable::default(), "tr", "en");
        let first = driver.translate(&mut doc).await;
        let second = driver.translate(&mut doc).await;
        assert_eq!(first.translated(), 0);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_failures_are_counted_not_fatal() {
        let translator = MockTranslator::new(MockMode::Empty);
        let mut doc = sample();
        let report = DocumentTranslator::new(&translator, TermTable::default(), "tr", "en")
            .translate(&mut doc)
            .await;
        assert_eq!(report.translated(), 0);
        assert!(report.failed > 0);
        assert_eq!(doc.paragraphs().next().unwrap().text(), "Düşük maliyet");
    }
}
