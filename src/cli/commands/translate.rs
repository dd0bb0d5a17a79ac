use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::document::DocxPackage;
use crate::engine::{EngineKind, build_translator};
use crate::glossary::GlossaryStore;
use crate::input::InputReader;
use crate::status;
use crate::translation::{DocumentTranslator, TranslationReport};
use crate::ui::Style;

pub struct TranslateOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub engine: Option<EngineKind>,
    pub key: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
    pub db: Option<PathBuf>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let config_file = ConfigManager::new().load_or_default()?;
    let config = resolve_config(
        &ResolveOptions {
            engine: options.engine,
            api_key: options.key,
            from: options.from,
            to: options.to,
            category: options.category,
            glossary_db: options.db,
        },
        &config_file,
    )?;

    let bytes = InputReader::read(&options.input)?;
    let output = options
        .output
        .unwrap_or_else(|| InputReader::default_output_path(&options.input));
    if output == options.input {
        bail!(
            "Output would overwrite the input: {}\n\n\
             Choose another path with: doctl -o <file> {}",
            output.display(),
            options.input.display()
        );
    }

    let package = DocxPackage::from_bytes(&bytes)
        .with_context(|| format!("Failed to open DOCX: {}", options.input.display()))?;
    let mut doc = package.document()?;

    let store = GlossaryStore::open(&config.glossary_db)?;
    let terms = store.category_terms(&config.category)?;
    let translator = build_translator(&config)?;

    status!(
        "Translating {} ({} → {}, {}, category {})",
        Style::value(options.input.display()),
        Style::code(&config.source_language),
        Style::code(&config.target_language),
        translator.name(),
        Style::value(&config.category),
    );

    let report = DocumentTranslator::new(
        translator.as_ref(),
        terms,
        &config.source_language,
        &config.target_language,
    )
    .with_progress(true)
    .translate(&mut doc)
    .await;

    package.save(&doc, &output)?;
    print_summary(&report, &output);

    Ok(())
}

fn print_summary(report: &TranslationReport, output: &std::path::Path) {
    status!(
        "{} Translated {} paragraphs ({} body, {} table cells, {} final pass)",
        Style::success("✓"),
        report.translated(),
        report.paragraphs,
        report.cells,
        report.final_pass,
    );
    if report.failed > 0 {
        status!(
            "{} {} paragraphs were left untranslated (run with -v for details)",
            Style::warning("Warning:"),
            report.failed
        );
    }
    status!("Saved to {}", Style::secondary(output.display()));
}
