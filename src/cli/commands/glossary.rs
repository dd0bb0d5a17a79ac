//! Glossary command handler for managing protected and forced terms.

use anyhow::{Result, bail};
use inquire::Confirm;
use std::path::PathBuf;

use crate::cli::GlossaryCommand;
use crate::config::{ConfigFile, ConfigManager};
use crate::glossary::{DEFAULT_CATEGORY, GlossaryStore, GlossaryTerm, TermKind};
use crate::paths;
use crate::ui::{Style, handle_prompt_cancellation};

/// Dispatches a glossary subcommand; no subcommand lists every term.
pub fn run_glossary(command: Option<GlossaryCommand>, db: Option<PathBuf>) -> Result<()> {
    let config = ConfigManager::new().load_or_default()?;
    let store = GlossaryStore::open(db_path(db, &config))?;
    let default_category = config
        .doctl
        .category
        .as_deref()
        .unwrap_or(DEFAULT_CATEGORY);

    match command {
        None => list_terms(&store, None, None),
        Some(GlossaryCommand::List { category, kind }) => {
            list_terms(&store, category.as_deref(), kind)
        }
        Some(GlossaryCommand::Add {
            source,
            target,
            kind,
            category,
        }) => add_term(
            &store,
            &source,
            target,
            kind,
            category.as_deref().unwrap_or(default_category),
        ),
        Some(GlossaryCommand::Remove {
            source,
            category,
            yes,
        }) => {
            let category = category.as_deref().unwrap_or(default_category);
            handle_prompt_cancellation(|| remove_term(&store, &source, category, yes))
        }
        Some(GlossaryCommand::Categories) => list_categories(&store),
    }
}

fn db_path(db: Option<PathBuf>, config: &ConfigFile) -> PathBuf {
    db.or_else(|| config.doctl.glossary_db.clone())
        .unwrap_or_else(paths::default_glossary_path)
}

fn list_terms(store: &GlossaryStore, category: Option<&str>, kind: Option<TermKind>) -> Result<()> {
    let terms = store.terms(category, kind)?;
    if terms.is_empty() {
        println!("No glossary terms found.");
        println!("Add one with: doctl glossary add <term> [--target <translation>]");
        return Ok(());
    }

    let width = terms
        .iter()
        .map(|term| term.source.chars().count())
        .max()
        .unwrap_or(0);

    let mut current_category: Option<&str> = None;
    for term in &terms {
        if current_category != Some(term.category.as_str()) {
            if current_category.is_some() {
                println!();
            }
            println!("{}", Style::header(&term.category));
            current_category = Some(term.category.as_str());
        }

        let source = format!("{:width$}", term.source);
        match &term.target {
            Some(target) if term.kind == TermKind::Forced => println!(
                "  {}  → {}",
                Style::value(source),
                Style::value(target)
            ),
            _ => println!(
                "  {}  {}",
                Style::value(source),
                Style::secondary("(protected)")
            ),
        }
    }

    Ok(())
}

fn add_term(
    store: &GlossaryStore,
    source: &str,
    target: Option<String>,
    kind: Option<TermKind>,
    category: &str,
) -> Result<()> {
    let source = source.trim();
    let target = target
        .map(|target| target.trim().to_string())
        .filter(|target| !target.is_empty());

    let term = match (kind, target) {
        (Some(TermKind::Protected), Some(_)) => {
            bail!("Protected terms are never translated; drop --target or use --kind forced")
        }
        (Some(TermKind::Forced), None) => {
            bail!("Forced terms need a translation: doctl glossary add {source} --target <text>")
        }
        (_, Some(target)) => GlossaryTerm::forced(source, target, category),
        (_, None) => GlossaryTerm::protected(source, category),
    };

    store.upsert(&term)?;

    println!(
        "{} {} term '{}' saved to {}",
        Style::success("✓"),
        term.kind,
        Style::value(&term.source),
        Style::value(category)
    );
    Ok(())
}

fn remove_term(store: &GlossaryStore, source: &str, category: &str, yes: bool) -> Result<()> {
    if store.get(source, category)?.is_none() {
        bail!("Term '{source}' not found in category '{category}'");
    }

    if !yes {
        let confirmed = Confirm::new(&format!("Remove '{source}' from '{category}'?"))
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete(source, category)?;
    println!(
        "{} Term '{}' removed",
        Style::success("✓"),
        Style::value(source)
    );
    Ok(())
}

fn list_categories(store: &GlossaryStore) -> Result<()> {
    let categories = store.categories()?;
    if categories.is_empty() {
        println!("No glossary categories found.");
        return Ok(());
    }

    println!("{}", Style::header("Glossary categories"));
    for (category, count) in categories {
        println!(
            "  {}  {}",
            Style::value(format!("{category:12}")),
            Style::secondary(format!("{count} terms"))
        );
    }
    Ok(())
}
