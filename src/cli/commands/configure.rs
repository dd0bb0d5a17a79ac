//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Select, Text};

use crate::config::{
    ConfigFile, ConfigManager, DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE, DoctlConfig,
};
use crate::engine::EngineKind;
use crate::glossary::DEFAULT_CATEGORY;
use crate::translation::SUPPORTED_LANGUAGES;
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the current defaults and exits; otherwise asks for
/// the default engine, languages and glossary category.
pub fn run_configure(show: bool) -> Result<()> {
    if show {
        let manager = ConfigManager::new();
        let config = manager.load_or_default()?;
        print_current_defaults(&config);
        println!(
            "{} {}",
            Style::label("file"),
            Style::secondary(manager.config_path().display())
        );
        return Ok(());
    }
    handle_prompt_cancellation(run_configure_inner)
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new();
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config);

    let engine = select_engine(config.doctl.engine)?;
    let from = select_language(
        "Default source language:",
        config.doctl.from.as_deref().unwrap_or(DEFAULT_SOURCE_LANGUAGE),
    )?;
    let to = select_language(
        "Default target language:",
        config.doctl.to.as_deref().unwrap_or(DEFAULT_TARGET_LANGUAGE),
    )?;
    if from == to {
        bail!("Source and target language must differ (both are '{from}')");
    }
    let category = input_category(config.doctl.category.as_deref())?;

    config.doctl = DoctlConfig {
        engine: Some(engine),
        from: Some(from),
        to: Some(to),
        category: Some(category),
        glossary_db: config.doctl.glossary_db.take(),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_current_defaults(config: &ConfigFile) {
    let not_set = || Style::secondary("(not set)");
    let defaults = &config.doctl;

    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}     {}",
        Style::label("engine"),
        defaults.engine.map_or_else(not_set, Style::value)
    );
    println!(
        "  {}       {}",
        Style::label("from"),
        defaults.from.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}         {}",
        Style::label("to"),
        defaults.to.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}   {}",
        Style::label("category"),
        defaults.category.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}   {}",
        Style::label("glossary"),
        defaults
            .glossary_db
            .as_deref()
            .map_or_else(not_set, |path| Style::value(path.display()))
    );
    println!();
}

fn select_engine(default: Option<EngineKind>) -> Result<EngineKind> {
    let default_index = default
        .and_then(|d| EngineKind::ALL.iter().position(|engine| *engine == d))
        .unwrap_or(0);

    let selection = Select::new("Default engine:", EngineKind::ALL.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_language(message: &str, default: &str) -> Result<String> {
    // Build options with format "code - Name"
    let options: Vec<String> = SUPPORTED_LANGUAGES
        .iter()
        .map(|language| format!("{} - {}", language.code, language.name))
        .collect();

    let default_index = SUPPORTED_LANGUAGES
        .iter()
        .position(|language| language.code == default)
        .unwrap_or(0);

    let selection = Select::new(message, options)
        .with_starting_cursor(default_index)
        .prompt()?;

    let code = selection.split(" - ").next().unwrap_or(&selection);
    Ok(code.to_string())
}

fn input_category(default: Option<&str>) -> Result<String> {
    let category = Text::new("Default glossary category:")
        .with_default(default.unwrap_or(DEFAULT_CATEGORY))
        .with_help_message("Terms from this category are applied to every document")
        .prompt()?;

    let category = category.trim();
    if category.is_empty() {
        bail!("Category cannot be empty");
    }
    Ok(category.to_string())
}
