//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// Engine listing command handler.
pub mod engines;

/// Glossary management command handler.
pub mod glossary;

/// Document translation command handler.
pub mod translate;
