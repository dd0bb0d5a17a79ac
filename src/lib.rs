//! # doctl - Word Document Translation CLI
//!
//! `doctl` translates `.docx` files through a machine translation engine
//! while keeping run formatting, hyperlinks, whitespace and glossary terms
//! intact.
//!
//! ## How it works
//!
//! Each paragraph is encoded as text with `[Rn]...[/Rn]` span markers, one
//! per run. Before the text reaches the engine, three protection layers
//! replace runs of spaces, markup tokens and glossary terms with opaque
//! placeholders. The translation is restored layer by layer, lightly
//! cleaned up, decoded back into runs and written into the document with
//! the original run styles.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate Turkish to English (the defaults)
//! doctl ./Teklif.docx
//!
//! # Use DeepL with a key from the environment
//! DEEPL_API_KEY=... doctl --engine deepl --to de ./Teklif.docx
//!
//! # Keep a product name untranslated
//! doctl glossary add Kubernetes --category Technology
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/doctl/config.toml`:
//!
//! ```toml
//! [doctl]
//! engine = "google"
//! from = "tr"
//! to = "en"
//! category = "general"
//!
//! [engines.deepl]
//! api_key_env = "DEEPL_API_KEY"
//! ```

/// Normalization of engine output (typo fixes, split camel-case joins).
pub mod cleanup;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and engine settings.
pub mod config;

/// Source-language detection.
pub mod detect;

/// DOCX container and the paragraph/run document model.
pub mod document;

/// Translation engines (Google, `DeepL`) behind a common trait.
pub mod engine;

/// Error taxonomy for paragraph translation.
pub mod error;

/// File system utilities.
pub mod fs;

/// Glossary terms, their `SQLite` store and the glossary protection layer.
pub mod glossary;

/// Input validation for `.docx` files.
pub mod input;

/// Run-tagged paragraph encoding and decoding.
pub mod markup;

/// Global output configuration (quiet mode, colors, logging).
pub mod output;

/// XDG-style path utilities for configuration and data.
pub mod paths;

/// Placeholder protection layers around the engine call.
pub mod protect;

/// Paragraph and document translation drivers.
pub mod translation;

/// Terminal UI components (progress bars, colors).
pub mod ui;
