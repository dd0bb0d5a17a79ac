//! Translation engines.
//!
//! Every engine is a plain `text -> text` function behind [`Translator`].
//! Transport failures never leave an engine: it falls back to another
//! engine or hands the input back unchanged, and logs why.

mod deepl;
mod google;
mod mock;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ResolvedConfig;

pub use deepl::{DEEPL_DEFAULT_ENDPOINT, DeepLEngine};
pub use google::{GOOGLE_DEFAULT_ENDPOINT, GoogleEngine};
pub use mock::{MockMode, MockTranslator};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_CHUNK_SIZE: usize = 1500;

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` from `source` to `target`.
    ///
    /// Never fails. On any error the engine returns its best effort, which
    /// may be `text` itself.
    async fn translate(&self, text: &str, source: &str, target: &str) -> String;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Free web endpoint, no key needed.
    #[default]
    Google,
    /// `DeepL` API, needs an auth key.
    Deepl,
}

impl EngineKind {
    pub const ALL: [Self; 2] = [Self::Google, Self::Deepl];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Deepl => "deepl",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "deepl" => Ok(Self::Deepl),
            other => Err(format!("unknown engine '{other}' (expected google or deepl)")),
        }
    }
}

/// Builds the engine selected by `config`.
pub fn build_translator(config: &ResolvedConfig) -> Result<Box<dyn Translator>> {
    let google = GoogleEngine::new(&config.google)?;

    match (config.engine, &config.deepl) {
        (EngineKind::Deepl, Some(deepl)) => Ok(Box::new(DeepLEngine::new(deepl, google)?)),
        (EngineKind::Deepl, None) => {
            log::warn!("DeepL selected without an API key, using Google");
            Ok(Box::new(google))
        }
        (EngineKind::Google, _) => Ok(Box::new(google)),
    }
}

/// Splits `text` into pieces of at most `size` characters.
pub(crate) fn split_chars(text: &str, size: usize) -> Vec<&str> {
    if size == 0 || text.chars().count() <= size {
        return vec![text];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (count, (offset, _)) in text.char_indices().enumerate() {
        if count > 0 && count % size == 0 {
            pieces.push(&text[start..offset]);
            start = offset;
        }
    }
    pieces.push(&text[start..]);
    pieces
}
