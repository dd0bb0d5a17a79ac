//! Glossary terms: vocabulary that is either kept verbatim or always
//! translated the same way.

mod protector;
mod seed;
mod store;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use protector::GlossaryProtector;
pub use seed::{SEED_FORCED, SEED_PROTECTED};
pub use store::GlossaryStore;

pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    /// Passes through untranslated.
    Protected,
    /// Always replaced by a fixed target.
    Forced,
}

impl TermKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Protected => "protected",
            Self::Forced => "forced",
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TermKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "protected" => Ok(Self::Protected),
            "forced" => Ok(Self::Forced),
            other => Err(format!("unknown term type '{other}'")),
        }
    }
}

/// One glossary row, unique by `(source, category)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryTerm {
    pub source: String,
    pub target: Option<String>,
    pub kind: TermKind,
    pub category: String,
}

impl GlossaryTerm {
    pub fn protected(source: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: None,
            kind: TermKind::Protected,
            category: category.into(),
        }
    }

    pub fn forced(
        source: impl Into<String>,
        target: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: Some(target.into()),
            kind: TermKind::Forced,
            category: category.into(),
        }
    }
}

/// The terms of one category, split by kind, in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermTable {
    pub protected: Vec<String>,
    pub forced: Vec<(String, String)>,
}

impl TermTable {
    pub fn from_terms<'a>(terms: impl IntoIterator<Item = &'a GlossaryTerm>) -> Self {
        let mut table = Self::default();
        for term in terms {
            match (term.kind, &term.target) {
                (TermKind::Protected, _) => table.protected.push(term.source.clone()),
                (TermKind::Forced, Some(target)) => {
                    table.forced.push((term.source.clone(), target.clone()));
                }
                (TermKind::Forced, None) => {
                    log::warn!("Forced term '{}' has no target, ignoring", term.source);
                }
            }
        }
        table
    }

    pub fn len(&self) -> usize {
        self.protected.len() + self.forced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
