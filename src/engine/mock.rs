//! Offline translator used by tests and dry runs.

use std::sync::{LazyLock, Mutex, PoisonError};

use async_trait::async_trait;
use regex::Regex;

use super::Translator;

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[_[A-Z]+_?\d+_\]").expect("valid placeholder pattern"));

#[derive(Debug, Clone)]
pub enum MockMode {
    /// Returns the input unchanged.
    Identity,
    /// Returns an empty string.
    Empty,
    /// Upper-cases the input.
    Uppercase,
    /// Reverses the order of placeholder keys, leaving each key intact.
    ReversePlaceholders,
    /// Puts a space after the opening bracket of every placeholder key.
    DamagePlaceholders,
    /// Applies literal substring replacements in order.
    Replace(Vec<(String, String)>),
}

/// Translator that never touches the network and records every input.
#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    calls: Mutex<Vec<String>>,
}

impl MockTranslator {
    pub const fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Texts this translator was asked to translate, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn apply(&self, text: &str) -> String {
        match &self.mode {
            MockMode::Identity => text.to_string(),
            MockMode::Empty => String::new(),
            MockMode::Uppercase => text.to_uppercase(),
            MockMode::ReversePlaceholders => reverse_placeholders(text),
            MockMode::DamagePlaceholders => PLACEHOLDER
                .replace_all(text, |caps: &regex::Captures<'_>| {
                    format!("[ {}", &caps[0][1..])
                })
                .into_owned(),
            MockMode::Replace(pairs) => pairs
                .iter()
                .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to)),
        }
    }
}

fn reverse_placeholders(text: &str) -> String {
    let keys: Vec<&str> = PLACEHOLDER.find_iter(text).map(|m| m.as_str()).collect();
    let mut reversed = keys.iter().rev();
    PLACEHOLDER
        .replace_all(text, |_: &regex::Captures<'_>| {
            reversed.next().map_or_else(String::new, ToString::to_string)
        })
        .into_owned()
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, _source: &str, _target: &str) -> String {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        self.apply(text)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
