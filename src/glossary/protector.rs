use regex::{NoExpand, Regex};

use super::TermTable;
use crate::markup::escape;
use crate::protect::{PlaceholderKind, PlaceholderMap};

struct Matcher {
    pattern: Regex,
    /// What the placeholder restores to.
    replacement: String,
}

/// Masks glossary terms behind placeholders before translation.
///
/// Terms are matched case-insensitively on whole words, longest first, so
/// a multi-word term wins over a shorter term it contains. Forced terms are
/// masked before protected ones.
///
/// Input is run-tagged text, so terms are matched and restored in their
/// XML-escaped form (`R&D` as `R&amp;D`).
#[derive(Default)]
pub struct GlossaryProtector {
    forced: Vec<Matcher>,
    protected: Vec<Matcher>,
}

impl GlossaryProtector {
    pub fn new(table: &TermTable) -> Self {
        let mut forced: Vec<_> = table.forced.iter().collect();
        forced.sort_by_key(|(source, _)| std::cmp::Reverse(source.chars().count()));
        let mut protected: Vec<_> = table.protected.iter().collect();
        protected.sort_by_key(|source| std::cmp::Reverse(source.chars().count()));

        Self {
            forced: forced
                .into_iter()
                .filter_map(|(source, target)| matcher(source, target))
                .collect(),
            protected: protected
                .into_iter()
                .filter_map(|source| matcher(source, source))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.forced.len() + self.protected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces every glossary term in `text` with a placeholder. All
    /// occurrences of one term share a key.
    pub fn protect(&self, text: &str) -> (String, PlaceholderMap) {
        let mut map = PlaceholderMap::new();
        let mut masked = text.to_string();

        let layers = [
            (PlaceholderKind::Forced, &self.forced),
            (PlaceholderKind::Protected, &self.protected),
        ];
        for (kind, matchers) in layers {
            for m in matchers {
                if m.pattern.is_match(&masked) {
                    let key = map.insert(kind, m.replacement.as_str());
                    masked = m.pattern.replace_all(&masked, NoExpand(&key)).into_owned();
                }
            }
        }

        (masked, map)
    }

    /// Puts forced targets and protected terms back in place of their keys.
    pub fn restore(text: &str, map: &PlaceholderMap) -> String {
        map.restore(text)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Builds a whole-word, case-insensitive pattern. Word boundaries are only
/// asserted on edges that are word characters, so terms like `.NET` still
/// match after a space.
fn matcher(source: &str, replacement: &str) -> Option<Matcher> {
    let term = source.trim();
    let first = term.chars().next()?;
    let last = term.chars().next_back()?;

    let mut pattern = String::from("(?i)");
    if is_word_char(first) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(&escape(term)));
    if is_word_char(last) {
        pattern.push_str(r"\b");
    }

    match Regex::new(&pattern) {
        Ok(pattern) => Some(Matcher {
            pattern,
            replacement: escape(replacement),
        }),
        Err(e) => {
            log::warn!("Skipping glossary term '{term}': {e}");
            None
        }
    }
}
