//! Post-translation fixups for words the engine glued together.
//!
//! Two steps run over the text between tags: a table of literal
//! corrections, then a split wherever a lowercase ASCII letter is directly
//! followed by an uppercase one. The split is a heuristic and can break
//! real camel-case names; glossary terms and correction outputs are exempt.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::glossary::TermTable;
use crate::markup::tokenize;

/// Known engine artefacts and what they should read.
pub const CORRECTIONS: &[(&str, &str)] = &[
    ("Morelow", "Lower"),
    ("Morefast", "Faster"),
    ("Morelittle", "Less"),
    ("Drink data", "Internal data"),
    ("Linkedof", "LinkedIn"),
    ("linkedof", "LinkedIn"),
    ("DezAdvantages", "Disadvantages"),
    ("Dezadvantages", "Disadvantages"),
    ("RetAIl", "Retail"),
    ("Whenused", "When used"),
    ("productivityincrease", "productivity increase"),
];

const MAX_ROUNDS: usize = 8;

#[allow(clippy::expect_used)]
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("valid word pattern"));

#[allow(clippy::expect_used)]
static CAMEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z][A-Z]").expect("valid camel pattern"));

#[derive(Debug, Clone, Default)]
pub struct Cleanup {
    exempt: HashSet<String>,
}

impl Cleanup {
    /// Exempts every word of the glossary's protected terms and forced
    /// targets from splitting.
    pub fn new(table: &TermTable) -> Self {
        let glossary_words = table
            .protected
            .iter()
            .chain(table.forced.iter().map(|(_, target)| target));
        let correction_words = CORRECTIONS.iter().map(|(_, right)| *right);

        let exempt = glossary_words
            .map(String::as_str)
            .chain(correction_words)
            .flat_map(|phrase| WORD.find_iter(phrase).map(|m| m.as_str().to_string()))
            .filter(|word| CAMEL.is_match(word))
            .collect();

        Self { exempt }
    }

    /// Applies the fixups to the text outside tags until nothing changes.
    pub fn apply(&self, tagged: &str) -> String {
        let mut current = tagged.to_string();
        for _ in 0..MAX_ROUNDS {
            let next = self.apply_once(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn apply_once(&self, tagged: &str) -> String {
        let mut out = String::with_capacity(tagged.len());
        for token in tokenize(tagged) {
            if token.kind.is_markup() {
                out.push_str(token.raw);
            } else {
                out.push_str(&self.fix_text(token.raw));
            }
        }
        out
    }

    fn fix_text(&self, text: &str) -> String {
        let corrected = CORRECTIONS
            .iter()
            .fold(text.to_string(), |acc, (wrong, right)| acc.replace(wrong, right));

        WORD.replace_all(&corrected, |caps: &regex::Captures<'_>| self.split_word(&caps[0]))
            .into_owned()
    }

    /// Splits camel boundaries that do not fall inside an exempt word, so
    /// `LinkedInX` becomes `LinkedIn X`.
    fn split_word(&self, word: &str) -> String {
        if self.exempt.contains(word) {
            return word.to_string();
        }
        let guarded: Vec<(usize, usize)> = self
            .exempt
            .iter()
            .flat_map(|e| word.match_indices(e.as_str()).map(|(at, m)| (at, at + m.len())))
            .collect();

        let mut out = String::with_capacity(word.len() + 4);
        let mut last = 0;
        for m in CAMEL.find_iter(word) {
            // Both sides are ASCII letters.
            let boundary = m.start() + 1;
            if guarded
                .iter()
                .any(|&(start, end)| start < boundary && boundary < end)
            {
                continue;
            }
            out.push_str(&word[last..boundary]);
            out.push(' ');
            last = boundary;
        }
        out.push_str(&word[last..]);
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cleanup() -> Cleanup {
        Cleanup::new(&TermTable {
            protected: vec!["PayTR".to_string(), "GitHub".to_string()],
            forced: vec![("Yıllık Gelir".to_string(), "Annual Income".to_string())],
        })
    }

    #[test]
    fn test_corrections_table() {
        let c = cleanup();
        assert_eq!(c.apply("Morelow cost"), "Lower cost");
        assert_eq!(c.apply("Drink data sources"), "Internal data sources");
        assert_eq!(c.apply("Whenused daily"), "When used daily");
    }

    #[test]
    fn test_fused_words_are_split() {
        let c = cleanup();
        assert_eq!(c.apply("HighCostLowRisk"), "High Cost Low Risk");
        assert_eq!(c.apply("costsAre optimized"), "costs Are optimized");
    }

    #[test]
    fn test_glossary_and_correction_words_are_not_split() {
        let c = cleanup();
        assert_eq!(c.apply("PayTR and GitHub"), "PayTR and GitHub");
        assert_eq!(c.apply("Linkedof profile"), "LinkedIn profile");
    }

    #[test]
    fn test_tags_are_left_alone() {
        let c = cleanup();
        let tagged = r#"[R0]<c rgb="FF0000">lowUpper</c>[/R0]"#;
        assert_eq!(c.apply(tagged), r#"[R0]<c rgb="FF0000">low Upper</c>[/R0]"#);
    }

    #[test]
    fn test_non_ascii_letters_untouched() {
        let c = cleanup();
        assert_eq!(c.apply("çÇ öÖ"), "çÇ öÖ");
    }

    #[test]
    fn test_idempotent() {
        let c = cleanup();
        for input in [
            "aB",
            "DezAdvantagesAndMorefast",
            "productivityincreaseX",
            "[R0]xYz[/R0] trailingWord",
            "RetAIlStore",
            "",
        ] {
            let once = c.apply(input);
            assert_eq!(c.apply(&once), once, "{input}");
        }
    }

    #[test]
    fn test_corrections_next_to_camel_boundaries() {
        let c = cleanup();
        let cases = [
            ("xMorelowY", "x Lower Y"),
            ("LinkedofX", "LinkedIn X"),
            ("myLinkedof", "my LinkedIn"),
            ("GitHubRepo", "GitHub Repo"),
            ("DezAdvantagesWhenused", "Disadvantages When used"),
            ("aMorefastBMorelittle", "a Faster BLess"),
            ("[R0]xMorelow[/R0]Linkedof", "[R0]x Lower[/R0]LinkedIn"),
        ];
        for (input, expected) in cases {
            let once = c.apply(input);
            assert_eq!(once, expected, "{input}");
            assert_eq!(c.apply(&once), once, "{input}");
        }
    }
}
