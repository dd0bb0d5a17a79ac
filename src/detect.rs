//! Decides whether a paragraph still contains source-language text.

use std::sync::LazyLock;

use regex::Regex;

/// Cheap lexical evidence that a text is written in one language.
pub struct Markers {
    pub code: &'static str,
    /// Letters that only occur in this language.
    pub chars: &'static [char],
    /// Whole words and phrases, matched case-insensitively.
    words: LazyLock<Regex>,
    /// Inflectional endings, matched at the end of the text.
    pub suffixes: &'static [&'static str],
}

const TURKISH_WORDS: &[&str] = &[
    "ve", "ile", "bir", "için", "olan", "olarak", "veya", "gibi", "daha", "en", "çok", "az",
    "var", "yok", "evet", "hayır", "orta", "tam", "kriter", "ay", "hafta", "gün", "kolay",
    "zor", "hızlı", "yavaş", "düşük", "yüksek", "minimal", "sınırlı", "kapsamlı", "genel",
    "özel", "basit", "karmaşık", "karma", "otomatik", "her yerden", "koordine", "gerekli",
    "bulut", "birden fazla", "temel", "maliyetleri", "optimize", "edilir",
];

#[allow(clippy::expect_used)]
fn turkish_words() -> Regex {
    Regex::new(&word_pattern(TURKISH_WORDS)).expect("valid marker pattern")
}

pub static TURKISH: Markers = Markers {
    code: "tr",
    chars: &['ğ', 'ü', 'ş', 'ı', 'ö', 'ç', 'İ', 'Ğ', 'Ü', 'Ş', 'Ö', 'Ç'],
    words: LazyLock::new(turkish_words),
    suffixes: &[
        "ları", "leri", "lar", "ler", "dır", "dir", "tır", "tir", "mış", "miş", "muş", "müş",
    ],
};

fn word_pattern(words: &[&str]) -> String {
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    format!(r"(?i)\b(?:{})\b", alternatives.join("|"))
}

impl Markers {
    pub fn matches(&self, text: &str) -> bool {
        if text.chars().any(|c| self.chars.contains(&c)) {
            return true;
        }
        if self.words.is_match(text) {
            return true;
        }
        let tail = text
            .trim_end_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
            .to_lowercase();
        self.suffixes.iter().any(|suffix| tail.ends_with(suffix))
    }
}

/// Source-language detector.
///
/// Languages without a marker set are treated as always present, so every
/// non-blank paragraph is sent for translation.
#[derive(Clone, Copy)]
pub enum SourceDetector {
    Markers(&'static Markers),
    Any,
}

impl SourceDetector {
    pub fn for_language(code: &str) -> Self {
        if code.eq_ignore_ascii_case(TURKISH.code) {
            Self::Markers(&TURKISH)
        } else {
            Self::Any
        }
    }

    pub fn needs_translation(self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        match self {
            Self::Markers(markers) => markers.matches(text),
            Self::Any => true,
        }
    }
}

impl std::fmt::Debug for SourceDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markers(markers) => write!(f, "SourceDetector({})", markers.code),
            Self::Any => f.write_str("SourceDetector(any)"),
        }
    }
}
