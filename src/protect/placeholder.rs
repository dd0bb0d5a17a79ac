//! Placeholder keys that stand in for protected spans of text.
//!
//! Keys look like `[_WS_0_]`, `[_TG_3_]`, `[_F1_]` or `[_P2_]`. The prefix is
//! fixed by [`PlaceholderKind`], so keys from different layers never collide
//! and no key is a substring of another.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// A run of two or more spaces.
    Whitespace,
    /// A span marker or inline format tag.
    Tag,
    /// A glossary term with a forced translation.
    Forced,
    /// A glossary term that must stay untranslated.
    Protected,
}

impl PlaceholderKind {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Whitespace => "WS_",
            Self::Tag => "TG_",
            Self::Forced => "F",
            Self::Protected => "P",
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Whitespace => 0,
            Self::Tag => 1,
            Self::Forced => 2,
            Self::Protected => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    pub key: String,
    /// Text the key is restored to.
    pub value: String,
}

impl Placeholder {
    /// The key as written, then with a space inside one or both brackets,
    /// which is how engines most often damage it.
    fn variants(&self) -> [String; 4] {
        let inner = &self.key[1..self.key.len() - 1];
        [
            self.key.clone(),
            format!("[ {inner} ]"),
            format!("[ {inner}]"),
            format!("[{inner} ]"),
        ]
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {:?}", self.key, self.value)
    }
}

/// Keys issued during one protection cycle, in issue order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<Placeholder>,
    next: [usize; 4],
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh key for `value` and returns it.
    pub fn insert(&mut self, kind: PlaceholderKind, value: impl Into<String>) -> String {
        let index = self.next[kind.slot()];
        self.next[kind.slot()] += 1;
        let key = format!("[_{}{index}_]", kind.prefix());
        self.entries.push(Placeholder {
            kind,
            key: key.clone(),
            value: value.into(),
        });
        key
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placeholder> {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Replaces every key, exact or space-damaged, with its value.
    pub fn restore(&self, text: &str) -> String {
        let mut restored = text.to_string();
        for placeholder in &self.entries {
            for variant in placeholder.variants() {
                if restored.contains(&variant) {
                    restored = restored.replace(&variant, &placeholder.value);
                }
            }
        }
        restored
    }

    /// Like [`restore`](Self::restore), but also swallows spaces the
    /// engine put around each key, so the value alone decides the spacing.
    pub fn restore_absorbing_whitespace(&self, text: &str) -> String {
        let mut restored = text.to_string();
        for placeholder in &self.entries {
            for variant in placeholder.variants() {
                restored =
                    replace_with_flanking_whitespace(&restored, &variant, &placeholder.value);
            }
        }
        restored
    }

    /// Keys that do not appear in `text` in any form.
    pub fn missing_in<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a Placeholder> {
        self.entries
            .iter()
            .filter(move |p| !p.variants().iter().any(|v| text.contains(v.as_str())))
    }
}

fn replace_with_flanking_whitespace(text: &str, needle: &str, value: &str) -> String {
    if !text.contains(needle) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(needle) {
        let before = rest[..pos].trim_end_matches(' ');
        out.push_str(before);
        out.push_str(value);
        rest = rest[pos + needle.len()..].trim_start_matches(' ');
    }
    out.push_str(rest);
    out
}
