//! Language codes accepted by `--from` and `--to`.

use anyhow::Result;

use crate::ui::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code as the engines expect it.
    pub code: &'static str,
    pub name: &'static str,
    /// Whether the `DeepL` API accepts it; Google accepts all of them.
    pub deepl: bool,
}

const fn lang(code: &'static str, name: &'static str, deepl: bool) -> Language {
    Language { code, name, deepl }
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    lang("ar", "Arabic", true),
    lang("az", "Azerbaijani", false),
    lang("bg", "Bulgarian", true),
    lang("bs", "Bosnian", false),
    lang("cs", "Czech", true),
    lang("da", "Danish", true),
    lang("de", "German", true),
    lang("el", "Greek", true),
    lang("en", "English", true),
    lang("es", "Spanish", true),
    lang("et", "Estonian", true),
    lang("fa", "Persian", false),
    lang("fi", "Finnish", true),
    lang("fr", "French", true),
    lang("he", "Hebrew", false),
    lang("hi", "Hindi", false),
    lang("hr", "Croatian", false),
    lang("hu", "Hungarian", true),
    lang("id", "Indonesian", true),
    lang("it", "Italian", true),
    lang("ja", "Japanese", true),
    lang("ka", "Georgian", false),
    lang("kk", "Kazakh", false),
    lang("ko", "Korean", true),
    lang("lt", "Lithuanian", true),
    lang("lv", "Latvian", true),
    lang("nb", "Norwegian", true),
    lang("nl", "Dutch", true),
    lang("pl", "Polish", true),
    lang("pt", "Portuguese", true),
    lang("ro", "Romanian", true),
    lang("ru", "Russian", true),
    lang("sk", "Slovak", true),
    lang("sl", "Slovenian", true),
    lang("sq", "Albanian", false),
    lang("sr", "Serbian", false),
    lang("sv", "Swedish", true),
    lang("tr", "Turkish", true),
    lang("uk", "Ukrainian", true),
    lang("uz", "Uzbek", false),
    lang("vi", "Vietnamese", false),
    lang("zh", "Chinese", true),
];

pub fn find_language(code: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.code.eq_ignore_ascii_case(code))
}

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported language codes"));
    for lang in SUPPORTED_LANGUAGES {
        let engines = if lang.deepl { "google, deepl" } else { "google" };
        println!(
            "  {} {:12} {}",
            Style::code(format!("{:4}", lang.code)),
            lang.name,
            Style::secondary(engines)
        );
    }
}

/// Checks `code` against [`SUPPORTED_LANGUAGES`] and returns its canonical
/// lower-case form.
pub fn validate_language(code: &str) -> Result<&'static str> {
    match find_language(code) {
        Some(lang) => Ok(lang.code),
        None => anyhow::bail!(
            "Invalid language code: '{code}'\n\n\
             Valid language codes (ISO 639-1): tr, en, de, fr, es, ...\n\
             Run 'doctl languages' to see all supported codes."
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_valid() {
        assert_eq!(validate_language("tr").unwrap(), "tr");
        assert_eq!(validate_language("EN").unwrap(), "en");
    }

    #[test]
    fn test_validate_language_invalid() {
        assert!(validate_language("invalid").is_err());
        assert!(validate_language("").is_err());
        assert!(validate_language("xx").is_err());
    }

    #[test]
    fn test_deepl_flag() {
        assert!(find_language("tr").unwrap().deepl);
        assert!(!find_language("vi").unwrap().deepl);
    }
}
