//! Run tagging: paragraph runs to tagged text and back.
//!
//! Every non-empty run becomes `[Rn]...[/Rn]`, with its visible formatting
//! repeated as inline tags (`<b>`, `<i>`, `<u>`, `<c rgb="..">`,
//! `<h col="..">`, bold innermost) so the engine can see which words carry
//! emphasis. Run styles and hyperlink targets stay on the side, keyed by
//! span index.

use std::collections::BTreeMap;

use super::token::{InlineTag, TagName, Token, TokenKind, tokenize};
use crate::document::{Paragraph, Run, RunStyle};
use crate::error::DecodeWarning;

/// Output of [`encode`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaggedParagraph {
    pub text: String,
    /// Captured style of span `n` at position `n`.
    pub styles: Vec<RunStyle>,
    /// Hyperlink target per span index.
    pub hyperlinks: BTreeMap<usize, String>,
}

impl TaggedParagraph {
    pub fn span_count(&self) -> usize {
        self.styles.len()
    }
}

/// A run rebuilt from one span of translated text.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRun {
    pub index: usize,
    pub run: Run,
    pub hyperlink: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub runs: Vec<DecodedRun>,
    pub warnings: Vec<DecodeWarning>,
}

impl Decoded {
    /// Replaces the paragraph's runs with the decoded ones.
    pub fn apply_to(self, paragraph: &mut Paragraph) {
        paragraph.clear_runs();
        for decoded in self.runs {
            match decoded.hyperlink {
                Some(url) => paragraph.push_hyperlink_run(url, decoded.run),
                None => paragraph.push_run(decoded.run),
            }
        }
    }
}

pub fn encode(paragraph: &Paragraph) -> TaggedParagraph {
    let mut tagged = TaggedParagraph::default();

    for run_ref in paragraph.runs() {
        let run = run_ref.run;
        if run.text.is_empty() {
            continue;
        }
        let index = tagged.styles.len();
        tagged.styles.push(run.style.clone());
        if let Some(url) = run_ref.hyperlink {
            tagged.hyperlinks.insert(index, url.to_string());
        }

        let mut text = escape(&run.text);
        let style = &run.style;
        if style.bold == Some(true) {
            text = format!("<b>{text}</b>");
        }
        if style.italic == Some(true) {
            text = format!("<i>{text}</i>");
        }
        if style.underline == Some(true) {
            text = format!("<u>{text}</u>");
        }
        if let Some(rgb) = style.color {
            text = format!("<c rgb=\"{rgb}\">{text}</c>");
        }
        if let Some(highlight) = &style.highlight {
            text = format!("<h col=\"{highlight}\">{text}</h>");
        }

        tagged.text.push_str(&format!("[R{index}]{text}[/R{index}]"));
    }

    tagged
}

struct Span<'a> {
    index: usize,
    inner: &'a [Token<'a>],
    /// Text the engine moved outside the markers, re-attached to this span.
    trailing: String,
}

/// Parses translated tagged text into runs.
///
/// Each `[Rn]...[/Rn]` pair becomes one run with the style captured for
/// span `n`. A literal `<b>` or `<i>` inside the span forces bold or italic
/// on; every other attribute comes from the captured style. Text outside
/// any span is attached to the preceding span, or to the first one when it
/// comes before all spans. Spans with an unknown index keep their text the
/// same way: it moves into the next usable span, or the last one.
pub fn decode(text: &str, encoded: &TaggedParagraph) -> Decoded {
    let tokens: Vec<Token<'_>> = tokenize(text).collect();
    let mut spans: Vec<Span<'_>> = Vec::new();
    let mut leading = String::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        match token.kind {
            TokenKind::SpanOpen(index) => {
                let close = tokens[i + 1..]
                    .iter()
                    .position(|t| t.kind == TokenKind::SpanClose(index));
                if let Some(offset) = close {
                    spans.push(Span {
                        index,
                        inner: &tokens[i + 1..i + 1 + offset],
                        trailing: String::new(),
                    });
                    i += offset + 2;
                    continue;
                }
                log::debug!("Dropping unmatched marker {}", token.raw);
            }
            TokenKind::SpanClose(_) => log::debug!("Dropping stray marker {}", token.raw),
            TokenKind::Tag(tag) if tag.is_format() => {}
            TokenKind::Tag(_) | TokenKind::Text => match spans.last_mut() {
                Some(span) => span.trailing.push_str(token.raw),
                None => leading.push_str(token.raw),
            },
        }
        i += 1;
    }

    let mut decoded = Decoded::default();
    let mut carry = leading;
    for span in &spans {
        let Some(captured) = encoded.styles.get(span.index) else {
            decoded.warnings.push(DecodeWarning::IndexOutOfRange {
                index: span.index,
                available: encoded.styles.len(),
            });
            carry.push_str(&strip_markup(span.inner));
            carry.push_str(&span.trailing);
            continue;
        };

        let mut raw = std::mem::take(&mut carry);
        raw.push_str(&strip_markup(span.inner));
        raw.push_str(&span.trailing);
        let text = unescape(&raw);
        if text.is_empty() {
            continue;
        }

        let (style, errors) = effective_style(captured, span.inner).sanitized();
        decoded
            .warnings
            .extend(errors.into_iter().map(|source| DecodeWarning::Style {
                index: span.index,
                source,
            }));

        decoded.runs.push(DecodedRun {
            index: span.index,
            run: Run::new(text, style),
            hyperlink: encoded.hyperlinks.get(&span.index).cloned(),
        });
    }
    if !carry.is_empty()
        && let Some(last) = decoded.runs.last_mut()
    {
        last.run.text.push_str(&unescape(&carry));
    }

    decoded
}

fn has_open_tag(tokens: &[Token<'_>], name: TagName) -> bool {
    tokens.iter().any(|t| {
        t.kind
            == TokenKind::Tag(InlineTag {
                name,
                closing: false,
            })
    })
}

fn effective_style(captured: &RunStyle, inner: &[Token<'_>]) -> RunStyle {
    let mut style = captured.clone();
    if has_open_tag(inner, TagName::Bold) {
        style.bold = Some(true);
    }
    if has_open_tag(inner, TagName::Italic) {
        style.italic = Some(true);
    }
    style
}

/// Text of a span with format tags and nested markers removed.
fn strip_markup(tokens: &[Token<'_>]) -> String {
    tokens
        .iter()
        .filter(|t| match t.kind {
            TokenKind::Text => true,
            TokenKind::Tag(tag) => !tag.is_format(),
            TokenKind::SpanOpen(_) | TokenKind::SpanClose(_) => false,
        })
        .map(|t| t.raw)
        .collect()
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
