//! Tokenizer for tagged paragraph text.
//!
//! Tagged text mixes three kinds of markup with plain text:
//! span markers `[R3]` / `[/R3]`, inline format tags such as `<b>` or
//! `<c rgb="FF0000">`, and everything else. Text has `&`, `<` and `>`
//! escaped before tagging, so any well-formed `<...>` is markup.

/// Inline formatting element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagName {
    Bold,
    Italic,
    Underline,
    Color,
    Highlight,
    /// Any other element, e.g. one an engine invented.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineTag {
    pub name: TagName,
    pub closing: bool,
}

impl InlineTag {
    /// Parses a complete `<...>` element.
    fn parse(raw: &str) -> Self {
        let inner = raw.trim_start_matches('<').trim_end_matches('>');
        let closing = inner.starts_with('/');
        let name = inner
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default();
        let name = match name {
            "b" => TagName::Bold,
            "i" => TagName::Italic,
            "u" => TagName::Underline,
            "c" => TagName::Color,
            "h" => TagName::Highlight,
            _ => TagName::Other,
        };
        Self { name, closing }
    }

    /// True for the tags this crate emits itself.
    pub const fn is_format(self) -> bool {
        !matches!(self.name, TagName::Other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    SpanOpen(usize),
    SpanClose(usize),
    Tag(InlineTag),
    Text,
}

impl TokenKind {
    pub const fn is_markup(self) -> bool {
        !matches!(self, Self::Text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub raw: &'a str,
}

pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens { input, pos: 0 }
}

pub struct Tokens<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.input[self.pos..];
        if rest.is_empty() {
            return None;
        }

        if let Some((kind, len)) = markup_at(rest) {
            self.pos += len;
            return Some(Token {
                kind,
                raw: &rest[..len],
            });
        }

        let end = rest
            .char_indices()
            .skip(1)
            .find(|&(i, c)| (c == '[' || c == '<') && markup_at(&rest[i..]).is_some())
            .map_or(rest.len(), |(i, _)| i);
        self.pos += end;
        Some(Token {
            kind: TokenKind::Text,
            raw: &rest[..end],
        })
    }
}

fn markup_at(s: &str) -> Option<(TokenKind, usize)> {
    match s.as_bytes().first()? {
        b'[' => span_marker(s),
        b'<' => angle_tag(s),
        _ => None,
    }
}

fn span_marker(s: &str) -> Option<(TokenKind, usize)> {
    let (closing, body) = if let Some(body) = s.strip_prefix("[/R") {
        (true, body)
    } else {
        (false, s.strip_prefix("[R")?)
    };

    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || !body[digits..].starts_with(']') {
        return None;
    }
    let index: usize = body[..digits].parse().ok()?;
    let len = s.len() - body.len() + digits + 1;

    let kind = if closing {
        TokenKind::SpanClose(index)
    } else {
        TokenKind::SpanOpen(index)
    };
    Some((kind, len))
}

fn angle_tag(s: &str) -> Option<(TokenKind, usize)> {
    let mut chars = s.char_indices().skip(1);
    let (_, first) = chars.next()?;
    if first.is_whitespace() || matches!(first, '<' | '>') {
        return None;
    }
    for (i, c) in chars {
        match c {
            '>' => return Some((TokenKind::Tag(InlineTag::parse(&s[..=i])), i + 1)),
            '<' | '\n' => return None,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_span_and_format_tokens() {
        let tokens: Vec<_> = tokenize("[R0]<b>Merhaba</b>[/R0] dünya").collect();
        let raws: Vec<_> = tokens.iter().map(|t| t.raw).collect();
        assert_eq!(raws, vec!["[R0]", "<b>", "Merhaba", "</b>", "[/R0]", " dünya"]);
        assert_eq!(tokens[0].kind, TokenKind::SpanOpen(0));
        assert_eq!(
            tokens[3].kind,
            TokenKind::Tag(InlineTag {
                name: TagName::Bold,
                closing: true
            })
        );
        assert_eq!(tokens[4].kind, TokenKind::SpanClose(0));
    }

    #[test]
    fn test_attribute_tags() {
        let tokens: Vec<_> = tokenize(r#"<c rgb="FF0000"><h col="yellow">x</h></c>"#).collect();
        assert_eq!(tokens.len(), 5);
        assert!(matches!(
            tokens[0].kind,
            TokenKind::Tag(InlineTag {
                name: TagName::Color,
                closing: false
            })
        ));
        assert!(matches!(
            tokens[1].kind,
            TokenKind::Tag(InlineTag {
                name: TagName::Highlight,
                ..
            })
        ));
    }

    #[test]
    fn test_lookalikes_are_text() {
        assert_eq!(kinds("[R] [Rx] [R12 a < b <>"), vec![TokenKind::Text]);
        assert_eq!(kinds("[_WS_3_]"), vec![TokenKind::Text]);
    }

    #[test]
    fn test_multidigit_indices() {
        assert_eq!(
            kinds("[R12]x[/R12]"),
            vec![
                TokenKind::SpanOpen(12),
                TokenKind::Text,
                TokenKind::SpanClose(12)
            ]
        );
    }

    #[test]
    fn test_raw_pieces_reassemble_input() {
        let input = "a [ [R1]<u>ç</u>[/R1] <x/> ]";
        let joined: String = tokenize(input).map(|t| t.raw).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn test_unknown_tag_is_markup_but_not_format() {
        let tokens: Vec<_> = tokenize("<br/>").collect();
        let TokenKind::Tag(tag) = tokens[0].kind else {
            panic!("expected a tag");
        };
        assert!(!tag.is_format());
        assert!(tokens[0].kind.is_markup());
    }
}
