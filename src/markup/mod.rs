//! Inline markup that carries run boundaries and formatting through a
//! translation engine.

pub mod tagger;
pub mod token;

pub use tagger::{Decoded, DecodedRun, TaggedParagraph, decode, encode, escape, unescape};
pub use token::{InlineTag, TagName, Token, TokenKind, tokenize};
