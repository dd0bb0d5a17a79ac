//! In-memory document model.
//!
//! Paragraphs keep the XML they were read from so that untouched content is
//! written back byte-for-byte; only paragraphs whose runs were rebuilt are
//! re-rendered.

use super::style::RunStyle;
use super::xml::{Element, Node};

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    /// Section properties, bookmarks and anything else that is not translated.
    Opaque(Node),
}

impl Document {
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.blocks.iter_mut().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.blocks.iter_mut().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub rows: Vec<Row>,
    /// The `w:tbl` element; cell paragraphs are spliced back into it.
    pub source: Option<Element>,
}

#[derive(Debug, Clone, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn runs(&self) -> impl Iterator<Item = RunRef<'_>> {
        self.paragraphs.iter().flat_map(Paragraph::runs)
    }
}

/// A text run: one stretch of uniformly formatted characters.
///
/// Tabs are stored as `\t` and line breaks as `\n`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Inline {
    Run(Run),
    Hyperlink {
        /// Resolved external URL, `None` for internal anchors.
        target: Option<String>,
        runs: Vec<Run>,
    },
    /// Fields, drawings, bookmarks, revision marks.
    Opaque(Node),
}

/// A run as seen by the tagger, together with the hyperlink that owns it.
#[derive(Debug, Clone, Copy)]
pub struct RunRef<'a> {
    pub run: &'a Run,
    pub hyperlink: Option<&'a str>,
}

/// Inline elements that may move relative to the runs around them.
const FLOATING_INLINE: &[&str] = &["w:bookmarkStart", "w:bookmarkEnd", "w:proofErr"];

#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub content: Vec<Inline>,
    /// The `w:pPr` element, copied verbatim on write.
    pub properties: Option<Element>,
    pub(crate) source: Option<Element>,
    modified: bool,
    /// Slot where pushed runs go after `clear_runs`; `None` appends.
    insert_at: Option<usize>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_runs(runs: impl IntoIterator<Item = Run>) -> Self {
        Self {
            content: runs.into_iter().map(Inline::Run).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn from_source(
        source: Element,
        properties: Option<Element>,
        content: Vec<Inline>,
    ) -> Self {
        Self {
            content,
            properties,
            source: Some(source),
            modified: false,
            insert_at: None,
        }
    }

    /// Visible text of every run, hyperlinks included.
    pub fn text(&self) -> String {
        self.runs().map(|r| r.run.text.as_str()).collect()
    }

    /// Direct runs and runs nested in hyperlinks, in document order.
    pub fn runs(&self) -> impl Iterator<Item = RunRef<'_>> {
        self.content.iter().flat_map(|inline| {
            let refs: Vec<RunRef<'_>> = match inline {
                Inline::Run(run) => vec![RunRef {
                    run,
                    hyperlink: None,
                }],
                Inline::Hyperlink { target, runs } => runs
                    .iter()
                    .map(|run| RunRef {
                        run,
                        hyperlink: target.as_deref(),
                    })
                    .collect(),
                Inline::Opaque(_) => Vec::new(),
            };
            refs
        })
    }

    /// Removes every run and hyperlink, keeping paragraph properties and
    /// opaque inline content.
    ///
    /// Runs pushed afterwards take the place of the first removed run, so
    /// opaque content before and after the text keeps its position.
    pub fn clear_runs(&mut self) {
        let first = self.content.iter().position(is_editable);
        self.content.retain(|inline| !is_editable(inline));
        self.insert_at = Some(first.unwrap_or(self.content.len()));
        self.modified = true;
    }

    pub fn push_run(&mut self, run: Run) {
        self.insert_inline(Inline::Run(run));
    }

    pub fn push_hyperlink_run(&mut self, target: impl Into<String>, run: Run) {
        self.insert_inline(Inline::Hyperlink {
            target: Some(target.into()),
            runs: vec![run],
        });
    }

    fn insert_inline(&mut self, inline: Inline) {
        match &mut self.insert_at {
            Some(at) => {
                self.content.insert(*at, inline);
                *at += 1;
            }
            None => self.content.push(inline),
        }
        self.modified = true;
    }

    /// True when footnote marks, fields, drawings or revisions sit between
    /// two runs. Rebuilding the runs of such a paragraph would move them.
    pub fn has_anchored_inline_content(&self) -> bool {
        let (Some(first), Some(last)) = (
            self.content.iter().position(is_editable),
            self.content.iter().rposition(is_editable),
        ) else {
            return false;
        };
        self.content[first..last].iter().any(|inline| match inline {
            Inline::Opaque(Node::Element(el)) => !FLOATING_INLINE.contains(&el.name.as_str()),
            _ => false,
        })
    }

    /// True once runs were rebuilt and the paragraph must be re-rendered.
    pub const fn is_modified(&self) -> bool {
        self.modified
    }
}

const fn is_editable(inline: &Inline) -> bool {
    !matches!(inline, Inline::Opaque(_))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bold() -> RunStyle {
        RunStyle {
            bold: Some(true),
            ..RunStyle::default()
        }
    }

    #[test]
    fn test_text_includes_hyperlink_runs_in_order() {
        let mut p = Paragraph::from_runs([Run::new("See ", RunStyle::default())]);
        p.content.push(Inline::Hyperlink {
            target: Some("https://example.com".to_string()),
            runs: vec![Run::new("docs", bold())],
        });
        p.content.push(Inline::Run(Run::new(".", RunStyle::default())));

        assert_eq!(p.text(), "See docs.");
        let links: Vec<_> = p.runs().map(|r| r.hyperlink).collect();
        assert_eq!(links, vec![None, Some("https://example.com"), None]);
    }

    #[test]
    fn test_clear_runs_keeps_opaque_content() {
        let mut p = Paragraph::from_runs([Run::new("text", RunStyle::default())]);
        p.content
            .push(Inline::Opaque(Node::Element(Element::new("w:bookmarkStart"))));
        assert!(!p.is_modified());

        p.clear_runs();

        assert_eq!(p.content.len(), 1);
        assert_eq!(p.text(), "");
        assert!(p.is_modified());
    }

    fn opaque(name: &str) -> Inline {
        Inline::Opaque(Node::Element(Element::new(name)))
    }

    fn names(p: &Paragraph) -> Vec<String> {
        p.content
            .iter()
            .map(|inline| match inline {
                Inline::Run(run) => run.text.clone(),
                Inline::Hyperlink { .. } => "link".to_string(),
                Inline::Opaque(Node::Element(el)) => el.name.clone(),
                Inline::Opaque(Node::Text(_)) => "#text".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_rebuilt_runs_take_the_place_of_the_old_ones() {
        let mut p = Paragraph::new();
        p.content.push(opaque("w:bookmarkStart"));
        p.content.push(Inline::Run(Run::new("Düşük ", bold())));
        p.content.push(Inline::Run(Run::new("maliyet", RunStyle::default())));
        p.content.push(opaque("w:bookmarkEnd"));
        p.content.push(opaque("w:r"));

        p.clear_runs();
        p.push_run(Run::new("Low ", bold()));
        p.push_hyperlink_run("https://example.com", Run::new("cost", RunStyle::default()));

        assert_eq!(
            names(&p),
            vec!["w:bookmarkStart", "Low ", "link", "w:bookmarkEnd", "w:r"]
        );
    }

    #[test]
    fn test_push_without_clear_appends() {
        let mut p = Paragraph::new();
        p.content.push(opaque("w:bookmarkStart"));
        p.push_run(Run::new("a", RunStyle::default()));
        assert_eq!(names(&p), vec!["w:bookmarkStart", "a"]);
    }

    #[test]
    fn test_anchored_content_between_runs() {
        let mut footnote = Paragraph::from_runs([Run::new("Maliyet", RunStyle::default())]);
        footnote.content.push(opaque("w:r"));
        footnote
            .content
            .push(Inline::Run(Run::new(" düşük", RunStyle::default())));
        assert!(footnote.has_anchored_inline_content());

        let mut bookmarked = Paragraph::from_runs([Run::new("a", RunStyle::default())]);
        bookmarked.content.push(opaque("w:bookmarkStart"));
        bookmarked
            .content
            .push(Inline::Run(Run::new("b", RunStyle::default())));
        assert!(!bookmarked.has_anchored_inline_content());

        let mut trailing = Paragraph::from_runs([Run::new("a", RunStyle::default())]);
        trailing.content.push(opaque("w:r"));
        assert!(!trailing.has_anchored_inline_content());
    }

    #[test]
    fn test_cell_text_joins_paragraphs() {
        let cell = Cell {
            paragraphs: vec![
                Paragraph::from_runs([Run::new("Evet", RunStyle::default())]),
                Paragraph::from_runs([Run::new("Hayır", RunStyle::default())]),
            ],
        };
        assert_eq!(cell.text(), "Evet\nHayır");
        assert_eq!(cell.runs().count(), 2);
    }
}
