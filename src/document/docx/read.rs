//! Builds the document model from `word/document.xml`.

use anyhow::{Context, Result};

use super::rels::Relationships;
use super::run_props;
use crate::document::model::{Block, Cell, Document, Inline, Paragraph, Row, Run, Table};
use crate::document::xml::{Element, Node};

pub fn read_document(root: &Element, rels: &Relationships) -> Result<Document> {
    let body = root
        .child("w:body")
        .context("word/document.xml has no w:body element")?;

    let blocks = body
        .children
        .iter()
        .map(|node| match node {
            Node::Element(el) if el.name == "w:p" => Block::Paragraph(read_paragraph(el, rels)),
            Node::Element(el) if el.name == "w:tbl" => Block::Table(read_table(el, rels)),
            other => Block::Opaque(other.clone()),
        })
        .collect();

    Ok(Document { blocks })
}

pub fn read_paragraph(el: &Element, rels: &Relationships) -> Paragraph {
    let properties = el.child("w:pPr").cloned();
    let mut content = Vec::new();

    for node in &el.children {
        let Node::Element(child) = node else {
            continue;
        };
        let inline = match child.name.as_str() {
            "w:pPr" => continue,
            "w:r" => read_run(child).map_or_else(|| Inline::Opaque(node.clone()), Inline::Run),
            "w:hyperlink" => {
                read_hyperlink(child, rels).unwrap_or_else(|| Inline::Opaque(node.clone()))
            }
            _ => Inline::Opaque(node.clone()),
        };
        content.push(inline);
    }

    Paragraph::from_source(el.clone(), properties, content)
}

/// A hyperlink is editable only when every child is a plain text run.
fn read_hyperlink(el: &Element, rels: &Relationships) -> Option<Inline> {
    let runs = el
        .elements()
        .map(|child| (child.name == "w:r").then(|| read_run(child)).flatten())
        .collect::<Option<Vec<_>>>()?;
    let target = el
        .attr("r:id")
        .and_then(|id| rels.target(id))
        .map(str::to_string);
    Some(Inline::Hyperlink { target, runs })
}

/// Reads a run made only of text, tabs and soft line breaks. Runs holding
/// drawings, fields, page breaks or footnote references return `None`.
pub fn read_run(el: &Element) -> Option<Run> {
    let mut text = String::new();
    for child in el.elements() {
        match child.name.as_str() {
            "w:rPr" | "w:lastRenderedPageBreak" => {}
            "w:t" => text.push_str(&child.text()),
            "w:tab" => text.push('\t'),
            "w:cr" => text.push('\n'),
            "w:br" if child.attr("w:type").is_none_or(|t| t == "textWrapping") => {
                text.push('\n');
            }
            "w:noBreakHyphen" => text.push('\u{2011}'),
            "w:softHyphen" => text.push('\u{00AD}'),
            _ => return None,
        }
    }
    Some(Run::new(text, run_props::capture(el.child("w:rPr"))))
}

pub fn read_table(el: &Element, rels: &Relationships) -> Table {
    let rows = el
        .elements()
        .filter(|tr| tr.name == "w:tr")
        .map(|tr| Row {
            cells: tr
                .elements()
                .filter(|tc| tc.name == "w:tc")
                .map(|tc| Cell {
                    paragraphs: tc
                        .elements()
                        .filter(|p| p.name == "w:p")
                        .map(|p| read_paragraph(p, rels))
                        .collect(),
                })
                .collect(),
        })
        .collect();

    Table {
        rows,
        source: Some(el.clone()),
    }
}
