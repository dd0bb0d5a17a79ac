//! Writes the document model back into `word/document.xml`.

use anyhow::{Context, Result};

use super::rels::Relationships;
use super::run_props;
use crate::document::model::{Block, Document, Inline, Paragraph, Run, Table};
use crate::document::xml::{Element, Node};

/// Replaces the children of `w:body` with the rendered blocks.
pub fn write_document(root: &mut Element, doc: &Document, rels: &mut Relationships) -> Result<()> {
    let body = root
        .child_mut("w:body")
        .context("word/document.xml has no w:body element")?;

    body.children = doc
        .blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(p) => Node::Element(render_paragraph(p, rels)),
            Block::Table(t) => Node::Element(render_table(t, rels)),
            Block::Opaque(node) => node.clone(),
        })
        .collect();

    Ok(())
}

pub fn render_paragraph(paragraph: &Paragraph, rels: &mut Relationships) -> Element {
    if !paragraph.is_modified()
        && let Some(source) = &paragraph.source
    {
        return source.clone();
    }

    let mut el = Element::new("w:p");
    if let Some(source) = &paragraph.source {
        el.attributes.clone_from(&source.attributes);
    }
    if let Some(properties) = &paragraph.properties {
        el.children.push(Node::Element(properties.clone()));
    }

    for inline in &paragraph.content {
        match inline {
            Inline::Run(run) => el.children.push(Node::Element(render_run(run))),
            Inline::Hyperlink { target, runs } => {
                let mut link = Element::new("w:hyperlink");
                if let Some(url) = target {
                    link.set_attr("r:id", rels.hyperlink_id(url));
                    link.set_attr("w:history", "1");
                }
                link.children
                    .extend(runs.iter().map(|run| Node::Element(render_run(run))));
                el.children.push(Node::Element(link));
            }
            Inline::Opaque(node) => el.children.push(node.clone()),
        }
    }

    el
}

/// Renders a run, splitting its text into `w:t`, `w:tab` and `w:br`.
pub fn render_run(run: &Run) -> Element {
    let mut el = Element::new("w:r");
    if let Some(rpr) = run_props::render(&run.style) {
        el.children.push(Node::Element(rpr));
    }

    let mut pending = String::new();
    let flush = |pending: &mut String, el: &mut Element| {
        if !pending.is_empty() {
            let t = Element::new("w:t")
                .with_attr("xml:space", "preserve")
                .with_text(std::mem::take(pending));
            el.children.push(Node::Element(t));
        }
    };
    for c in run.text.chars() {
        match c {
            '\t' => {
                flush(&mut pending, &mut el);
                el.children.push(Node::Element(Element::new("w:tab")));
            }
            '\n' => {
                flush(&mut pending, &mut el);
                el.children.push(Node::Element(Element::new("w:br")));
            }
            _ => pending.push(c),
        }
    }
    flush(&mut pending, &mut el);

    el
}

/// Splices cell paragraphs back into the source table, leaving grid,
/// borders and row properties untouched.
fn render_table(table: &Table, rels: &mut Relationships) -> Element {
    let Some(source) = &table.source else {
        return build_table(table, rels);
    };

    let mut el = source.clone();
    let mut rows = table.rows.iter();
    for tr in elements_named(&mut el, "w:tr") {
        let Some(row) = rows.next() else { break };
        let mut cells = row.cells.iter();
        for tc in elements_named(tr, "w:tc") {
            let Some(cell) = cells.next() else { break };
            let mut paragraphs = cell.paragraphs.iter();
            for p in elements_named(tc, "w:p") {
                let Some(paragraph) = paragraphs.next() else { break };
                *p = render_paragraph(paragraph, rels);
            }
        }
    }
    el
}

fn build_table(table: &Table, rels: &mut Relationships) -> Element {
    let mut el = Element::new("w:tbl");
    for row in &table.rows {
        let mut tr = Element::new("w:tr");
        for cell in &row.cells {
            let mut tc = Element::new("w:tc");
            for paragraph in &cell.paragraphs {
                tc.children
                    .push(Node::Element(render_paragraph(paragraph, rels)));
            }
            // A cell must end with a paragraph.
            if cell.paragraphs.is_empty() {
                tc.children.push(Node::Element(Element::new("w:p")));
            }
            tr.children.push(Node::Element(tc));
        }
        el.children.push(Node::Element(tr));
    }
    el
}

fn elements_named<'a>(el: &'a mut Element, name: &'a str) -> impl Iterator<Item = &'a mut Element> {
    el.children.iter_mut().filter_map(move |node| match node {
        Node::Element(child) if child.name == name => Some(child),
        _ => None,
    })
}
