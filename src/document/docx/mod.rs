//! DOCX container: a zip of XML parts.
//!
//! Only `word/document.xml` and its relationships are rewritten. Every other
//! entry is copied through unchanged, in its original order.

mod read;
mod rels;
mod run_props;
mod write;

use std::io::{Cursor, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use self::rels::Relationships;
use super::model::Document;
use super::xml::{self, Element};
use crate::fs::atomic_write;

const DOCUMENT_PART: &str = "word/document.xml";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

#[derive(Debug, Clone)]
pub struct DocxPackage {
    entries: Vec<(String, Vec<u8>)>,
    root: Element,
    rels: Relationships,
}

impl DocxPackage {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read DOCX: {}", path.display()))?;
        Self::from_bytes(&bytes).with_context(|| format!("Invalid DOCX: {}", path.display()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive =
            zip::ZipArchive::new(Cursor::new(bytes)).context("File is not a zip archive")?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let mut data = Vec::new();
            entry
                .read_to_end(&mut data)
                .with_context(|| format!("Failed to read zip entry {name}"))?;
            entries.push((name, data));
        }

        let document = entries
            .iter()
            .find(|(name, _)| name == DOCUMENT_PART)
            .map(|(_, data)| data)
            .with_context(|| format!("Missing {DOCUMENT_PART}"))?;
        let root = xml::parse(std::str::from_utf8(document).context("document.xml is not UTF-8")?)
            .with_context(|| format!("Failed to parse {DOCUMENT_PART}"))?;

        let rels = match entries.iter().find(|(name, _)| name == DOCUMENT_RELS_PART) {
            Some((_, data)) => Relationships::parse(
                std::str::from_utf8(data).context("document.xml.rels is not UTF-8")?,
            )
            .with_context(|| format!("Failed to parse {DOCUMENT_RELS_PART}"))?,
            None => Relationships::default(),
        };

        log::debug!(
            "Opened DOCX with {} entries and {} relationships",
            entries.len(),
            rels.len()
        );

        Ok(Self {
            entries,
            root,
            rels,
        })
    }

    /// Builds the editable model of the main document body.
    pub fn document(&self) -> Result<Document> {
        read::read_document(&self.root, &self.rels)
    }

    /// Serializes the package with `doc` as its body.
    pub fn to_bytes(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut root = self.root.clone();
        let mut rels = self.rels.clone();
        write::write_document(&mut root, doc, &mut rels)?;

        let document_xml = root.to_document_string().into_bytes();
        let rels_xml = rels.to_xml().into_bytes();

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        let mut wrote_rels = false;
        for (name, data) in &self.entries {
            let data = match name.as_str() {
                DOCUMENT_PART => &document_xml,
                DOCUMENT_RELS_PART => {
                    wrote_rels = true;
                    &rels_xml
                }
                _ => data,
            };
            let options = if name.starts_with("word/media/") {
                stored
            } else {
                deflated
            };
            writer.start_file(name.as_str(), options)?;
            writer.write_all(data)?;
        }
        if !wrote_rels && !rels.is_empty() {
            writer.start_file(DOCUMENT_RELS_PART, deflated)?;
            writer.write_all(&rels_xml)?;
        }

        Ok(writer.finish()?.into_inner())
    }

    pub fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        let bytes = self.to_bytes(doc)?;
        atomic_write(path, &bytes)
            .with_context(|| format!("Failed to write DOCX: {}", path.display()))
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::test_support::docx_with_body;
    use super::*;
    use crate::document::model::{Block, Run};
    use crate::document::style::RunStyle;

    #[test]
    fn test_open_reads_blocks() {
        let bytes = docx_with_body(
            r"<w:p><w:r><w:t>Merhaba</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl>",
        );
        let package = DocxPackage::from_bytes(&bytes).unwrap();
        let doc = package.document().unwrap();

        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.paragraphs().next().unwrap().text(), "Merhaba");
        assert_eq!(doc.tables().count(), 1);
        assert!(matches!(doc.blocks[2], Block::Opaque(_)));
    }

    #[test]
    fn test_untouched_document_survives_round_trip() {
        let bytes = docx_with_body(r"<w:p><w:r><w:t>Merhaba</w:t></w:r></w:p>");
        let package = DocxPackage::from_bytes(&bytes).unwrap();
        let doc = package.document().unwrap();

        let written = package.to_bytes(&doc).unwrap();
        let reopened = DocxPackage::from_bytes(&written).unwrap();

        assert_eq!(reopened.root, package.root);
        let names: Vec<_> = reopened.entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["[Content_Types].xml", "word/document.xml", "word/media/image1.png"]
        );
        assert_eq!(reopened.entries[2].1, b"\x89PNG fake");
    }

    #[test]
    fn test_new_hyperlink_creates_relationship_part() {
        let bytes = docx_with_body(r"<w:p><w:r><w:t>site</w:t></w:r></w:p>");
        let package = DocxPackage::from_bytes(&bytes).unwrap();
        let mut doc = package.document().unwrap();

        let paragraph = doc.paragraphs_mut().next().unwrap();
        paragraph.clear_runs();
        paragraph.push_hyperlink_run("https://example.com", Run::new("site", RunStyle::default()));

        let reopened = DocxPackage::from_bytes(&package.to_bytes(&doc).unwrap()).unwrap();
        assert_eq!(reopened.rels.target("rId1"), Some("https://example.com"));
        let reread = reopened.document().unwrap();
        let runs: Vec<_> = reread.paragraphs().next().unwrap().runs().collect();
        assert_eq!(runs[0].hyperlink, Some("https://example.com"));
    }

    #[test]
    fn test_rejects_non_zip() {
        assert!(DocxPackage::from_bytes(b"plain text").is_err());
    }
}
