#![allow(clippy::unwrap_used)]
//! End-to-end pipeline tests: DOCX bytes in, translated DOCX bytes out,
//! with an offline translator standing in for the engines.

use std::io::{Cursor, Read, Write};

use doctl_cli::document::{Cell, Document, DocxPackage, Paragraph};
use doctl_cli::engine::{MockMode, MockTranslator};
use doctl_cli::glossary::{GlossaryTerm, TermTable};
use doctl_cli::translation::DocumentTranslator;
use zip::write::SimpleFileOptions;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/teklif" TargetMode="External"/></Relationships>"#;

const IMAGE: &[u8] = b"\x89PNG not really";

fn build_docx(body_xml: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{body_xml}<w:sectPr/></w:body></w:document>"#
    );
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in [
        ("word/document.xml", document.as_bytes()),
        ("word/_rels/document.xml.rels", RELS.as_bytes()),
        ("word/media/image1.png", IMAGE),
    ] {
        writer.start_file(name, SimpleFileOptions::default()).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

async fn translate_bytes(bytes: &[u8], mode: MockMode, terms: &[GlossaryTerm]) -> Vec<u8> {
    let package = DocxPackage::from_bytes(bytes).unwrap();
    let mut doc = package.document().unwrap();
    let translator = MockTranslator::new(mode);
    DocumentTranslator::new(&translator, TermTable::from_terms(terms), "tr", "en")
        .translate(&mut doc)
        .await;
    package.to_bytes(&doc).unwrap()
}

fn reopen(bytes: &[u8]) -> Document {
    DocxPackage::from_bytes(bytes).unwrap().document().unwrap()
}

fn replace(pairs: &[(&str, &str)]) -> MockMode {
    MockMode::Replace(
        pairs
            .iter()
            .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
            .collect(),
    )
}

fn zip_entry(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut data = Vec::new();
    entry.read_to_end(&mut data).unwrap();
    data
}

#[tokio::test]
async fn test_run_styles_survive_translation() {
    let bytes = build_docx(
        r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Düşük</w:t></w:r><w:r><w:t xml:space="preserve"> maliyet</w:t></w:r></w:p>"#,
    );

    let out = translate_bytes(&bytes, replace(&[("Düşük", "Low"), ("maliyet", "cost")]), &[]).await;
    let doc = reopen(&out);
    let paragraph = doc.paragraphs().next().unwrap();

    assert_eq!(paragraph.text(), "Low cost");
    let runs: Vec<_> = paragraph.runs().collect();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].run.text, "Low");
    assert_eq!(runs[0].run.style.bold, Some(true));
    assert_eq!(runs[1].run.text, " cost");
    assert_ne!(runs[1].run.style.bold, Some(true));
}

#[tokio::test]
async fn test_hyperlink_and_forced_term() {
    let bytes = build_docx(
        r#"<w:p><w:hyperlink r:id="rId5"><w:r><w:t>Teklif</w:t></w:r></w:hyperlink><w:r><w:t xml:space="preserve"> sayfası</w:t></w:r></w:p>"#,
    );
    let terms = [GlossaryTerm::forced("Teklif", "Proposal", "general")];

    let out = translate_bytes(&bytes, replace(&[("sayfası", "page")]), &terms).await;
    let doc = reopen(&out);
    let paragraph = doc.paragraphs().next().unwrap();

    assert_eq!(paragraph.text(), "Proposal page");
    let first = paragraph.runs().next().unwrap();
    assert_eq!(first.run.text, "Proposal");
    assert_eq!(first.hyperlink, Some("https://example.com/teklif"));
}

#[tokio::test]
async fn test_protected_term_reaches_engine_masked() {
    let bytes = build_docx(r"<w:p><w:r><w:t>PayTR ile ödeme</w:t></w:r></w:p>");
    let package = DocxPackage::from_bytes(&bytes).unwrap();
    let mut doc = package.document().unwrap();
    let translator = MockTranslator::new(MockMode::Uppercase);
    let terms = [GlossaryTerm::protected("PayTR", "Technology")];

    DocumentTranslator::new(&translator, TermTable::from_terms(&terms), "tr", "en")
        .translate(&mut doc)
        .await;

    assert!(translator.calls().iter().all(|call| !call.contains("PayTR")));
    assert_eq!(doc.paragraphs().next().unwrap().text(), "PayTR ILE ÖDEME");
}

#[tokio::test]
async fn test_double_spaces_are_kept() {
    let bytes =
        build_docx(r#"<w:p><w:r><w:t xml:space="preserve">Toplam  ücret</w:t></w:r></w:p>"#);

    let out = translate_bytes(&bytes, replace(&[("Toplam", "Total"), ("ücret", "fee")]), &[]).await;

    assert_eq!(reopen(&out).paragraphs().next().unwrap().text(), "Total  fee");
}

#[tokio::test]
async fn test_tables_and_symbol_cells() {
    let bytes = build_docx(
        r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Yüksek kalite</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>✔</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:rPr><w:rFonts w:ascii="Wingdings" w:hAnsi="Wingdings"/></w:rPr><w:t>ü</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
    );

    let out = translate_bytes(&bytes, replace(&[("Yüksek kalite", "High quality")]), &[]).await;
    let doc = reopen(&out);
    let cells: Vec<String> = doc
        .tables()
        .flat_map(|table| &table.rows[0].cells)
        .map(Cell::text)
        .collect();

    assert_eq!(cells, vec!["High quality", "✔", "ü"]);
}

#[tokio::test]
async fn test_failed_translation_leaves_document_intact() {
    let bytes = build_docx(
        r"<w:p><w:r><w:t>Düşük maliyet</w:t></w:r></w:p><w:p><w:r><w:t>Already English</w:t></w:r></w:p>",
    );

    let out = translate_bytes(&bytes, MockMode::Empty, &[]).await;
    let texts: Vec<String> = reopen(&out).paragraphs().map(Paragraph::text).collect();

    assert_eq!(texts, vec!["Düşük maliyet", "Already English"]);
}

#[tokio::test]
async fn test_other_entries_are_copied_through() {
    let bytes = build_docx(r"<w:p><w:r><w:t>Düşük maliyet</w:t></w:r></w:p>");

    let out = translate_bytes(&bytes, MockMode::Uppercase, &[]).await;

    assert_eq!(zip_entry(&out, "word/media/image1.png"), IMAGE);
    assert_eq!(reopen(&out).paragraphs().next().unwrap().text(), "DÜŞÜK MALIYET");
}

#[tokio::test]
async fn test_footnote_mark_keeps_its_place() {
    let bytes = build_docx(
        r#"<w:p><w:r><w:t>Düşük maliyet</w:t></w:r><w:r><w:footnoteReference w:id="1"/></w:r><w:r><w:t xml:space="preserve"> ve kalite</w:t></w:r></w:p>"#,
    );

    let out = translate_bytes(&bytes, MockMode::Uppercase, &[]).await;
    let xml = String::from_utf8(zip_entry(&out, "word/document.xml")).unwrap();

    let paragraph = reopen(&out).paragraphs().next().unwrap().text();
    assert_eq!(paragraph, "Düşük maliyet ve kalite");
    let mark = xml.find("w:footnoteReference").unwrap();
    assert!(xml.find("Düşük maliyet").unwrap() < mark);
    assert!(mark < xml.find(" ve kalite").unwrap());
}

#[tokio::test]
async fn test_bookmarks_stay_around_translated_text() {
    let bytes = build_docx(
        r#"<w:p><w:bookmarkStart w:id="0" w:name="giris"/><w:r><w:t>Düşük maliyet</w:t></w:r><w:bookmarkEnd w:id="0"/></w:p>"#,
    );

    let out = translate_bytes(&bytes, MockMode::Uppercase, &[]).await;
    let xml = String::from_utf8(zip_entry(&out, "word/document.xml")).unwrap();

    let text = xml.find("DÜŞÜK MALIYET").unwrap();
    assert!(xml.find("w:bookmarkStart").unwrap() < text);
    assert!(text < xml.find("w:bookmarkEnd").unwrap());
}

#[tokio::test]
async fn test_protected_term_with_ampersand() {
    let bytes = build_docx(r"<w:p><w:r><w:t>R&amp;D bütçesi</w:t></w:r></w:p>");
    let package = DocxPackage::from_bytes(&bytes).unwrap();
    let mut doc = package.document().unwrap();
    let translator = MockTranslator::new(MockMode::Uppercase);
    let terms = [GlossaryTerm::protected("R&D", "general")];

    DocumentTranslator::new(&translator, TermTable::from_terms(&terms), "tr", "en")
        .translate(&mut doc)
        .await;

    assert!(translator.calls().iter().all(|call| !call.contains("R&amp;D")));
    assert_eq!(doc.paragraphs().next().unwrap().text(), "R&D BÜTÇESI");
}
