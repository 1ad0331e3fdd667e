//! docfill - Placeholder filling for DOCX packages
//!
//! Pipeline:
//! 1. Package loader: ZIP in, parts kept verbatim (package::loader)
//! 2. Markup parser: fidelity-preserving DOM (core, dom)
//! 3. Text indexing: run-text leaves + flattened virtual text (index)
//! 4. Replacement engine: forward-only sequential filling (fill)
//! 5. Serializer + rebuilder: ZIP out, only the document part changed
//! 6. Relationship validator: advisory orphan scan (rels)
//!
//! The document part round-trips byte for byte when nothing matches:
//! entities stay encoded, attribute order and quoting are source order,
//! and self-closing tags stay self-closing.

use tracing::{info, warn};

pub mod core;
pub mod dom;
pub mod error;
pub mod fill;
pub mod index;
pub mod package;
pub mod rels;

pub use error::FillError;
pub use fill::{FillCounts, FillOptions, FillReport, SlotOutcome, SlotRequest, SlotStatus};

use dom::XmlDocument;
use index::TextNodeIndex;
use package::{DocxPackage, DOCUMENT_PART, DOCUMENT_RELS_PART};
use rels::RelationshipTable;

/// Fill placeholder slots in a DOCX package
///
/// Requests are applied strictly in order against a forward-only cursor
/// (see [`fill::engine`]). The returned report carries the rebuilt
/// package plus per-request outcomes; a request whose literal is not
/// found is reported, never an error.
pub fn fill_document(
    bytes: &[u8],
    requests: Vec<SlotRequest>,
    options: &FillOptions,
) -> Result<FillReport, FillError> {
    let package = DocxPackage::open(bytes)?;
    let document_xml = package
        .part(DOCUMENT_PART)
        .ok_or_else(|| FillError::Package(format!("package has no {DOCUMENT_PART} part")))?;

    let mut doc = XmlDocument::parse(document_xml)?;
    let mut index = TextNodeIndex::collect(&doc, &options.run_text_tags);
    let (counts, outcomes) = fill::apply_requests(&mut doc, &mut index, requests);

    let orphaned_relationships = if options.validate_relationships {
        // Validation is advisory; a broken rels part must not fail the
        // fill, so it degrades to an empty table
        let table = match package.part(DOCUMENT_RELS_PART) {
            Some(rels_xml) => RelationshipTable::parse(rels_xml).unwrap_or_else(|err| {
                warn!(error = %err, "relationship table unreadable, validating against empty table");
                RelationshipTable::default()
            }),
            None => RelationshipTable::default(),
        };
        rels::find_orphaned_references(&doc, &table)
    } else {
        Vec::new()
    };

    let serialized = dom::serialize(&doc)?;
    let rebuilt = package::rebuild_package(&package, &serialized)?;

    info!(
        changed = counts.changed,
        skipped = counts.skipped,
        not_found = counts.not_found,
        orphans = orphaned_relationships.len(),
        "fill pass complete"
    );

    Ok(FillReport {
        bytes: rebuilt,
        counts,
        outcomes,
        orphaned_relationships,
    })
}

/// Extract the run text of the main document part, space-joined
///
/// Leaves are joined with single spaces in document order; no other
/// normalization is applied.
pub fn extract_document_text(bytes: &[u8], options: &FillOptions) -> Result<String, FillError> {
    let package = DocxPackage::open(bytes)?;
    let document_xml = package
        .part(DOCUMENT_PART)
        .ok_or_else(|| FillError::Package(format!("package has no {DOCUMENT_PART} part")))?;

    let doc = XmlDocument::parse(document_xml)?;
    let index = TextNodeIndex::collect(&doc, &options.run_text_tags);
    let joined = index
        .handles()
        .iter()
        .map(|h| h.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const CONTENT_TYPES: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

    const RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/></Relationships>"#;

    fn docx_with(document_xml: &[u8], extra: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(CONTENT_TYPES).unwrap();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document_xml).unwrap();
        for (name, data) in extra {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn docx(document_xml: &[u8]) -> Vec<u8> {
        docx_with(document_xml, &[])
    }

    fn document_part(bytes: &[u8]) -> Vec<u8> {
        let package = DocxPackage::open(bytes).unwrap();
        package.part(DOCUMENT_PART).unwrap().to_vec()
    }

    fn slot(id: &str, original: &str, filled: &str) -> SlotRequest {
        SlotRequest {
            id: id.to_string(),
            original_text: original.to_string(),
            filled_value: filled.to_string(),
        }
    }

    #[test]
    fn test_fill_two_placeholders() {
        let input = docx(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Hello [Name], welcome to [Company].</w:t></w:r></w:p></w:body></w:document>"#,
        );
        let report = fill_document(
            &input,
            vec![slot("n", "[Name]", "Alice"), slot("c", "[Company]", "Acme")],
            &FillOptions::default(),
        )
        .unwrap();

        assert_eq!(report.counts.changed, 2);
        let text = extract_document_text(&report.bytes, &FillOptions::default()).unwrap();
        assert_eq!(text, "Hello Alice, welcome to Acme.");
    }

    #[test]
    fn test_split_run_placeholder_end_to_end() {
        let input = docx(
            br#"<w:document><w:body><w:p><w:r><w:t>Acme</w:t></w:r><w:r><w:t> Corp</w:t></w:r><w:r><w:t>oration</w:t></w:r></w:p></w:body></w:document>"#,
        );
        let report = fill_document(
            &input,
            vec![slot("c", "Acme Corporation", "Globex LLC")],
            &FillOptions::default(),
        )
        .unwrap();

        assert_eq!(report.counts.changed, 1);
        let part = document_part(&report.bytes);
        let xml = String::from_utf8(part).unwrap();
        // The value lands once, in the first leaf; later leaves are
        // emptied but their runs survive
        assert!(xml.contains("<w:t>Globex LLC</w:t>"));
        assert_eq!(xml.matches("Globex").count(), 1);
        assert!(xml.contains("<w:t></w:t>"));
    }

    #[test]
    fn test_unmatched_request_leaves_part_untouched() {
        let source: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><!-- generator: test --><w:body><w:p><w:r><w:rPr><w:b w:val="true"/></w:rPr><w:t xml:space="preserve">no placeholders &amp; none expected</w:t></w:r></w:p></w:body></w:document>"#;
        let input = docx(source);
        let report = fill_document(
            &input,
            vec![slot("x", "[Missing]", "value")],
            &FillOptions::default(),
        )
        .unwrap();

        assert_eq!(report.counts.not_found, 1);
        // Byte-for-byte round trip: prolog, comment, entity, attribute
        // quoting, everything
        assert_eq!(document_part(&report.bytes), source);
    }

    #[test]
    fn test_unchanged_value_is_idempotent() {
        let source: &[u8] =
            br#"<w:document><w:body><w:r><w:t>keep [This] as is</w:t></w:r></w:body></w:document>"#;
        let input = docx(source);
        let report = fill_document(
            &input,
            vec![slot("t", "[This]", "[This]")],
            &FillOptions::default(),
        )
        .unwrap();

        assert_eq!(report.counts.skipped, 1);
        assert_eq!(report.counts.changed, 0);
        assert_eq!(document_part(&report.bytes), source);
    }

    #[test]
    fn test_other_parts_survive_byte_identical() {
        let media: &[u8] = b"\x89PNG\r\n\x1a\nfake image bytes";
        let input = docx_with(
            br#"<w:document><w:body><w:r><w:t>[X]</w:t></w:r></w:body></w:document>"#,
            &[
                ("word/_rels/document.xml.rels", RELS),
                ("word/media/image1.png", media),
            ],
        );
        let report =
            fill_document(&input, vec![slot("x", "[X]", "y")], &FillOptions::default()).unwrap();

        let package = DocxPackage::open(&report.bytes).unwrap();
        assert_eq!(package.part("word/media/image1.png"), Some(media));
        assert_eq!(package.part("word/_rels/document.xml.rels"), Some(RELS));
        assert_eq!(package.part("[Content_Types].xml"), Some(CONTENT_TYPES));
    }

    #[test]
    fn test_zero_requests_round_trips_the_part() {
        let source: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t xml:space="preserve"> spaced </w:t></w:r></w:p><w:sectPr/></w:body></w:document>"#;
        let input = docx(source);
        let report = fill_document(&input, Vec::new(), &FillOptions::default()).unwrap();
        assert_eq!(report.counts, FillCounts::default());
        assert_eq!(document_part(&report.bytes), source);
    }

    #[test]
    fn test_orphaned_relationship_reported() {
        let input = docx_with(
            br#"<w:document><w:body><w:drawing><a:blip r:embed="rId99"/></w:drawing><w:r><w:t>[X]</w:t></w:r></w:body></w:document>"#,
            &[("word/_rels/document.xml.rels", RELS)],
        );
        let report =
            fill_document(&input, vec![slot("x", "[X]", "y")], &FillOptions::default()).unwrap();
        assert_eq!(report.orphaned_relationships, vec!["rId99"]);
    }

    #[test]
    fn test_malformed_rels_part_does_not_abort_fill() {
        let input = docx_with(
            br#"<w:document><w:body><w:drawing><a:blip r:embed="rId1"/></w:drawing><w:r><w:t>[X]</w:t></w:r></w:body></w:document>"#,
            &[("word/_rels/document.xml.rels", b"<Relationships><broken" as &[u8])],
        );
        let report =
            fill_document(&input, vec![slot("x", "[X]", "y")], &FillOptions::default()).unwrap();
        assert_eq!(report.counts.changed, 1);
        // Validation degrades to an empty table, so the reference shows
        // up as an orphan rather than an error
        assert_eq!(report.orphaned_relationships, vec!["rId1"]);
    }

    #[test]
    fn test_relationship_validation_can_be_disabled() {
        let input = docx(
            br#"<w:document><w:body><a:blip r:embed="rId99"/></w:body></w:document>"#,
        );
        let options = FillOptions {
            validate_relationships: false,
            ..FillOptions::default()
        };
        let report = fill_document(&input, Vec::new(), &options).unwrap();
        assert!(report.orphaned_relationships.is_empty());
    }

    #[test]
    fn test_filled_value_escaped_in_part() {
        let input = docx(
            br#"<w:document><w:body><w:r><w:t>Dept: [D]</w:t></w:r></w:body></w:document>"#,
        );
        let report = fill_document(
            &input,
            vec![slot("d", "[D]", "R&D <new>")],
            &FillOptions::default(),
        )
        .unwrap();
        let xml = String::from_utf8(document_part(&report.bytes)).unwrap();
        assert!(xml.contains("Dept: R&amp;D &lt;new&gt;"));
    }

    #[test]
    fn test_missing_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(CONTENT_TYPES).unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = fill_document(&bytes, Vec::new(), &FillOptions::default()).unwrap_err();
        assert!(matches!(err, FillError::Package(_)));
    }

    #[test]
    fn test_extract_document_text_joins_runs() {
        let input = docx(
            br#"<w:document><w:body><w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t>world</w:t></w:r></w:p></w:body></w:document>"#,
        );
        let text = extract_document_text(&input, &FillOptions::default()).unwrap();
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn test_custom_run_text_tags() {
        let input = docx(
            br#"<document><cell>[A]</cell><t>[A]</t></document>"#,
        );
        let options = FillOptions {
            run_text_tags: vec!["cell".to_string()],
            ..FillOptions::default()
        };
        let report = fill_document(&input, vec![slot("a", "[A]", "v")], &options).unwrap();
        let xml = String::from_utf8(document_part(&report.bytes)).unwrap();
        assert!(xml.contains("<cell>v</cell>"));
        assert!(xml.contains("<t>[A]</t>"));
    }
}
