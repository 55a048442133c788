//! Extraction tests against small PDFs built in memory with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use labeldiff::error::Error;
use labeldiff::{
    Comparison, ExtractOptions, HeaderVocabulary, LabelDiff, LopdfSource, PageSelection,
    SectionCategory, Side, TextSource,
};

/// Build a PDF with one text line per `BT`/`ET` block.
fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 760 - 16 * i as i64;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![50.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn leaflet(dosage: &str, storage: &str) -> Vec<u8> {
    build_pdf(&[
        &["Product: Febrilex", "Indications", "Reduces fever and pain."],
        &["Dosage", dosage, "Storage", storage],
    ])
}

fn english_vocabulary() -> HeaderVocabulary {
    HeaderVocabulary::new(
        ["Indications", "Dosage", "Storage"],
        vec![
            (SectionCategory::Efficacy, vec!["Indications"]),
            (SectionCategory::Dosage, vec!["Dosage"]),
        ],
    )
}

#[test]
fn test_read_pages() {
    let data = leaflet("Take one tablet twice daily.", "Keep below 25C.");
    let pages = LopdfSource::new()
        .read_pages(&data, &ExtractOptions::default())
        .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages.text_page_count(), 2);

    let text = pages.full_text();
    assert!(text.contains("Reduces fever and pain."));
    assert!(text.contains("Take one tablet twice daily."));
    assert!(text.find("Indications").unwrap() < text.find("Storage").unwrap());
}

#[test]
fn test_page_selection() {
    let data = leaflet("Take one tablet twice daily.", "Keep below 25C.");
    let options = ExtractOptions::new().with_pages(PageSelection::parse("2").unwrap());
    let pages = LopdfSource::new().read_pages(&data, &options).unwrap();

    assert_eq!(pages.len(), 1);
    let text = pages.full_text();
    assert!(text.contains("Dosage"));
    assert!(!text.contains("Indications"));
}

#[test]
fn test_strict_page_out_of_range() {
    let data = leaflet("Take one tablet twice daily.", "Keep below 25C.");
    let options = ExtractOptions::new()
        .with_pages(PageSelection::parse("5").unwrap())
        .strict();

    let result = LopdfSource::new().read_pages(&data, &options);
    assert!(matches!(result, Err(Error::PageOutOfRange(5, 2))));

    let lenient = ExtractOptions::new().with_pages(PageSelection::parse("5").unwrap());
    let pages = LopdfSource::new().read_pages(&data, &lenient).unwrap();
    assert!(pages.is_empty());
}

#[test]
fn test_sections_with_custom_vocabulary() {
    let data = leaflet("Take one tablet twice daily.", "Keep below 25C.");
    let comparator = LabelDiff::new().vocabulary(english_vocabulary()).build();
    let sections = comparator.extract_sections_from_bytes(&data);

    assert!(sections.starts_with("\n\n--- [Indications] ---\nReduces fever and pain."));
    assert!(sections.contains("--- [Dosage] ---\nTake one tablet twice daily."));
    assert!(!sections.contains("Keep below"));
    assert!(!sections.contains("Febrilex"));
}

#[test]
fn test_compare_dosage_change() {
    let old = leaflet("Take one tablet twice daily.", "Keep below 25C.");
    let new = leaflet("Take one tablet three times daily.", "Keep below 30C.");
    let comparator = LabelDiff::new().vocabulary(english_vocabulary()).build();

    let result = comparator.compare_bytes(&old, &new);
    let report = result.comparison.report().unwrap();
    assert!(report.markup.contains(">twice</span>"));
    assert!(report.markup.contains(">three times</span>"));
    assert!(!report.markup.contains("30C"));
}

#[test]
fn test_storage_only_change_is_identical() {
    let old = leaflet("Take one tablet twice daily.", "Keep below 25C.");
    let new = leaflet("Take one tablet twice daily.", "Keep below 30C.");
    let comparator = LabelDiff::new().vocabulary(english_vocabulary()).build();

    assert!(comparator.compare_bytes(&old, &new).comparison.is_identical());
}

#[test]
fn test_whole_document_sees_every_change() {
    let old = leaflet("Take one tablet twice daily.", "Keep below 25C.");
    let new = leaflet("Take one tablet twice daily.", "Keep below 30C.");
    let comparator = LabelDiff::new().whole_document().build();

    let result = comparator.compare_bytes(&old, &new);
    assert!(result.old_text.contains("Product: Febrilex"));
    assert!(result.comparison.is_changed());
}

#[test]
fn test_default_vocabulary_finds_nothing_in_english_leaflet() {
    let data = leaflet("Take one tablet twice daily.", "Keep below 25C.");
    let result = LabelDiff::new().build().compare_bytes(&data, &data);

    assert_eq!(result.comparison, Comparison::NothingToCompare { side: Side::Both });
}

#[test]
fn test_unreadable_input_yields_empty_sections() {
    let comparator = LabelDiff::new().build();
    assert_eq!(comparator.extract_sections_from_bytes(b"%PDF-1.7\ngarbage"), "");
    assert_eq!(comparator.extract_sections_from_bytes(b"PK\x03\x04"), "");
}

#[test]
fn test_compare_files_on_disk() {
    let data = leaflet("Take one tablet twice daily.", "Keep below 25C.");
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.pdf");
    let new = dir.path().join("new.pdf");
    std::fs::write(&old, &data).unwrap();
    std::fs::write(&new, &data).unwrap();

    let comparator = LabelDiff::new()
        .vocabulary(english_vocabulary())
        .parallel(true)
        .build();
    let result = comparator.compare_files(&old, &new);

    assert_eq!(result.old_text, result.new_text);
    assert!(result.comparison.is_identical());

    let missing = comparator.compare_files(dir.path().join("missing.pdf"), &new);
    assert_eq!(
        missing.comparison,
        Comparison::NothingToCompare { side: Side::Old }
    );
}
