//! Fixtures for building small PDFs in tests.

use lopdf::{content::Content, content::Operation, Dictionary, Document, Object, Stream};

/// Key stamped on every generated page so tests can tell pages apart.
const MARKER: &[u8] = b"PageMarker";

/// Create a PDF with `num_pages` pages. Each page carries `prefix * 100 + n`
/// as its marker, where `n` is its 1-based page number.
pub(crate) fn create_test_pdf(prefix: i64, num_pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();

    for i in 0..num_pages {
        let marker = prefix * 100 + i64::from(i) + 1;
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {}", marker).into_bytes(),
                        lopdf::StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
            ("PageMarker", Object::Integer(marker)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    // MediaBox lives on the tree root so merged pages must inherit it.
    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(i64::from(num_pages))),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Read back the markers of every page, in page order.
pub(crate) fn page_markers(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|id| {
            doc.get_dictionary(*id)
                .and_then(|dict| dict.get(MARKER))
                .and_then(|obj| obj.as_i64())
                .unwrap()
        })
        .collect()
}

/// True if every page resolves a MediaBox, directly or through its parents.
pub(crate) fn all_pages_have_media_box(bytes: &[u8]) -> bool {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages().values().all(|&page_id| {
        let mut current = page_id;
        loop {
            let Ok(dict) = doc.get_dictionary(current) else {
                return false;
            };
            if dict.has(b"MediaBox") {
                return true;
            }
            match dict.get(b"Parent").and_then(|p| p.as_reference()) {
                Ok(parent) => current = parent,
                Err(_) => return false,
            }
        }
    })
}
