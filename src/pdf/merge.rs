use super::document::{to_bytes, PdfInput};
use crate::error::{PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::BTreeMap;
use tracing::debug;

/// Page attributes a page may take from an ancestor `Pages` node.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

#[derive(Debug)]
pub struct MergeOutput {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub documents: usize,
}

/// Merge two or more PDFs, appending every page of each input in order.
///
/// Objects of each input are renumbered past the ones already collected,
/// then a fresh catalog and page tree are built over the collected pages.
pub fn merge_documents(inputs: &[PdfInput]) -> Result<MergeOutput> {
    if inputs.len() < 2 {
        return Err(PdfError::InsufficientInputs {
            count: inputs.len(),
        });
    }

    let mut max_id = 1;
    let mut version = String::from("1.5");
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for (position, input) in inputs.iter().enumerate() {
        let mut doc = input
            .load()
            .map_err(|e| with_position(e, position))?
            .doc;

        // Pages lose their old ancestors below, so pull inherited values down first.
        flatten_inherited_attributes(&mut doc);

        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        if doc.version > version {
            version = doc.version.clone();
        }

        let pages = doc.get_pages();
        debug!(input = %input.name, pages = pages.len(), "appending document");
        page_ids.extend(pages.into_values());
        objects.extend(doc.objects);
    }

    let mut merged = Document::with_version(version);
    merged.objects.extend(objects);
    merged.max_id = max_id - 1;

    let pages_id = merged.new_object_id();
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    merged.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = merged.new_object_id();
    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    merged.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged.trailer.set("Root", Object::Reference(catalog_id));

    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = merged.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    // Old catalogs and page tree nodes are unreachable now.
    merged.prune_objects();
    merged.compress();

    let bytes = to_bytes(&mut merged)?;

    Ok(MergeOutput {
        bytes,
        page_count: page_ids.len(),
        documents: inputs.len(),
    })
}

fn with_position(err: PdfError, position: usize) -> PdfError {
    match err {
        PdfError::InvalidInputFormat { name, reason } => PdfError::InvalidInputFormat {
            name: format!("File {} ({})", position + 1, name),
            reason,
        },
        other => other,
    }
}

/// Copy inheritable attributes from ancestor nodes onto each page that lacks them.
fn flatten_inherited_attributes(doc: &mut Document) {
    for (page_id, key, value) in collect_inherited(doc) {
        if let Ok(page) = doc.get_dictionary_mut(page_id) {
            page.set(key.to_vec(), value);
        }
    }
}

fn collect_inherited(doc: &Document) -> Vec<(ObjectId, &'static [u8], Object)> {
    let mut updates = Vec::new();

    for page_id in doc.get_pages().into_values() {
        let Ok(page) = doc.get_dictionary(page_id) else {
            continue;
        };
        for key in INHERITABLE_KEYS {
            if page.has(key) {
                continue;
            }
            if let Some(value) = find_inherited(doc, page, key) {
                updates.push((page_id, key, value));
            }
        }
    }

    updates
}

fn find_inherited(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent_id = page.get(b"Parent").and_then(Object::as_reference).ok()?;

    // Bounded walk; a malformed tree can point back at itself.
    for _ in 0..64 {
        let parent = doc.get_dictionary(parent_id).ok()?;
        if let Ok(value) = parent.get(key) {
            return Some(value.clone());
        }
        parent_id = parent.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{all_pages_have_media_box, create_test_pdf, page_markers};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_appends_pages_in_input_order() {
        let inputs = vec![
            PdfInput::from_bytes("a.pdf", create_test_pdf(1, 2)),
            PdfInput::from_bytes("b.pdf", create_test_pdf(2, 3)),
        ];
        let output = merge_documents(&inputs).unwrap();
        assert_eq!(output.page_count, 5);
        assert_eq!(output.documents, 2);
        assert_eq!(page_markers(&output.bytes), vec![101, 102, 201, 202, 203]);
    }

    #[test]
    fn test_merge_keeps_inherited_media_box() {
        let inputs = vec![
            PdfInput::from_bytes("a.pdf", create_test_pdf(1, 1)),
            PdfInput::from_bytes("b.pdf", create_test_pdf(2, 1)),
        ];
        let output = merge_documents(&inputs).unwrap();
        assert!(all_pages_have_media_box(&output.bytes));
    }

    #[test]
    fn test_merge_three_documents() {
        let inputs: Vec<_> = (1..=3)
            .map(|n| PdfInput::from_bytes(format!("{n}.pdf"), create_test_pdf(n, 1)))
            .collect();
        let output = merge_documents(&inputs).unwrap();
        assert_eq!(page_markers(&output.bytes), vec![101, 201, 301]);
    }

    #[test]
    fn test_merge_single_document_fails() {
        let inputs = vec![PdfInput::from_bytes("a.pdf", create_test_pdf(1, 2))];
        assert!(matches!(
            merge_documents(&inputs),
            Err(PdfError::InsufficientInputs { count: 1 })
        ));
    }

    #[test]
    fn test_merge_no_documents_fails() {
        assert!(matches!(
            merge_documents(&[]),
            Err(PdfError::InsufficientInputs { count: 0 })
        ));
    }

    #[test]
    fn test_merge_reports_which_input_is_bad() {
        let inputs = vec![
            PdfInput::from_bytes("good.pdf", create_test_pdf(1, 2)),
            PdfInput::from_bytes("bad.pdf", b"%PDF-garbage".to_vec()),
        ];
        let err = merge_documents(&inputs).unwrap_err();
        match &err {
            PdfError::InvalidInputFormat { name, .. } => assert_eq!(name, "File 2 (bad.pdf)"),
            other => panic!("expected InvalidInputFormat, got {other:?}"),
        }
        assert!(err.to_string().starts_with("File 2 (bad.pdf) is not a valid PDF"));
    }
}
