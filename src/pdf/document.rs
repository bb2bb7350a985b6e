use crate::error::{PdfError, Result};
use lopdf::{Document, ObjectId};
use std::path::{Path, PathBuf};

/// Where the bytes of an input document live.
#[derive(Debug, Clone)]
pub enum PdfSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// An input document plus the label it is reported under in errors.
#[derive(Debug, Clone)]
pub struct PdfInput {
    pub name: String,
    pub source: PdfSource,
}

impl PdfInput {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        PdfInput {
            name: path.display().to_string(),
            source: PdfSource::Path(path.to_path_buf()),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        PdfInput {
            name: name.into(),
            source: PdfSource::Memory(bytes),
        }
    }

    pub fn load(&self) -> Result<PdfDocument> {
        match &self.source {
            PdfSource::Path(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    PdfError::Processing(format!("Failed to read {}: {}", self.name, e))
                })?;
                PdfDocument::load_mem(&self.name, &bytes)
            }
            PdfSource::Memory(bytes) => PdfDocument::load_mem(&self.name, bytes),
        }
    }
}

pub struct PdfDocument {
    pub doc: Document,
}

impl PdfDocument {
    /// Parse a document from memory. Anything lopdf cannot read is reported
    /// as a format error against `name`.
    pub fn load_mem(name: &str, bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes).map_err(|e| PdfError::InvalidInputFormat {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(PdfDocument { doc })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Build a new document that keeps only the given zero-based page indices.
    ///
    /// Pages come out in document order; the order of `indices` is ignored.
    pub fn extract_pages(&self, indices: &[u32]) -> Result<Document> {
        let total = self.page_count();

        if let Some(&bad) = indices.iter().find(|&&i| i >= total) {
            return Err(PdfError::Processing(format!(
                "Page index {} is out of range for {} pages",
                bad, total
            )));
        }

        let mut keep = indices.to_vec();
        keep.sort_unstable();

        let mut new_doc = self.doc.clone();

        let pages_to_delete: Vec<u32> = self
            .page_ids()
            .into_iter()
            .map(|(num, _)| num)
            .filter(|num| keep.binary_search(&(num - 1)).is_err())
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
            new_doc.prune_objects();
        }

        Ok(new_doc)
    }
}

/// Serialize a document into a fresh buffer.
pub fn to_bytes(doc: &mut Document) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfError::Processing(format!("Failed to serialize PDF: {}", e)))?;
    Ok(buffer)
}

/// Write a serialized document to disk.
pub fn save<P: AsRef<Path>>(bytes: &[u8], path: P) -> Result<()> {
    std::fs::write(&path, bytes).map_err(|e| {
        PdfError::Processing(format!(
            "Failed to save PDF to {}: {}",
            path.as_ref().display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{create_test_pdf, page_markers};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_pages_ignores_index_order() {
        let doc = PdfDocument::load_mem("six.pdf", &create_test_pdf(1, 6)).unwrap();
        let mut extracted = doc.extract_pages(&[5, 0, 2, 2]).unwrap();
        let bytes = to_bytes(&mut extracted).unwrap();
        assert_eq!(page_markers(&bytes), vec![101, 103, 106]);
    }

    #[test]
    fn test_extract_pages_rejects_out_of_range_index() {
        let doc = PdfDocument::load_mem("two.pdf", &create_test_pdf(1, 2)).unwrap();
        assert!(matches!(
            doc.extract_pages(&[0, 2]),
            Err(PdfError::Processing(_))
        ));
    }
}
