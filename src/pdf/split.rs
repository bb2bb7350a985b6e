use super::document::{to_bytes, PdfInput};
use crate::error::Result;
use crate::page_range::parse_page_selection;
use tracing::debug;

#[derive(Debug)]
pub struct SplitOutput {
    pub bytes: Vec<u8>,
    /// Zero-based indices of the source pages that were kept, ascending.
    pub pages: Vec<u32>,
}

impl SplitOutput {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Extract the pages selected by `spec` (e.g. "1-3,7") into a new PDF.
pub fn split_document(input: &PdfInput, spec: &str) -> Result<SplitOutput> {
    let doc = input.load()?;
    let total_pages = doc.page_count();

    let pages = parse_page_selection(spec, total_pages)?;
    debug!(
        input = %input.name,
        total_pages,
        selected = pages.len(),
        "splitting document"
    );

    let mut new_doc = doc.extract_pages(&pages)?;
    new_doc.compress();
    let bytes = to_bytes(&mut new_doc)?;

    Ok(SplitOutput { bytes, pages })
}
