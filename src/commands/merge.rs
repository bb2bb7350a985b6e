use crate::pdf::document::save;
use crate::pdf::{merge_documents, PdfInput};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(inputs: &[P], output: P) -> Result<()> {
    let inputs: Vec<PdfInput> = inputs.iter().map(PdfInput::from_path).collect();

    let result = merge_documents(&inputs)?;
    save(&result.bytes, &output)?;

    println!(
        "Merged {} files ({} pages) into {}",
        result.documents,
        result.page_count,
        output.as_ref().display()
    );

    Ok(())
}
