use crate::pdf::document::save;
use crate::pdf::{split_document, PdfInput};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, pages: &str, output: Q) -> Result<()> {
    let result = split_document(&PdfInput::from_path(&input), pages)?;
    save(&result.bytes, &output)?;

    println!(
        "Extracted {} page(s) to {}",
        result.page_count(),
        output.as_ref().display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{create_test_pdf, page_markers};

    #[test]
    fn test_split_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.pdf");
        std::fs::write(&input, create_test_pdf(1, 4)).unwrap();

        run(&input, "3-4,1", &output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(page_markers(&bytes), vec![101, 103, 104]);
    }

    #[test]
    fn test_split_bad_range_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.pdf");
        std::fs::write(&input, create_test_pdf(1, 2)).unwrap();

        assert!(run(&input, "1-3", &output).is_err());
        assert!(!output.exists());
    }
}
