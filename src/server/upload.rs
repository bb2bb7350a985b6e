use super::error::ApiError;
use super::scratch::Scratch;
use crate::error::PdfError;
use crate::pdf::{PdfInput, PdfSource};
use axum::extract::Multipart;

/// Label for uploads that arrive without a filename.
const DEFAULT_FILENAME: &str = "document.pdf";

pub struct SplitForm {
    pub file: PdfInput,
    pub page_ranges: String,
}

pub async fn read_split_form(
    multipart: &mut Multipart,
    scratch: &mut Scratch,
) -> Result<SplitForm, ApiError> {
    let mut file = None;
    let mut page_ranges = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                let name = upload_name(field.file_name());
                require_pdf_name(&name)?;
                let path = scratch.spool(field).await?;
                file = Some(PdfInput {
                    name,
                    source: PdfSource::Path(path),
                });
            }
            "page_ranges" => {
                page_ranges = Some(field.text().await?);
            }
            _ => {}
        }
    }

    Ok(SplitForm {
        file: file.ok_or_else(|| missing_field("file"))?,
        page_ranges: page_ranges.ok_or_else(|| missing_field("page_ranges"))?,
    })
}

/// Collect every `files` part in upload order.
pub async fn read_merge_form(
    multipart: &mut Multipart,
    scratch: &mut Scratch,
) -> Result<Vec<PdfInput>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        if field_name == "files" || field_name == "files[]" {
            let name = upload_name(field.file_name());
            let path = scratch.spool(field).await?;
            files.push(PdfInput {
                name,
                source: PdfSource::Path(path),
            });
        }
    }

    if files.len() < 2 {
        return Err(PdfError::InsufficientInputs { count: files.len() }.into());
    }
    for file in &files {
        require_pdf_name(&file.name)?;
    }

    Ok(files)
}

fn missing_field(name: &str) -> ApiError {
    ApiError::InvalidRequest(format!("Missing form field: {}", name))
}

/// Reduce a client-supplied filename to a bare, header-safe name.
pub fn upload_name(file_name: Option<&str>) -> String {
    let base = file_name
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .map(str::trim)
        .unwrap_or_default();

    if base.is_empty() {
        return DEFAULT_FILENAME.to_string();
    }

    base.chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn require_pdf_name(name: &str) -> Result<(), PdfError> {
    if name.to_ascii_lowercase().ends_with(".pdf") {
        Ok(())
    } else {
        Err(PdfError::InvalidInputFormat {
            name: name.to_string(),
            reason: "file name must end in .pdf".to_string(),
        })
    }
}
