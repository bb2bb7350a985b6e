use super::error::ApiError;
use super::scratch::Scratch;
use super::upload::{read_merge_form, read_split_form};
use super::AppState;
use crate::error::PdfError;
use crate::pdf::{merge_documents, split_document};
use anyhow::{anyhow, Context};
use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info};

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "PDF Splitter & Merger API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn split(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut scratch = new_scratch(&state)?;
    let form = read_split_form(&mut multipart, &mut scratch).await?;

    let download_name = format!("split_{}", form.file.name);
    let output = run_blocking(scratch, move || {
        split_document(&form.file, &form.page_ranges)
    })
    .await?;

    let page_count = output.page_count();
    info!(file = %download_name, pages = page_count, "split complete");
    Ok(pdf_response(output.bytes, page_count, &download_name))
}

pub async fn merge(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut scratch = new_scratch(&state)?;
    let inputs = read_merge_form(&mut multipart, &mut scratch).await?;

    let output = run_blocking(scratch, move || merge_documents(&inputs)).await?;

    info!(
        documents = output.documents,
        pages = output.page_count,
        "merge complete"
    );
    Ok(pdf_response(output.bytes, output.page_count, "merged.pdf"))
}

fn new_scratch(state: &AppState) -> Result<Scratch, ApiError> {
    let scratch = Scratch::new(&state.config.scratch_root)
        .context("Failed to create request scratch directory")?;
    debug!(dir = %scratch.path().display(), "created scratch directory");
    Ok(scratch)
}

/// Run a document operation on the blocking pool. The scratch directory moves
/// with the job so it outlives any file the job reads, then is removed.
async fn run_blocking<T, F>(scratch: Scratch, job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, PdfError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || {
        let result = job();
        drop(scratch);
        result
    })
    .await
    .map_err(|e| anyhow!("Document worker failed: {}", e))?;

    Ok(result?)
}

fn pdf_response(bytes: Vec<u8>, page_count: usize, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
            (
                header::HeaderName::from_static("x-page-count"),
                page_count.to_string(),
            ),
        ],
        bytes,
    )
        .into_response()
}
