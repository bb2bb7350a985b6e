use thiserror::Error;

pub type Result<T> = std::result::Result<T, PdfError>;

#[derive(Debug, Error)]
pub enum PdfError {
    /// The input could not be parsed as a PDF container.
    #[error("{name} is not a valid PDF: {reason}")]
    InvalidInputFormat { name: String, reason: String },

    /// A page-range token is malformed or out of bounds.
    #[error("Invalid range '{token}': {reason}")]
    InvalidRange { token: String, reason: String },

    /// The range specification was well-formed but selected no pages.
    #[error("No valid pages specified")]
    EmptySelection,

    /// Merge needs at least two documents.
    #[error("At least 2 PDF files required, got {count}")]
    InsufficientInputs { count: usize },

    /// Anything else the PDF library or the filesystem threw at us.
    #[error("Error processing PDF: {0}")]
    Processing(String),
}

impl PdfError {
    pub(crate) fn invalid_range(token: &str, reason: impl Into<String>) -> Self {
        PdfError::InvalidRange {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by what the caller sent us.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PdfError::Processing(_))
    }
}
