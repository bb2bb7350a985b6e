pub mod document;
pub mod merge;
pub mod split;

#[cfg(test)]
pub(crate) mod testing;

pub use document::{PdfInput, PdfSource};
pub use merge::merge_documents;
pub use split::split_document;
