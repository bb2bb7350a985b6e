use crate::error::{PdfError, Result};
use std::collections::BTreeSet;
use std::fmt;

/// One comma-separated token of a page selection, in 1-based page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: Option<u32>,
}

impl PageRange {
    /// Parse a single token like "5" or "2-4". Bounds are checked by `expand`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some(dash_pos) = s.find('-') {
            let start = parse_page_number(s, &s[..dash_pos])?;
            let end = parse_page_number(s, &s[dash_pos + 1..])?;
            Ok(PageRange {
                start,
                end: Some(end),
            })
        } else {
            let page = parse_page_number(s, s)?;
            Ok(PageRange {
                start: page,
                end: None,
            })
        }
    }

    /// Expand this range into zero-based page indices.
    pub fn expand(&self, total_pages: u32) -> Result<Vec<u32>> {
        let token = self.to_string();

        match self.end {
            None => {
                if self.start < 1 || self.start > total_pages {
                    return Err(PdfError::invalid_range(
                        &token,
                        format!(
                            "page {} is out of bounds (document has {} pages)",
                            self.start, total_pages
                        ),
                    ));
                }
                Ok(vec![self.start - 1])
            }
            Some(end) => {
                if self.start < 1 {
                    return Err(PdfError::invalid_range(&token, "page numbers start at 1"));
                }
                if end > total_pages {
                    return Err(PdfError::invalid_range(
                        &token,
                        format!("end page {} exceeds total pages {}", end, total_pages),
                    ));
                }
                if self.start > end {
                    return Err(PdfError::invalid_range(
                        &token,
                        format!("start page {} is after end page {}", self.start, end),
                    ));
                }
                Ok((self.start - 1..end).collect())
            }
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}", self.start, end),
            None => write!(f, "{}", self.start),
        }
    }
}

fn parse_page_number(token: &str, s: &str) -> Result<u32> {
    let s = s.trim();
    s.parse::<u32>().map_err(|_| {
        if s.is_empty() {
            PdfError::invalid_range(token, "missing page number")
        } else {
            PdfError::invalid_range(token, format!("'{}' is not a valid page number", s))
        }
    })
}

/// Parse a comma-separated list of page ranges like "1-5,10,12-14".
///
/// A blank string yields no ranges; an empty token between commas is an error.
pub fn parse_page_ranges(s: &str) -> Result<Vec<PageRange>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',').map(PageRange::parse).collect()
}

/// Resolve a page selection into sorted, deduplicated zero-based indices.
///
/// Output order is ascending no matter how the tokens were ordered.
pub fn parse_page_selection(s: &str, total_pages: u32) -> Result<Vec<u32>> {
    let mut pages = BTreeSet::new();
    for range in parse_page_ranges(s)? {
        pages.extend(range.expand(total_pages)?);
    }

    if pages.is_empty() {
        return Err(PdfError::EmptySelection);
    }

    Ok(pages.into_iter().collect())
}
