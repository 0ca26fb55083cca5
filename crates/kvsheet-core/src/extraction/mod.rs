pub mod pdftotext;

use crate::error::KvsheetError;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, KvsheetError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Join pages into one document text, pages separated by a newline.
///
/// Trailing pages without any text are dropped.
pub fn join_pages(pages: &[PageContent]) -> String {
    let last = pages
        .iter()
        .rposition(|p| p.lines.iter().any(|l| !l.trim().is_empty()));
    let Some(last) = last else {
        return String::new();
    };

    pages[..=last]
        .iter()
        .map(|p| p.lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: usize, lines: &[&str]) -> PageContent {
        PageContent {
            page_number: number,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_join_pages() {
        let pages = vec![page(1, &["Name: A", "Age: 3"]), page(2, &["City: X"])];
        assert_eq!(join_pages(&pages), "Name: A\nAge: 3\nCity: X");
    }

    #[test]
    fn test_join_pages_drops_trailing_empty() {
        let pages = vec![page(1, &["Name: A"]), page(2, &[]), page(3, &["", "  "])];
        assert_eq!(join_pages(&pages), "Name: A");
    }

    #[test]
    fn test_join_pages_all_empty() {
        assert_eq!(join_pages(&[page(1, &[])]), "");
        assert_eq!(join_pages(&[]), "");
    }
}
