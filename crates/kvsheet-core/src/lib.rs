pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;

use error::KvsheetError;
use extraction::{join_pages, PdfExtractor};
use model::{ParseStats, ParsedDocument};
use parsing::{parse_text_with_stats, ParseOptions};

pub use model::Record;
pub use parsing::parse_text;

/// Main API entry point: turn a PDF into ordered key/value records.
///
/// Pages are joined with newlines before parsing. A document that yields no
/// records (no text, or only blank lines) is an error.
pub fn extract_records(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    options: &ParseOptions,
) -> Result<ParsedDocument, KvsheetError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let text = join_pages(&pages);
    log::info!(
        "extracted {} characters from {} page(s) using {}",
        text.chars().count(),
        pages.len(),
        extractor.backend_name()
    );

    let mut parsed = parse_document(&text, options)?;
    parsed.stats.pages = pages.len();
    Ok(parsed)
}

/// Parse already-extracted text. Same contract as [`extract_records`].
pub fn parse_document(text: &str, options: &ParseOptions) -> Result<ParsedDocument, KvsheetError> {
    let (records, stats) = parse_text_with_stats(text, options);
    if records.is_empty() {
        return Err(KvsheetError::NoRecords);
    }
    log::info!(
        "parsed {} record(s): {} key line(s), {} heading(s), {} comment line(s)",
        records.len(),
        stats.key_lines,
        stats.headings,
        stats.comment_lines
    );
    Ok(ParsedDocument {
        records,
        stats: ParseStats { pages: 1, ..stats },
    })
}
