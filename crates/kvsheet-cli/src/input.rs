use kvsheet_core::error::KvsheetError;
use kvsheet_core::export::json;
use kvsheet_core::extraction::pdftotext::PdftotextExtractor;
use kvsheet_core::model::{ParseStats, ParsedDocument};
use kvsheet_core::parsing::ParseOptions;
use std::path::Path;

/// Read `path` into records, dispatching on the file extension.
///
/// `.json` files are taken as an existing record dump and are not
/// re-processed.
pub fn load(
    path: &Path,
    options: &ParseOptions,
    layout: bool,
) -> Result<ParsedDocument, KvsheetError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    log::debug!("loading {} as '{ext}' input", path.display());

    match ext.as_str() {
        "pdf" => {
            let pdf_bytes = std::fs::read(path)?;
            let extractor = PdftotextExtractor::new().with_layout(layout);
            kvsheet_core::extract_records(&pdf_bytes, &extractor, options)
        }
        "txt" | "text" => {
            let text = std::fs::read_to_string(path)?;
            kvsheet_core::parse_document(&text, options)
        }
        "json" => {
            let records = json::load_records(path)?;
            if records.is_empty() {
                return Err(KvsheetError::NoRecords);
            }
            Ok(ParsedDocument {
                records,
                stats: ParseStats::default(),
            })
        }
        _ => Err(KvsheetError::UnsupportedInput(path.display().to_string())),
    }
}
