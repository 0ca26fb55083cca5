use std::path::Path;

use crate::error::KvsheetError;
use crate::model::Record;

/// Pretty-printed JSON array of `{Key, Value, Comments}` objects.
pub fn to_json_string(records: &[Record]) -> Result<String, KvsheetError> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn write_file(records: &[Record], path: &Path) -> Result<(), KvsheetError> {
    std::fs::write(path, to_json_string(records)?)?;
    log::info!("wrote {} record(s) to {}", records.len(), path.display());
    Ok(())
}

/// Parse a previously written dump.
pub fn parse_records_str(json: &str) -> Result<Vec<Record>, KvsheetError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_records(path: &Path) -> Result<Vec<Record>, KvsheetError> {
    let content = std::fs::read_to_string(path)?;
    parse_records_str(&content)
}
