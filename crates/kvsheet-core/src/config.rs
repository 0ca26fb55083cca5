use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::KvsheetError;
use crate::export::xlsx::{SheetOptions, MAX_START_INDEX};
use crate::parsing::ParseOptions;

/// Everything a run can be configured with. Every field has a default, so an
/// empty JSON object is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseOptions,
    pub sheet: SheetOptions,
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<Config, KvsheetError> {
    let content = std::fs::read_to_string(path).map_err(|e| KvsheetError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: Config = serde_json::from_str(&content).map_err(|e| KvsheetError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<Config, KvsheetError> {
    let config: Config = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &Config) -> Result<(), KvsheetError> {
    if config.parse.max_label_chars == 0 {
        return Err(KvsheetError::ConfigInvalid(
            "parse.max_label_chars must be at least 1".into(),
        ));
    }
    if config.parse.promote_max_chars == 0 {
        return Err(KvsheetError::ConfigInvalid(
            "parse.promote_max_chars must be at least 1".into(),
        ));
    }

    let sheet = &config.sheet;
    let name_len = sheet.sheet_name.chars().count();
    if name_len == 0 || name_len > 31 {
        return Err(KvsheetError::ConfigInvalid(format!(
            "sheet.sheet_name '{}' must be 1 to 31 characters",
            sheet.sheet_name
        )));
    }
    if let Some(c) = sheet
        .sheet_name
        .chars()
        .find(|c| matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
    {
        return Err(KvsheetError::ConfigInvalid(format!(
            "sheet.sheet_name '{}' contains forbidden character '{}'",
            sheet.sheet_name, c
        )));
    }

    if sheet.header_row == 0 {
        return Err(KvsheetError::ConfigInvalid(
            "sheet.header_row is 1-based and must be at least 1".into(),
        ));
    }

    if sheet.start_index > MAX_START_INDEX {
        return Err(KvsheetError::ConfigInvalid(format!(
            "sheet.start_index {} is above {MAX_START_INDEX}",
            sheet.start_index
        )));
    }

    if let Some(w) = sheet.column_widths.iter().find(|w| w.is_nan() || **w <= 0.0) {
        return Err(KvsheetError::ConfigInvalid(format!(
            "sheet.column_widths must be positive, got {w}"
        )));
    }

    if sheet.header_fill.len() != 6 || !sheet.header_fill.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(KvsheetError::ConfigInvalid(format!(
            "sheet.header_fill '{}' must be six hex digits, e.g. D3D3D3",
            sheet.header_fill
        )));
    }

    Ok(())
}
