use kvsheet_core::error::KvsheetError;
use std::path::{Path, PathBuf};

use crate::commands::resolve_config;

pub fn show(config: Option<PathBuf>) -> Result<(), KvsheetError> {
    let config = resolve_config(config.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), KvsheetError> {
    let config = kvsheet_core::config::load_config(file)?;
    println!("Valid config: {}", file.display());
    println!(
        "  sheet '{}', header row {}, first index {}",
        config.sheet.sheet_name, config.sheet.header_row, config.sheet.start_index
    );
    println!(
        "  labels up to {} chars, promote comment lines under {} chars",
        config.parse.max_label_chars, config.parse.promote_max_chars
    );
    Ok(())
}
