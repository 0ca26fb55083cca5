use kvsheet_core::error::KvsheetError;
use kvsheet_core::export::{json, xlsx};
use std::path::PathBuf;

use crate::commands::resolve_config;
use crate::input;

pub struct ExportArgs {
    pub input_file: PathBuf,
    pub xlsx: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub sheet_name: Option<String>,
    pub start_index: Option<u64>,
    pub layout: bool,
}

pub fn run(args: ExportArgs) -> Result<(), KvsheetError> {
    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(name) = args.sheet_name {
        config.sheet.sheet_name = name;
    }
    if let Some(start) = args.start_index {
        config.sheet.start_index = start;
    }
    // Flags may have broken an otherwise valid config.
    kvsheet_core::config::validate_config(&config)?;

    let parsed = input::load(&args.input_file, &config.parse, args.layout)?;

    let xlsx_path = args
        .xlsx
        .unwrap_or_else(|| args.input_file.with_extension("xlsx"));
    xlsx::write_file(&parsed.records, &config.sheet, &xlsx_path)?;
    eprintln!(
        "Extracted {} record(s), written to {}",
        parsed.records.len(),
        xlsx_path.display()
    );

    if let Some(json_path) = args.json {
        json::write_file(&parsed.records, &json_path)?;
        eprintln!("  JSON written to {}", json_path.display());
    }

    let stats = &parsed.stats;
    if stats.lines > 0 {
        eprintln!(
            "  {} line(s): {} key line(s), {} heading(s), {} comment line(s)",
            stats.lines, stats.key_lines, stats.headings, stats.comment_lines
        );
    }

    Ok(())
}
