use std::path::PathBuf;

use crate::commands::resolve_config;
use crate::{input, output};

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    config: Option<PathBuf>,
    layout: bool,
) -> Result<(), kvsheet_core::error::KvsheetError> {
    let config = resolve_config(config.as_deref())?;
    let parsed = input::load(&input_file, &config.parse, layout)?;

    match output_format {
        "json" => output::json::print(&parsed.records)?,
        "markdown" | "md" => println!(
            "{}",
            output::table::format_markdown(&parsed.records, config.sheet.start_index)
        ),
        _ => println!("{}", output::table::format_records(&parsed.records)),
    }

    Ok(())
}
