use kvsheet_core::error::KvsheetError;
use kvsheet_core::export::json::to_json_string;
use kvsheet_core::Record;

pub fn print(records: &[Record]) -> Result<(), KvsheetError> {
    let json = to_json_string(records)?;
    println!("{json}");
    Ok(())
}
