use kvsheet_core::Record;

/// Plain-text listing: one block per record, comments indented below.
pub fn format_records(records: &[Record]) -> String {
    let mut out = String::new();
    let max_key = records
        .iter()
        .map(|r| r.key.chars().count())
        .max()
        .unwrap_or(10);
    let index_width = records.len().to_string().len();

    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "{:>iw$}  {:<kw$}  {}\n",
            i + 1,
            record.key,
            record.value,
            iw = index_width,
            kw = max_key
        ));
        for line in record.comments.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str(&format!("{:iw$}    {}\n", "", line, iw = index_width));
            }
        }
    }

    out.push_str(&format!("\n{} record(s)", records.len()));
    out
}

/// `| # | Key | Value | Comments |` preview table, numbered like the sheet's
/// `#` column.
pub fn format_markdown(records: &[Record], start_index: u64) -> String {
    let mut out = String::from("| # | Key | Value | Comments |\n|---|-----|-------|----------|\n");
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            start_index.saturating_add(i as u64),
            markdown_cell(&record.key),
            markdown_cell(&record.value),
            markdown_cell(&record.comments)
        ));
    }
    out
}

fn markdown_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', "<br>")
}
