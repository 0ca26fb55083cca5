//! Minimal Office Open XML writer for the record sheet.
//!
//! Produces one worksheet with a styled header row and bordered, wrapped data
//! rows. Cell text is written as inline strings, so no shared-string table is
//! needed.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::KvsheetError;
use crate::model::Record;

pub const HEADERS: [&str; 4] = ["#", "Key", "Value", "Comments"];
const COLUMNS: [&str; 4] = ["A", "B", "C", "D"];

// Indices into cellXfs in styles.xml.
const STYLE_HEADER: &str = "1";
const STYLE_DATA: &str = "2";

/// Largest `#` value a spreadsheet cell (an IEEE double) holds exactly.
pub const MAX_START_INDEX: u64 = 1 << 53;

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

/// Layout and styling of the output sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetOptions {
    pub sheet_name: String,
    /// 1-based row of the header; data starts on the row below.
    pub header_row: u32,
    /// Value written in the `#` column of the first data row.
    pub start_index: u64,
    /// Widths of the `#`, Key, Value and Comments columns.
    pub column_widths: [f64; 4],
    /// RGB hex of the header fill, without a leading '#'.
    pub header_fill: String,
}

impl Default for SheetOptions {
    fn default() -> Self {
        SheetOptions {
            sheet_name: "Output".into(),
            header_row: 2,
            start_index: 1,
            column_widths: [5.0, 30.0, 40.0, 80.0],
            header_fill: "D3D3D3".into(),
        }
    }
}

/// Write the workbook for `records` into `writer`, returning the writer.
pub fn write_workbook<W: Write + Seek>(
    records: &[Record],
    options: &SheetOptions,
    writer: W,
) -> Result<W, KvsheetError> {
    let mut zip = ZipWriter::new(writer);
    let file_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, String); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml(&options.sheet_name)),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/styles.xml", styles_xml(&options.header_fill)),
        ("xl/worksheets/sheet1.xml", sheet_xml(records, options)?),
    ];

    for (name, body) in &parts {
        zip.start_file(*name, file_options)?;
        zip.write_all(body.as_bytes())?;
    }

    let writer = zip.finish()?;
    log::info!(
        "wrote {} data row(s) to sheet '{}'",
        records.len(),
        options.sheet_name
    );
    Ok(writer)
}

/// Render the workbook into memory.
pub fn to_bytes(records: &[Record], options: &SheetOptions) -> Result<Vec<u8>, KvsheetError> {
    let cursor = write_workbook(records, options, Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}

/// Write the workbook to `path`, replacing any existing file.
pub fn write_file(
    records: &[Record],
    options: &SheetOptions,
    path: &Path,
) -> Result<(), KvsheetError> {
    let file = std::fs::File::create(path)?;
    let mut file = write_workbook(records, options, file)?;
    file.flush()?;
    Ok(())
}

fn xml_err(e: impl std::fmt::Display) -> KvsheetError {
    KvsheetError::Xlsx(e.to_string())
}

/// Thin helper over quick-xml's event writer.
struct SheetXml {
    writer: Writer<Vec<u8>>,
}

impl SheetXml {
    fn new() -> Result<Self, KvsheetError> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_err)?;
        Ok(SheetXml { writer })
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), KvsheetError> {
        let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(tag)).map_err(xml_err)
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), KvsheetError> {
        let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(tag)).map_err(xml_err)
    }

    fn end(&mut self, name: &str) -> Result<(), KvsheetError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_err)
    }

    fn text(&mut self, text: &str) -> Result<(), KvsheetError> {
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_err)
    }

    fn string_cell(&mut self, cell_ref: &str, style: &str, text: &str) -> Result<(), KvsheetError> {
        self.start("c", &[("r", cell_ref), ("s", style), ("t", "inlineStr")])?;
        self.start("is", &[])?;
        self.start("t", &[("xml:space", "preserve")])?;
        self.text(&sanitize(text))?;
        self.end("t")?;
        self.end("is")?;
        self.end("c")
    }

    fn number_cell(&mut self, cell_ref: &str, style: &str, n: u64) -> Result<(), KvsheetError> {
        self.start("c", &[("r", cell_ref), ("s", style)])?;
        self.start("v", &[])?;
        self.text(&n.to_string())?;
        self.end("v")?;
        self.end("c")
    }

    fn finish(self) -> Result<String, KvsheetError> {
        String::from_utf8(self.writer.into_inner()).map_err(xml_err)
    }
}

fn sheet_xml(records: &[Record], options: &SheetOptions) -> Result<String, KvsheetError> {
    let mut xml = SheetXml::new()?;
    xml.start("worksheet", &[("xmlns", SPREADSHEET_NS)])?;

    xml.start("cols", &[])?;
    for (i, width) in options.column_widths.iter().enumerate() {
        let col = (i + 1).to_string();
        let width = width.to_string();
        xml.empty(
            "col",
            &[
                ("min", col.as_str()),
                ("max", col.as_str()),
                ("width", width.as_str()),
                ("customWidth", "1"),
            ],
        )?;
    }
    xml.end("cols")?;

    xml.start("sheetData", &[])?;

    let header_row = options.header_row.to_string();
    xml.start("row", &[("r", header_row.as_str())])?;
    for (col, title) in COLUMNS.iter().zip(HEADERS) {
        xml.string_cell(&format!("{col}{header_row}"), STYLE_HEADER, title)?;
    }
    xml.end("row")?;

    for (i, record) in records.iter().enumerate() {
        let index = options
            .start_index
            .checked_add(i as u64)
            .filter(|n| *n <= MAX_START_INDEX)
            .ok_or_else(|| {
                KvsheetError::Xlsx(format!(
                    "'#' column exceeds {MAX_START_INDEX} when starting at {}",
                    options.start_index
                ))
            })?;
        let row = (options.header_row as u64 + 1 + i as u64).to_string();
        xml.start("row", &[("r", row.as_str())])?;
        xml.number_cell(&format!("A{row}"), STYLE_DATA, index)?;
        xml.string_cell(&format!("B{row}"), STYLE_DATA, &record.key)?;
        xml.string_cell(&format!("C{row}"), STYLE_DATA, &record.value)?;
        xml.string_cell(&format!("D{row}"), STYLE_DATA, &record.comments)?;
        xml.end("row")?;
    }

    xml.end("sheetData")?;
    xml.end("worksheet")?;
    xml.finish()
}

/// Drop characters that XML 1.0 cannot carry (form feeds and other control
/// characters that PDF text extraction sometimes leaves behind).
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect()
}

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{SPREADSHEET_NS}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape(sheet_name)
    )
}

fn styles_xml(header_fill: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="{SPREADSHEET_NS}"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts><fills count="3"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill><fill><patternFill patternType="solid"><fgColor rgb="FF{fill}"/><bgColor indexed="64"/></patternFill></fill></fills><borders count="2"><border><left/><right/><top/><bottom/><diagonal/></border><border><left style="thin"><color indexed="64"/></left><right style="thin"><color indexed="64"/></right><top style="thin"><color indexed="64"/></top><bottom style="thin"><color indexed="64"/></bottom><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="2" borderId="1" xfId="0" applyFont="1" applyFill="1" applyBorder="1" applyAlignment="1"><alignment horizontal="center" vertical="center"/></xf><xf numFmtId="0" fontId="0" fillId="0" borderId="1" xfId="0" applyBorder="1" applyAlignment="1"><alignment vertical="top" wrapText="1"/></xf></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#,
        fill = header_fill.to_ascii_uppercase()
    )
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Read;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("Name", "Alice Rao"),
            Record::new("Education", "B.Tech")
                .with_comments("Ranked 15th.\n\nWith honors & <distinction>"),
        ]
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut out = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_workbook_reads_back() {
        let bytes = to_bytes(&sample(), &SheetOptions::default()).unwrap();
        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let sheet = workbook.worksheet_range("Output").unwrap();

        // Header on row 2 (0-indexed row 1), row 1 left empty.
        assert_eq!(sheet.get_value((1, 0)), Some(&Data::String("#".into())));
        assert_eq!(sheet.get_value((1, 3)), Some(&Data::String("Comments".into())));

        assert_eq!(sheet.get_value((2, 0)), Some(&Data::Float(1.0)));
        assert_eq!(sheet.get_value((2, 1)), Some(&Data::String("Name".into())));
        assert_eq!(sheet.get_value((2, 2)), Some(&Data::String("Alice Rao".into())));
        assert_eq!(sheet.get_value((3, 0)), Some(&Data::Float(2.0)));
        assert_eq!(
            sheet.get_value((3, 3)),
            Some(&Data::String("Ranked 15th.\n\nWith honors & <distinction>".into()))
        );
    }

    #[test]
    fn test_custom_layout() {
        let options = SheetOptions {
            sheet_name: "Profile".into(),
            header_row: 1,
            start_index: 23,
            ..Default::default()
        };
        let bytes = to_bytes(&sample(), &options).unwrap();
        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let sheet = workbook.worksheet_range("Profile").unwrap();
        assert_eq!(sheet.get_value((0, 1)), Some(&Data::String("Key".into())));
        assert_eq!(sheet.get_value((1, 0)), Some(&Data::Float(23.0)));
        assert_eq!(sheet.get_value((2, 0)), Some(&Data::Float(24.0)));
    }

    #[test]
    fn test_styles_and_widths() {
        let options = SheetOptions {
            header_fill: "ffcc00".into(),
            ..Default::default()
        };
        let bytes = to_bytes(&sample(), &options).unwrap();

        let styles = read_part(&bytes, "xl/styles.xml");
        assert!(styles.contains(r#"<fgColor rgb="FFFFCC00"/>"#));
        assert!(styles.contains(r#"<left style="thin">"#));
        assert!(styles.contains(r#"wrapText="1""#));

        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<col min="1" max="1" width="5" customWidth="1"/>"#));
        assert!(sheet.contains(r#"<col min="4" max="4" width="80" customWidth="1"/>"#));
        assert!(sheet.contains(r#"<c r="B2" s="1" t="inlineStr">"#));
        assert!(sheet.contains(r#"<c r="B3" s="2" t="inlineStr">"#));
    }

    #[test]
    fn test_index_past_exact_range_is_an_error() {
        let options = SheetOptions {
            start_index: u64::MAX,
            ..Default::default()
        };
        let err = to_bytes(&sample(), &options).unwrap_err();
        assert!(matches!(err, KvsheetError::Xlsx(_)));

        let options = SheetOptions {
            start_index: MAX_START_INDEX,
            ..Default::default()
        };
        assert!(matches!(to_bytes(&sample(), &options), Err(KvsheetError::Xlsx(_))));

        let options = SheetOptions {
            start_index: MAX_START_INDEX - 1,
            ..Default::default()
        };
        assert!(to_bytes(&sample(), &options).is_ok());
    }

    #[test]
    fn test_empty_records_write_header_only() {
        let bytes = to_bytes(&[], &SheetOptions::default()).unwrap();
        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let sheet = workbook.worksheet_range("Output").unwrap();
        assert_eq!(sheet.get_value((1, 2)), Some(&Data::String("Value".into())));
        assert_eq!(sheet.get_value((2, 0)), None);
    }

    #[test]
    fn test_control_characters_dropped() {
        assert_eq!(sanitize("a\x0cb\x00c\nd\te"), "abc\nd\te");
    }

    #[test]
    fn test_sheet_name_escaped() {
        assert!(workbook_xml("R&D").contains(r#"name="R&amp;D""#));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        write_file(&sample(), &SheetOptions::default(), &path).unwrap();
        let mut workbook: Xlsx<_> = calamine::open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Output".to_string()]);
    }
}
