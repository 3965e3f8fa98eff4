use rootcause::prelude::*;
use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};
use tracing::*;
use zip::ZipArchive;

use crate::{
    common::*,
    error::{XlsxError, XlsxErrorReport},
    models::Row,
    shared_strings::SharedStrings,
    worksheet::Worksheet,
};

const WORKSHEET_PREFIX: &str = "xl/worksheets/sheet";
const WORKSHEET_SUFFIX: &str = ".xml";

/// An opened XLSX archive. Only the parts needed to read cell values are touched.
pub struct XlsxPackage<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl XlsxPackage<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, XlsxErrorReport> {
        let path = path.as_ref();

        if !path.exists() {
            Err(XlsxError::InputNotFound(path.display().to_string()))?;
        }

        let file = File::open(path).map_err(XlsxError::from)?;

        Self::new(BufReader::new(file)).attach(format!("Reading [{}]", path.display()))
    }
}

impl<R: Read + Seek> XlsxPackage<R> {
    pub fn new(reader: R) -> Result<Self, XlsxErrorReport> {
        let archive = ZipArchive::new(reader).map_err(XlsxError::from)?;

        debug!("Opened archive with {} entries", archive.len());

        Ok(Self { archive })
    }

    /// Worksheet entry names ordered by their numeric suffix (`sheet2` before `sheet10`).
    pub fn worksheet_paths(&self) -> Vec<String> {
        let mut sheets: Vec<(u32, String)> = self
            .archive
            .file_names()
            .filter_map(|name| {
                let path = resolve_zip_file_path(name);
                let digits = path.strip_prefix(WORKSHEET_PREFIX)?.strip_suffix(WORKSHEET_SUFFIX)?;

                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }

                let number = digits.parse::<u32>().ok()?;

                Some((number, name.to_string()))
            })
            .collect();

        sheets.sort();

        sheets.into_iter().map(|(_, name)| name).collect()
    }

    /// Picks the entry for a 1-based worksheet index.
    pub fn worksheet_path(&self, sheet: usize) -> Result<String, XlsxErrorReport> {
        let mut sheets = self.worksheet_paths();

        if sheets.is_empty() {
            Err(XlsxError::MissingWorksheet(
                "no xl/worksheets/sheetN.xml entries in workbook".to_string(),
            ))?;
        }

        if sheet < 1 || sheet > sheets.len() {
            Err(XlsxError::MissingWorksheet(format!(
                "sheet {sheet} out of range 1..{}",
                sheets.len()
            )))?;
        }

        Ok(sheets.swap_remove(sheet - 1))
    }

    /// Loads the shared-string table, or an empty one when the workbook has none.
    pub fn shared_strings(&mut self) -> Result<SharedStrings, XlsxErrorReport> {
        let entry = self
            .archive
            .file_names()
            .find(|name| resolve_zip_file_path(name) == SharedStrings::PATH)
            .map(str::to_string);

        let Some(entry) = entry else {
            debug!("No shared strings part, treating every cell as inline");
            return Ok(SharedStrings::default());
        };

        let file = self.archive.by_name(&entry).map_err(XlsxError::from)?;

        SharedStrings::from_reader(BufReader::new(file)).attach(format!("Parsing [{entry}]"))
    }

    pub fn worksheet(&mut self, sheet: usize) -> Result<Worksheet, XlsxErrorReport> {
        let entry = self.worksheet_path(sheet)?;

        info!("Reading worksheet {sheet} from [{entry}]");

        let file = self.archive.by_name(&entry).map_err(XlsxError::from)?;

        Worksheet::from_reader(BufReader::new(file)).attach(format!("Parsing [{entry}]"))
    }

    /// Every row of the selected worksheet with shared strings applied.
    pub fn read_rows(&mut self, sheet: usize) -> Result<Vec<Row>, XlsxErrorReport> {
        let shared_strings = self.shared_strings()?;
        let worksheet = self.worksheet(sheet)?;

        Ok(worksheet.materialize(&shared_strings))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

    pub(crate) fn build_xlsx(parts: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for (name, content) in parts {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }

        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    pub(crate) fn sheet_xml(rows: &[&[&str]]) -> String {
        let mut xml = String::from(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );

        for row in rows {
            xml.push_str("<row>");
            for cell in *row {
                xml.push_str(r#"<c t="str"><v>"#);
                xml.push_str(&quick_xml::escape::escape(*cell));
                xml.push_str("</v></c>");
            }
            xml.push_str("</row>");
        }

        xml.push_str("</sheetData></worksheet>");
        xml
    }

    #[test]
    fn test_worksheet_paths_sorted_numerically() -> Result<(), XlsxErrorReport> {
        let empty = sheet_xml(&[]);
        let package = XlsxPackage::new(build_xlsx(&[
            ("xl/worksheets/sheet10.xml", empty.as_str()),
            ("xl/worksheets/sheet2.xml", empty.as_str()),
            ("xl/worksheets/sheet1.xml", empty.as_str()),
            ("xl/worksheets/_rels/sheet1.xml.rels", "<Relationships/>"),
            ("xl/workbook.xml", "<workbook/>"),
        ]))?;

        assert_eq!(
            package.worksheet_paths(),
            vec![
                "xl/worksheets/sheet1.xml",
                "xl/worksheets/sheet2.xml",
                "xl/worksheets/sheet10.xml"
            ]
        );
        assert_eq!(package.worksheet_path(3)?, "xl/worksheets/sheet10.xml");

        Ok(())
    }

    #[test]
    fn test_worksheet_paths_need_plain_digits() -> Result<(), XlsxErrorReport> {
        let empty = sheet_xml(&[]);
        let package = XlsxPackage::new(build_xlsx(&[
            ("xl/worksheets/sheet+1.xml", empty.as_str()),
            ("xl/worksheets/sheet.xml", empty.as_str()),
            ("xl/worksheets/sheet 3.xml", empty.as_str()),
            ("xl/worksheets/sheet2.xml", empty.as_str()),
        ]))?;

        assert_eq!(package.worksheet_paths(), vec!["xl/worksheets/sheet2.xml"]);

        Ok(())
    }

    #[test]
    fn test_worksheet_index_out_of_range() -> Result<(), XlsxErrorReport> {
        let empty = sheet_xml(&[]);
        let package = XlsxPackage::new(build_xlsx(&[
            ("xl/worksheets/sheet1.xml", empty.as_str()),
            ("xl/worksheets/sheet2.xml", empty.as_str()),
        ]))?;

        for sheet in [0, 3] {
            let err = package.worksheet_path(sheet).unwrap_err();
            assert!(err.to_string().contains("out of range 1..2"), "{err}");
        }

        Ok(())
    }

    #[test]
    fn test_no_worksheets() -> Result<(), XlsxErrorReport> {
        let package = XlsxPackage::new(build_xlsx(&[("xl/workbook.xml", "<workbook/>")]))?;

        let err = package.worksheet_path(1).unwrap_err();
        assert!(err.to_string().contains("no xl/worksheets/sheetN.xml"), "{err}");

        Ok(())
    }

    #[test]
    fn test_read_rows_with_shared_strings() -> Result<(), XlsxErrorReport> {
        let mut package = XlsxPackage::new(build_xlsx(&[
            (
                "xl/sharedStrings.xml",
                "<sst><si><t>Title</t></si><si><t>Link</t></si></sst>",
            ),
            (
                "xl/worksheets/sheet1.xml",
                r#"<worksheet><sheetData><row><c t="s"><v>1</v></c><c t="s"><v>0</v></c></row></sheetData></worksheet>"#,
            ),
        ]))?;

        assert_eq!(package.read_rows(1)?, vec![vec!["Link", "Title"]]);

        Ok(())
    }

    #[test]
    fn test_not_a_zip() {
        let err = XlsxPackage::new(Cursor::new(b"plain text, not a workbook".to_vec()))
            .err()
            .unwrap();

        assert!(err.to_string().contains("not a valid XLSX container"), "{err}");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = XlsxPackage::open(dir.path().join("missing.xlsx")).err().unwrap();

        assert!(err.to_string().contains("file not found"), "{err}");
    }
}
