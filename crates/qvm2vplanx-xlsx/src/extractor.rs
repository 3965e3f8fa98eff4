//! Turns worksheet rows into plan [`Record`]s.
//!
//! Two column-resolution modes exist. When both a title and a link column
//! letter are configured the header row is never inspected and the configured
//! header row only says how many leading rows to skip. Otherwise the header row
//! is either taken from the configuration or detected by scanning for a row
//! that mentions both `title` and `link`.

use std::{
    fmt::Write as _,
    io::{self, Write as _},
    path::Path,
};
use tracing::*;

use crate::{
    error::{XlsxError, XlsxErrorReport},
    models::{ColumnMap, ExtractConfig, Record, Row},
    package::XlsxPackage,
    utils::{column_to_index, fold_header, index_to_column},
};

#[derive(Clone, Debug)]
pub struct Extractor {
    pub config: ExtractConfig,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Self { Self { config } }

    /// Reads the configured worksheet of the workbook at `path` and extracts its records.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<Vec<Record>, XlsxErrorReport> {
        // The archive is dropped before any record work starts.
        let rows = {
            let mut package = XlsxPackage::open(path)?;
            package.read_rows(self.config.sheet)?
        };

        self.extract_rows(&rows)
    }

    pub fn extract_rows(&self, rows: &[Row]) -> Result<Vec<Record>, XlsxErrorReport> {
        if self.config.preview {
            write_preview(&mut io::stdout().lock(), rows, self.config.preview_rows)
                .map_err(XlsxError::from)?;
        }

        match self.explicit_columns()? {
            Some(columns) => self.extract_by_columns(rows, &columns),
            None => self.extract_by_header(rows),
        }
    }

    /// Column map from configured letters, when both title and link letters are present.
    pub fn explicit_columns(&self) -> Result<Option<ColumnMap>, XlsxErrorReport> {
        let config = &self.config;

        let (Some(title_col), Some(link_col)) = (&config.title_col, &config.link_col) else {
            if config.title_col.is_some() || config.link_col.is_some() {
                warn!("Both title and link columns are needed for column mode, falling back to header detection");
            }
            return Ok(None);
        };

        Ok(Some(ColumnMap {
            title: column_to_index(title_col)?,
            link: column_to_index(link_col)?,
            description: config.desc_col.as_deref().map(column_to_index).transpose()?,
            r#type: config.type_col.as_deref().map(column_to_index).transpose()?,
        }))
    }

    fn extract_by_columns(
        &self,
        rows: &[Row],
        columns: &ColumnMap,
    ) -> Result<Vec<Record>, XlsxErrorReport> {
        let start = self.config.header_row.filter(|&r| r > 0).unwrap_or(1);

        info!(
            "Column mode: skipping {start} leading row(s), title column {}, link column {}",
            columns.title, columns.link
        );

        let records = collect_records(rows.iter().skip(start), columns);

        if records.is_empty() {
            Err(XlsxError::EmptyResult(
                "no rows matched the specified column letters".to_string(),
            ))?;
        }

        Ok(records)
    }

    fn extract_by_header(&self, rows: &[Row]) -> Result<Vec<Record>, XlsxErrorReport> {
        let header_index = match self.config.header_row {
            Some(0) => Err(XlsxError::HeaderResolution(
                "header row is 1-based, got 0".to_string(),
            ))?,
            Some(header_row) => {
                if header_row > rows.len() {
                    Err(XlsxError::HeaderResolution(format!(
                        "header row {header_row} beyond last row ({})",
                        rows.len()
                    )))?;
                }
                header_row - 1
            }
            None => find_header_row(rows, self.config.header_scan_rows).ok_or_else(|| {
                XlsxError::HeaderResolution(format!(
                    "no row with 'Title' and 'Link' in the first {} rows; \
                     set a header row or title/link column letters",
                    self.config.header_scan_rows
                ))
            })?,
        };

        let columns = map_header(&rows[header_index])?;

        info!(
            "Header mode: header at row {}, Title in column {}, Link in column {}",
            header_index + 1,
            index_to_column(columns.title),
            index_to_column(columns.link)
        );

        let records = collect_records(rows.iter().skip(header_index + 1), &columns);

        if records.is_empty() {
            Err(XlsxError::EmptyResult(format!(
                "no rows with a title below header row {}",
                header_index + 1
            )))?;
        }

        Ok(records)
    }
}

fn collect_records<'a>(rows: impl Iterator<Item = &'a Row>, columns: &ColumnMap) -> Vec<Record> {
    let records: Vec<Record> = rows.filter_map(|row| columns.record(row)).collect();

    debug!("Collected {} record(s)", records.len());

    records
}

/// 0-based index of the first row, within `scan_rows`, with a `title` cell and a `link` cell.
pub fn find_header_row(rows: &[Row], scan_rows: usize) -> Option<usize> {
    rows.iter().take(scan_rows).position(|row| {
        let folded: Vec<String> = row.iter().map(|c| fold_header(c)).collect();

        folded.iter().any(|c| c.contains("title")) && folded.iter().any(|c| c.contains("link"))
    })
}

/// Maps header cells to fields. The first matching column wins for each field.
pub fn map_header(header: &[String]) -> Result<ColumnMap, XlsxErrorReport> {
    let mut title = None;
    let mut link = None;
    let mut description = None;
    let mut r#type = None;

    for (index, name) in header.iter().map(|c| fold_header(c)).enumerate() {
        if name.contains("title") {
            title.get_or_insert(index);
        } else if name.contains("link") {
            link.get_or_insert(index);
        } else if name.contains("description") {
            description.get_or_insert(index);
        } else if name == "type" {
            r#type.get_or_insert(index);
        }
    }

    let (Some(title), Some(link)) = (title, link) else {
        return Err(XlsxError::HeaderResolution(
            "header row is missing 'Title' or 'Link'; use column letters instead \
             (e.g. title column A, link column C)"
                .to_string(),
        )
        .into());
    };

    Ok(ColumnMap {
        title,
        link,
        description,
        r#type,
    })
}

pub fn render_preview(rows: &[Row], count: usize) -> String {
    let mut out = String::from("--- preview: first rows ---\n");

    for (i, row) in rows.iter().take(count).enumerate() {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Row {:2}: {row:?}", i + 1);
    }

    out.push_str("---------------------------");
    out
}

/// Writes the preview to `out`. The preview is requested output, so it bypasses the log filter.
pub fn write_preview(out: &mut impl io::Write, rows: &[Row], count: usize) -> io::Result<()> {
    writeln!(out, "{}", render_preview(rows, count))?;
    out.flush()
}
