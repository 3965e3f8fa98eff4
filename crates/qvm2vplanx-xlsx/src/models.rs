/// One worksheet row, cells in document order. Trailing empty cells are usually absent.
pub type Row = Vec<String>;

/// A normalized plan entry. Every field is trimmed and `title` is never empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub title: String,
    pub link: String,
    pub description: String,
    pub r#type: String,
}

/// Resolved 0-based column positions for the four plan fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    pub title: usize,
    pub link: usize,
    pub description: Option<usize>,
    pub r#type: Option<usize>,
}

impl ColumnMap {
    /// Builds a record from `row`, or `None` when the title cell is missing or blank.
    pub fn record(&self, row: &[String]) -> Option<Record> {
        let title = cell(row, Some(self.title));
        if title.is_empty() {
            return None;
        }

        Some(Record {
            title,
            link: cell(row, Some(self.link)),
            description: cell(row, self.description),
            r#type: cell(row, self.r#type),
        })
    }
}

#[inline]
fn cell(row: &[String], index: Option<usize>) -> String {
    index
        .and_then(|i| row.get(i))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

#[derive(Clone, Debug)]
pub struct ExtractConfig {
    /// 1-based worksheet index.
    pub sheet: usize,
    /// 1-based header row in header mode; number of leading rows to skip in column mode.
    pub header_row: Option<usize>,
    pub title_col: Option<String>,
    pub link_col: Option<String>,
    pub desc_col: Option<String>,
    pub type_col: Option<String>,
    pub preview: bool,
    pub preview_rows: usize,
    /// How many leading rows header detection looks at.
    pub header_scan_rows: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            sheet: 1,
            header_row: None,
            title_col: None,
            link_col: None,
            desc_col: None,
            type_col: None,
            preview: false,
            preview_rows: 10,
            header_scan_rows: 30,
        }
    }
}
