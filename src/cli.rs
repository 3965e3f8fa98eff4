use clap::{Parser, value_parser};
use qvm2vplanx_plan::{OutputFormat, PLAN_EXTENSION};
use qvm2vplanx_xlsx::ExtractConfig;
use std::path::PathBuf;

/// Convert an XLSX verification plan to a Cadence vPlanx document
#[derive(Parser, Debug)]
#[command(name = "qvm2vplanx", version)]
pub struct Cli {
    /// Input .xlsx file
    #[arg(value_name = "XLSX")]
    pub xlsx: PathBuf,

    /// Output filename (default: <xlsxname>.vplanx)
    #[arg(short, long, value_name = "OUTPUT")]
    pub out: Option<PathBuf>,

    /// Write plain XML instead of gzipped vPlanx
    #[arg(long)]
    pub no_gzip: bool,

    /// Worksheet index (1-based)
    #[arg(long, default_value_t = 1, value_parser = value_parser!(u32).range(1..))]
    pub sheet: u32,

    /// Header row (1-based). With column letters, the number of leading rows to skip
    #[arg(long, value_parser = value_parser!(u32).range(1..))]
    pub header_row: Option<u32>,

    /// Column letter for Title when there is no header row (e.g. A)
    #[arg(long, value_name = "COL")]
    pub title_col: Option<String>,

    /// Column letter for Link when there is no header row (e.g. C)
    #[arg(long, value_name = "COL")]
    pub link_col: Option<String>,

    /// Column letter for Description
    #[arg(long, value_name = "COL")]
    pub desc_col: Option<String>,

    /// Column letter for Type
    #[arg(long, value_name = "COL")]
    pub type_col: Option<String>,

    /// Print the first rows of the sheet to help choose rows and columns
    #[arg(long)]
    pub show_preview: bool,

    /// How many leading rows to search for the Title/Link header
    #[arg(long, default_value_t = 30, value_name = "N")]
    pub header_scan_rows: usize,
}

impl Cli {
    pub fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            sheet: self.sheet as usize,
            header_row: self.header_row.map(|r| r as usize),
            title_col: self.title_col.clone(),
            link_col: self.link_col.clone(),
            desc_col: self.desc_col.clone(),
            type_col: self.type_col.clone(),
            preview: self.show_preview,
            header_scan_rows: self.header_scan_rows,
            ..Default::default()
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.no_gzip {
            OutputFormat::Plain
        } else {
            OutputFormat::Gzip
        }
    }

    /// The input's file name without its extension.
    pub fn plan_name(&self) -> String {
        self.xlsx
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "plan".to_string())
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.out {
            Some(out) => out.clone(),
            None => PathBuf::from(format!("{}.{PLAN_EXTENSION}", self.plan_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["qvm2vplanx", "plans/block_a.xlsx"]).unwrap();

        assert_eq!(cli.plan_name(), "block_a");
        assert_eq!(cli.output_path(), PathBuf::from("block_a.vplanx"));
        assert_eq!(cli.output_format(), OutputFormat::Gzip);

        let config = cli.extract_config();
        assert_eq!(config.sheet, 1);
        assert_eq!(config.header_row, None);
        assert_eq!(config.header_scan_rows, 30);
        assert_eq!(config.preview_rows, 10);
        assert!(!config.preview);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "qvm2vplanx",
            "plan.xlsx",
            "--out",
            "out/plan.xml",
            "--no-gzip",
            "--sheet",
            "2",
            "--header-row",
            "3",
            "--title-col",
            "A",
            "--link-col",
            "C",
            "--desc-col",
            "B",
            "--type-col",
            "D",
            "--show-preview",
            "--header-scan-rows",
            "20",
        ])
        .unwrap();

        assert_eq!(cli.output_path(), PathBuf::from("out/plan.xml"));
        assert_eq!(cli.output_format(), OutputFormat::Plain);

        let config = cli.extract_config();
        assert_eq!(config.sheet, 2);
        assert_eq!(config.header_row, Some(3));
        assert_eq!(config.title_col.as_deref(), Some("A"));
        assert_eq!(config.link_col.as_deref(), Some("C"));
        assert_eq!(config.desc_col.as_deref(), Some("B"));
        assert_eq!(config.type_col.as_deref(), Some("D"));
        assert_eq!(config.header_scan_rows, 20);
        assert!(config.preview);
    }

    #[test]
    fn test_rejects_zero_indexes() {
        assert!(Cli::try_parse_from(["qvm2vplanx", "plan.xlsx", "--sheet", "0"]).is_err());
        assert!(Cli::try_parse_from(["qvm2vplanx", "plan.xlsx", "--header-row", "0"]).is_err());
        assert!(Cli::try_parse_from(["qvm2vplanx"]).is_err());
    }
}
