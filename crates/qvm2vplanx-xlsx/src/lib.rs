//! Reads verification-plan rows out of an XLSX workbook.
//!
//! Only literal cell values and shared strings are read; styles, formulas and
//! every other part of the package are ignored.

pub mod common;
pub mod error;
pub mod extractor;
pub mod models;
pub mod package;
pub mod shared_strings;
pub mod utils;
pub mod worksheet;

pub use error::{XlsxError, XlsxErrorReport};
pub use extractor::Extractor;
pub use models::{ColumnMap, ExtractConfig, Record, Row};
pub use package::XlsxPackage;
