use rootcause::Report;
use thiserror::Error;

pub type XlsxErrorReport = Report<XlsxError>;

#[derive(Error, Debug)]
pub enum XlsxError {
    #[error("file not found: {_0}")]
    InputNotFound(String),
    #[error("not a valid XLSX container: {_0}")]
    MalformedContainer(#[from] zip::result::ZipError),
    #[error("no worksheet available: {_0}")]
    MissingWorksheet(String),
    #[error("header resolution failed: {_0}")]
    HeaderResolution(String),
    #[error("no entries found: {_0}")]
    EmptyResult(String),
    #[error("bad column letter: {_0:?}")]
    BadColumnLetter(String),
    #[error("quick_xml error")]
    QuickXmlError(#[from] quick_xml::Error),
    #[error("quick_xml encoding error")]
    QuickEncodingError(#[from] quick_xml::encoding::EncodingError),
    #[error("quick_xml attr error")]
    AttrError(#[from] quick_xml::events::attributes::AttrError),
    #[error("StdIoError")]
    StdIoError(#[from] std::io::Error),
}
