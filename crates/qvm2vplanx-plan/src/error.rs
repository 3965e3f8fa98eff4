use rootcause::Report;
use thiserror::Error;

pub type PlanErrorReport = Report<PlanError>;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("StdIoError")]
    StdIoError(#[from] std::io::Error),
    #[error("could not write output {path}")]
    WriteFailed { path: String, source: std::io::Error },
}
