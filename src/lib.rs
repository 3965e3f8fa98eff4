//! `qvm2vplanx`: turns a spreadsheet verification plan into a vPlanx document.

pub mod cli;

use qvm2vplanx_plan::{BuildConfig, Clock, IdGenerator, PlanBuilder, PlanErrorReport, save_plan};
use qvm2vplanx_xlsx::{Extractor, XlsxErrorReport};
use std::path::PathBuf;
use thiserror::Error;
use tracing::*;

use crate::cli::Cli;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{_0}")]
    Extract(XlsxErrorReport),
    #[error("{_0}")]
    Write(PlanErrorReport),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Extract(_) => 2,
            AppError::Write(_) => 1,
        }
    }
}

/// Runs one conversion with random identifiers and the system clock.
pub fn run(cli: &Cli) -> Result<PathBuf, AppError> {
    run_with(cli, &mut PlanBuilder::new(BuildConfig::default()))
}

/// Runs one conversion and returns the path that was written.
pub fn run_with<I: IdGenerator, C: Clock>(
    cli: &Cli,
    builder: &mut PlanBuilder<I, C>,
) -> Result<PathBuf, AppError> {
    let records = Extractor::new(cli.extract_config())
        .extract_file(&cli.xlsx)
        .map_err(AppError::Extract)?;

    info!("Extracted {} record(s) from [{}]", records.len(), cli.xlsx.display());

    let plan = builder.build(&cli.plan_name(), &records);

    let out = cli.output_path();
    save_plan(&plan, &out, cli.output_format()).map_err(AppError::Write)?;

    Ok(out)
}
