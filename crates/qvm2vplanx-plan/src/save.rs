use flate2::{Compression, write::GzEncoder};
use rootcause::prelude::*;
use std::{io::Write, path::Path};
use tempfile::{Builder, NamedTempFile};
use tracing::*;

use crate::{
    error::{PlanError, PlanErrorReport},
    schema::Plan,
};

pub const PLAN_EXTENSION: &str = "vplanx";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Gzip,
    Plain,
}

/// Writes the serialized plan to `writer`, gzip-wrapped when requested.
pub fn write_plan<W: Write>(
    plan: &Plan,
    mut writer: W,
    format: OutputFormat,
) -> Result<(), PlanErrorReport> {
    let xml = plan.to_xml();

    match format {
        OutputFormat::Plain => {
            writer.write_all(xml.as_bytes()).map_err(PlanError::from)?;
        }
        OutputFormat::Gzip => {
            let mut encoder = GzEncoder::new(&mut writer, Compression::default());
            encoder.write_all(xml.as_bytes()).map_err(PlanError::from)?;
            encoder.finish().map_err(PlanError::from)?;
        }
    }

    writer.flush().map_err(PlanError::from)?;

    Ok(())
}

/// Writes the plan to `path`. Nothing appears at `path` unless the whole document was written.
pub fn save_plan(
    plan: &Plan,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), PlanErrorReport> {
    let path = path.as_ref();

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let write_failed = |source: std::io::Error| PlanError::WriteFailed {
        path: path.display().to_string(),
        source,
    };

    let mut file = temp_file_in(dir).map_err(write_failed)?;

    write_plan(plan, &mut file, format).attach(format!("Writing [{}]", path.display()))?;

    file.persist(path).map_err(|e| write_failed(e.error))?;

    debug!("Wrote {format:?} plan to [{}]", path.display());

    Ok(())
}

/// Temporary sibling of the output, created with the mode a plain `File::create` would get.
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();

    // The process umask still applies on top of this.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    builder.tempfile_in(dir)
}
