//! JSON snapshot export.

use std::io::Write;

use super::ExportResult;
use crate::engine::ReportSnapshot;

pub fn write_json<W: Write>(snapshot: &ReportSnapshot, writer: W) -> ExportResult<()> {
    serde_json::to_writer_pretty(writer, snapshot)?;
    Ok(())
}

pub fn to_json(snapshot: &ReportSnapshot) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
