//! JSON report output

use std::fs::File;
use std::io::{BufWriter, Write};

use camino::Utf8Path;

use depinfo_core::{DepinfoError, DepinfoResult, ReportRow};

/// Write rows to `path` as a JSON array of row arrays
pub fn write_json(path: &Utf8Path, rows: &[ReportRow]) -> DepinfoResult<()> {
    let file = File::create(path)
        .map_err(|e| DepinfoError::io(format!("Unable to create {}", path), e))?;
    write_json_to(BufWriter::new(file), rows)
}

/// Write the JSON array to any writer
pub fn write_json_to<W: Write>(mut writer: W, rows: &[ReportRow]) -> DepinfoResult<()> {
    let values: Vec<[&str; 6]> = rows.iter().map(ReportRow::fields).collect();

    serde_json::to_writer_pretty(&mut writer, &values).map_err(|e| DepinfoError::Report {
        message: e.to_string(),
    })?;
    writer.flush().map_err(|e| DepinfoError::Report {
        message: e.to_string(),
    })
}
