//! Report writers for depinfo
//!
//! Writes joined report rows as CSV (header plus one line per row) or as a
//! JSON array of row arrays.

pub mod csv_writer;
pub mod json_writer;

pub use csv_writer::{write_csv, write_csv_to};
pub use json_writer::{write_json, write_json_to};

use camino::Utf8Path;
use tracing::info;

use depinfo_core::{DepinfoResult, OutputFormat, ReportRow, REPORT_COLUMNS};

/// Write `rows` to `path` in the requested format with the standard columns
pub fn write_report(path: &Utf8Path, format: OutputFormat, rows: &[ReportRow]) -> DepinfoResult<()> {
    match format {
        OutputFormat::Csv => write_csv(path, &REPORT_COLUMNS, rows)?,
        OutputFormat::Json => write_json(path, rows)?,
    }

    info!("Wrote {} rows to {} ({})", rows.len(), path, format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use depinfo_core::{DependencyRecord, PackageInfo};

    #[test]
    fn test_write_report_dispatches_on_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();
        let rows = vec![ReportRow::join(
            &DependencyRecord::new("left-pad", "1.0.0").in_repository("r1", "main"),
            &PackageInfo::new("left-pad", "1.0.0").with_license("MIT"),
        )];

        write_report(&root.join("out.csv"), OutputFormat::Csv, &rows).unwrap();
        write_report(&root.join("out.json"), OutputFormat::Json, &rows).unwrap();

        let csv = std::fs::read_to_string(root.join("out.csv")).unwrap();
        assert!(csv.starts_with("repo,branch,package,pkg_version,license,github\n"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(root.join("out.json")).unwrap()).unwrap();
        assert_eq!(json[0][2], "left-pad");
    }
}
