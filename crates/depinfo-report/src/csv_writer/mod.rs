//! CSV report output

use std::fs::File;
use std::io::Write;

use camino::Utf8Path;

use depinfo_core::{DepinfoError, DepinfoResult, ReportRow};

/// Write a header line followed by every row to `path`, replacing the file
pub fn write_csv(path: &Utf8Path, columns: &[&str], rows: &[ReportRow]) -> DepinfoResult<()> {
    let file = File::create(path)
        .map_err(|e| DepinfoError::io(format!("Unable to create {}", path), e))?;
    write_csv_to(file, columns, rows)
}

/// Write CSV to any writer
pub fn write_csv_to<W: Write>(writer: W, columns: &[&str], rows: &[ReportRow]) -> DepinfoResult<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(columns).map_err(report_error)?;
    for row in rows {
        writer.write_record(row.fields()).map_err(report_error)?;
    }

    writer.flush().map_err(|e| DepinfoError::Report {
        message: e.to_string(),
    })
}

fn report_error(error: csv::Error) -> DepinfoError {
    DepinfoError::Report {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depinfo_core::{DependencyRecord, PackageInfo, REPORT_COLUMNS};

    fn row(repository: &str, name: &str, license: &str) -> ReportRow {
        ReportRow::join(
            &DependencyRecord::new(name, "1.0.0").in_repository(repository, "main"),
            &PackageInfo::new(name, "1.0.0").with_license(license),
        )
    }

    fn render(rows: &[ReportRow]) -> String {
        let mut buffer = Vec::new();
        write_csv_to(&mut buffer, &REPORT_COLUMNS, rows).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let output = render(&[row("r1", "left-pad", "MIT")]);
        assert_eq!(
            output,
            "repo,branch,package,pkg_version,license,github\nr1,main,left-pad,1.0.0,MIT,\n"
        );
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let output = render(&[row("my, repo", "dual", "MIT;Apache-2.0")]);
        assert!(output.contains("\"my, repo\",main,dual,1.0.0,MIT;Apache-2.0,"));
    }

    #[test]
    fn test_empty_report_has_header_only() {
        assert_eq!(render(&[]), "repo,branch,package,pkg_version,license,github\n");
    }

    #[test]
    fn test_unwritable_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(temp_dir.path().join("missing/dir/out.csv")).unwrap();

        let result = write_csv(&path, &REPORT_COLUMNS, &[]);
        assert!(matches!(result, Err(DepinfoError::Io { .. })));
    }
}
