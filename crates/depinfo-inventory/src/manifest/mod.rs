//! Manifest file discovery

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use depinfo_core::error::DepinfoError;
use depinfo_core::utils::to_forward_slashes;
use crate::InventoryResult;

/// Manifest names searched for when none are configured
pub const DEFAULT_PACKAGE_FILES: [&str; 2] = ["package.json", "requirements.txt"];

/// Find every file named one of `file_names` anywhere under `folder`
///
/// Results are grouped by file name in the order given; within a group they
/// come back in path order. Separators are always `/`.
pub fn find_package_files<S: AsRef<str>>(
    folder: &Utf8Path,
    file_names: &[S],
) -> InventoryResult<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();

    for file_name in file_names {
        let pattern = format!("{}/**/{}", to_forward_slashes(folder.as_str()), file_name.as_ref());
        let entries = glob::glob(&pattern).map_err(|e| DepinfoError::ConfigValidation {
            field: "package_files".to_string(),
            reason: format!("Invalid file pattern '{}': {}", pattern, e),
        })?;

        for entry in entries {
            match entry {
                Ok(path) => {
                    let path = to_forward_slashes(&path.to_string_lossy());
                    debug!("Found manifest {}", path);
                    files.push(Utf8PathBuf::from(path));
                }
                Err(e) => warn!("Skipping unreadable path: {}", e),
            }
        }
    }

    Ok(files)
}
