//! Path utilities for manifest handling.
//!
//! Paths discovered on Windows come back with `\` separators; the inventory
//! service expects `/`, so everything is normalized before upload.

/// Replace every backslash separator with a forward slash
pub fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Get the final component of a path, accepting either separator
pub fn file_name_of(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}
