//! Path-string helpers. Nothing in here touches the filesystem.

use std::path::Path;

use crate::error::{Error, Result};

/// Returns the extension of `file_path` without the leading dot.
///
/// Empty paths and paths without an extension yield `None`.
pub fn get_extension<P: AsRef<Path>>(file_path: P) -> Option<String> {
    let path = file_path.as_ref();
    if path.as_os_str().is_empty() {
        return None;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
}

/// Converts `value` into a slug: trimmed, lowercased, spaces turned into
/// dashes, dots and apostrophes removed.
pub fn slugify(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "-").replace(['.', '\''], "")
}

/// Joins a base URL and a path with exactly one `/` between them.
///
/// An empty base returns `path` untouched, and an empty path keeps the base
/// (including its trailing slash). Both arguments are optional so callers
/// holding partially resolved values get a descriptive error rather than a
/// malformed URL.
pub fn urljoin(base: Option<&str>, path: Option<&str>) -> Result<String> {
    let base = base.ok_or_else(|| Error::InvalidArgument("undefined base URL".to_string()))?;
    let path = path.ok_or_else(|| Error::InvalidArgument("undefined path".to_string()))?;

    if base.is_empty() {
        return Ok(path.to_string());
    }
    if path.is_empty() {
        return Ok(base.to_string());
    }

    let base = base.strip_suffix('/').unwrap_or(base);
    let path = path.strip_prefix('/').unwrap_or(path);
    Ok(format!("{base}/{path}"))
}
