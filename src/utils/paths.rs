// Path Conversion Utilities
//
// Factory files are ordered and logged by their path relative to the scanned
// directory, always with `/` separators, so output is identical across platforms.

use anyhow::{Context, Result};
use std::path::{Path, MAIN_SEPARATOR};

/// Convert a path below `root` to a relative Unix-style path (with `/` separators)
///
/// Both paths are canonicalized when possible so symlinked roots (macOS `/var` vs
/// `/private/var`) still match; if either cannot be canonicalized the originals are
/// compared as given.
///
/// # Examples
/// ```
/// // "/project/spec/factories/admin/users.rb" under "/project/spec/factories"
/// // => "admin/users.rb"
/// ```
pub fn to_relative_unix_style(path: &Path, root: &Path) -> Result<String> {
    let (path_to_use, root_to_use) = match (path.canonicalize(), root.canonicalize()) {
        (Ok(canonical_path), Ok(canonical_root)) => (canonical_path, canonical_root),
        _ => (path.to_path_buf(), root.to_path_buf()),
    };

    let relative = path_to_use.strip_prefix(&root_to_use).with_context(|| {
        format!(
            "File path '{}' is not within directory '{}'",
            path_to_use.display(),
            root_to_use.display()
        )
    })?;

    let path_str = relative.to_str().context("Path contains invalid UTF-8")?;

    // On Unix, MAIN_SEPARATOR is already '/'
    let unix_style = if MAIN_SEPARATOR == '\\' {
        path_str.replace('\\', "/")
    } else {
        path_str.to_string()
    };

    Ok(unix_style)
}

/// Relative Unix-style path for logs and ordering, falling back to the full path
///
/// The `root` prefix is stripped lexically first, so a symlink below `root` keeps its
/// own relative name even when it points elsewhere. Canonical comparison is only the
/// fallback for paths spelled differently from `root`.
pub fn display_relative(path: &Path, root: &Path) -> String {
    if let Ok(relative) = path.strip_prefix(root) {
        return relative.to_string_lossy().replace('\\', "/");
    }

    to_relative_unix_style(path, root).unwrap_or_else(|_| path.to_string_lossy().replace('\\', "/"))
}
