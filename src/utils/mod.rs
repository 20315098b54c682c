// Utilities Module
//
// Filesystem helpers shared by the factory loader.

use anyhow::Result;
use std::path::Path;

/// File utilities
pub mod file_utils {
    use super::*;
    use anyhow::Context;
    use std::fs;

    /// Read file content safely
    pub fn read_file_content(path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Path conversion utilities (absolute → relative Unix-style)
pub mod paths;

/// Gemfile gem declaration lookup
pub mod gemfile;
