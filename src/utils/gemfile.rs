//! Gemfile inspection
//!
//! Factories are only offered when the project bundles FactoryBot. This module reads
//! the `gem "..."` declarations of a project's Gemfile; it does not evaluate Ruby.

use super::file_utils::read_file_content;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// `gem "name"`, `gem 'name', "~> 6.0"`, `gem("name")`
static GEM_DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*gem[ \t]*\(?[ \t]*["']([^"']+)["']"#).unwrap()
});

/// Gem names declared in Gemfile content, in declaration order
pub fn declared_gems(content: &str) -> Vec<String> {
    GEM_DECLARATION_RE
        .captures_iter(content)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

/// Whether `project_root/Gemfile` declares `gem` or one of its companions
///
/// `factory_bot` also matches `factory_bot_rails`. A missing or unreadable Gemfile
/// counts as "not declared".
pub fn declares_gem(project_root: &Path, gem: &str) -> bool {
    let gemfile = project_root.join("Gemfile");

    let content = match read_file_content(&gemfile) {
        Ok(content) => content,
        Err(e) => {
            debug!("No usable Gemfile at {}: {}", gemfile.display(), e);
            return false;
        }
    };

    declared_gems(&content)
        .iter()
        .any(|name| is_same_gem_family(name, gem))
}

fn is_same_gem_family(name: &str, gem: &str) -> bool {
    name == gem
        || name
            .strip_prefix(gem)
            .is_some_and(|suffix| suffix.starts_with('_') || suffix.starts_with('-'))
}
