//! Language Support - tree-sitter language configuration
//!
//! Factory definitions are Ruby files, so Ruby is the only grammar wired in.
//! Parser construction lives here so every code path sets the grammar the same way.

use anyhow::{Context, Result};
use tree_sitter::Parser;

/// Get tree-sitter language parser for a given language name
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "ruby" => Ok(tree_sitter_ruby::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!(
            "Unsupported language: '{}'. Supported languages: ruby",
            language
        )),
    }
}

/// Detect language from file extension
///
/// Returns the language name that can be passed to `get_tree_sitter_language()`.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "rb" | "rake" | "ru" | "gemspec" => Some("ruby"),
        _ => None,
    }
}

/// Build a parser with the grammar for `language` already set
///
/// Parsers are cheap and not `Sync`; callers create one per file.
pub fn create_parser(language: &str) -> Result<Parser> {
    let tree_sitter_language = get_tree_sitter_language(language)?;

    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_language)
        .with_context(|| format!("Failed to set parser language for {}", language))?;

    Ok(parser)
}
