//! FactoryLoader - Public API for factory discovery
//!
//! Enumerates factory files below a directory, parses each one through a
//! [`SourceParser`], then runs the registration locator and the harvester on the
//! tree. Per-file failures are logged and skipped; they never escape [`FactoryLoader::load`].

use super::harvester::harvest;
use super::locator::locate_registration;
use super::types::FixtureRecord;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::syntax::{RubyParser, SourceParser, SyntaxNode};
use crate::utils::{gemfile, paths};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loads FactoryBot factories from a project's factory directory
pub struct FactoryLoader<P = RubyParser> {
    config: ScanConfig,
    parser: P,
}

impl Default for FactoryLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryLoader {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self::with_parser(config, RubyParser::new())
    }
}

impl<P: SourceParser> FactoryLoader<P> {
    /// Use a different parsing collaborator
    pub fn with_parser(config: ScanConfig, parser: P) -> Self {
        Self { config, parser }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Factories of the project at `project_root`
    ///
    /// Returns `None` when the Gemfile does not bundle the configured gem, otherwise
    /// the result of [`load`](Self::load) on the configured factory directory.
    pub fn discover(&self, project_root: &Path) -> Option<Vec<FixtureRecord>> {
        if !gemfile::declares_gem(project_root, &self.config.gem_name) {
            debug!(
                "Gemfile in {} does not declare {}; factories not applicable",
                project_root.display(),
                self.config.gem_name
            );
            return None;
        }

        self.load(&project_root.join(&self.config.factories_dir))
    }

    /// Factories declared in every factory file below `base_directory`
    ///
    /// - `None`: `base_directory` is not an existing directory
    /// - `Some(vec![])`: directory exists but no file yielded a factory
    ///
    /// Files are processed in lexicographic order of their relative Unix-style path,
    /// and records keep that order even when files are parsed in parallel.
    pub fn load(&self, base_directory: &Path) -> Option<Vec<FixtureRecord>> {
        if !base_directory.is_dir() {
            debug!("Factory directory {} not found", base_directory.display());
            return None;
        }

        if crate::language::detect_language_from_extension(&self.config.extension).is_none() {
            warn!(
                "Factory file extension '{}' is not a Ruby extension; files are parsed as Ruby anyway",
                self.config.extension
            );
        }

        let files = match self.factory_files(base_directory) {
            Ok(files) => files,
            Err(e) => {
                warn!(
                    "⚠️  Could not enumerate factory files in {}: {}",
                    base_directory.display(),
                    e
                );
                return Some(Vec::new());
            }
        };

        let per_file: Vec<Vec<FixtureRecord>> = if self.config.parallel {
            files
                .par_iter()
                .map(|path| self.load_file(path, base_directory))
                .collect()
        } else {
            files
                .iter()
                .map(|path| self.load_file(path, base_directory))
                .collect()
        };

        let records: Vec<FixtureRecord> = per_file.into_iter().flatten().collect();

        info!(
            "📋 Loaded {} factories from {} files in {}",
            records.len(),
            files.len(),
            base_directory.display()
        );

        Some(records)
    }

    /// Factories declared in one file on disk
    pub fn extract_file(&self, path: &Path) -> Result<Vec<FixtureRecord>> {
        let tree = self.parser.parse_file(path)?;
        Ok(self.extract_tree(&tree))
    }

    /// Factories declared in in-memory source; `origin` labels errors and logs
    pub fn extract_source(&self, source: &str, origin: &str) -> Result<Vec<FixtureRecord>> {
        let tree = self.parser.parse_source(source, origin)?;
        Ok(self.extract_tree(&tree))
    }

    /// Factories declared in an already lowered tree
    pub fn extract_tree(&self, tree: &SyntaxNode) -> Vec<FixtureRecord> {
        let conventions = &self.config.conventions;

        match locate_registration(tree, conventions) {
            Some(registration) => harvest(registration, conventions),
            None => Vec::new(),
        }
    }

    fn load_file(&self, path: &Path, base_directory: &Path) -> Vec<FixtureRecord> {
        let relative = paths::display_relative(path, base_directory);

        match self.extract_file(path) {
            Ok(records) => {
                debug!("Extracted {} factories from {}", records.len(), relative);
                records
            }
            Err(e) => {
                warn!("⚠️  Skipping factory file {}: {}", relative, e);
                Vec::new()
            }
        }
    }

    /// Regular files matching `**/*.<extension>`, sorted by relative Unix-style path
    fn factory_files(&self, base_directory: &Path) -> Result<Vec<PathBuf>> {
        let pattern = format!(
            "{}/**/*.{}",
            glob::Pattern::escape(&base_directory.to_string_lossy()),
            self.config.extension
        );

        let mut files: Vec<(String, PathBuf)> = glob::glob(&pattern)?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    debug!("Unreadable entry while scanning factories: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .map(|path| (paths::display_relative(&path, base_directory), path))
            .collect();

        files.sort();

        Ok(files.into_iter().map(|(_, path)| path).collect())
    }
}
