// Scan configuration
//
// Defaults follow FactoryBot's conventions; hosts can embed these structs in their own
// settings file since every field falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Names of the DSL calls that register factories and traits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConventions {
    /// Receiver of the registration call (`FactoryBot` in `FactoryBot.define`)
    pub registration_receiver: String,
    /// Method of the registration call
    pub registration_method: String,
    /// Call declaring one factory inside the registration block
    pub fixture_keyword: String,
    /// Call declaring one trait inside a factory block
    pub variant_keyword: String,
}

impl Default for FactoryConventions {
    fn default() -> Self {
        Self {
            registration_receiver: "FactoryBot".to_string(),
            registration_method: "define".to_string(),
            fixture_keyword: "factory".to_string(),
            variant_keyword: "trait".to_string(),
        }
    }
}

/// Configuration for factory directory scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Factory directory, relative to the project root
    pub factories_dir: PathBuf,
    /// Source file extension, without the dot
    pub extension: String,
    /// Gem that must appear in the Gemfile before factories are offered
    pub gem_name: String,
    /// Parse files on the rayon pool; output order is unaffected
    pub parallel: bool,
    pub conventions: FactoryConventions,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            factories_dir: PathBuf::from("spec/factories"),
            extension: "rb".to_string(),
            gem_name: "factory_bot".to_string(),
            parallel: true,
            conventions: FactoryConventions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: ScanConfig =
            serde_json::from_str(r#"{"factories_dir": "test/factories", "parallel": false}"#)
                .unwrap();

        assert_eq!(config.factories_dir, PathBuf::from("test/factories"));
        assert!(!config.parallel);
        assert_eq!(config.extension, "rb");
        assert_eq!(config.conventions, FactoryConventions::default());
    }

    #[test]
    fn test_conventions_override_single_keyword() {
        let conventions: FactoryConventions =
            serde_json::from_str(r#"{"variant_keyword": "variant"}"#).unwrap();

        assert_eq!(conventions.variant_keyword, "variant");
        assert_eq!(conventions.registration_receiver, "FactoryBot");
    }
}
