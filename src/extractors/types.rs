// Factory record types
//
// Records are what downstream prompt construction receives. The JSON shape
// (`{"name": ..., "traits": [...]}`, `traits` omitted when empty) is what the
// test generator embeds under "AVAILABLE FACTORIES".

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// One factory found in a `FactoryBot.define` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRecord {
    /// Factory name as written in the first argument (`:user` -> "user")
    pub name: String,
    /// Trait names in source order; `None` when the factory declares none
    #[serde(
        rename = "traits",
        default,
        deserialize_with = "deserialize_variants",
        skip_serializing_if = "Option::is_none"
    )]
    pub variants: Option<Vec<String>>,
}

impl FixtureRecord {
    /// Build a record, collapsing an empty trait list to `None`
    pub fn new(name: impl Into<String>, variants: Vec<String>) -> Self {
        Self {
            name: name.into(),
            variants: if variants.is_empty() {
                None
            } else {
                Some(variants)
            },
        }
    }

    pub fn variants(&self) -> &[String] {
        self.variants.as_deref().unwrap_or_default()
    }
}

/// `"traits": []` reads back as absent, matching [`FixtureRecord::new`]
fn deserialize_variants<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let variants = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(variants.filter(|variants| !variants.is_empty()))
}

/// Compact JSON for a factory list
pub fn render_json(records: &[FixtureRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}
