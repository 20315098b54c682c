// Factory Catalog - tree-sitter powered FactoryBot discovery
//
// Scans a Ruby project's factory directory and reports every factory declared in a
// `FactoryBot.define` block together with its traits, ready to be offered to a
// test generator.

pub mod config;
pub mod error;
pub mod extractors;
pub mod language;
pub mod syntax;
pub mod utils;

pub use config::{FactoryConventions, ScanConfig};
pub use error::FixtureError;
pub use extractors::{harvest, locate_registration, render_json, FactoryLoader, FixtureRecord};
pub use syntax::{Block, CallExpression, RubyParser, SourceParser, SyntaxNode};
