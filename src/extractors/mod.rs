//! Factory Extractors Module
//!
//! Turns lowered Ruby syntax trees into FactoryBot factory records.
//!
//! # Architecture
//!
//! - `locator.rs` - finds the `FactoryBot.define` registration call
//! - `harvester.rs` - collects factories and their traits from the registration block
//! - `manager.rs` - FactoryLoader public API (directory scan, aggregation)
//! - `types.rs` - FixtureRecord and its JSON form

pub mod harvester;
pub mod locator;
pub mod manager;
pub mod types;

// Re-export the public API
pub use harvester::harvest;
pub use locator::{is_registration, locate_registration};
pub use manager::FactoryLoader;
pub use types::{render_json, FixtureRecord};
