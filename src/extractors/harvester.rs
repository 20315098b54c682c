/// Factory and trait harvesting
/// Walks the body of a registration block and collects factory names with their traits
use super::types::FixtureRecord;
use crate::config::FactoryConventions;
use crate::syntax::{CallExpression, SyntaxNode};
use tracing::warn;

/// Collect the factories declared directly in a registration block, in source order
///
/// Statements other than factory declarations (associations, attributes, sequences,
/// callbacks) are skipped. A declaration whose name is not a literal is skipped with a
/// warning; the rest of the block is still harvested.
pub fn harvest(
    registration: &CallExpression,
    conventions: &FactoryConventions,
) -> Vec<FixtureRecord> {
    registration
        .block_statements()
        .iter()
        .filter_map(SyntaxNode::as_call)
        .filter(|call| call.method == conventions.fixture_keyword)
        .filter_map(|declaration| harvest_fixture(declaration, conventions))
        .collect()
}

fn harvest_fixture(
    declaration: &CallExpression,
    conventions: &FactoryConventions,
) -> Option<FixtureRecord> {
    let name = literal_name(declaration)?;

    let variants = declaration
        .block_statements()
        .iter()
        .filter_map(SyntaxNode::as_call)
        .filter(|call| call.method == conventions.variant_keyword)
        .filter_map(literal_name)
        .collect();

    Some(FixtureRecord::new(name, variants))
}

/// Literal text of the first argument, or `None` with a warning
fn literal_name(call: &CallExpression) -> Option<String> {
    match call.first_argument() {
        Some(SyntaxNode::StringLiteral(text)) if !text.is_empty() => Some(text.clone()),
        Some(SyntaxNode::StringLiteral(_)) => {
            warn!("Skipping `{}` declaration with an empty name", call.method);
            None
        }
        Some(other) => {
            warn!(
                "Skipping `{}` declaration: first argument is {} rather than a literal name",
                call.method,
                other.kind()
            );
            None
        }
        None => {
            warn!("Skipping `{}` declaration without a name", call.method);
            None
        }
    }
}
