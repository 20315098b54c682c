/// Registration block lookup
/// Finds the `FactoryBot.define` call among the top-level statements of a file
use crate::config::FactoryConventions;
use crate::syntax::{CallExpression, SyntaxNode};

/// Return the first registration call in pre-order, if any
///
/// Only `Program` and `Statements` nodes are descended into; calls nested in
/// arguments, blocks or other constructs are never searched. The walk stops at the
/// first match.
pub fn locate_registration<'a>(
    node: &'a SyntaxNode,
    conventions: &FactoryConventions,
) -> Option<&'a CallExpression> {
    match node {
        SyntaxNode::Call(call) if is_registration(call, conventions) => Some(call),
        SyntaxNode::Program(children) | SyntaxNode::Statements(children) => children
            .iter()
            .find_map(|child| locate_registration(child, conventions)),
        _ => None,
    }
}

/// `FactoryBot.define do ... end`: named receiver, named method, attached block
pub fn is_registration(call: &CallExpression, conventions: &FactoryConventions) -> bool {
    call.method == conventions.registration_method
        && call.receiver_name() == Some(conventions.registration_receiver.as_str())
        && call.block.is_some()
}
