//! Minimal syntax tree model consumed by the factory extractor
//!
//! Parsers lower their concrete trees into [`SyntaxNode`]. Only containers, calls,
//! string literals and identifiers carry structure; every other construct collapses
//! into [`SyntaxNode::Other`], so the extractor never has to know the full grammar.

use crate::error::{FixtureError, Result};
use crate::utils::file_utils::read_file_content;
use std::path::Path;

mod ruby;

pub use ruby::RubyParser;

/// A node of a lowered syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// Root of one parsed file
    Program(Vec<SyntaxNode>),
    /// Ordered statement sequence (method, block or begin bodies)
    Statements(Vec<SyntaxNode>),
    Call(CallExpression),
    /// Unescaped literal text of a string or symbol without interpolation
    StringLiteral(String),
    /// Bare name such as a constant or local variable
    Identifier(String),
    /// Any node kind the extractor does not look into
    Other(String),
}

impl SyntaxNode {
    /// Short tag for log messages
    pub fn kind(&self) -> &str {
        match self {
            SyntaxNode::Program(_) => "program",
            SyntaxNode::Statements(_) => "statements",
            SyntaxNode::Call(_) => "call",
            SyntaxNode::StringLiteral(_) => "string_literal",
            SyntaxNode::Identifier(_) => "identifier",
            SyntaxNode::Other(kind) => kind,
        }
    }

    pub fn as_call(&self) -> Option<&CallExpression> {
        match self {
            SyntaxNode::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            SyntaxNode::StringLiteral(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            SyntaxNode::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

/// Invocation of a named method, e.g. `FactoryBot.define do ... end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpression {
    /// `None` for an implicit receiver
    pub receiver: Option<Box<SyntaxNode>>,
    pub method: String,
    pub arguments: Vec<SyntaxNode>,
    pub block: Option<Block>,
}

impl CallExpression {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            receiver: None,
            method: method.into(),
            arguments: Vec::new(),
            block: None,
        }
    }

    pub fn with_receiver(mut self, receiver: SyntaxNode) -> Self {
        self.receiver = Some(Box::new(receiver));
        self
    }

    pub fn with_argument(mut self, argument: SyntaxNode) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_block(mut self, statements: Vec<SyntaxNode>) -> Self {
        self.block = Some(Block { statements });
        self
    }

    pub fn first_argument(&self) -> Option<&SyntaxNode> {
        self.arguments.first()
    }

    /// Name of the receiver when it is a plain identifier
    pub fn receiver_name(&self) -> Option<&str> {
        self.receiver.as_deref().and_then(SyntaxNode::as_identifier)
    }

    /// Statements of the attached block; empty when there is no block
    pub fn block_statements(&self) -> &[SyntaxNode] {
        self.block
            .as_ref()
            .map(|block| block.statements.as_slice())
            .unwrap_or_default()
    }
}

impl From<CallExpression> for SyntaxNode {
    fn from(call: CallExpression) -> Self {
        SyntaxNode::Call(call)
    }
}

/// Block attached to a call (`do ... end` or `{ ... }`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub statements: Vec<SyntaxNode>,
}

/// Parsing collaborator: turns source text into a lowered [`SyntaxNode::Program`]
///
/// A parse failure is reported as an error; callers decide whether to skip the file.
pub trait SourceParser: Send + Sync {
    /// Parse in-memory source. `origin` only labels errors and logs.
    fn parse_source(&self, source: &str, origin: &str) -> Result<SyntaxNode>;

    fn parse_file(&self, path: &Path) -> Result<SyntaxNode> {
        let source = read_file_content(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_source(&source, &path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_statements_empty_without_block() {
        let call = CallExpression::new("factory");
        assert!(call.block_statements().is_empty());
        assert!(call.block.is_none());
    }

    #[test]
    fn test_receiver_name_only_for_identifiers() {
        let call = CallExpression::new("define")
            .with_receiver(SyntaxNode::Identifier("FactoryBot".to_string()));
        assert_eq!(call.receiver_name(), Some("FactoryBot"));

        let call = CallExpression::new("define")
            .with_receiver(SyntaxNode::Other("call".to_string()));
        assert_eq!(call.receiver_name(), None);
    }

    #[test]
    fn test_kind_reports_other_node_kind() {
        assert_eq!(SyntaxNode::Other("heredoc_body".to_string()).kind(), "heredoc_body");
        assert_eq!(SyntaxNode::Statements(vec![]).kind(), "statements");
    }
}
