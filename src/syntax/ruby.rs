/// Ruby parsing collaborator
/// Parses with tree-sitter-ruby and lowers the concrete tree into `SyntaxNode`
use super::{Block, CallExpression, SourceParser, SyntaxNode};
use crate::error::{FixtureError, Result};
use crate::language::create_parser;
use tracing::debug;
use tree_sitter::Node;

/// tree-sitter backed [`SourceParser`] for Ruby source
#[derive(Debug, Clone, Copy, Default)]
pub struct RubyParser;

impl RubyParser {
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for RubyParser {
    fn parse_source(&self, source: &str, origin: &str) -> Result<SyntaxNode> {
        let mut parser = create_parser("ruby")?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| FixtureError::NoTree {
                origin: origin.to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            debug!("Ruby tree for {} contains ERROR/MISSING nodes", origin);
            return Err(FixtureError::Syntax {
                origin: origin.to_string(),
            });
        }

        Ok(lower_node(root, source.as_bytes()))
    }
}

fn lower_node(node: Node, source: &[u8]) -> SyntaxNode {
    match node.kind() {
        "program" => SyntaxNode::Program(lower_named_children(node, source)),
        "body_statement" | "block_body" => {
            SyntaxNode::Statements(lower_named_children(node, source))
        }
        "call" => match lower_call(node, source) {
            Some(call) => SyntaxNode::Call(call),
            // `recv.()` has no method name
            None => SyntaxNode::Other("call".to_string()),
        },
        "simple_symbol" => {
            let text = node_text(node, source);
            SyntaxNode::StringLiteral(text.strip_prefix(':').unwrap_or(text).to_string())
        }
        "string" | "delimited_symbol" => lower_string(node, source),
        "identifier" | "constant" => SyntaxNode::Identifier(node_text(node, source).to_string()),
        // `::FactoryBot` resolves to the top-level constant
        "scope_resolution" if node.child_by_field_name("scope").is_none() => node
            .child_by_field_name("name")
            .map(|name| SyntaxNode::Identifier(node_text(name, source).to_string()))
            .unwrap_or_else(|| SyntaxNode::Other("scope_resolution".to_string())),
        kind => SyntaxNode::Other(kind.to_string()),
    }
}

fn lower_named_children(node: Node, source: &[u8]) -> Vec<SyntaxNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .map(|child| lower_node(child, source))
        .collect()
}

fn lower_call(node: Node, source: &[u8]) -> Option<CallExpression> {
    let method = node.child_by_field_name("method")?;

    let receiver = node
        .child_by_field_name("receiver")
        .map(|receiver| Box::new(lower_node(receiver, source)));

    let arguments = node
        .child_by_field_name("arguments")
        .map(|arguments| lower_named_children(arguments, source))
        .unwrap_or_default();

    let block = node
        .child_by_field_name("block")
        .map(|block| lower_block(block, source));

    Some(CallExpression {
        receiver,
        method: node_text(method, source).to_string(),
        arguments,
        block,
    })
}

/// Lower a `do_block` or brace `block` into its statements
///
/// The body container (`body_statement` / `block_body`) is flattened so the block
/// holds statements directly; block parameters are dropped.
fn lower_block(node: Node, source: &[u8]) -> Block {
    let mut statements = Vec::new();
    let mut cursor = node.walk();

    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "block_parameters" => {}
            "body_statement" | "block_body" => {
                statements.extend(lower_named_children(child, source));
            }
            _ => statements.push(lower_node(child, source)),
        }
    }

    Block { statements }
}

/// Lower a string or quoted symbol; interpolated ones are not literals
fn lower_string(node: Node, source: &[u8]) -> SyntaxNode {
    let single_quoted = is_single_quoted(node, source);
    let mut text = String::new();
    let mut cursor = node.walk();

    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "string_content" => text.push_str(node_text(child, source)),
            "escape_sequence" if single_quoted => text.push_str(node_text(child, source)),
            "escape_sequence" => text.push_str(&unescape_sequence(node_text(child, source))),
            _ => return SyntaxNode::Other(node.kind().to_string()),
        }
    }

    if single_quoted {
        text = unescape_single_quoted(&text);
    }

    SyntaxNode::StringLiteral(text)
}

fn is_single_quoted(node: Node, source: &[u8]) -> bool {
    let text = node_text(node, source);
    text.starts_with('\'') || text.starts_with(":'") || text.starts_with("%q")
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_default()
}

/// Single-quoted Ruby strings only recognise `\\` and `\'`
fn unescape_single_quoted(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\\' || next == '\'' {
                    result.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        result.push(c);
    }

    result
}

/// Decode one double-quoted escape sequence such as `\n`, `é` or `\x41`
///
/// Sequences that cannot be decoded are kept verbatim.
fn unescape_sequence(sequence: &str) -> String {
    let Some(body) = sequence.strip_prefix('\\') else {
        return sequence.to_string();
    };
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str();

    let decoded = match first {
        'n' => Some("\n".to_string()),
        't' => Some("\t".to_string()),
        's' => Some(" ".to_string()),
        'r' => Some("\r".to_string()),
        'e' => Some("\x1b".to_string()),
        'a' => Some("\x07".to_string()),
        'b' => Some("\x08".to_string()),
        'f' => Some("\x0c".to_string()),
        'v' => Some("\x0b".to_string()),
        // line continuation
        '\n' => Some(String::new()),
        'u' => decode_unicode(rest),
        'x' => u32::from_str_radix(rest, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from),
        '0'..='7' => u32::from_str_radix(body, 8)
            .ok()
            .and_then(char::from_u32)
            .map(String::from),
        other => Some(format!("{}{}", other, rest)),
    };

    decoded.unwrap_or_else(|| sequence.to_string())
}

/// `\uXXXX` or `\u{X Y Z}`
fn decode_unicode(digits: &str) -> Option<String> {
    let inner = match digits.strip_prefix('{') {
        Some(braced) => braced.strip_suffix('}')?,
        None => digits,
    };

    inner
        .split_whitespace()
        .map(|hex| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SyntaxNode {
        RubyParser::new().parse_source(source, "test.rb").unwrap()
    }

    fn top_level(source: &str) -> Vec<SyntaxNode> {
        match parse(source) {
            SyntaxNode::Program(children) => children,
            other => panic!("expected program, got {:?}", other),
        }
    }

    fn first_call(source: &str) -> CallExpression {
        top_level(source)
            .into_iter()
            .find_map(|node| match node {
                SyntaxNode::Call(call) => Some(call),
                _ => None,
            })
            .expect("source should contain a call")
    }

    #[test]
    fn test_lowers_factory_bot_define_block() {
        let call = first_call(
            r#"
FactoryBot.define do
  factory :user do
    role { "user" }
  end
end
"#,
        );

        assert_eq!(call.receiver_name(), Some("FactoryBot"));
        assert_eq!(call.method, "define");
        assert!(call.arguments.is_empty());

        let statements = call.block_statements();
        assert_eq!(statements.len(), 1);

        let factory = statements[0].as_call().expect("factory call");
        assert_eq!(factory.method, "factory");
        assert!(factory.receiver.is_none());
        assert_eq!(
            factory.first_argument().and_then(SyntaxNode::as_string_literal),
            Some("user")
        );

        let attribute = factory.block_statements()[0].as_call().expect("attribute call");
        assert_eq!(attribute.method, "role");
        assert!(attribute.block.is_some());
    }

    #[test]
    fn test_empty_do_block_has_no_statements() {
        let call = first_call("FactoryBot.define do\nend\n");
        assert!(call.block.is_some());
        assert!(call.block_statements().is_empty());
    }

    #[test]
    fn test_brace_block_parameters_are_dropped() {
        let call = first_call("sequence(:email) { |i| i }\n");
        assert_eq!(call.method, "sequence");
        assert_eq!(
            call.first_argument().and_then(SyntaxNode::as_string_literal),
            Some("email")
        );
        assert_eq!(call.block_statements().len(), 1);
        assert_eq!(call.block_statements()[0].as_identifier(), Some("i"));
    }

    #[test]
    fn test_string_arguments_are_unescaped() {
        let call = first_call(r#"factory "tab\tbed" "#);
        assert_eq!(
            call.first_argument().and_then(SyntaxNode::as_string_literal),
            Some("tab\tbed")
        );

        let call = first_call(r#"factory 'plain'"#);
        assert_eq!(
            call.first_argument().and_then(SyntaxNode::as_string_literal),
            Some("plain")
        );

        let call = first_call(r#"factory :"quoted symbol""#);
        assert_eq!(
            call.first_argument().and_then(SyntaxNode::as_string_literal),
            Some("quoted symbol")
        );
    }

    #[test]
    fn test_interpolated_string_is_not_a_literal() {
        let call = first_call(r#"factory "user_#{suffix}""#);
        let argument = call.first_argument().expect("argument");
        assert!(argument.as_string_literal().is_none());
        assert_eq!(argument.kind(), "string");
    }

    #[test]
    fn test_top_level_scope_resolution_receiver() {
        let call = first_call("::FactoryBot.define do\nend\n");
        assert_eq!(call.receiver_name(), Some("FactoryBot"));

        let call = first_call("Legacy::FactoryBot.define do\nend\n");
        assert_eq!(call.receiver_name(), None);
    }

    #[test]
    fn test_unrelated_nodes_become_other() {
        let nodes = top_level("ADMIN_USER_ID = rand(999..1_099_997)\n");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind(), "assignment");
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let result = RubyParser::new().parse_source("FactoryBot.define do\n  factory :user do\n", "broken.rb");
        assert!(matches!(result, Err(FixtureError::Syntax { .. })));
    }

    #[test]
    fn test_parse_file_missing_reports_read_error() {
        let missing = std::path::Path::new("/nonexistent/factory.rb");
        let result = RubyParser::new().parse_file(missing);

        match result {
            Err(error @ FixtureError::Read { .. }) => {
                let message = error.to_string();
                assert!(message.contains("/nonexistent/factory.rb"), "{}", message);
                assert!(message.starts_with("Failed to read"), "{}", message);
            }
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_unescape_sequences() {
        assert_eq!(unescape_sequence("\\n"), "\n");
        assert_eq!(unescape_sequence("\\\""), "\"");
        assert_eq!(unescape_sequence("\\u00e9"), "é");
        assert_eq!(unescape_sequence("\\u{48 49}"), "HI");
        assert_eq!(unescape_sequence("\\x41"), "A");
        assert_eq!(unescape_sequence("\\101"), "A");
        assert_eq!(unescape_sequence("\\u{zz}"), "\\u{zz}");
        assert_eq!(unescape_single_quoted(r"it\'s a \\ path \n"), r"it's a \ path \n");
    }
}
