//! module `syntax::python`
//!
//! Python front end built on tree-sitter. Parses source text, rejects trees
//! that contain syntax errors, and streams every tree node in pre-order as a
//! classified `SyntaxNode`.

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree, TreeCursor};

use super::{Argument, NodeDetail, NodeKind, Position, SyntaxIndex, SyntaxNode};

/// Reasons a source file could not be turned into a syntax tree.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("failed to load the Python grammar: {0}")]
    Language(String),
    #[error("the parser returned no syntax tree")]
    NoTree,
    #[error("invalid syntax at line {line}, column {column}")]
    Invalid { line: usize, column: usize },
}

/// A successfully parsed Python module together with its source text.
pub struct ParsedModule {
    source: String,
    tree: Tree,
}

impl ParsedModule {
    /// Every node of the tree in pre-order, each visited exactly once.
    pub fn nodes(&self) -> PreorderNodes<'_> {
        PreorderNodes {
            cursor: self.tree.walk(),
            source: self.source.as_bytes(),
            parents: Vec::new(),
            done: false,
        }
    }

    pub fn index(&self) -> SyntaxIndex {
        SyntaxIndex::build(self.nodes())
    }
}

/// Parse Python source text.
///
/// # Errors
/// - if the grammar cannot be loaded
/// - if the source contains a syntax error
pub fn parse_python(source: &str) -> Result<ParsedModule, SyntaxError> {
    let mut parser = Parser::new();
    parser
        .set_language(tree_sitter_python::language())
        .map_err(|err| SyntaxError::Language(err.to_string()))?;
    let tree = parser.parse(source, None).ok_or(SyntaxError::NoTree)?;

    if let Some(bad) = first_error(tree.root_node()) {
        let point = bad.start_position();
        return Err(SyntaxError::Invalid {
            line: point.row + 1,
            column: point.column + 1,
        });
    }

    Ok(ParsedModule {
        source: source.to_string(),
        tree,
    })
}

/// Parse `source` and build its syntax index in one step.
///
/// # Errors
/// - see [`parse_python`]
pub fn index_source(source: &str) -> Result<SyntaxIndex, SyntaxError> {
    parse_python(source).map(|module| module.index())
}

/// Pre-order iterator over a parsed module.
pub struct PreorderNodes<'m> {
    cursor: TreeCursor<'m>,
    source: &'m [u8],
    parents: Vec<&'static str>,
    done: bool,
}

impl Iterator for PreorderNodes<'_> {
    type Item = SyntaxNode;

    fn next(&mut self) -> Option<SyntaxNode> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        let item = classify(node, self.parents.last().copied(), self.source);

        if self.cursor.goto_first_child() {
            self.parents.push(node.kind());
        } else {
            loop {
                if self.cursor.goto_next_sibling() {
                    break;
                }
                if !self.cursor.goto_parent() {
                    self.done = true;
                    break;
                }
                self.parents.pop();
            }
        }
        Some(item)
    }
}

/// First node that Python 3 would refuse to compile, in pre-order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() || is_python2_only(node) {
        return Some(node);
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

// The grammar still accepts Python 2 `print x` and `exec code` statements.
fn is_python2_only(node: Node<'_>) -> bool {
    node.is_named() && matches!(node.kind(), "print_statement" | "exec_statement")
}

fn classify(node: Node<'_>, parent: Option<&str>, source: &[u8]) -> SyntaxNode {
    let point = node.start_position();
    let position = Position {
        line: point.row + 1,
        column: point.column + 1,
    };
    let kind = node_kind(node, parent);
    let detail = match kind {
        NodeKind::FunctionDef | NodeKind::ClassDef => node
            .child_by_field_name("name")
            .and_then(|name| text(name, source))
            .map(|name| NodeDetail::Binding(name.to_string()))
            .unwrap_or_default(),
        NodeKind::Call => call_detail(node, source),
        NodeKind::Str => string_value(node, source).map(NodeDetail::Literal).unwrap_or_default(),
        _ => NodeDetail::None,
    };
    SyntaxNode::new(kind, position).with_detail(detail)
}

fn node_kind(node: Node<'_>, parent: Option<&str>) -> NodeKind {
    if !node.is_named() {
        return token_kind(node.kind(), parent);
    }
    match node.kind() {
        "module" => NodeKind::Module,
        // `a = b = 1` nests assignments but is a single statement
        "assignment" if parent == Some("assignment") => NodeKind::Other,
        "assignment" if node.child_by_field_name("type").is_some() => NodeKind::AnnAssign,
        "assignment" => NodeKind::Assign,
        "augmented_assignment" => NodeKind::AugAssign,
        "named_expression" => NodeKind::NamedExpr,
        "for_statement" if is_async(node) => NodeKind::AsyncFor,
        "for_statement" => NodeKind::For,
        "while_statement" => NodeKind::While,
        // an elif is a nested if statement as far as Python is concerned
        "if_statement" | "elif_clause" => NodeKind::If,
        "conditional_expression" => NodeKind::IfExp,
        "pass_statement" => NodeKind::Pass,
        "break_statement" => NodeKind::Break,
        "continue_statement" => NodeKind::Continue,
        "return_statement" => NodeKind::Return,
        "function_definition" => NodeKind::FunctionDef,
        "class_definition" => NodeKind::ClassDef,
        "import_statement" => NodeKind::Import,
        "import_from_statement" | "future_import_statement" => NodeKind::ImportFrom,
        "try_statement" => NodeKind::Try,
        "raise_statement" => NodeKind::Raise,
        "with_statement" => NodeKind::With,
        "assert_statement" => NodeKind::Assert,
        "global_statement" => NodeKind::Global,
        "nonlocal_statement" => NodeKind::Nonlocal,
        "delete_statement" => NodeKind::Delete,
        "call" => NodeKind::Call,
        "lambda" => NodeKind::Lambda,
        "list_comprehension" => NodeKind::ListComp,
        "set_comprehension" => NodeKind::SetComp,
        "generator_expression" => NodeKind::GeneratorExp,
        "dictionary_comprehension" => NodeKind::DictComp,
        "list" | "list_pattern" => NodeKind::List,
        "tuple" | "tuple_pattern" | "pattern_list" | "expression_list" => NodeKind::Tuple,
        "set" => NodeKind::Set,
        "dictionary" => NodeKind::Dict,
        // pieces of an implicit concatenation belong to the enclosing literal
        "string" if parent == Some("concatenated_string") => NodeKind::Other,
        "string" | "concatenated_string" => NodeKind::Str,
        "identifier" => NodeKind::Name,
        "attribute" => NodeKind::Attribute,
        "comparison_operator" => NodeKind::Compare,
        "not_operator" => NodeKind::Not,
        "yield" => NodeKind::Yield,
        "await" => NodeKind::Await,
        "comment" => NodeKind::Comment,
        _ => NodeKind::Other,
    }
}

fn is_async(node: Node<'_>) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

/// Classify an anonymous token. Only operator symbols get a kind of their own.
fn token_kind(token: &str, parent: Option<&str>) -> NodeKind {
    match parent {
        Some("binary_operator") => binary_operator(token),
        Some("augmented_assignment") => token.strip_suffix('=').map_or(NodeKind::Other, binary_operator),
        Some("unary_operator") => match token {
            "~" => NodeKind::Invert,
            "-" => NodeKind::USub,
            "+" => NodeKind::UAdd,
            _ => NodeKind::Other,
        },
        Some("boolean_operator") => match token {
            "and" => NodeKind::And,
            "or" => NodeKind::Or,
            _ => NodeKind::Other,
        },
        _ => NodeKind::Other,
    }
}

fn binary_operator(symbol: &str) -> NodeKind {
    match symbol {
        "+" => NodeKind::Add,
        "-" => NodeKind::Sub,
        "*" => NodeKind::Mult,
        "/" => NodeKind::Div,
        "//" => NodeKind::FloorDiv,
        "%" => NodeKind::Mod,
        "**" => NodeKind::Pow,
        "@" => NodeKind::MatMult,
        "<<" => NodeKind::LShift,
        ">>" => NodeKind::RShift,
        "|" => NodeKind::BitOr,
        "&" => NodeKind::BitAnd,
        "^" => NodeKind::BitXor,
        _ => NodeKind::Other,
    }
}

fn call_detail(node: Node<'_>, source: &[u8]) -> NodeDetail {
    let callee = node
        .child_by_field_name("function")
        .filter(|function| function.kind() == "identifier")
        .and_then(|function| text(function, source))
        .map(str::to_string);

    let args = match node.child_by_field_name("arguments") {
        Some(list) if list.kind() == "argument_list" => positional_args(list, source),
        // a bare generator argument, as in `sum(x for x in xs)`
        Some(_) => vec![Argument::Other],
        None => Vec::new(),
    };

    NodeDetail::Call { callee, args }
}

fn positional_args(list: Node<'_>, source: &[u8]) -> Vec<Argument> {
    let mut cursor = list.walk();
    let args = list
        .named_children(&mut cursor)
        .filter(|arg| !matches!(arg.kind(), "keyword_argument" | "dictionary_splat" | "comment"))
        .map(|arg| {
            string_value(unparenthesize(arg), source).map_or(Argument::Other, Argument::Str)
        })
        .collect();
    args
}

fn unparenthesize(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Text of a plain `str` literal, or `None` for anything else (bytes, f-strings, non-strings).
fn string_value(node: Node<'_>, source: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => literal_body(text(node, source)?),
        "concatenated_string" => {
            let mut cursor = node.walk();
            let parts: Option<Vec<String>> = node
                .named_children(&mut cursor)
                .filter(|part| part.kind() != "comment")
                .map(|part| string_value(part, source))
                .collect();
            parts.map(|parts| parts.concat())
        },
        _ => None,
    }
}

/// Value of a string literal from its source text: prefix and quotes stripped,
/// escapes decoded unless the literal is raw.
fn literal_body(raw: &str) -> Option<String> {
    let quote_at = raw.find(['"', '\''])?;
    let (prefix, quoted) = raw.split_at(quote_at);
    let prefix = prefix.to_ascii_lowercase();
    if prefix.contains(['b', 'f', 't']) {
        return None;
    }
    let body = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find_map(|quote| quoted.strip_prefix(quote)?.strip_suffix(quote))?;
    if prefix.contains('r') {
        Some(body.to_string())
    } else {
        Some(decode_escapes(body))
    }
}

/// Decode the backslash escapes of a non-raw `str` literal. Unknown escapes are kept as written.
fn decode_escapes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            out.push('\\');
            break;
        };
        match esc {
            '\n' => {},
            '\\' | '\'' | '"' => out.push(esc),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{7}'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0'..='7' => {
                let mut digits = String::from(esc);
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(*d);
                            chars.next();
                        },
                        _ => break,
                    }
                }
                push_code(&mut out, &digits, 8, esc);
            },
            'x' | 'u' | 'U' => {
                let width = match esc {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.by_ref().take(width).collect();
                if digits.len() == width {
                    push_code(&mut out, &digits, 16, esc);
                } else {
                    out.push('\\');
                    out.push(esc);
                    out.push_str(&digits);
                }
            },
            _ => {
                out.push('\\');
                out.push(esc);
            },
        }
    }
    out
}

fn push_code(out: &mut String, digits: &str, radix: u32, esc: char) {
    match u32::from_str_radix(digits, radix).ok().and_then(char::from_u32) {
        Some(decoded) => out.push(decoded),
        None => {
            out.push('\\');
            if radix == 16 {
                out.push(esc);
            }
            out.push_str(digits);
        },
    }
}

fn text<'s>(node: Node<'_>, source: &'s [u8]) -> Option<&'s str> {
    node.utf8_text(source).ok()
}
