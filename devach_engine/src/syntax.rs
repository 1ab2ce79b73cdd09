//! Syntax index module --
//!
//! A `SyntaxIndex` groups every node of one parsed source file by its `NodeKind`.
//! It is built in a single pass over a pre-order node stream and never changes
//! afterwards; achievement predicates only ever see the index, not the tree.

pub mod python;

pub use python::{ParsedModule, SyntaxError, index_source, parse_python};

use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Closed set of syntactic categories recognized in Python source.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Module,
    // statements
    Assign,
    AnnAssign,
    AugAssign,
    For,
    AsyncFor,
    While,
    If,
    Pass,
    Break,
    Continue,
    Return,
    FunctionDef,
    ClassDef,
    Import,
    ImportFrom,
    Try,
    Raise,
    With,
    Assert,
    Global,
    Nonlocal,
    Delete,
    // expressions
    Call,
    Lambda,
    IfExp,
    NamedExpr,
    ListComp,
    SetComp,
    GeneratorExp,
    DictComp,
    List,
    Tuple,
    Set,
    Dict,
    Str,
    Name,
    Attribute,
    Compare,
    Not,
    Yield,
    Await,
    // operators, by symbol
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    MatMult,
    LShift,
    RShift,
    BitOr,
    BitAnd,
    BitXor,
    Invert,
    UAdd,
    USub,
    And,
    Or,
    Comment,
    Other,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Module => "module",
            NodeKind::Assign => "assign",
            NodeKind::AnnAssign => "annotated-assign",
            NodeKind::AugAssign => "augmented-assign",
            NodeKind::For => "for",
            NodeKind::AsyncFor => "async-for",
            NodeKind::While => "while",
            NodeKind::If => "if",
            NodeKind::Pass => "pass",
            NodeKind::Break => "break",
            NodeKind::Continue => "continue",
            NodeKind::Return => "return",
            NodeKind::FunctionDef => "function-def",
            NodeKind::ClassDef => "class-def",
            NodeKind::Import => "import",
            NodeKind::ImportFrom => "import-from",
            NodeKind::Try => "try",
            NodeKind::Raise => "raise",
            NodeKind::With => "with",
            NodeKind::Assert => "assert",
            NodeKind::Global => "global",
            NodeKind::Nonlocal => "nonlocal",
            NodeKind::Delete => "delete",
            NodeKind::Call => "call",
            NodeKind::Lambda => "lambda",
            NodeKind::IfExp => "if-expression",
            NodeKind::NamedExpr => "named-expression",
            NodeKind::ListComp => "list-comprehension",
            NodeKind::SetComp => "set-comprehension",
            NodeKind::GeneratorExp => "generator-expression",
            NodeKind::DictComp => "dict-comprehension",
            NodeKind::List => "list",
            NodeKind::Tuple => "tuple",
            NodeKind::Set => "set",
            NodeKind::Dict => "dict",
            NodeKind::Str => "string",
            NodeKind::Name => "name",
            NodeKind::Attribute => "attribute",
            NodeKind::Compare => "compare",
            NodeKind::Not => "not",
            NodeKind::Yield => "yield",
            NodeKind::Await => "await",
            NodeKind::Add => "op:+",
            NodeKind::Sub => "op:-",
            NodeKind::Mult => "op:*",
            NodeKind::Div => "op:/",
            NodeKind::FloorDiv => "op://",
            NodeKind::Mod => "op:%",
            NodeKind::Pow => "op:**",
            NodeKind::MatMult => "op:@",
            NodeKind::LShift => "op:<<",
            NodeKind::RShift => "op:>>",
            NodeKind::BitOr => "op:|",
            NodeKind::BitAnd => "op:&",
            NodeKind::BitXor => "op:^",
            NodeKind::Invert => "op:~",
            NodeKind::UAdd => "op:unary+",
            NodeKind::USub => "op:unary-",
            NodeKind::And => "op:and",
            NodeKind::Or => "op:or",
            NodeKind::Comment => "comment",
            NodeKind::Other => "other",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-based line and column of a node's first character.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A positional call argument, as far as the predicates care about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// A plain string literal and its text.
    Str(String),
    Other,
}

/// Kind-specific data extracted while classifying a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeDetail {
    #[default]
    None,
    /// Name bound by a function or class definition.
    Binding(String),
    /// Callee name (plain identifiers only) and positional arguments.
    Call { callee: Option<String>, args: Vec<Argument> },
    /// Text of a plain string literal.
    Literal(String),
}

/// One classified syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub position: Position,
    pub detail: NodeDetail,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Self {
            kind,
            position,
            detail: NodeDetail::None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: NodeDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn bound_name(&self) -> Option<&str> {
        match &self.detail {
            NodeDetail::Binding(name) => Some(name),
            _ => None,
        }
    }

    pub fn callee(&self) -> Option<&str> {
        match &self.detail {
            NodeDetail::Call { callee, .. } => callee.as_deref(),
            _ => None,
        }
    }

    /// String literal arguments of a call, in argument order.
    pub fn string_args(&self) -> impl Iterator<Item = &str> {
        let args: &[Argument] = match &self.detail {
            NodeDetail::Call { args, .. } => args.as_slice(),
            _ => &[],
        };
        args.iter().filter_map(|arg| match arg {
            Argument::Str(text) => Some(text.as_str()),
            Argument::Other => None,
        })
    }
}

/// Every node of one source file, grouped by kind in pre-order.
#[derive(Debug, Clone, Default)]
pub struct SyntaxIndex {
    table: BTreeMap<NodeKind, Vec<SyntaxNode>>,
    len: usize,
}

impl SyntaxIndex {
    /// Build the index from a pre-order node stream. Every node is kept.
    pub fn build<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = SyntaxNode>,
    {
        let mut table: BTreeMap<NodeKind, Vec<SyntaxNode>> = BTreeMap::new();
        let mut len = 0;
        for node in nodes {
            table.entry(node.kind).or_default().push(node);
            len += 1;
        }
        Self { table, len }
    }

    /// All nodes of `kind`, in the order they were visited.
    pub fn nodes(&self, kind: NodeKind) -> &[SyntaxNode] {
        self.table.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.table.contains_key(&kind)
    }

    pub fn contains_any(&self, kinds: &[NodeKind]) -> bool {
        kinds.iter().any(|kind| self.contains(*kind))
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes(kind).len()
    }

    /// Total number of indexed nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Node kinds present in the index with their counts, ordered by kind.
    pub fn kinds(&self) -> impl Iterator<Item = (NodeKind, usize)> + '_ {
        self.table.iter().map(|(kind, nodes)| (*kind, nodes.len()))
    }

    /// Unique names bound by definition nodes of `kind`.
    pub fn bound_names(&self, kind: NodeKind) -> HashSet<&str> {
        self.nodes(kind).iter().filter_map(SyntaxNode::bound_name).collect()
    }

    /// Unique callee names across all calls.
    pub fn callee_names(&self) -> HashSet<&str> {
        self.nodes(NodeKind::Call).iter().filter_map(SyntaxNode::callee).collect()
    }

    /// Calls whose callee is exactly `name`.
    pub fn calls_to<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SyntaxNode> + 'a {
        self.nodes(NodeKind::Call)
            .iter()
            .filter(move |call| call.callee() == Some(name))
    }
}

impl FromIterator<SyntaxNode> for SyntaxIndex {
    fn from_iter<T: IntoIterator<Item = SyntaxNode>>(iter: T) -> Self {
        SyntaxIndex::build(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize) -> Position {
        Position { line, column: 1 }
    }

    fn call(callee: &str, args: Vec<Argument>, line: usize) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Call, at(line)).with_detail(NodeDetail::Call {
            callee: Some(callee.into()),
            args,
        })
    }

    #[test]
    fn build_keeps_every_node_in_order() {
        let index = SyntaxIndex::build(vec![
            SyntaxNode::new(NodeKind::Module, at(1)),
            SyntaxNode::new(NodeKind::Name, at(1)),
            SyntaxNode::new(NodeKind::Assign, at(2)),
            SyntaxNode::new(NodeKind::Name, at(3)),
            SyntaxNode::new(NodeKind::Name, at(3)),
        ]);
        assert_eq!(index.len(), 5);
        assert_eq!(index.count(NodeKind::Name), 3);
        let lines: Vec<_> = index.nodes(NodeKind::Name).iter().map(|n| n.position.line).collect();
        assert_eq!(lines, vec![1, 3, 3]);
        assert!(index.contains_any(&[NodeKind::For, NodeKind::Assign]));
        assert!(!index.contains(NodeKind::For));
        assert!(index.nodes(NodeKind::For).is_empty());
    }

    #[test]
    fn empty_index_reports_nothing() {
        let index = SyntaxIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.kinds().count(), 0);
        assert!(index.callee_names().is_empty());
    }

    #[test]
    fn names_are_collected_from_details() {
        let index: SyntaxIndex = vec![
            SyntaxNode::new(NodeKind::FunctionDef, at(1)).with_detail(NodeDetail::Binding("f".into())),
            SyntaxNode::new(NodeKind::FunctionDef, at(4)).with_detail(NodeDetail::Binding("g".into())),
            call("f", vec![], 6),
            call("f", vec![], 7),
            SyntaxNode::new(NodeKind::Call, at(8)).with_detail(NodeDetail::Call {
                callee: None,
                args: vec![],
            }),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.bound_names(NodeKind::FunctionDef), HashSet::from(["f", "g"]));
        assert_eq!(index.callee_names(), HashSet::from(["f"]));
        assert_eq!(index.calls_to("f").count(), 2);
        assert_eq!(index.calls_to("g").count(), 0);
    }

    #[test]
    fn string_args_skip_non_literals() {
        let node = call(
            "print",
            vec![
                Argument::Other,
                Argument::Str("a".into()),
                Argument::Str("b".into()),
            ],
            1,
        );
        assert_eq!(node.string_args().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(SyntaxNode::new(NodeKind::Str, at(1)).string_args().count(), 0);
    }
}
