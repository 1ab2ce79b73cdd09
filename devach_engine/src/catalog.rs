//! Catalog of every achievement the engine knows about.
//!
//! Order matters only for presentation and for the order in which the frontier
//! is evaluated; identifiers are explicit and never derived from position.

use devach_data::AchievementId;

use crate::achievement::AchievementDef;
use crate::syntax::{NodeKind, SyntaxIndex};

/// All achievement definitions, in declaration order.
pub static CATALOG: [AchievementDef; 13] = [
    AchievementDef {
        id: AchievementId::HelloWorld,
        title: "Hello Hello!",
        description: "Print \"Hello World\".",
        requires: &[],
        predicate: prints_hello_world,
    },
    AchievementDef {
        id: AchievementId::Assignment,
        title: "Variables!",
        description: "Assign a value to a variable.",
        requires: &[],
        predicate: has_assignment,
    },
    AchievementDef {
        id: AchievementId::MathOperators,
        title: "Operators!",
        description: "Use an arithmetic operator.",
        requires: &[],
        predicate: has_math_operator,
    },
    AchievementDef {
        id: AchievementId::BitwiseOperators,
        title: "Bitwise!",
        description: "Use a bitwise operator.",
        requires: &[AchievementId::MathOperators],
        predicate: has_bitwise_operator,
    },
    AchievementDef {
        id: AchievementId::Conditional,
        title: "If statements!",
        description: "Write an if statement or a conditional expression.",
        requires: &[],
        predicate: has_conditional,
    },
    AchievementDef {
        id: AchievementId::Loops,
        title: "Loops!",
        description: "Write a for or while loop.",
        requires: &[AchievementId::Assignment, AchievementId::Conditional],
        predicate: has_loop,
    },
    AchievementDef {
        id: AchievementId::Comprehensions,
        title: "Comprehensions!",
        description: "Write a list, set, dict or generator comprehension.",
        requires: &[AchievementId::Loops],
        predicate: has_comprehension,
    },
    AchievementDef {
        id: AchievementId::Pass,
        title: "Pass!",
        description: "Use the pass statement.",
        requires: &[AchievementId::Loops],
        predicate: has_pass,
    },
    AchievementDef {
        id: AchievementId::Function,
        title: "Functions!",
        description: "Define a function and call it.",
        requires: &[AchievementId::Conditional, AchievementId::Loops],
        predicate: defines_and_calls_function,
    },
    AchievementDef {
        id: AchievementId::Lambda,
        title: "Lambdas!",
        description: "Write a lambda expression.",
        requires: &[AchievementId::Function],
        predicate: has_lambda,
    },
    AchievementDef {
        id: AchievementId::List,
        title: "Lists!",
        description: "Write a list literal.",
        requires: &[],
        predicate: has_list,
    },
    AchievementDef {
        id: AchievementId::Dict,
        title: "Dictionaries!",
        description: "Write a dictionary literal.",
        requires: &[],
        predicate: has_dict,
    },
    AchievementDef {
        id: AchievementId::Class,
        title: "Classes!",
        description: "Define a class and create an instance of it.",
        requires: &[AchievementId::Function],
        predicate: defines_and_instantiates_class,
    },
];

const MATH_OPERATORS: [NodeKind; 8] = [
    NodeKind::Add,
    NodeKind::Sub,
    NodeKind::Mult,
    NodeKind::Div,
    NodeKind::FloorDiv,
    NodeKind::Mod,
    NodeKind::Pow,
    NodeKind::MatMult,
];

const BITWISE_OPERATORS: [NodeKind; 6] = [
    NodeKind::LShift,
    NodeKind::RShift,
    NodeKind::BitOr,
    NodeKind::BitAnd,
    NodeKind::BitXor,
    NodeKind::Invert,
];

const COMPREHENSIONS: [NodeKind; 4] = [
    NodeKind::ListComp,
    NodeKind::SetComp,
    NodeKind::GeneratorExp,
    NodeKind::DictComp,
];

/// Look up the definition for `id`.
pub fn definition(id: AchievementId) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|def| def.id == id)
}

fn prints_hello_world(index: &SyntaxIndex) -> bool {
    index
        .calls_to("print")
        .any(|call| call.string_args().any(|arg| arg.to_lowercase().contains("hello world")))
}

fn has_assignment(index: &SyntaxIndex) -> bool {
    index.contains(NodeKind::Assign)
}

fn has_math_operator(index: &SyntaxIndex) -> bool {
    index.contains_any(&MATH_OPERATORS)
}

fn has_bitwise_operator(index: &SyntaxIndex) -> bool {
    index.contains_any(&BITWISE_OPERATORS)
}

fn has_conditional(index: &SyntaxIndex) -> bool {
    index.contains_any(&[NodeKind::If, NodeKind::IfExp])
}

fn has_loop(index: &SyntaxIndex) -> bool {
    index.contains_any(&[NodeKind::For, NodeKind::While])
}

fn has_comprehension(index: &SyntaxIndex) -> bool {
    index.contains_any(&COMPREHENSIONS)
}

fn has_pass(index: &SyntaxIndex) -> bool {
    index.contains(NodeKind::Pass)
}

// Name-only matching: any call to an identically named callee counts.
fn defines_and_calls_function(index: &SyntaxIndex) -> bool {
    !index
        .bound_names(NodeKind::FunctionDef)
        .is_disjoint(&index.callee_names())
}

fn has_lambda(index: &SyntaxIndex) -> bool {
    index.contains(NodeKind::Lambda)
}

fn has_list(index: &SyntaxIndex) -> bool {
    index.contains(NodeKind::List)
}

fn has_dict(index: &SyntaxIndex) -> bool {
    index.contains(NodeKind::Dict)
}

fn defines_and_instantiates_class(index: &SyntaxIndex) -> bool {
    !index
        .bound_names(NodeKind::ClassDef)
        .is_disjoint(&index.callee_names())
}
