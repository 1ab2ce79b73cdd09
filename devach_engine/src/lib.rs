#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const DEVACH_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod achievement;
pub mod catalog;
pub mod data_paths;
pub mod engine;
pub mod graph;
pub mod session;
pub mod store;
pub mod style;
pub mod syntax;
pub mod view;

// Re-exports for convenience
pub use achievement::{Achievement, AchievementDef, Predicate, unlock_message};
pub use catalog::{CATALOG, definition};
pub use devach_data::AchievementId;
pub use engine::{UnlockEngine, UnlockReport, UnlockedAchievement, check_achievements};
pub use graph::{AchievementGraph, GraphError};
pub use session::{check_file, check_source, load_graph};
pub use store::UnlockStore;
pub use syntax::{NodeKind, SyntaxIndex, SyntaxNode, index_source, parse_python};
