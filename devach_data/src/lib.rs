//! Shared data model for devach: achievement identifiers, the persisted
//! unlock store layout, and validation of achievement registries.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, missing_definitions, validate_registry};
