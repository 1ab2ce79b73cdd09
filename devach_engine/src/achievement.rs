//! module: achievement
//!
//! An `Achievement` is one learnable construct: a title, the achievements that
//! must be unlocked first, and a predicate over the syntax index. Its only state
//! is the `unlocked` flag, which moves from locked to unlocked exactly once.

use std::fmt;

use devach_data::AchievementId;

use crate::syntax::SyntaxIndex;

/// Eligibility check for an achievement. Must be pure.
pub type Predicate = fn(&SyntaxIndex) -> bool;

/// Static declaration of an achievement as listed in the catalog.
#[derive(Clone, Copy)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub requires: &'static [AchievementId],
    pub predicate: Predicate,
}

impl AchievementDef {
    /// Evaluate the predicate against `index`, ignoring unlock state and prerequisites.
    pub fn is_satisfied_by(&self, index: &SyntaxIndex) -> bool {
        (self.predicate)(index)
    }
}

impl fmt::Debug for AchievementDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AchievementDef")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("requires", &self.requires)
            .finish_non_exhaustive()
    }
}

/// Live achievement owned by an `AchievementGraph`.
#[derive(Debug, Clone)]
pub struct Achievement {
    def: AchievementDef,
    // positions of the prerequisites within the owning graph
    prerequisites: Vec<usize>,
    unlocked: bool,
}

impl Achievement {
    pub(crate) fn new(def: AchievementDef, prerequisites: Vec<usize>, unlocked: bool) -> Self {
        Self {
            def,
            prerequisites,
            unlocked,
        }
    }

    pub fn id(&self) -> AchievementId {
        self.def.id
    }

    pub fn title(&self) -> &'static str {
        self.def.title
    }

    pub fn description(&self) -> &'static str {
        self.def.description
    }

    /// Declared prerequisite ids.
    pub fn requires(&self) -> &'static [AchievementId] {
        self.def.requires
    }

    pub(crate) fn prerequisites(&self) -> &[usize] {
        &self.prerequisites
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn unlock_message(&self) -> String {
        unlock_message(self.def.title)
    }

    /// Unlock if still locked and the predicate holds for `index`.
    ///
    /// Returns true only when this call performed the transition. An unlocked
    /// achievement never evaluates its predicate again.
    pub fn try_unlock(&mut self, index: &SyntaxIndex) -> bool {
        if self.unlocked || !self.def.is_satisfied_by(index) {
            return false;
        }
        self.unlocked = true;
        true
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.unlocked { "unlocked" } else { "locked" };
        write!(f, "Achievement {}: {} ({state})", self.def.id, self.def.title)
    }
}

/// Message shown when an achievement with `title` unlocks.
pub fn unlock_message(title: &str) -> String {
    if title.is_empty() {
        "Achievement Unlocked!".to_string()
    } else {
        format!("Achievement Unlocked: {title}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{NodeKind, Position, SyntaxNode};
    use std::cell::Cell;

    thread_local! {
        static CALLS: Cell<usize> = const { Cell::new(0) };
    }

    fn counting_predicate(index: &SyntaxIndex) -> bool {
        CALLS.with(|calls| calls.set(calls.get() + 1));
        index.contains(NodeKind::Pass)
    }

    fn def() -> AchievementDef {
        AchievementDef {
            id: AchievementId::Pass,
            title: "Pass!",
            description: "Use the pass statement",
            requires: &[],
            predicate: counting_predicate,
        }
    }

    fn pass_index() -> SyntaxIndex {
        SyntaxIndex::build([SyntaxNode::new(NodeKind::Pass, Position { line: 1, column: 1 })])
    }

    #[test]
    fn try_unlock_transitions_once() {
        let mut achievement = Achievement::new(def(), Vec::new(), false);
        assert!(!achievement.try_unlock(&SyntaxIndex::default()));
        assert!(!achievement.is_unlocked());

        assert!(achievement.try_unlock(&pass_index()));
        assert!(achievement.is_unlocked());
        assert!(!achievement.try_unlock(&pass_index()));
        assert!(achievement.is_unlocked());
    }

    #[test]
    fn unlocked_achievement_skips_predicate() {
        CALLS.with(|calls| calls.set(0));
        let mut achievement = Achievement::new(def(), Vec::new(), true);
        assert!(!achievement.try_unlock(&pass_index()));
        assert_eq!(CALLS.with(Cell::get), 0);
    }

    #[test]
    fn display_and_messages() {
        let achievement = Achievement::new(def(), Vec::new(), false);
        assert_eq!(achievement.to_string(), "Achievement PassAchievement: Pass! (locked)");
        assert_eq!(achievement.unlock_message(), "Achievement Unlocked: Pass!");
        assert_eq!(unlock_message(""), "Achievement Unlocked!");
    }
}
