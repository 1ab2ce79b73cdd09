//! Graph module --
//!
//! The `AchievementGraph` owns every live `Achievement` of a run. Prerequisites
//! are resolved from ids to positions when the graph is built, and the registry
//! is rejected outright if an id is unresolvable, duplicated, or part of a cycle.

use std::collections::{BTreeSet, HashMap};

use devach_data::{AchievementId, ValidationError, missing_definitions, validate_registry};
use thiserror::Error;

use crate::achievement::{Achievement, AchievementDef};
use crate::catalog::CATALOG;
use crate::syntax::SyntaxIndex;

/// Errors raised while building a graph from a registry.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid achievement registry:\n{}", list_errors(.0))]
    InvalidRegistry(Vec<ValidationError>),
}

fn list_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// All achievements of a run, wired by their prerequisites.
#[derive(Debug, Clone)]
pub struct AchievementGraph {
    nodes: Vec<Achievement>,
    positions: HashMap<AchievementId, usize>,
}

impl AchievementGraph {
    /// Build the graph from the built-in catalog, seeding unlock state from `unlocked`.
    ///
    /// # Errors
    /// - if the catalog leaves an id undefined or has invalid prerequisites
    pub fn from_catalog(unlocked: &BTreeSet<AchievementId>) -> Result<Self, GraphError> {
        let missing = missing_definitions(CATALOG.iter().map(|def| def.id));
        if !missing.is_empty() {
            return Err(GraphError::InvalidRegistry(missing));
        }
        Self::new(&CATALOG, unlocked)
    }

    /// Build a graph from `defs`, seeding unlock state from `unlocked`.
    ///
    /// Ids in `unlocked` that `defs` does not define are ignored.
    ///
    /// # Errors
    /// - on duplicate ids, unresolvable prerequisites, or prerequisite cycles
    pub fn new(defs: &[AchievementDef], unlocked: &BTreeSet<AchievementId>) -> Result<Self, GraphError> {
        let errors = validate_registry(defs.iter().map(|def| (def.id, def.requires)));
        if !errors.is_empty() {
            return Err(GraphError::InvalidRegistry(errors));
        }

        let positions: HashMap<AchievementId, usize> =
            defs.iter().enumerate().map(|(pos, def)| (def.id, pos)).collect();
        let nodes = defs
            .iter()
            .map(|def| {
                // every prerequisite resolves: validate_registry rejected missing references
                let prerequisites = def.requires.iter().filter_map(|req| positions.get(req).copied()).collect();
                Achievement::new(*def, prerequisites, unlocked.contains(&def.id))
            })
            .collect();

        Ok(Self { nodes, positions })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All achievements in declaration order.
    pub fn achievements(&self) -> &[Achievement] {
        &self.nodes
    }

    pub fn get(&self, id: AchievementId) -> Option<&Achievement> {
        self.positions.get(&id).map(|pos| &self.nodes[*pos])
    }

    /// True if `achievement` is locked and all of its prerequisites are unlocked.
    pub fn is_unlockable(&self, achievement: &Achievement) -> bool {
        !achievement.is_unlocked()
            && achievement
                .prerequisites()
                .iter()
                .all(|pos| self.nodes[*pos].is_unlocked())
    }

    /// Achievements that can unlock right now, in declaration order.
    pub fn frontier(&self) -> impl Iterator<Item = &Achievement> + '_ {
        self.nodes.iter().filter(|node| self.is_unlockable(node))
    }

    /// Ids of the current frontier.
    pub fn queue(&self) -> Vec<AchievementId> {
        self.frontier().map(Achievement::id).collect()
    }

    pub fn unlocked_ids(&self) -> BTreeSet<AchievementId> {
        self.nodes
            .iter()
            .filter(|node| node.is_unlocked())
            .map(Achievement::id)
            .collect()
    }

    /// Attempt the locked -> unlocked transition of `id` against `index`.
    ///
    /// Returns the achievement only if this call unlocked it. Callers are
    /// expected to pass ids taken from the frontier.
    pub(crate) fn try_unlock(&mut self, id: AchievementId, index: &SyntaxIndex) -> Option<&Achievement> {
        let pos = *self.positions.get(&id)?;
        if !self.is_unlockable(&self.nodes[pos]) {
            return None;
        }
        let node = &mut self.nodes[pos];
        node.try_unlock(index).then_some(&*node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{NodeKind, Position, SyntaxNode};

    fn always(_: &SyntaxIndex) -> bool {
        true
    }

    fn def(id: AchievementId, requires: &'static [AchievementId]) -> AchievementDef {
        AchievementDef {
            id,
            title: "test",
            description: "",
            requires,
            predicate: always,
        }
    }

    #[test]
    fn catalog_graph_starts_with_root_frontier() {
        let graph = AchievementGraph::from_catalog(&BTreeSet::new()).expect("catalog is valid");
        assert_eq!(graph.len(), AchievementId::ALL.len());
        assert_eq!(
            graph.queue(),
            vec![
                AchievementId::HelloWorld,
                AchievementId::Assignment,
                AchievementId::MathOperators,
                AchievementId::Conditional,
                AchievementId::List,
                AchievementId::Dict,
            ]
        );
    }

    #[test]
    fn seeded_state_opens_dependents() {
        let unlocked = BTreeSet::from([AchievementId::Assignment, AchievementId::Conditional]);
        let graph = AchievementGraph::from_catalog(&unlocked).expect("catalog is valid");
        let queue = graph.queue();
        assert!(queue.contains(&AchievementId::Loops));
        assert!(!queue.contains(&AchievementId::Assignment));
        assert!(!queue.contains(&AchievementId::Pass));
        assert_eq!(graph.unlocked_ids(), unlocked);
    }

    #[test]
    fn unresolvable_prerequisite_is_fatal() {
        let defs = [def(AchievementId::Loops, &[AchievementId::Assignment])];
        let err = AchievementGraph::new(&defs, &BTreeSet::new()).unwrap_err();
        let GraphError::InvalidRegistry(errors) = &err;
        assert!(matches!(errors[0], ValidationError::MissingReference { .. }));
        assert!(err.to_string().contains("missing achievement 'AssignAchievement'"));
    }

    #[test]
    fn cyclic_registry_is_fatal() {
        let defs = [
            def(AchievementId::List, &[AchievementId::Dict]),
            def(AchievementId::Dict, &[AchievementId::List]),
        ];
        let err = AchievementGraph::new(&defs, &BTreeSet::new()).unwrap_err();
        assert!(err.to_string().contains("prerequisite cycle"));
    }

    #[test]
    fn try_unlock_refuses_ids_outside_frontier() {
        let defs = [
            def(AchievementId::Assignment, &[]),
            def(AchievementId::Loops, &[AchievementId::Assignment]),
        ];
        let mut graph = AchievementGraph::new(&defs, &BTreeSet::new()).expect("valid");
        let index = SyntaxIndex::build([SyntaxNode::new(NodeKind::Module, Position::default())]);

        assert!(graph.try_unlock(AchievementId::Loops, &index).is_none());
        assert!(graph.try_unlock(AchievementId::Assignment, &index).is_some());
        assert!(graph.try_unlock(AchievementId::Assignment, &index).is_none());
        assert!(graph.try_unlock(AchievementId::Loops, &index).is_some());
        assert!(graph.try_unlock(AchievementId::Class, &index).is_none());
        assert_eq!(graph.queue(), Vec::<AchievementId>::new());
    }
}
