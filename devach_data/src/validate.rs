use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::AchievementId;

/// Validation error for a malformed achievement registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { id: AchievementId },
    MissingDefinition { id: AchievementId },
    MissingReference { id: AchievementId, context: String },
    Cycle { path: Vec<AchievementId> },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { id } => {
                write!(f, "duplicate achievement id '{id}'")
            },
            ValidationError::MissingDefinition { id } => {
                write!(f, "achievement '{id}' has no definition")
            },
            ValidationError::MissingReference { id, context } => {
                write!(f, "missing achievement '{id}' ({context})")
            },
            ValidationError::Cycle { path } => {
                let chain = path.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> ");
                write!(f, "prerequisite cycle: {chain}")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate the prerequisite wiring of a registry given as `(id, prerequisites)` pairs.
///
/// Reports duplicate ids, prerequisites that name an id absent from the
/// registry, and prerequisite cycles.
///
/// ```
/// use devach_data::{AchievementId, validate_registry};
///
/// let entries: [(AchievementId, &[AchievementId]); 2] = [
///     (AchievementId::Assignment, &[]),
///     (AchievementId::Loops, &[AchievementId::Assignment]),
/// ];
/// assert!(validate_registry(entries).is_empty());
/// ```
pub fn validate_registry<'a, I>(entries: I) -> Vec<ValidationError>
where
    I: IntoIterator<Item = (AchievementId, &'a [AchievementId])>,
{
    let entries: Vec<_> = entries.into_iter().collect();
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for (id, _) in &entries {
        if !seen.insert(*id) {
            errors.push(ValidationError::DuplicateId { id: *id });
        }
    }

    for (id, requires) in &entries {
        for req in *requires {
            if !seen.contains(req) {
                errors.push(ValidationError::MissingReference {
                    id: *req,
                    context: format!("prerequisite of '{id}'"),
                });
            }
        }
    }

    errors.extend(find_cycles(&entries).into_iter().map(|path| ValidationError::Cycle { path }));
    errors
}

/// Report every known identifier that the registry does not define.
pub fn missing_definitions<I>(ids: I) -> Vec<ValidationError>
where
    I: IntoIterator<Item = AchievementId>,
{
    let defined: HashSet<_> = ids.into_iter().collect();
    AchievementId::ALL
        .into_iter()
        .filter(|id| !defined.contains(id))
        .map(|id| ValidationError::MissingDefinition { id })
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Active,
    Done,
}

fn find_cycles(entries: &[(AchievementId, &[AchievementId])]) -> Vec<Vec<AchievementId>> {
    let edges: HashMap<AchievementId, &[AchievementId]> = entries.iter().copied().collect();
    let mut marks = HashMap::new();
    let mut cycles = Vec::new();
    for (id, _) in entries {
        let mut stack = Vec::new();
        visit(*id, &edges, &mut marks, &mut stack, &mut cycles);
    }
    cycles
}

fn visit(
    id: AchievementId,
    edges: &HashMap<AchievementId, &[AchievementId]>,
    marks: &mut HashMap<AchievementId, Mark>,
    stack: &mut Vec<AchievementId>,
    cycles: &mut Vec<Vec<AchievementId>>,
) {
    match marks.get(&id) {
        Some(Mark::Done) => return,
        Some(Mark::Active) => {
            // back edge: the cycle is the tail of the stack starting at `id`
            let start = stack.iter().position(|s| *s == id).unwrap_or_default();
            let mut path = stack[start..].to_vec();
            path.push(id);
            cycles.push(path);
            return;
        },
        None => {},
    }

    marks.insert(id, Mark::Active);
    stack.push(id);
    for req in edges.get(&id).copied().unwrap_or_default() {
        visit(*req, edges, marks, stack, cycles);
    }
    stack.pop();
    marks.insert(id, Mark::Done);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AchievementId::*;

    #[test]
    fn duplicate_ids_are_reported() {
        let entries: [(AchievementId, &[AchievementId]); 2] = [(List, &[]), (List, &[])];
        let errors = validate_registry(entries);
        assert_eq!(errors, vec![ValidationError::DuplicateId { id: List }]);
    }

    #[test]
    fn missing_references_are_reported() {
        let entries: [(AchievementId, &[AchievementId]); 1] = [(Loops, &[Assignment])];
        let errors = validate_registry(entries);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::MissingReference { id: Assignment, context } if context.contains("LoopsAchievement")
        ));
    }

    #[test]
    fn cycles_are_reported_once() {
        let entries: [(AchievementId, &[AchievementId]); 3] =
            [(Function, &[Class]), (Class, &[Lambda]), (Lambda, &[Function])];
        let errors = validate_registry(entries);
        assert_eq!(
            errors,
            vec![ValidationError::Cycle {
                path: vec![Function, Class, Lambda, Function]
            }]
        );
        assert_eq!(
            errors[0].to_string(),
            "prerequisite cycle: FunctionAchievement -> ClassAchievement -> LambdaAchievement -> FunctionAchievement"
        );
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let entries: [(AchievementId, &[AchievementId]); 1] = [(Pass, &[Pass])];
        assert_eq!(
            validate_registry(entries),
            vec![ValidationError::Cycle { path: vec![Pass, Pass] }]
        );
    }

    #[test]
    fn diamond_dependencies_are_not_cycles() {
        let entries: [(AchievementId, &[AchievementId]); 4] = [
            (Assignment, &[]),
            (Conditional, &[]),
            (Loops, &[Assignment, Conditional]),
            (Function, &[Conditional, Loops]),
        ];
        assert!(validate_registry(entries).is_empty());
    }

    #[test]
    fn missing_definitions_lists_undefined_ids() {
        let errors = missing_definitions(AchievementId::ALL.into_iter().filter(|id| *id != Dict));
        assert_eq!(errors, vec![ValidationError::MissingDefinition { id: Dict }]);
    }
}
