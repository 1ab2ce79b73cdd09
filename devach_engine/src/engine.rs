//! Unlock engine --
//!
//! Evaluates the graph's frontier against a syntax index until a full pass
//! unlocks nothing. Each pass works on a snapshot of the frontier taken at its
//! start, so an achievement never unlocks in the same pass as its last prerequisite.

use anyhow::{Context, Result};
use devach_data::AchievementId;
use log::{debug, info};

use crate::achievement::{Achievement, unlock_message};
use crate::graph::AchievementGraph;
use crate::syntax::SyntaxIndex;

/// An achievement unlocked during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockedAchievement {
    pub id: AchievementId,
    pub title: &'static str,
}

impl UnlockedAchievement {
    pub fn unlock_message(&self) -> String {
        unlock_message(self.title)
    }
}

impl From<&Achievement> for UnlockedAchievement {
    fn from(achievement: &Achievement) -> Self {
        Self {
            id: achievement.id(),
            title: achievement.title(),
        }
    }
}

/// Outcome of one engine run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockReport {
    /// Newly unlocked achievements, in unlock order.
    pub unlocked: Vec<UnlockedAchievement>,
    /// Number of passes that evaluated a non-empty frontier.
    pub passes: usize,
}

impl UnlockReport {
    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }

    pub fn ids(&self) -> Vec<AchievementId> {
        self.unlocked.iter().map(|a| a.id).collect()
    }
}

/// Fixed-point evaluator over one syntax index.
#[derive(Debug, Clone, Copy)]
pub struct UnlockEngine<'i> {
    index: &'i SyntaxIndex,
}

impl<'i> UnlockEngine<'i> {
    pub fn new(index: &'i SyntaxIndex) -> Self {
        Self { index }
    }

    /// Unlock everything reachable in `graph`, calling `on_unlock` right after each transition.
    ///
    /// An unlock is final once its callback has run; a failing callback stops the
    /// run and leaves earlier unlocks in place.
    ///
    /// # Errors
    /// - propagates the first error returned by `on_unlock`
    pub fn run<F>(&self, graph: &mut AchievementGraph, mut on_unlock: F) -> Result<UnlockReport>
    where
        F: FnMut(&Achievement) -> Result<()>,
    {
        let mut report = UnlockReport::default();
        loop {
            let queue = graph.queue();
            if queue.is_empty() {
                break;
            }
            report.passes += 1;

            let before = report.unlocked.len();
            for id in queue {
                if let Some(achievement) = graph.try_unlock(id, self.index) {
                    info!("achievement unlocked: {id}");
                    on_unlock(achievement).with_context(|| format!("while recording unlock of {id}"))?;
                    report.unlocked.push(UnlockedAchievement::from(achievement));
                }
            }

            let unlocked_now = report.unlocked.len() - before;
            debug!("pass {}: {unlocked_now} unlocked", report.passes);
            if unlocked_now == 0 {
                break;
            }
        }
        debug_assert!(report.passes <= graph.len().max(1));
        Ok(report)
    }
}

/// Run an [`UnlockEngine`] over `graph` without any unlock side effects.
///
/// # Errors
/// - never in practice; the no-op callback cannot fail
pub fn check_achievements(graph: &mut AchievementGraph, index: &SyntaxIndex) -> Result<UnlockReport> {
    UnlockEngine::new(index).run(graph, |_| Ok(()))
}
