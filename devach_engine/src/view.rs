//! View module.
//!
//! Builds the text shown to the user: unlock banners, the progress listing and
//! syntax index summaries. Rendering returns strings and leaves printing to the caller.

use std::fmt::Write;

use textwrap::{Options, fill, termwidth};

use crate::engine::UnlockedAchievement;
use crate::graph::AchievementGraph;
use crate::style::AchievementStyle;
use crate::syntax::SyntaxIndex;

const ICON_UNLOCKED: &str = "\u{2611}"; // ☑
const ICON_LOCKED: &str = "\u{2610}"; // ☐
const MAX_WIDTH: usize = 80;

/// Surround `text` with a box-drawing border.
pub fn bordered(text: &str) -> String {
    let width = text.chars().count();
    let rule = "─".repeat(width + 2);
    format!("┌{rule}┐\n│ {text} │\n└{rule}┘")
}

/// One bordered banner per unlock, stacked in unlock order.
pub fn render_unlocks(unlocked: &[UnlockedAchievement]) -> String {
    unlocked
        .iter()
        .map(|achievement| bordered(&achievement.unlock_message()).banner_style().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Listing of every achievement with its state and prerequisites.
pub fn render_progress(graph: &AchievementGraph) -> String {
    let width = termwidth().min(MAX_WIDTH);
    let wrap = Options::new(width).initial_indent("    ").subsequent_indent("    ");
    let unlocked = graph.unlocked_ids().len();

    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("Achievements ({unlocked}/{})", graph.len()).heading_style());
    for achievement in graph.achievements() {
        let line = format!("{} {}", icon(achievement.is_unlocked()), achievement.title());
        let line = if achievement.is_unlocked() {
            line.unlocked_style()
        } else {
            line.locked_style()
        };
        let _ = write!(out, "{line}");
        if graph.is_unlockable(achievement) {
            let _ = write!(out, " {}", "(available)".available_style());
        }
        out.push('\n');

        let _ = writeln!(out, "{}", fill(achievement.description(), &wrap).description_style());
        if !achievement.requires().is_empty() {
            let names: Vec<&str> = achievement
                .requires()
                .iter()
                .filter_map(|id| graph.get(*id).map(|req| req.title()))
                .collect();
            let _ = writeln!(out, "    requires: {}", names.join(", "));
        }
    }
    out
}

/// Node counts per kind, in kind order.
pub fn render_index(index: &SyntaxIndex) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("{} syntax nodes", index.len()).heading_style());
    for (kind, count) in index.kinds() {
        let _ = writeln!(out, "  {:<16} {count}", kind.as_str().kind_style());
    }
    out
}

fn icon(unlocked: bool) -> &'static str {
    if unlocked { ICON_UNLOCKED } else { ICON_LOCKED }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::index_source;
    use devach_data::AchievementId;
    use std::collections::BTreeSet;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn bordered_pads_to_text_width() {
        assert_eq!(bordered("hi"), "┌────┐\n│ hi │\n└────┘");
    }

    #[test]
    fn unlocks_are_stacked_in_order() {
        plain();
        let unlocked = [
            UnlockedAchievement {
                id: AchievementId::Assignment,
                title: "Variables!",
            },
            UnlockedAchievement {
                id: AchievementId::Loops,
                title: "Loops!",
            },
        ];
        let rendered = render_unlocks(&unlocked);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "│ Achievement Unlocked: Variables! │");
        assert_eq!(lines[4], "│ Achievement Unlocked: Loops! │");
        assert!(render_unlocks(&[]).is_empty());
    }

    #[test]
    fn progress_marks_state_and_availability() {
        plain();
        let graph = AchievementGraph::from_catalog(&BTreeSet::from([AchievementId::Assignment])).expect("catalog");
        let rendered = render_progress(&graph);
        assert!(rendered.starts_with("Achievements (1/13)"));
        assert!(rendered.contains("☑ Variables!"));
        assert!(rendered.contains("☐ If statements! (available)"));
        assert!(rendered.contains("requires: Variables!, If statements!"));
        assert!(!rendered.contains("☐ Loops! (available)"));
    }

    #[test]
    fn index_summary_lists_counts() {
        plain();
        let index = index_source("x = 1\ny = 2\n").expect("parses");
        let rendered = render_index(&index);
        assert!(rendered.lines().any(|line| line.trim_start().starts_with("assign ") && line.ends_with(" 2")));
    }
}
