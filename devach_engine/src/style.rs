//! Styling helpers for terminal output.
//!
//! [`AchievementStyle`] wraps the `colored` crate so string literals and owned
//! strings can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait AchievementStyle {
    fn banner_style(&self) -> ColoredString;
    fn unlocked_style(&self) -> ColoredString;
    fn locked_style(&self) -> ColoredString;
    fn available_style(&self) -> ColoredString;
    fn heading_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn kind_style(&self) -> ColoredString;
}

impl AchievementStyle for &str {
    fn banner_style(&self) -> ColoredString {
        self.bold().truecolor(230, 200, 40)
    }
    fn unlocked_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
    fn locked_style(&self) -> ColoredString {
        self.dimmed()
    }
    fn available_style(&self) -> ColoredString {
        self.italic().truecolor(220, 180, 40)
    }
    fn heading_style(&self) -> ColoredString {
        self.bold().underline()
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn kind_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10)
    }
}

impl AchievementStyle for String {
    fn banner_style(&self) -> ColoredString {
        self.as_str().banner_style()
    }
    fn unlocked_style(&self) -> ColoredString {
        self.as_str().unlocked_style()
    }
    fn locked_style(&self) -> ColoredString {
        self.as_str().locked_style()
    }
    fn available_style(&self) -> ColoredString {
        self.as_str().available_style()
    }
    fn heading_style(&self) -> ColoredString {
        self.as_str().heading_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn kind_style(&self) -> ColoredString {
        self.as_str().kind_style()
    }
}
