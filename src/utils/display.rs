//! Display and output formatting utilities

use crate::derangement::SearchOutcome;
use crate::output::factorial;
use crate::roster::Roster;

/// Format assignments and search statistics for the console
pub struct AssignmentFormatter;

impl AssignmentFormatter {
    /// Roster overview with each participant's exclusion set
    pub fn format_roster(roster: &Roster) -> String {
        let mut output = String::new();
        output.push_str(&format!("Participants ({}):\n", roster.len()));

        for name in roster.participants() {
            let mut excluded: Vec<&str> = roster
                .excluded_by(name)
                .map(|set| set.iter().map(String::as_str).collect())
                .unwrap_or_default();
            excluded.sort_unstable();

            if excluded.is_empty() {
                output.push_str(&format!("  {}\n", name));
            } else {
                output.push_str(&format!("  {} (not: {})\n", name, excluded.join(", ")));
            }
        }

        output
    }

    /// Search statistics block
    pub fn format_search_summary(outcome: &SearchOutcome, roster: &Roster) -> String {
        let mut output = String::new();

        output.push_str("Search Statistics:\n");
        output.push_str(&format!("  Participants: {}\n", roster.len()));
        output.push_str(&format!("  Total permutations: {}\n", factorial(roster.len())));
        output.push_str(&format!("  Attempts: {}\n", outcome.attempts));
        output.push_str(&format!("  Failed searches: {}\n", outcome.failures));
        let millis = outcome.elapsed.as_secs_f64() * 1_000.0;
        output.push_str(&format!("  Search time: {:.3} ms\n", millis));

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Blue => 34,
        }
    }
}
