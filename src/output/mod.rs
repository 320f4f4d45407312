// Output formatting: terminal display for the CLI.

pub mod terminal;

/// Format a 0-100 similarity as a percentage with two decimals.
pub fn format_percent(similarity: f64) -> String {
    format!("{similarity:.2}%")
}
