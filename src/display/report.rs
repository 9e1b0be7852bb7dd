//! Budget analysis report and shared text helpers

use crate::config::Settings;
use crate::services::BudgetAnalysis;

/// Format spend vs budget for each period
pub fn format_budget_analysis(analysis: &BudgetAnalysis, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:>10} {:>10} {:>10}  {}\n",
        "Period", "Spent", "Budget", "Left", ""
    ));
    output.push_str(&separator(54));
    output.push('\n');

    for row in analysis.rows() {
        let budget = if row.budget > 0 {
            settings.format_amount(row.budget)
        } else {
            "-".to_string()
        };
        let left = if row.budget > 0 {
            settings.format_amount(row.remaining())
        } else {
            "-".to_string()
        };
        let bar = format_bar(row.spent as f64, row.budget as f64, 10);
        let flag = if row.is_over() { " OVER" } else { "" };

        output.push_str(&format!(
            "{:<8} {:>10} {:>10} {:>10}  {}{}\n",
            row.period.label(),
            settings.format_amount(row.spent),
            budget,
            left,
            bar,
            flag
        ));
    }

    output
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Shorten text to `max_chars`, marking the cut with "..."
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        "...".chars().take(max_chars).collect()
    } else {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    }
}
