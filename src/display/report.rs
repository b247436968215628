//! Report formatting utilities for terminal output

use crate::reports::Summary;

/// Format the expense summary
///
/// ```text
/// Expense Summary:
/// Overall total: $19.75
///   Food: $19.75
/// ```
pub fn format_summary(summary: &Summary, symbol: &str) -> String {
    let mut output = String::from("Expense Summary:\n");
    output.push_str(&format!(
        "Overall total: {}\n",
        summary.overall_total.format_with_symbol(symbol)
    ));

    for line in &summary.categories {
        output.push_str(&format!(
            "  {}: {}\n",
            line.category,
            line.total.format_with_symbol(symbol)
        ));
    }

    output
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "-".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategoryCase;
    use crate::models::NewExpense;

    #[test]
    fn test_empty_summary() {
        let summary = Summary::compute(&[], CategoryCase::AsStored);
        assert_eq!(
            format_summary(&summary, "$"),
            "Expense Summary:\nOverall total: $0.00\n"
        );
    }

    #[test]
    fn test_summary_lines() {
        let records = vec![
            NewExpense::new("2024-03-01", "12.50", "Food", "lunch")
                .validate()
                .unwrap(),
            NewExpense::new("2024-03-02", "30", "Travel", "")
                .validate()
                .unwrap(),
            NewExpense::new("2024-03-05", "7.25", "Food", "coffee")
                .validate()
                .unwrap(),
        ];
        let summary = Summary::compute(&records, CategoryCase::AsStored);

        assert_eq!(
            format_summary(&summary, "$"),
            "Expense Summary:\nOverall total: $49.75\n  Food: $19.75\n  Travel: $30.00\n"
        );
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(3), "---");
    }
}
