use crate::expense::{Amount, Expense, YearMonth, DATE_FORMAT};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Shown in front of every amount on screen. The ledger file stores bare
/// numbers.
pub const CURRENCY_SYMBOL: &str = "$";

/// Renders expenses as a fixed-width text table, one expense per line.
pub fn expense_table(expenses: &[Expense]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>10} {:<15} Description",
        "Date", "Amount", "Category"
    );
    let _ = writeln!(out, "{}", "-".repeat(55));
    for expense in expenses {
        let _ = writeln!(
            out,
            "{:<12} {:>10} {:<15} {}",
            expense.date().format(DATE_FORMAT).to_string(),
            format!("{}{}", CURRENCY_SYMBOL, expense.amount()),
            expense.category(),
            expense.description()
        );
    }

    out
}

/// Renders category totals for a single month.
pub fn month_totals(month: &YearMonth, totals: &BTreeMap<String, Amount>) -> String {
    let mut out = format!("{}:\n", month);
    for (category, amount) in totals {
        let _ = writeln!(out, "  {:<15} : {}{}", category, CURRENCY_SYMBOL, amount);
    }

    out
}

/// Renders the totals of several months, separated by blank lines.
pub fn monthly_report(totals: &BTreeMap<YearMonth, BTreeMap<String, Amount>>) -> String {
    totals
        .iter()
        .map(|(month, categories)| month_totals(month, categories))
        .collect::<Vec<_>>()
        .join("\n")
}
