use crate::expense::{Amount, Expense, YearMonth};
use std::collections::{BTreeMap, BTreeSet};

/// Sums the expenses dated in the given month, grouped by category.
///
/// Only categories with at least one matching expense appear in the result,
/// so a month with no expenses (or a month number outside 1-12) yields an
/// empty map.
pub fn monthly_totals(expenses: &[Expense], year: i32, month: u32) -> BTreeMap<String, Amount> {
    expenses
        .iter()
        .filter(|expense| {
            let expense_month = expense.month();
            expense_month.year() == year && expense_month.month() == month
        })
        .fold(BTreeMap::new(), |mut totals, expense| {
            *totals.entry(expense.category().to_string()).or_default() += expense.amount();
            totals
        })
}

/// Category totals for every month that has at least one expense, ordered by
/// month.
pub fn totals_by_month(expenses: &[Expense]) -> BTreeMap<YearMonth, BTreeMap<String, Amount>> {
    let mut totals: BTreeMap<YearMonth, BTreeMap<String, Amount>> = BTreeMap::new();
    for expense in expenses {
        *totals
            .entry(expense.month())
            .or_default()
            .entry(expense.category().to_string())
            .or_default() += expense.amount();
    }

    totals
}

pub fn all_categories(expenses: &[Expense]) -> BTreeSet<String> {
    expenses
        .iter()
        .map(|expense| expense.category().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::{ExpenseInput, MAX_CENTS};

    fn expense(date: &str, amount: &str, category: &str, description: &str) -> Expense {
        Expense::try_from(ExpenseInput::new(date, amount, category, description)).unwrap()
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            expense("2024-01-05", "20.00", "Food", "lunch"),
            expense("2024-01-10", "15.50", "Food", "snack"),
            expense("2024-02-01", "100.00", "Rent", ""),
        ]
    }

    fn cents(cents: i128) -> Amount {
        Amount::from_cents(cents)
    }

    #[test]
    fn should_total_each_month_by_category() {
        let expenses = sample_expenses();

        assert_eq!(
            monthly_totals(&expenses, 2024, 1),
            BTreeMap::from([("Food".to_string(), cents(3550))])
        );
        assert_eq!(
            monthly_totals(&expenses, 2024, 2),
            BTreeMap::from([("Rent".to_string(), cents(10000))])
        );
    }

    #[test]
    fn should_return_empty_totals_for_month_without_expenses() {
        let expenses = sample_expenses();

        assert!(monthly_totals(&expenses, 2024, 3).is_empty());
        // Same month number in a different year does not match.
        assert!(monthly_totals(&expenses, 2023, 1).is_empty());
        assert!(monthly_totals(&expenses, 2024, 13).is_empty());
        assert!(monthly_totals(&[], 2024, 1).is_empty());
    }

    #[test]
    fn should_produce_identical_totals_on_repeated_calls() {
        let expenses = sample_expenses();
        assert_eq!(
            monthly_totals(&expenses, 2024, 1),
            monthly_totals(&expenses, 2024, 1)
        );
    }

    #[test]
    fn should_total_to_the_sum_of_the_month() {
        let expenses = vec![
            expense("2024-05-01", "0.10", "Food", ""),
            expense("2024-05-02", "0.20", "Travel", ""),
            expense("2024-05-31", "3.33", "Food", ""),
            expense("2024-04-30", "50.00", "Food", ""),
            expense("2024-06-01", "7.77", "Travel", ""),
            expense("2024-05-15", "1234.56", "Rent", ""),
        ];

        // The per-category totals must add up to every expense in the month,
        // and to nothing outside it.
        let month = YearMonth::new(2024, 5).unwrap();
        let expected: Amount = expenses
            .iter()
            .filter(|expense| month.contains(&expense.date()))
            .map(|expense| expense.amount())
            .sum();
        let totals = monthly_totals(&expenses, 2024, 5);

        assert_eq!(totals.values().sum::<Amount>(), expected);
        assert_eq!(expected, cents(123819));
        assert_eq!(totals.len(), 3);
    }

    #[test]
    fn should_total_largest_amounts_without_overflow() {
        // Enough maximal expenses that their total no longer fits in an i64.
        let largest = expense("2024-01-05", "1000000000000", "Food", "");
        let mut expenses = vec![largest; 100_000];
        expenses.push(expense("2024-01-06", "0.01", "Food", ""));
        expenses.push(expense("2024-01-07", "1000000000000", "Rent", ""));

        let expected = cents(MAX_CENTS * 100_000 + 1);
        assert!(expected.cents() > i64::MAX as i128);

        let totals = monthly_totals(&expenses, 2024, 1);
        assert_eq!(totals["Food"], expected);
        assert_eq!(totals["Rent"], cents(MAX_CENTS));
        assert_eq!(
            totals.values().sum::<Amount>(),
            expenses.iter().map(|expense| expense.amount()).sum::<Amount>()
        );
        assert_eq!(
            totals_by_month(&expenses)[&YearMonth::new(2024, 1).unwrap()],
            totals
        );
    }

    #[test]
    fn should_group_every_month_in_order() {
        let mut expenses = sample_expenses();
        expenses.push(expense("2023-12-24", "60.00", "Gifts", "presents"));
        expenses.push(expense("2024-01-20", "5.00", "Travel", "bus"));

        let totals = totals_by_month(&expenses);
        let months: Vec<String> = totals.keys().map(|month| month.to_string()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);

        assert_eq!(
            totals[&YearMonth::new(2024, 1).unwrap()],
            BTreeMap::from([
                ("Food".to_string(), cents(3550)),
                ("Travel".to_string(), cents(500)),
            ])
        );

        // Each month matches what monthly_totals reports for it.
        for (month, categories) in totals.iter() {
            assert_eq!(
                &monthly_totals(&expenses, month.year(), month.month()),
                categories
            );
        }
    }

    #[test]
    fn should_list_distinct_categories() {
        let mut expenses = sample_expenses();
        expenses.push(expense("2024-03-01", "1.00", "Books", ""));

        let categories: Vec<String> = all_categories(&expenses).into_iter().collect();
        assert_eq!(categories, vec!["Books", "Food", "Rent"]);
        assert!(all_categories(&[]).is_empty());
    }
}
