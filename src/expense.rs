use crate::errors::ValidationError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// The textual date format used both for input and for the ledger file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Amounts are tracked to the cent.
const PRECISION: f64 = 100.0;

/// The largest magnitude a single parsed amount may have, in cents
/// (1,000,000,000,000.00). Every cent up to this bound is exactly
/// representable as an f64.
pub const MAX_CENTS: i128 = 100_000_000_000_000;

/// A monetary amount stored as a whole number of cents so that totals are
/// exact regardless of the order they are summed in.
///
/// Cents are held as an i128: single amounts are bounded by [`MAX_CENTS`],
/// so totals over any realistic ledger cannot overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i128);

impl Amount {
    pub fn from_cents(cents: i128) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i128 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    /// Parses any decimal number and rounds it to the nearest cent. Numbers
    /// beyond [`MAX_CENTS`] in either direction are refused rather than
    /// truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidAmount(s.to_string()))?;

        let cents = (value * PRECISION).round();
        if !cents.is_finite() || cents.abs() > MAX_CENTS as f64 {
            return Err(ValidationError::InvalidAmount(s.to_string()));
        }

        Ok(Self(cents as i128))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::default(), Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A calendar month, used to select which expenses a report covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(format!(
                "{:04}-{:02}",
                year, month
            )));
        }

        Ok(Self { year, month })
    }

    pub fn of(date: &NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    /// Parses a `YYYY-MM` month selector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let first_of_month = format!("{}-01", s.trim());
        NaiveDate::parse_from_str(&first_of_month, DATE_FORMAT)
            .map(|date| YearMonth::of(&date))
            .map_err(|_| ValidationError::InvalidMonth(s.to_string()))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The four raw values collected by a front-end, or read back from a ledger
/// row, before any validation has happened.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ExpenseInput {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl ExpenseInput {
    pub fn new(
        date: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
        }
    }
}

/// A single validated expense entry. Expenses are never mutated once built;
/// the only way to obtain one is through validation, so every Expense has a
/// positive amount and a non-empty category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Expense {
    #[serde(serialize_with = "serialize_date")]
    date: NaiveDate,
    amount: Amount,
    category: String,
    description: String,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        amount: Amount,
        category: &str,
        description: &str,
    ) -> Result<Self, ValidationError> {
        if !amount.is_positive() {
            return Err(ValidationError::NonPositiveAmount(amount.to_string()));
        }

        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }

        Ok(Self {
            date,
            amount,
            category: category.to_string(),
            description: description.trim().to_string(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(&self.date)
    }
}

impl TryFrom<&ExpenseInput> for Expense {
    type Error = ValidationError;

    /// Validates raw input in the order a front-end prompts for it: date,
    /// amount, then category.
    fn try_from(input: &ExpenseInput) -> Result<Self, Self::Error> {
        let date = parse_date(&input.date)?;
        let amount: Amount = input.amount.parse()?;
        Expense::new(date, amount, &input.category, &input.description)
    }
}

impl TryFrom<ExpenseInput> for Expense {
    type Error = ValidationError;

    fn try_from(input: ExpenseInput) -> Result<Self, Self::Error> {
        Expense::try_from(&input)
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}
