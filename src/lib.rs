//! A personal expense ledger: dated expenses are appended to a flat CSV file
//! and read back to report totals per category for each month.

pub mod args;
pub mod errors;
pub mod expense;
pub mod render;
pub mod report;
pub mod store;

pub use errors::{ParseError, ParseErrorKind, StoreError, ValidationError};
pub use expense::{Amount, Expense, ExpenseInput, YearMonth};
pub use store::{Ledger, LedgerStore};
