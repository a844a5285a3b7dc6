use std::error::Error;
use std::fmt;
use std::fmt::Formatter;
use std::io;

/// Raised when user input (or a stored row) cannot become an Expense.
#[derive(Debug, PartialEq)]
pub enum ValidationError {
    InvalidDate(String),
    InvalidAmount(String),
    NonPositiveAmount(String),
    EmptyCategory,
    InvalidMonth(String),
}

#[derive(Debug)]
pub enum ParseErrorKind {
    /// The row did not contain exactly one value per ledger column.
    FieldCount(usize),
    Malformed(csv::Error),
    Invalid(ValidationError),
}

/// A malformed row encountered while loading the ledger file. Rows like this
/// are skipped and reported, they never abort a load.
#[derive(Debug)]
pub struct ParseError {
    line: u64,
    kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: u64, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }

    /// The 1-based line of the ledger file the row started on.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Csv(csv::Error),
    Validation(ValidationError),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidDate(date) => {
                write!(f, "invalid date {:?}, expected YYYY-MM-DD", date)
            }
            ValidationError::InvalidAmount(amount) => {
                write!(f, "invalid amount {:?}, expected a number", amount)
            }
            ValidationError::NonPositiveAmount(amount) => {
                write!(f, "amount MUST be greater than zero, got {}", amount)
            }
            ValidationError::EmptyCategory => write!(f, "category cannot be empty"),
            ValidationError::InvalidMonth(month) => {
                write!(f, "invalid month {:?}, expected YYYY-MM", month)
            }
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::FieldCount(found) => {
                write!(f, "expected 4 fields but found {}", found)
            }
            ParseErrorKind::Malformed(err) => write!(f, "malformed row: {}", err),
            ParseErrorKind::Invalid(err) => write!(f, "{}", err),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "failed to access ledger file: {}", err),
            StoreError::Csv(err) => write!(f, "failed to encode ledger row: {}", err),
            StoreError::Validation(err) => write!(f, "invalid expense: {}", err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        // Any failure to reach the underlying file is an I/O problem, not a
        // formatting one.
        if err.is_io_error() {
            StoreError::Io(io::Error::from(err))
        } else {
            StoreError::Csv(err)
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Validation(err)
    }
}

impl From<ValidationError> for ParseErrorKind {
    fn from(err: ValidationError) -> Self {
        ParseErrorKind::Invalid(err)
    }
}

impl From<csv::Error> for ParseErrorKind {
    fn from(err: csv::Error) -> Self {
        ParseErrorKind::Malformed(err)
    }
}

impl Error for ValidationError {}
impl Error for ParseErrorKind {}
impl Error for ParseError {}
impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Csv(err) => Some(err),
            StoreError::Validation(err) => Some(err),
        }
    }
}
