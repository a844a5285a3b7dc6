use crate::errors::{ParseError, ParseErrorKind, StoreError};
use crate::expense::{Amount, Expense, ExpenseInput, YearMonth};
use crate::report;
use csv::{StringRecord, Trim};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{File, OpenOptions};
use std::io;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Column names, in the fixed order every ledger row is written in.
pub const HEADER: [&str; 4] = ["date", "amount", "category", "description"];

/// The append-only flat file that holds every recorded expense.
///
/// The store keeps no state besides the path: each call opens the file, does
/// its work, and drops the handle before returning.
#[derive(Clone, Debug)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validates raw front-end input and appends the resulting expense.
    ///
    /// Nothing is written if validation fails.
    pub fn submit(&self, input: &ExpenseInput) -> Result<Expense, StoreError> {
        let expense = Expense::try_from(input)?;
        self.append(&expense)?;
        Ok(expense)
    }

    /// Appends a single expense as one row at the end of the ledger file,
    /// creating the file (with its header row) if it does not exist yet.
    ///
    /// A file whose last line was left unterminated (for example after a
    /// hand edit) gets its line ended first, so the new row stays separate.
    pub fn append(&self, expense: &Expense) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        let is_new = file.metadata()?.len() == 0;
        if !is_new && !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }

        // Headers are written by hand so that they only ever appear once, at
        // the top of a brand new file.
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            wtr.write_record(HEADER)?;
        }
        wtr.serialize(expense)?;
        wtr.flush()?;

        debug!(
            "appended {} expense of {} to {:?}",
            expense.category(),
            expense.amount(),
            self.path
        );
        Ok(())
    }

    /// Reads every expense in the ledger file, in file order.
    ///
    /// A missing file is treated as an empty ledger. Rows that cannot be
    /// parsed are skipped and reported through [`Ledger::skipped`].
    pub fn load_all(&self) -> Result<Ledger, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("no ledger at {:?} yet, starting empty", self.path);
                return Ok(Ledger::default());
            }
            Err(err) => return Err(StoreError::Io(err)),
        };

        let ledger = Ledger::from_reader(file)?;
        info!(
            "loaded {} expenses from {:?} ({} skipped)",
            ledger.expenses.len(),
            self.path,
            ledger.skipped.len()
        );
        Ok(ledger)
    }
}

/// An ordered, read-only snapshot of the ledger file.
#[derive(Debug, Default)]
pub struct Ledger {
    expenses: Vec<Expense>,
    skipped: Vec<ParseError>,
}

impl Ledger {
    /// Decodes ledger rows from any reader. Only I/O failures are returned as
    /// errors; malformed rows are collected instead.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut ledger = Ledger::default();

        // Note: the csv library handles setting up an io::BufReader so we
        // don't need to do that here.
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut record = StringRecord::new();
        loop {
            match rdr.read_record(&mut record) {
                Ok(true) => {
                    let line = record.position().map_or(0, |pos| pos.line());
                    match parse_row(&record) {
                        Ok(expense) => ledger.expenses.push(expense),
                        Err(kind) => ledger.skip(ParseError::new(line, kind)),
                    }
                }
                Ok(false) => break,
                Err(err) if err.is_io_error() => return Err(StoreError::from(err)),
                Err(err) => {
                    let line = err.position().map_or(0, |pos| pos.line());
                    ledger.skip(ParseError::new(line, ParseErrorKind::from(err)));
                }
            }
        }

        Ok(ledger)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Rows that were present in the file but could not be loaded.
    pub fn skipped(&self) -> &[ParseError] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn monthly_totals(&self, year: i32, month: u32) -> BTreeMap<String, Amount> {
        report::monthly_totals(&self.expenses, year, month)
    }

    pub fn totals_by_month(&self) -> BTreeMap<YearMonth, BTreeMap<String, Amount>> {
        report::totals_by_month(&self.expenses)
    }

    pub fn categories(&self) -> BTreeSet<String> {
        report::all_categories(&self.expenses)
    }

    fn skip(&mut self, err: ParseError) {
        warn!("skipping ledger row at {}", err);
        self.skipped.push(err);
    }
}

impl TryFrom<PathBuf> for Ledger {
    type Error = StoreError;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        LedgerStore::new(path).load_all()
    }
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn parse_row(record: &StringRecord) -> Result<Expense, ParseErrorKind> {
    if record.len() != HEADER.len() {
        return Err(ParseErrorKind::FieldCount(record.len()));
    }

    let input: ExpenseInput = record.deserialize(None)?;
    Ok(Expense::try_from(&input)?)
}
