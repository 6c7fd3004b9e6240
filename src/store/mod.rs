use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::{LedgerError, Result};
use crate::models::{parse_amount, parse_date, Expense, NewExpense, DATE_FORMAT};

/// Fixed column set of every store file, in order.
pub(crate) const HEADER: [&str; 7] = [
    "id",
    "date",
    "category",
    "amount",
    "currency",
    "payment_method",
    "notes",
];

/// Flat-file expense store: a header row followed by one CSV row per record.
///
/// Assumes a single process owns the file. `delete` rewrites the whole file
/// without locking, so an `append` from another process that lands between
/// the read and the rewrite is lost.
pub(crate) struct ExpenseStore {
    path: PathBuf,
    default_currency: String,
}

impl ExpenseStore {
    pub(crate) fn new(path: impl Into<PathBuf>, default_currency: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default_currency: default_currency.into(),
        }
    }

    /// Build a store from resolved configuration and make sure its file exists.
    pub(crate) fn open(config: &Config) -> Result<Self> {
        let store = Self::new(&config.store_path, &config.default_currency);
        store.initialize()?;
        Ok(store)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with only the header row if it does not exist yet.
    /// Existing content is left alone, valid or not.
    pub(crate) fn initialize(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        write_records(&self.path, &[])?;
        info!(path = %self.path.display(), "created empty expense store");
        Ok(())
    }

    /// Normalize `input`, mint a fresh id, and append a single row.
    pub(crate) fn append(&self, input: &NewExpense) -> Result<String> {
        let expense = input.normalize(Uuid::new_v4().to_string(), &self.default_currency)?;
        self.initialize()?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)?;
        // A zero-byte file still needs its header before the first row.
        let needs_header = file.metadata()?.len() == 0;
        if !needs_header && !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }

        let mut wtr = row_writer(file);
        if needs_header {
            wtr.write_record(HEADER)?;
        }
        wtr.write_record(to_row(&expense))?;
        wtr.flush()?;

        debug!(id = %expense.id, date = %expense.date, "appended expense");
        Ok(expense.id)
    }

    /// Read every record. Any malformed row fails the whole read.
    pub(crate) fn load(&self) -> Result<Vec<Expense>> {
        self.initialize()?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;
        let mut rows = rdr.records();

        // A zero-byte file has no header at all; treat it like an empty store.
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let header = header?;
        if header.iter().ne(HEADER.iter().copied()) {
            let found: Vec<&str> = header.iter().collect();
            return Err(LedgerError::MalformedRecord {
                line: 1,
                reason: format!("unexpected header '{}'", found.join(",")),
            });
        }

        let mut expenses = Vec::new();
        for row in rows {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            expenses.push(from_row(&row, line)?);
        }

        debug!(count = expenses.len(), "loaded expenses");
        Ok(expenses)
    }

    /// Remove every record with exactly this id. Returns whether anything was removed.
    pub(crate) fn delete(&self, id: &str) -> Result<bool> {
        let expenses = self.load()?;
        let before = expenses.len();
        let remaining: Vec<Expense> = expenses.into_iter().filter(|e| e.id != id).collect();

        if remaining.len() == before {
            debug!(id, "no expense to delete");
            return Ok(false);
        }

        self.rewrite(&remaining)?;
        info!(id, removed = before - remaining.len(), "deleted expense");
        Ok(true)
    }

    /// Dump the whole store to `out` in the same format. Returns the row count.
    pub(crate) fn export(&self, out: &Path) -> Result<usize> {
        let expenses = self.load()?;
        write_records(out, &expenses)?;
        info!(path = %out.display(), count = expenses.len(), "exported expenses");
        Ok(expenses.len())
    }

    fn rewrite(&self, expenses: &[Expense]) -> Result<()> {
        write_records(&self.path, expenses)
    }
}

fn row_writer<W: Write>(w: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(w)
}

/// Truncate `path` and write the header plus `expenses`.
fn write_records(path: &Path, expenses: &[Expense]) -> Result<()> {
    let mut wtr = row_writer(File::create(path)?);
    wtr.write_record(HEADER)?;
    for expense in expenses {
        wtr.write_record(to_row(expense))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Expects a non-empty file.
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn to_row(e: &Expense) -> [String; 7] {
    [
        e.id.clone(),
        e.date.format(DATE_FORMAT).to_string(),
        e.category.clone(),
        // Debug keeps a trailing ".0" on whole numbers and round-trips exactly.
        format!("{:?}", e.amount),
        e.currency.clone(),
        e.payment_method.clone(),
        e.notes.clone(),
    ]
}

fn from_row(row: &csv::StringRecord, line: u64) -> Result<Expense> {
    if row.len() != HEADER.len() {
        return Err(LedgerError::MalformedRecord {
            line,
            reason: format!("expected {} fields, found {}", HEADER.len(), row.len()),
        });
    }

    let malformed = |e: LedgerError| LedgerError::MalformedRecord {
        line,
        reason: e.to_string(),
    };
    let field = |i: usize| row.get(i).unwrap_or_default().to_string();

    Ok(Expense {
        id: field(0),
        date: parse_date(&field(1)).map_err(malformed)?,
        category: field(2),
        amount: parse_amount(&field(3)).map_err(malformed)?,
        currency: field(4),
        payment_method: field(5),
        notes: field(6),
    })
}
