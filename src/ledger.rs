//! The CSV file that stores the transaction ledger.
//!
//! Rows are loaded leniently: a row that cannot be decoded is skipped, an
//! amount that cannot be parsed is treated as zero and a date that cannot be
//! parsed is kept as text without a parsed date. Loading never fails because
//! of a single bad row.

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    transaction::{NewTransaction, Transaction},
};

/// The columns of the ledger file, in order.
pub const LEDGER_HEADER: [&str; 9] = [
    "Date",
    "Mode",
    "Category",
    "Subcategory",
    "Note",
    "old",
    "Amount",
    "Income/Expense",
    "Currency",
];

/// A row as stored in the ledger file.
#[derive(Debug, Default, Deserialize, Serialize)]
struct LedgerRow {
    #[serde(rename = "Date", default)]
    date: String,
    #[serde(rename = "Mode", default)]
    mode: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Subcategory", default)]
    subcategory: String,
    #[serde(rename = "Note", default)]
    note: String,
    #[serde(rename = "old", default)]
    old: String,
    #[serde(rename = "Amount", default)]
    amount: String,
    #[serde(rename = "Income/Expense", default)]
    kind: String,
    #[serde(rename = "Currency", default)]
    currency: String,
}

impl LedgerRow {
    fn into_transaction(self) -> Transaction {
        let amount = parse_amount(&self.amount);

        Transaction::new(&self.date, &self.kind, &self.category, &self.mode, amount)
    }
}

impl From<&NewTransaction> for LedgerRow {
    fn from(transaction: &NewTransaction) -> Self {
        Self {
            date: transaction.date.clone(),
            mode: transaction.mode.clone(),
            category: transaction.category.clone(),
            amount: transaction.amount.clone(),
            kind: transaction.kind.clone(),
            ..Default::default()
        }
    }
}

/// Parse an amount as a magnitude, treating anything unparsable as zero.
fn parse_amount(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount.abs(),
        _ => {
            tracing::debug!("Could not parse amount {text:?}, using 0.0");
            0.0
        }
    }
}

/// A transaction ledger backed by a CSV file.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    // Held while reading or writing so readers always see whole rows.
    lock: Mutex<()>,
}

impl Ledger {
    /// Create a ledger for the CSV file at `path`.
    ///
    /// The file is not touched until it is first read or written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Create the ledger file with its header row if it does not exist yet.
    ///
    /// # Errors
    /// Returns [Error::LedgerIo] if the file or its parent directories cannot
    /// be created.
    pub fn ensure_file(&self) -> Result<(), Error> {
        let _guard = self.lock.lock().map_err(|_| Error::LedgerLockError)?;

        self.ensure_file_locked()
    }

    fn ensure_file_locked(&self) -> Result<(), Error> {
        if self.path.is_file() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(LEDGER_HEADER)?;
        writer.flush()?;

        tracing::info!("Created ledger file at {}", self.path.display());

        Ok(())
    }

    /// Load every transaction in the ledger, in file order.
    ///
    /// A missing ledger file is treated as an empty ledger.
    ///
    /// # Errors
    /// Returns [Error::LedgerIo] if the file exists but cannot be read, or
    /// [Error::InvalidCsv] if its header cannot be parsed.
    pub fn load_rows(&self) -> Result<Vec<Transaction>, Error> {
        let _guard = self.lock.lock().map_err(|_| Error::LedgerLockError)?;

        if !self.path.is_file() {
            tracing::debug!(
                "Ledger file {} does not exist, treating it as empty",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        read_transactions(reader)
    }

    /// Append a transaction to the end of the ledger, creating the file first
    /// if needed.
    ///
    /// # Errors
    /// Returns [Error::LedgerIo] if the file cannot be created or written.
    pub fn append_row(&self, transaction: &NewTransaction) -> Result<(), Error> {
        let _guard = self.lock.lock().map_err(|_| Error::LedgerLockError)?;

        self.ensure_file_locked()?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(LedgerRow::from(transaction))?;
        writer.flush()?;

        tracing::debug!("Appended transaction {transaction:?}");

        Ok(())
    }
}

fn read_transactions<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<Vec<Transaction>, Error> {
    let headers = reader.headers()?.clone();
    let mut transactions = Vec::new();

    for result in reader.records() {
        let mut record = match result {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!("Skipping unreadable ledger row: {error}");
                continue;
            }
        };

        // Rows written by hand often drop trailing empty columns.
        while record.len() < headers.len() {
            record.push_field("");
        }

        match record.deserialize::<LedgerRow>(Some(&headers)) {
            Ok(row) => transactions.push(row.into_transaction()),
            Err(error) => {
                let line = record.position().map_or(0, |position| position.line());
                tracing::warn!("Skipping ledger row on line {line}: {error}");
            }
        }
    }

    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;
    use time::macros::date;

    use super::{LEDGER_HEADER, Ledger, parse_amount, read_transactions};
    use crate::transaction::{NewTransaction, Transaction};

    fn read_str(text: &str) -> Vec<Transaction> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        read_transactions(reader).unwrap()
    }

    fn new_transaction(date: &str, kind: &str, amount: &str) -> NewTransaction {
        NewTransaction {
            date: date.to_owned(),
            mode: "Cash".to_owned(),
            category: "Food".to_owned(),
            amount: amount.to_owned(),
            kind: kind.to_owned(),
        }
    }

    #[test]
    fn reads_rows_in_file_order() {
        let got = read_str(
            "Date,Mode,Category,Subcategory,Note,old,Amount,Income/Expense,Currency
01-01-2024,Bank,Salary,,,,1000,Income,INR
15-01-2024,Cash,Food,Lunch,,,200.5,Expense,INR
",
        );

        assert_eq!(
            got,
            vec![
                Transaction::new("01-01-2024", "Income", "Salary", "Bank", 1000.0),
                Transaction::new("15-01-2024", "Expense", "Food", "Cash", 200.5),
            ]
        );
        assert_eq!(got[1].date, Some(date!(2024 - 01 - 15)));
    }

    #[test]
    fn unparsable_amounts_are_zero() {
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount(" 12.5 "), 12.5);
        assert_eq!(parse_amount("-3"), 3.0);
    }

    #[test]
    fn keeps_rows_with_bad_dates() {
        let got = read_str(
            "Date,Mode,Category,Subcategory,Note,old,Amount,Income/Expense,Currency
,Cash,Food,,,,10,Expense,
2024/01/01,Cash,Food,,,,20,Expense,
",
        );

        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|transaction| transaction.date.is_none()));
    }

    #[test]
    fn short_rows_fill_missing_columns_with_defaults() {
        let got = read_str(
            "Date,Mode,Category,Subcategory,Note,old,Amount,Income/Expense,Currency
01-01-2024,Cash,Food
",
        );

        assert_eq!(
            got,
            vec![Transaction::new("01-01-2024", "", "Food", "Cash", 0.0)]
        );
    }

    #[test]
    fn missing_file_is_an_empty_ledger() {
        let dir = tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("missing.csv"));

        assert!(ledger.load_rows().unwrap().is_empty());
    }

    #[test]
    fn ensure_file_writes_header_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.csv");
        let ledger = Ledger::new(&path);

        ledger.ensure_file().unwrap();
        ledger.ensure_file().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, format!("{}\n", LEDGER_HEADER.join(",")));
    }

    #[test]
    fn appended_rows_are_loaded_back() {
        let dir = tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("ledger.csv"));

        ledger
            .append_row(&new_transaction("01-02-2024", "Income", "100"))
            .unwrap();
        ledger
            .append_row(&new_transaction("02-02-2024", "Expense", "oops"))
            .unwrap();

        let got = ledger.load_rows().unwrap();

        assert_eq!(
            got,
            vec![
                Transaction::new("01-02-2024", "Income", "Food", "Cash", 100.0),
                Transaction::new("02-02-2024", "Expense", "Food", "Cash", 0.0),
            ]
        );
    }

    #[test]
    fn append_does_not_rewrite_existing_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        fs::write(
            &path,
            "Date,Mode,Category,Subcategory,Note,old,Amount,Income/Expense,Currency
05-01-2024,UPI,Travel,Taxi,airport,,350,Expense,INR
",
        )
        .unwrap();
        let ledger = Ledger::new(&path);

        ledger
            .append_row(&new_transaction("06-01-2024", "Expense", "20"))
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Date,Mode,Category,Subcategory,Note,old,Amount,Income/Expense,Currency
05-01-2024,UPI,Travel,Taxi,airport,,350,Expense,INR
06-01-2024,Cash,Food,,,,20,Expense,
"
        );
    }
}
