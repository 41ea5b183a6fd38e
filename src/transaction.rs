//! The transaction record shared by the ledger, the analytics engine and the
//! dashboard.
//!
//! Records are normalized by the ledger when they are loaded: the amount is
//! always a parsed magnitude and the date is parsed on a best-effort basis.
//! The direction of money (in or out) is carried by the transaction type, never
//! by the sign of the amount.

use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The label used for an empty or missing category or payment mode.
pub const OTHER_LABEL: &str = "Other";

/// The day-month-year format dates are stored in, e.g. "15-01-2024".
///
/// Single digit days and months are accepted when parsing.
pub const STORAGE_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:none]-[month padding:none]-[year]");

/// The zero-padded format used when writing dates to the ledger.
pub const STORAGE_DATE_WRITE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day]-[month]-[year]");

/// The year-month-day format submitted by HTML date inputs, e.g. "2024-01-15".
pub const FORM_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse a day-month-year date, ignoring surrounding whitespace.
///
/// Returns `None` for empty text, the wrong format or an invalid calendar date.
pub fn parse_storage_date(text: &str) -> Option<Date> {
    Date::parse(text.trim(), STORAGE_DATE_FORMAT).ok()
}

/// The direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
    /// Money moved into the ledger from another account.
    TransferIn,
    /// Money moved out of the ledger to another account.
    TransferOut,
}

impl TransactionType {
    /// Parse free text into a transaction type, ignoring case and surrounding
    /// whitespace.
    ///
    /// Returns `None` for anything that is not one of "income", "expense",
    /// "transfer-in" or "transfer-out".
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "transfer-in" => Some(Self::TransferIn),
            "transfer-out" => Some(Self::TransferOut),
            _ => None,
        }
    }

    /// Whether the transaction brings money into the ledger.
    pub fn is_inflow(self) -> bool {
        matches!(self, Self::Income | Self::TransferIn)
    }

    /// Whether the transaction takes money out of the ledger.
    pub fn is_outflow(self) -> bool {
        matches!(self, Self::Expense | Self::TransferOut)
    }
}

/// A normalized transaction record.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The date exactly as it appears in the ledger.
    pub date_text: String,
    /// The parsed date, `None` if `date_text` could not be parsed.
    pub date: Option<Date>,
    /// The raw transaction type, e.g. "Expense". See [Transaction::transaction_type].
    pub kind: String,
    /// What the money was for.
    pub category: String,
    /// How the money was paid, e.g. "Cash" or "UPI".
    pub mode: String,
    /// The magnitude of the transaction, never negative.
    pub amount: f64,
}

impl Transaction {
    /// Create a transaction from raw field values.
    ///
    /// The date is parsed from `date_text`; the amount is stored as a magnitude.
    pub fn new(date_text: &str, kind: &str, category: &str, mode: &str, amount: f64) -> Self {
        Self {
            date_text: date_text.to_owned(),
            date: parse_storage_date(date_text),
            kind: kind.to_owned(),
            category: category.to_owned(),
            mode: mode.to_owned(),
            amount: amount.abs(),
        }
    }

    /// The recognized transaction type, if any.
    pub fn transaction_type(&self) -> Option<TransactionType> {
        TransactionType::parse(&self.kind)
    }

    /// The trimmed category, or [OTHER_LABEL] if it is empty.
    pub fn category_label(&self) -> &str {
        label_or_other(&self.category)
    }

    /// The trimmed payment mode, or [OTHER_LABEL] if it is empty.
    pub fn mode_label(&self) -> &str {
        label_or_other(&self.mode)
    }
}

fn label_or_other(label: &str) -> &str {
    match label.trim() {
        "" => OTHER_LABEL,
        trimmed => trimmed,
    }
}

/// The form data for creating a transaction.
///
/// Every field is optional, missing fields fall back to defaults in
/// [NewTransaction::from_form].
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct TransactionForm {
    /// The date in year-month-day format.
    pub date: Option<String>,
    /// The payment mode.
    pub mode: Option<String>,
    /// The category.
    pub category: Option<String>,
    /// The amount as text, it is stored verbatim.
    pub amount: Option<String>,
    /// The transaction type, e.g. "Income" or "Expense".
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A transaction ready to be appended to the ledger, with the date already in
/// storage format.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The date in day-month-year format.
    pub date: String,
    /// The payment mode.
    pub mode: String,
    /// The category.
    pub category: String,
    /// The amount as submitted.
    pub amount: String,
    /// The transaction type.
    pub kind: String,
}

impl NewTransaction {
    /// The payment mode used when the form does not provide one.
    pub const DEFAULT_MODE: &str = "Cash";
    /// The amount used when the form does not provide one.
    pub const DEFAULT_AMOUNT: &str = "0";
    /// The transaction type used when the form does not provide one.
    pub const DEFAULT_KIND: &str = "Expense";

    /// Convert submitted form data into a ledger row.
    ///
    /// The form date is converted from year-month-day to day-month-year. If it
    /// is missing or invalid, `today` is used instead. The other defaults only
    /// apply to fields that are absent: a field submitted blank stays blank.
    pub fn from_form(form: TransactionForm, today: Date) -> Self {
        let date = form
            .date
            .as_deref()
            .and_then(|text| Date::parse(text.trim(), FORM_DATE_FORMAT).ok())
            .unwrap_or_else(|| {
                tracing::debug!("Invalid form date {:?}, using today's date", form.date);
                today
            });

        Self {
            date: format_storage_date(date),
            mode: form.mode.unwrap_or_else(|| Self::DEFAULT_MODE.to_owned()),
            category: form.category.unwrap_or_else(|| OTHER_LABEL.to_owned()),
            amount: form
                .amount
                .unwrap_or_else(|| Self::DEFAULT_AMOUNT.to_owned()),
            kind: form.kind.unwrap_or_else(|| Self::DEFAULT_KIND.to_owned()),
        }
    }
}

/// Format a date as zero-padded day-month-year.
pub fn format_storage_date(date: Date) -> String {
    // The format only has numeric components so formatting cannot fail.
    date.format(STORAGE_DATE_WRITE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
