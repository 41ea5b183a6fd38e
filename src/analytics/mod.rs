//! Transaction analytics for the dashboard charts.
//!
//! Every function here is a pure reduction over a snapshot of the ledger: it
//! reads the records once and returns freshly built chart data. Records with
//! data quality issues (unparsable dates, unknown transaction types) are left
//! out of the aggregates they cannot contribute to rather than causing errors.

mod bucket;
mod expenses;
mod net_cashflow;
mod series;

use serde::Serialize;

use crate::transaction::Transaction;

pub use bucket::{MonthBucket, month_bucket};
pub use expenses::{category_expenses, mode_expenses};
pub use net_cashflow::monthly_net_cashflow;
pub use series::{CashflowSeries, DEFAULT_SERIES_MONTHS, cashflow_series};

/// Chart data: one value per label, in the same order as the labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatePayload {
    /// A human readable name for the chart.
    pub title: String,
    /// The bucket names, e.g. categories, payment modes or `YYYY-MM` months.
    pub labels: Vec<String>,
    /// The total for each bucket.
    pub data: Vec<f64>,
}

/// The aggregates that can be requested by key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AggregationKind {
    /// Expenses per category.
    #[default]
    Category,
    /// Expenses per payment mode.
    Mode,
    /// Net cash flow per month.
    Net,
}

impl AggregationKind {
    /// Resolve a user supplied key, ignoring case.
    ///
    /// Missing or unrecognized keys resolve to [AggregationKind::Category].
    pub fn from_key(key: Option<&str>) -> Self {
        match key.map(str::to_lowercase).as_deref() {
            Some("category") => Self::Category,
            Some("mode") => Self::Mode,
            Some("net") => Self::Net,
            _ => Self::default(),
        }
    }
}

/// Build the aggregate selected by `kind`.
pub fn aggregate(kind: AggregationKind, transactions: &[Transaction]) -> AggregatePayload {
    match kind {
        AggregationKind::Category => category_expenses(transactions),
        AggregationKind::Mode => mode_expenses(transactions),
        AggregationKind::Net => monthly_net_cashflow(transactions),
    }
}

/// Round to two decimal places, with halves rounded away from zero.
///
/// Exact halves such as 0.125 become 0.13, not the round-half-to-even 0.12.
/// Only amounts that are exact binary halves are affected.
pub(crate) fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
