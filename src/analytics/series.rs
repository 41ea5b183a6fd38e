//! Inflow and outflow totals for the most recent months.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::{
    analytics::{bucket::MonthBucket, round_to_cents},
    transaction::{Transaction, TransactionType, parse_storage_date},
};

/// The number of months shown in the cash flow chart.
pub const DEFAULT_SERIES_MONTHS: usize = 6;

/// Monthly inflow and outflow, aligned with `labels`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashflowSeries {
    /// Three-letter month names, e.g. "Jan".
    pub labels: Vec<String>,
    /// Income per month.
    pub inflow: Vec<f64>,
    /// Expenses and outgoing transfers per month, as positive amounts.
    pub outflow: Vec<f64>,
}

/// Sums income and outgoings per month for the latest `months` months that
/// have data.
///
/// The window is the last `months` months found in the data, not a fixed
/// calendar range. A `months` of zero keeps every month. Labels only carry the
/// month name, so windows longer than a year will repeat labels.
pub fn cashflow_series(transactions: &[Transaction], months: usize) -> CashflowSeries {
    let mut inflow: HashMap<MonthBucket, f64> = HashMap::new();
    let mut outflow: HashMap<MonthBucket, f64> = HashMap::new();

    for transaction in transactions {
        let Some(date) = transaction
            .date
            .or_else(|| parse_storage_date(&transaction.date_text))
        else {
            continue;
        };
        let month = MonthBucket::of(date);

        match transaction.transaction_type() {
            Some(TransactionType::Income) => {
                *inflow.entry(month).or_insert(0.0) += transaction.amount;
            }
            Some(TransactionType::Expense | TransactionType::TransferOut) => {
                *outflow.entry(month).or_insert(0.0) += transaction.amount;
            }
            Some(TransactionType::TransferIn) | None => {}
        }
    }

    let all_months: BTreeSet<MonthBucket> =
        inflow.keys().chain(outflow.keys()).copied().collect();
    let skip = match months {
        0 => 0,
        months => all_months.len().saturating_sub(months),
    };
    let window: Vec<MonthBucket> = all_months.into_iter().skip(skip).collect();

    let total_for = |totals: &HashMap<MonthBucket, f64>, month: &MonthBucket| {
        round_to_cents(totals.get(month).copied().unwrap_or(0.0))
    };

    CashflowSeries {
        labels: window
            .iter()
            .map(|month| month.short_name().to_owned())
            .collect(),
        inflow: window.iter().map(|month| total_for(&inflow, month)).collect(),
        outflow: window.iter().map(|month| total_for(&outflow, month)).collect(),
    }
}
