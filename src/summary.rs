//! Headline figures for the dashboard.

use serde::Serialize;
use time::Date;

use crate::{
    analytics::{MonthBucket, round_to_cents},
    transaction::Transaction,
};

/// The balance and this month's money in and out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// All money in minus all money out, over the whole ledger.
    pub balance: f64,
    /// Income and incoming transfers in the current month.
    pub inflow: f64,
    /// Expenses and outgoing transfers in the current month.
    pub outflow: f64,
    /// `inflow` minus `outflow`.
    pub net_cashflow: f64,
}

/// Calculate the dashboard summary.
///
/// `today` selects the calendar month used for `inflow` and `outflow`.
/// Transactions without a parsed date only count towards the balance and
/// transactions with an unrecognized type are ignored.
pub fn compute_summary(transactions: &[Transaction], today: Date) -> Summary {
    let current_month = MonthBucket::of(today);
    let mut balance = 0.0;
    let mut inflow = 0.0;
    let mut outflow = 0.0;

    for transaction in transactions {
        let Some(kind) = transaction.transaction_type() else {
            continue;
        };
        let in_current_month = transaction
            .date
            .is_some_and(|date| MonthBucket::of(date) == current_month);

        if kind.is_inflow() {
            balance += transaction.amount;
            if in_current_month {
                inflow += transaction.amount;
            }
        } else if kind.is_outflow() {
            balance -= transaction.amount;
            if in_current_month {
                outflow += transaction.amount;
            }
        }
    }

    Summary {
        balance: round_to_cents(balance),
        inflow: round_to_cents(inflow),
        outflow: round_to_cents(outflow),
        net_cashflow: round_to_cents(inflow - outflow),
    }
}

/// Get up to `count` transactions, newest first.
///
/// Transactions without a parsed date come after every dated transaction.
/// Transactions on the same date keep their ledger order.
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    // `None` sorts before `Some`, so reversing the comparison puts undated last.
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(count);
    sorted
}
