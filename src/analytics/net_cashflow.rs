//! Net cash flow per calendar month.

use std::collections::BTreeMap;

use crate::{
    analytics::{AggregatePayload, bucket::month_bucket, round_to_cents},
    transaction::{Transaction, TransactionType},
};

/// Calculates income minus expenses and outgoing transfers for each month.
///
/// Records without a valid date or with a type other than income, expense or
/// transfer-out are skipped. Incoming transfers do not count towards the net.
/// Labels are `YYYY-MM` keys in chronological order.
pub fn monthly_net_cashflow(transactions: &[Transaction]) -> AggregatePayload {
    let mut totals = BTreeMap::new();

    for transaction in transactions {
        let Some(month) = month_bucket(transaction) else {
            continue;
        };

        let signed_amount = match transaction.transaction_type() {
            Some(TransactionType::Income) => transaction.amount,
            Some(TransactionType::Expense | TransactionType::TransferOut) => -transaction.amount,
            Some(TransactionType::TransferIn) | None => continue,
        };

        *totals.entry(month).or_insert(0.0) += signed_amount;
    }

    let (labels, data) = totals
        .into_iter()
        .map(|(month, total)| (month.to_string(), round_to_cents(total)))
        .unzip();

    AggregatePayload {
        title: "Monthly Net Cash Flow".to_owned(),
        labels,
        data,
    }
}
