//! Expense totals grouped by category or payment mode.

use std::collections::HashMap;

use crate::{
    analytics::{AggregatePayload, round_to_cents},
    transaction::{Transaction, TransactionType},
};

/// Sums expenses per category.
///
/// Labels appear in the order each category is first seen in `transactions`.
pub fn category_expenses(transactions: &[Transaction]) -> AggregatePayload {
    expenses_by("Category Expenses", transactions, Transaction::category_label)
}

/// Sums expenses per payment mode.
///
/// Labels appear in the order each mode is first seen in `transactions`.
pub fn mode_expenses(transactions: &[Transaction]) -> AggregatePayload {
    expenses_by("Payment Mode Expenses", transactions, Transaction::mode_label)
}

fn expenses_by<'a>(
    title: &str,
    transactions: &'a [Transaction],
    label_of: fn(&'a Transaction) -> &'a str,
) -> AggregatePayload {
    let mut totals = OrderedTotals::default();

    for transaction in transactions
        .iter()
        .filter(|t| t.transaction_type() == Some(TransactionType::Expense))
    {
        totals.add(label_of(transaction), transaction.amount);
    }

    let (labels, data) = totals.into_label_and_value_pairs();

    AggregatePayload {
        title: title.to_owned(),
        labels,
        data,
    }
}

/// Running totals keyed by label, remembering the order labels were first added.
#[derive(Debug, Default)]
struct OrderedTotals<'a> {
    index: HashMap<&'a str, usize>,
    totals: Vec<(&'a str, f64)>,
}

impl<'a> OrderedTotals<'a> {
    fn add(&mut self, label: &'a str, amount: f64) {
        match self.index.get(label) {
            Some(&position) => self.totals[position].1 += amount,
            None => {
                self.index.insert(label, self.totals.len());
                self.totals.push((label, amount));
            }
        }
    }

    fn into_label_and_value_pairs(self) -> (Vec<String>, Vec<f64>) {
        self.totals
            .into_iter()
            .map(|(label, total)| (label.to_owned(), round_to_cents(total)))
            .unzip()
    }
}
