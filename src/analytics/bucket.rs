//! Month buckets for date-keyed aggregates.

use std::fmt;

use time::{Date, Month};

use crate::transaction::{Transaction, parse_storage_date};

/// A calendar month, the grouping key for date-keyed aggregates.
///
/// Buckets order chronologically, which matches the lexicographic order of
/// their `YYYY-MM` rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthBucket {
    year: i32,
    month: u8,
}

impl MonthBucket {
    /// The bucket that contains `date`.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month().into(),
        }
    }

    /// The three-letter month abbreviation, e.g. "Jan".
    ///
    /// The year is not included.
    pub fn short_name(&self) -> &'static str {
        match Month::try_from(self.month) {
            Ok(Month::January) => "Jan",
            Ok(Month::February) => "Feb",
            Ok(Month::March) => "Mar",
            Ok(Month::April) => "Apr",
            Ok(Month::May) => "May",
            Ok(Month::June) => "Jun",
            Ok(Month::July) => "Jul",
            Ok(Month::August) => "Aug",
            Ok(Month::September) => "Sep",
            Ok(Month::October) => "Oct",
            Ok(Month::November) => "Nov",
            Ok(Month::December) => "Dec",
            // Buckets are only built from valid dates.
            Err(_) => "",
        }
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Get the month of a transaction by parsing its raw date text.
///
/// Returns `None` if the date is missing, in the wrong format or not a valid
/// calendar date. Callers skip such records.
pub fn month_bucket(transaction: &Transaction) -> Option<MonthBucket> {
    parse_storage_date(&transaction.date_text).map(MonthBucket::of)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{MonthBucket, month_bucket};
    use crate::transaction::Transaction;

    #[test]
    fn renders_year_and_zero_padded_month() {
        assert_eq!(MonthBucket::of(date!(2024 - 03 - 15)).to_string(), "2024-03");
        assert_eq!(MonthBucket::of(date!(2023 - 11 - 01)).to_string(), "2023-11");
    }

    #[test]
    fn short_name_drops_the_year() {
        assert_eq!(MonthBucket::of(date!(2024 - 01 - 31)).short_name(), "Jan");
        assert_eq!(MonthBucket::of(date!(2023 - 12 - 01)).short_name(), "Dec");
    }

    #[test]
    fn buckets_order_chronologically() {
        let mut buckets = vec![
            MonthBucket::of(date!(2024 - 02 - 01)),
            MonthBucket::of(date!(2023 - 12 - 25)),
            MonthBucket::of(date!(2024 - 10 - 05)),
        ];

        buckets.sort();

        let labels: Vec<String> = buckets.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["2023-12", "2024-02", "2024-10"]);
    }

    #[test]
    fn extracts_bucket_from_raw_date() {
        let transaction = Transaction::new("20-01-2024", "Expense", "Food", "Cash", 1.0);

        assert_eq!(
            month_bucket(&transaction),
            Some(MonthBucket::of(date!(2024 - 01 - 01)))
        );
    }

    #[test]
    fn malformed_dates_have_no_bucket() {
        for text in ["", "   ", "2024-01-20", "32-01-2024", "not a date"] {
            let transaction = Transaction::new(text, "Expense", "Food", "Cash", 1.0);

            assert_eq!(month_bucket(&transaction), None, "date text {text:?}");
        }
    }
}
