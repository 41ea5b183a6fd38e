//! JSON endpoints that feed the dashboard charts.
//!
//! Each request loads a fresh snapshot of the ledger and aggregates it.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    analytics::{AggregationKind, DEFAULT_SERIES_MONTHS, aggregate, cashflow_series},
    app_state::LedgerState,
    summary::compute_summary,
    timezone::local_today,
};

/// The query parameters for [get_analytics].
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// Which aggregate to build: "category", "mode" or "net".
    pub by: Option<String>,
}

/// A route handler for the chart aggregate selected by the `by` parameter.
///
/// Unknown or missing keys return the expenses by category.
pub async fn get_analytics(
    State(state): State<LedgerState>,
    Query(query): Query<AnalyticsQuery>,
) -> Response {
    let kind = AggregationKind::from_key(query.by.as_deref());

    match state.ledger.load_rows() {
        Ok(transactions) => Json(aggregate(kind, &transactions)).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler for inflow and outflow over the latest six months.
pub async fn get_cashflow(State(state): State<LedgerState>) -> Response {
    match state.ledger.load_rows() {
        Ok(transactions) => {
            Json(cashflow_series(&transactions, DEFAULT_SERIES_MONTHS)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

/// A route handler for the balance and the current month's totals.
pub async fn get_summary(State(state): State<LedgerState>) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    match state.ledger.load_rows() {
        Ok(transactions) => Json(compute_summary(&transactions, today)).into_response(),
        Err(error) => error.into_response(),
    }
}
