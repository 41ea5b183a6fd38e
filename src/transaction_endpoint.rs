//! Defines the endpoint for adding a transaction to the ledger.

// axum's Form keeps a blank field as `Some("")`, only absent fields are `None`.
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    app_state::LedgerState,
    endpoints,
    timezone::local_today,
    transaction::{NewTransaction, TransactionForm},
};

/// A route handler for adding a transaction, redirects to the dashboard on success.
///
/// Absent fields take the defaults described in [NewTransaction::from_form],
/// fields submitted blank are stored blank.
pub async fn add_transaction_endpoint(
    State(state): State<LedgerState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => {
            tracing::error!("Invalid timezone {}", state.local_timezone);
            return error.into_page_response();
        }
    };

    let transaction = NewTransaction::from_form(form, today);

    if let Err(error) = state.ledger.append_row(&transaction) {
        tracing::error!("could not add transaction: {error}");
        return error.into_page_response();
    }

    Redirect::to(endpoints::DASHBOARD_VIEW).into_response()
}
