//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::{
    AppState,
    analytics_endpoint::{get_analytics, get_cashflow, get_summary},
    dashboard::get_dashboard_page,
    endpoints,
    logging::logging_middleware,
    transaction_endpoint::add_transaction_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::ADD_TRANSACTION, post(add_transaction_endpoint))
        .route(endpoints::ANALYTICS_API, get(get_analytics))
        .route(endpoints::CASHFLOW_API, get(get_cashflow))
        .route(endpoints::SUMMARY_API, get(get_summary))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::json;
    use tempfile::tempdir;

    use super::build_router;
    use crate::{AppState, endpoints};

    #[tokio::test]
    async fn added_transactions_show_up_in_analytics() {
        let dir = tempdir().unwrap();
        let state = AppState::new(dir.path().join("ledger.csv"), "Etc/UTC").unwrap();
        let server = TestServer::new(build_router(state));

        for (date, kind, category, amount) in [
            ("2024-01-01", "Income", "Salary", "1000"),
            ("2024-01-15", "Expense", "Food", "200"),
            ("2024-01-20", "Expense", "Food", "50"),
        ] {
            server
                .post(endpoints::ADD_TRANSACTION)
                .form(&[
                    ("date", date),
                    ("type", kind),
                    ("category", category),
                    ("mode", "Cash"),
                    ("amount", amount),
                ])
                .await
                .assert_status_see_other();
        }

        server
            .get(endpoints::ANALYTICS_API)
            .add_query_param("by", "net")
            .await
            .assert_json(&json!({
                "title": "Monthly Net Cash Flow",
                "labels": ["2024-01"],
                "data": [750.0],
            }));
        server
            .get(endpoints::ANALYTICS_API)
            .await
            .assert_json(&json!({
                "title": "Category Expenses",
                "labels": ["Food"],
                "data": [250.0],
            }));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let dir = tempdir().unwrap();
        let state = AppState::new(dir.path().join("ledger.csv"), "Etc/UTC").unwrap();
        let server = TestServer::new(build_router(state));

        server
            .get("/market")
            .await
            .assert_status_not_found();
    }
}
