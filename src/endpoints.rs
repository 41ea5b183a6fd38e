//! The API endpoints URIs.

/// The dashboard page.
pub const DASHBOARD_VIEW: &str = "/";
/// The route for adding a transaction from the dashboard form.
pub const ADD_TRANSACTION: &str = "/add";
/// The route for chart aggregates, selected with the `by` query parameter.
pub const ANALYTICS_API: &str = "/api/analytics";
/// The route for the monthly inflow and outflow series.
pub const CASHFLOW_API: &str = "/api/cashflow";
/// The route for the balance and current month summary.
pub const SUMMARY_API: &str = "/api/summary";
