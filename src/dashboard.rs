//! Dashboard page
//!
//! Shows the balance and this month's cash flow, the latest transactions, a
//! form for adding a transaction and the charts fed by the analytics endpoints.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    app_state::LedgerState,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
    summary::{Summary, compute_summary, recent_transactions},
    timezone::local_today,
    transaction::Transaction,
};

/// The number of transactions listed under "Recent Transactions".
const RECENT_TRANSACTION_COUNT: usize = 5;

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Display the dashboard page.
pub async fn get_dashboard_page(State(state): State<LedgerState>) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_page_response(),
    };

    let transactions = match state.ledger.load_rows() {
        Ok(transactions) => transactions,
        Err(error) => return error.into_page_response(),
    };

    let summary = compute_summary(&transactions, today);
    let recent = recent_transactions(&transactions, RECENT_TRANSACTION_COUNT);

    dashboard_view(&summary, &recent).into_response()
}

fn dashboard_view(summary: &Summary, recent: &[&Transaction]) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Dashboard" }

            (summary_cards(summary))

            div class="grid grid-cols-1 lg:grid-cols-2 gap-6 w-full max-w-5xl my-8"
            {
                div class="bg-white dark:bg-gray-800 rounded-lg shadow p-4"
                {
                    div class="flex justify-between items-baseline mb-2"
                    {
                        h2 class="text-lg font-semibold" id="analytics-title" { "Category Expenses" }
                        select id="analytics-by" class="text-sm rounded border border-gray-300 dark:bg-gray-700"
                        {
                            option value="category" { "Category" }
                            option value="mode" { "Payment mode" }
                            option value="net" { "Net cash flow" }
                        }
                    }
                    canvas id="analytics-chart" {}
                }

                div class="bg-white dark:bg-gray-800 rounded-lg shadow p-4"
                {
                    h2 class="text-lg font-semibold mb-2" { "Cash Flow" }
                    canvas id="cashflow-chart" {}
                }
            }

            div class="grid grid-cols-1 lg:grid-cols-3 gap-6 w-full max-w-5xl"
            {
                div class="lg:col-span-2" { (recent_transactions_table(recent)) }
                div { (add_transaction_form()) }
            }
        }
    };

    let scripts = [
        HeadElement::ScriptLink(CHART_JS_URL.to_owned()),
        HeadElement::ScriptSource(PreEscaped(charts_script())),
    ];

    base("Dashboard", &scripts, &content)
}

fn summary_cards(summary: &Summary) -> Markup {
    let cards = [
        ("Balance", summary.balance),
        ("Inflow this month", summary.inflow),
        ("Outflow this month", summary.outflow),
        ("Net cash flow", summary.net_cashflow),
    ];

    html! {
        div class="grid grid-cols-2 md:grid-cols-4 gap-4 w-full max-w-5xl"
        {
            @for (title, amount) in cards
            {
                div class="bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-lg p-4 shadow-md"
                {
                    p class="text-sm text-gray-600 dark:text-gray-400" { (title) }
                    p class="text-xl font-semibold summary-value" { (format_currency(amount)) }
                }
            }
        }
    }
}

fn recent_transactions_table(transactions: &[&Transaction]) -> Markup {
    html! {
        section
        {
            h2 class="text-lg font-semibold mb-2" { "Recent Transactions" }

            @if transactions.is_empty()
            {
                p class="text-gray-600 dark:text-gray-400" { "No transactions yet." }
            }
            @else
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Mode" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions
                        {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (transaction.date_text) }
                                td class=(TABLE_CELL_STYLE) { (transaction.category_label()) }
                                td class=(TABLE_CELL_STYLE) { (transaction.mode_label()) }
                                td class=(TABLE_CELL_STYLE) { (transaction.kind) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn add_transaction_form() -> Markup {
    html! {
        form method="post" action=(endpoints::ADD_TRANSACTION) class="space-y-4"
        {
            h2 class="text-lg font-semibold" { "Add Transaction" }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input type="date" name="date" id="date" class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                select name="type" id="type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="Expense" { "Expense" }
                    option value="Income" { "Income" }
                    option value="Transfer-In" { "Transfer in" }
                    option value="Transfer-Out" { "Transfer out" }
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                input type="text" name="category" id="category" placeholder="Other" class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="mode" class=(FORM_LABEL_STYLE) { "Payment mode" }
                input type="text" name="mode" id="mode" placeholder="Cash" class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input type="number" name="amount" id="amount" min="0" step="0.01" required class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add" }
        }
    }
}

fn charts_script() -> String {
    format!(
        r#"
        document.addEventListener("DOMContentLoaded", () => {{
            let analyticsChart = null;

            async function drawAnalytics(by) {{
                const payload = await (await fetch("{analytics}?by=" + by)).json();
                document.getElementById("analytics-title").textContent = payload.title;
                if (analyticsChart) analyticsChart.destroy();
                analyticsChart = new Chart(document.getElementById("analytics-chart"), {{
                    type: by === "net" ? "bar" : "doughnut",
                    data: {{ labels: payload.labels, datasets: [{{ label: payload.title, data: payload.data }}] }},
                }});
            }}

            async function drawCashflow() {{
                const series = await (await fetch("{cashflow}")).json();
                new Chart(document.getElementById("cashflow-chart"), {{
                    type: "bar",
                    data: {{
                        labels: series.labels,
                        datasets: [
                            {{ label: "Inflow", data: series.inflow }},
                            {{ label: "Outflow", data: series.outflow }},
                        ],
                    }},
                }});
            }}

            const select = document.getElementById("analytics-by");
            select.addEventListener("change", () => drawAnalytics(select.value));
            drawAnalytics(select.value);
            drawCashflow();
        }});
        "#,
        analytics = endpoints::ANALYTICS_API,
        cashflow = endpoints::CASHFLOW_API,
    )
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc};

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use scraper::{Html, Selector};
    use tempfile::tempdir;

    use super::{RECENT_TRANSACTION_COUNT, get_dashboard_page};
    use crate::{app_state::LedgerState, endpoints, ledger::Ledger};

    async fn render_dashboard(ledger_contents: &str) -> Html {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        fs::write(&path, ledger_contents).unwrap();
        let state = LedgerState {
            ledger: Arc::new(Ledger::new(path)),
            local_timezone: "Etc/UTC".to_owned(),
        };
        let app = Router::new()
            .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
            .with_state(state);
        let server = TestServer::new(app);

        let response = server.get(endpoints::DASHBOARD_VIEW).await;
        response.assert_status_ok();

        Html::parse_document(&response.text())
    }

    #[tokio::test]
    async fn shows_summary_cards() {
        let document = render_dashboard(
            "Date,Mode,Category,Subcategory,Note,old,Amount,Income/Expense,Currency\n",
        )
        .await;

        let selector = Selector::parse(".summary-value").unwrap();
        let values: Vec<String> = document
            .select(&selector)
            .map(|element| element.text().collect())
            .collect();
        assert_eq!(values, ["₹0.00", "₹0.00", "₹0.00", "₹0.00"]);
    }

    #[tokio::test]
    async fn lists_most_recent_transactions_first() {
        let mut ledger = String::from(
            "Date,Mode,Category,Subcategory,Note,old,Amount,Income/Expense,Currency\n",
        );
        for day in 1..=7 {
            ledger.push_str(&format!("0{day}-01-2024,Cash,Day {day},,,,10,Expense,\n"));
        }

        let document = render_dashboard(&ledger).await;

        let row_selector = Selector::parse("tbody tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();
        let rows: Vec<_> = document.select(&row_selector).collect();
        assert_eq!(rows.len(), RECENT_TRANSACTION_COUNT);

        let first_date: String = rows[0]
            .select(&cell_selector)
            .next()
            .unwrap()
            .text()
            .collect();
        assert_eq!(first_date, "07-01-2024");
    }

    #[tokio::test]
    async fn form_posts_to_add_endpoint() {
        let document = render_dashboard(
            "Date,Mode,Category,Subcategory,Note,old,Amount,Income/Expense,Currency\n",
        )
        .await;

        let selector = Selector::parse("form").unwrap();
        let form = document.select(&selector).next().expect("No form found");
        assert_eq!(form.value().attr("action"), Some(endpoints::ADD_TRANSACTION));
        assert_eq!(form.value().attr("method"), Some("post"));
    }
}
