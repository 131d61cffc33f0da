//! `GET /` dashboard page.
//!
//! Each view rolls the simulated sale, resets the inventory gauge, then reads
//! the order aggregates. Values reach the page as one JSON object consumed by
//! `app.js`:
//!
//! - `sales`            : simulated sales counter
//! - `simulated_orders` : simulated orders counter (the `/metrics` series)
//! - `orders`           : number of rows in the order store
//! - `revenue`          : `SUM(quantity * price)` over the store
//! - `inventory`        : current inventory gauge

use axum::{extract::State, response::Html};
use serde_json::json;

use raincoat_core::{Order, OrderTotals};

use crate::app_state::AppState;
use crate::obs::MetricSnapshot;
use crate::web::{blocking, ApiResult};

const TEMPLATE: &str = include_str!("assets/dashboard.html");
const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub metrics: MetricView,
    pub totals: OrderTotals,
    pub recent: Vec<Order>,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricView {
    pub sales: u64,
    pub simulated_orders: u64,
    pub inventory: i64,
}

impl From<MetricSnapshot> for MetricView {
    fn from(s: MetricSnapshot) -> Self {
        Self {
            sales: s.sales_total,
            simulated_orders: s.orders_total,
            inventory: s.inventory_current,
        }
    }
}

pub async fn dashboard(State(app): State<AppState>) -> ApiResult<Html<String>> {
    app.metrics().observe_request("/");

    // ThreadRng is !Send: keep it out of scope before the first await.
    let (sale, inventory) = {
        let mut rng = rand::thread_rng();
        let sale = app.metrics().record_sale_event(&mut rng);
        let inventory = app.metrics().set_inventory(&mut rng);
        (sale, inventory)
    };
    tracing::debug!(?sale, inventory, "dashboard view");

    let store = app.store().clone();
    let (totals, recent) = blocking(move || {
        let totals = store.totals()?;
        let recent = store.recent_orders(RECENT_LIMIT)?;
        Ok((totals, recent))
    })
    .await?;

    let view = DashboardView {
        metrics: app.metrics().snapshot().into(),
        totals,
        recent,
    };
    Ok(Html(render(&view)))
}

fn chart_data(view: &DashboardView) -> String {
    json!({
        "sales": view.metrics.sales,
        "simulated_orders": view.metrics.simulated_orders,
        "orders": view.totals.count,
        "revenue": (view.totals.revenue * 100.0).round() / 100.0,
        "inventory": view.metrics.inventory,
    })
    .to_string()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// Stored values are untyped, so every cell goes through the escaper. Total is
// left blank unless both quantity and price read as numbers.
fn order_rows(orders: &[Order]) -> String {
    orders
        .iter()
        .map(|o| {
            let total = o.line_total().map(|t| format!("{t:.2}")).unwrap_or_default();
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                o.id,
                escape_html(&o.customer.to_string()),
                escape_html(&o.quantity.to_string()),
                escape_html(&o.price.to_string()),
                total,
                escape_html(&o.timestamp),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fill the page template.
pub fn render(view: &DashboardView) -> String {
    TEMPLATE
        .replace("{{ chart_data }}", &chart_data(view))
        .replace("{{ order_count }}", &view.totals.count.to_string())
        .replace("{{ revenue }}", &format!("{:.2}", view.totals.revenue))
        .replace("{{ order_rows }}", &order_rows(&view.recent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use raincoat_core::FieldValue;

    fn view() -> DashboardView {
        DashboardView {
            metrics: MetricView { sales: 7, simulated_orders: 3, inventory: 120 },
            totals: OrderTotals { count: 21, revenue: 1234.5 },
            recent: vec![
                Order {
                    id: 21,
                    customer: "<script>alert(1)</script>".into(),
                    quantity: 2.into(),
                    price: 49.99.into(),
                    timestamp: "2024-05-01T12:00:00.000000Z".into(),
                },
                Order {
                    id: 20,
                    customer: FieldValue::Null,
                    quantity: "<b>two</b>".into(),
                    price: FieldValue::Null,
                    timestamp: "2024-05-01T11:00:00.000000Z".into(),
                },
            ],
        }
    }

    #[test]
    fn page_embeds_chart_json() {
        let html = render(&view());
        let start = html.find("const DATA = ").unwrap() + "const DATA = ".len();
        let end = start + html[start..].find(';').unwrap();
        let v: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();
        assert_eq!(v["sales"], 7);
        assert_eq!(v["orders"], 21);
        assert_eq!(v["simulated_orders"], 3);
        assert_eq!(v["inventory"], 120);
        assert_eq!(v["revenue"], 1234.5);
    }

    #[test]
    fn rows_show_line_totals_when_numeric() {
        let rows = order_rows(&view().recent);
        let mut lines = rows.lines();
        assert_eq!(
            lines.next().unwrap(),
            "<tr><td>21</td><td>&lt;script&gt;alert(1)&lt;/script&gt;</td>\
             <td>2</td><td>49.99</td><td>99.98</td><td>2024-05-01T12:00:00.000000Z</td></tr>"
        );
        assert_eq!(
            lines.next().unwrap(),
            "<tr><td>20</td><td></td><td>&lt;b&gt;two&lt;/b&gt;</td>\
             <td></td><td></td><td>2024-05-01T11:00:00.000000Z</td></tr>"
        );
    }

    #[test]
    fn page_refreshes_and_escapes_customers() {
        let html = render(&view());
        assert!(html.contains("10000"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("1234.50"));
        assert!(!html.contains("{{"));
    }
}
