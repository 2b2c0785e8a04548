//! Chart-ready entities handed to the admin dashboard.

use serde::Serialize;

/// One month of the composite revenue/sales/orders chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeMonthPoint {
    pub month_label: String,
    pub revenue: f64,
    pub sales: f64,
    pub orders: f64,
}

/// A pie/donut slice for one product category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

/// Badge style for an order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Success,
    Warning,
    Danger,
    Info,
}

impl StatusTone {
    /// Classify an order status. Unknown statuses are informational.
    pub fn classify(status: &str) -> Self {
        let status = status.trim();
        if status.eq_ignore_ascii_case("completed") || status.eq_ignore_ascii_case("delivered") {
            Self::Success
        } else if status.eq_ignore_ascii_case("pending") {
            Self::Warning
        } else if status.eq_ignore_ascii_case("cancelled") {
            Self::Danger
        } else {
            Self::Info
        }
    }
}

/// Row of the "recent orders" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentOrderSummary {
    pub identifier: String,
    pub customer_name: String,
    pub amount: f64,
    pub status: String,
    pub tone: StatusTone,
}

/// Headline numbers for the summary cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub total_orders: f64,
    pub total_products: usize,
    pub total_users: f64,
}

/// Everything the overview page renders, derived from one stats snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: DashboardSummary,
    pub monthly_series: Vec<CompositeMonthPoint>,
    /// `None` when category stats were unavailable; not replaced by an
    /// empty list.
    pub categories: Option<Vec<CategorySlice>>,
    pub recent_orders: Vec<RecentOrderSummary>,
}
