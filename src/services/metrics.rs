//! Presentation-only numbers that no single stats call returns.

use crate::models::dashboard::{RecentOrderSummary, StatusTone};
use crate::models::stats::{OrderRecord, OrderStats, ProductList, TotalRevenue, UserList};

/// Characters of the order id shown in the recent orders table.
const SHORT_CODE_LEN: usize = 6;

/// Headline revenue: the revenue figure multiplied by the order count.
///
/// The database fetcher reports `totalRevenue` as the average order amount,
/// which makes this product the gross revenue. Missing inputs count as `0`.
pub fn compute_total_revenue(
    total_revenue: Option<&TotalRevenue>,
    order_stats: Option<&OrderStats>,
) -> f64 {
    let revenue = total_revenue
        .and_then(|r| r.data.as_ref())
        .and_then(|d| d.total_revenue)
        .unwrap_or(0.0);
    revenue * total_orders(order_stats)
}

pub fn total_orders(order_stats: Option<&OrderStats>) -> f64 {
    order_stats
        .and_then(|s| s.data.as_ref())
        .and_then(|d| d.total_orders)
        .unwrap_or(0.0)
}

pub fn total_products(products: Option<&ProductList>) -> usize {
    products.and_then(|p| p.count).unwrap_or(0)
}

pub fn total_users(users: Option<&UserList>) -> f64 {
    users
        .and_then(|u| u.data.as_ref())
        .and_then(|d| d.total_users)
        .unwrap_or(0.0)
}

/// Rows for the recent orders table.
///
/// A non-empty live list is mapped as-is; otherwise two placeholder orders
/// keep the table populated.
pub fn recent_orders(order_stats: Option<&OrderStats>) -> Vec<RecentOrderSummary> {
    let live = order_stats
        .and_then(|s| s.data.as_ref())
        .and_then(|d| d.recent_orders.as_deref())
        .filter(|orders| !orders.is_empty());

    match live {
        Some(orders) => orders.iter().map(summarize_order).collect(),
        None => placeholder_orders(),
    }
}

fn summarize_order(order: &OrderRecord) -> RecentOrderSummary {
    let status = order
        .status
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Pending".to_string());

    RecentOrderSummary {
        identifier: format!("#{}", short_code(order.id.as_deref().unwrap_or_default())),
        customer_name: order.customer().unwrap_or("Guest").to_string(),
        amount: order.total_price.unwrap_or(0.0),
        tone: StatusTone::classify(&status),
        status,
    }
}

/// Last six characters of an id (the whole id when shorter).
pub fn short_code(id: &str) -> &str {
    let start = id
        .char_indices()
        .rev()
        .nth(SHORT_CODE_LEN - 1)
        .map_or(0, |(i, _)| i);
    &id[start..]
}

fn placeholder_orders() -> Vec<RecentOrderSummary> {
    vec![
        placeholder("#ORD001", "John Doe", 299.99, "Completed"),
        placeholder("#ORD002", "Jane Smith", 149.50, "Pending"),
    ]
}

fn placeholder(identifier: &str, customer_name: &str, amount: f64, status: &str) -> RecentOrderSummary {
    RecentOrderSummary {
        identifier: identifier.to_string(),
        customer_name: customer_name.to_string(),
        amount,
        status: status.to_string(),
        tone: StatusTone::classify(status),
    }
}
