//! Merges the per-metric monthly sequences into one calendar-ordered series.
//!
//! Revenue drives the chart: without any revenue rows the merger returns a
//! fixed Jan..Jul all-zero series so the chart still renders its axes. With
//! revenue present, every month Jan..Dec gets a point, followed by any
//! out-of-calendar month index a sequence mentions (labelled `M<index>`).

use crate::models::dashboard::CompositeMonthPoint;
use crate::models::stats::MonthlyMetric;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Number of months in the placeholder series.
const DEFAULT_SERIES_MONTHS: i64 = 7;

/// Three-letter label for a month index, `M<index>` outside 1..=12.
pub fn month_label(month_index: i64) -> String {
    month_index
        .checked_sub(1)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| MONTH_ABBREVIATIONS.get(i))
        .map_or_else(|| format!("M{month_index}"), |label| (*label).to_string())
}

/// All-zero Jan..Jul series used when no revenue data is available.
pub fn default_series() -> Vec<CompositeMonthPoint> {
    (1..=DEFAULT_SERIES_MONTHS)
        .map(|month| CompositeMonthPoint {
            month_label: month_label(month),
            revenue: 0.0,
            sales: 0.0,
            orders: 0.0,
        })
        .collect()
}

/// Merge revenue, sales and order counts into one point per canonical month.
pub fn merge_monthly_series(
    revenue: Option<&[MonthlyMetric]>,
    sales: Option<&[MonthlyMetric]>,
    orders: Option<&[MonthlyMetric]>,
) -> Vec<CompositeMonthPoint> {
    let Some(revenue) = revenue.filter(|rows| !rows.is_empty()) else {
        return default_series();
    };
    let sales = sales.unwrap_or_default();
    let orders = orders.unwrap_or_default();

    canonical_months(&[revenue, sales, orders])
        .into_iter()
        .map(|month| CompositeMonthPoint {
            month_label: month_label(month),
            revenue: value_for(revenue, month),
            sales: value_for(sales, month),
            orders: value_for(orders, month),
        })
        .collect()
}

/// Jan..Dec, then any other referenced month index in ascending order.
fn canonical_months(sequences: &[&[MonthlyMetric]]) -> Vec<i64> {
    let mut extra: Vec<i64> = sequences
        .iter()
        .flat_map(|rows| rows.iter().map(|m| m.month_index))
        .filter(|month| !(1..=12).contains(month))
        .collect();
    extra.sort_unstable();
    extra.dedup();

    (1..=12).chain(extra).collect()
}

/// First value recorded for `month`, `0` when absent or not finite.
fn value_for(rows: &[MonthlyMetric], month: i64) -> f64 {
    rows.iter()
        .find(|m| m.month_index == month)
        .map(|m| m.value)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
