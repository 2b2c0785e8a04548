//! Dashboard overview: concurrent stats fetches feeding a pure aggregator.

use crate::errors::AppError;
use crate::models::dashboard::{DashboardSummary, DashboardView};
use crate::models::stats::StatsSnapshot;
use crate::services::categories::colorize_categories;
use crate::services::metrics;
use crate::services::series::merge_monthly_series;
use crate::services::stats::StatsSource;

/// Fetch every metric concurrently. Failed fetches are logged and left
/// out of the snapshot instead of failing the whole overview.
pub async fn collect_snapshot<S: StatsSource + Sync>(source: &S) -> StatsSnapshot {
    let (
        total_revenue,
        order_stats,
        monthly_revenue,
        monthly_orders,
        monthly_sales,
        category_stats,
        products,
        users,
    ) = tokio::join!(
        source.total_revenue(),
        source.order_stats(),
        source.monthly_revenue(),
        source.monthly_orders(),
        source.monthly_sales(),
        source.category_stats(),
        source.products(),
        source.users(),
    );

    StatsSnapshot {
        total_revenue: settle("total_revenue", total_revenue),
        order_stats: settle("order_stats", order_stats),
        monthly_revenue: settle("monthly_revenue", monthly_revenue),
        monthly_orders: settle("monthly_orders", monthly_orders),
        monthly_sales: settle("monthly_sales", monthly_sales),
        category_stats: settle("category_stats", category_stats),
        products: settle("products", products),
        users: settle("users", users),
    }
}

fn settle<T>(metric: &'static str, result: Result<T, AppError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_timeout() => {
            tracing::warn!(metric, error = %e, "Stats fetch timed out, rendering without it");
            None
        }
        Err(e) => {
            tracing::error!(metric, error = %e, "Stats fetch failed, rendering without it");
            None
        }
    }
}

/// Derive the full dashboard view from a (possibly partial) snapshot.
pub fn build_view(snapshot: &StatsSnapshot) -> DashboardView {
    let revenue = snapshot.monthly_revenue.as_ref().and_then(|r| r.metrics());
    let sales = snapshot.monthly_sales.as_ref().and_then(|s| s.metrics());
    let orders = snapshot.monthly_orders.as_ref().and_then(|o| o.metrics());

    let categories = colorize_categories(
        snapshot
            .category_stats
            .as_ref()
            .and_then(|c| c.data.as_deref()),
    );

    DashboardView {
        summary: DashboardSummary {
            total_revenue: metrics::compute_total_revenue(
                snapshot.total_revenue.as_ref(),
                snapshot.order_stats.as_ref(),
            ),
            total_orders: metrics::total_orders(snapshot.order_stats.as_ref()),
            total_products: metrics::total_products(snapshot.products.as_ref()),
            total_users: metrics::total_users(snapshot.users.as_ref()),
        },
        monthly_series: merge_monthly_series(
            revenue.as_deref(),
            sales.as_deref(),
            orders.as_deref(),
        ),
        categories,
        recent_orders: metrics::recent_orders(snapshot.order_stats.as_ref()),
    }
}

/// Fetch and aggregate in one step.
pub async fn get_overview<S: StatsSource + Sync>(source: &S) -> DashboardView {
    let snapshot = collect_snapshot(source).await;
    let view = build_view(&snapshot);
    tracing::debug!(
        months = view.monthly_series.len(),
        recent_orders = view.recent_orders.len(),
        has_categories = view.categories.is_some(),
        "Dashboard overview built"
    );
    view
}
