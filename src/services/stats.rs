//! Stats fetchers: one query per dashboard metric.

use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::stats::{
    CategoryRow, CategoryStats, Envelope, MonthlyOrders, MonthlyOrdersRow, MonthlyRevenue,
    MonthlyRevenueRow, MonthlySales, MonthlySalesRow, OrderRecord, OrderStats, OrderStatsData,
    ProductList, TotalRevenue, TotalRevenueData, UserList, UserListData,
};

/// Source of the raw responses behind the dashboard.
///
/// Each metric is fetched independently; a failure of one says nothing about
/// the others.
pub trait StatsSource {
    fn total_revenue(&self) -> impl Future<Output = Result<TotalRevenue, AppError>> + Send;
    fn order_stats(&self) -> impl Future<Output = Result<OrderStats, AppError>> + Send;
    fn monthly_revenue(&self) -> impl Future<Output = Result<MonthlyRevenue, AppError>> + Send;
    fn monthly_orders(&self) -> impl Future<Output = Result<MonthlyOrders, AppError>> + Send;
    fn monthly_sales(&self) -> impl Future<Output = Result<MonthlySales, AppError>> + Send;
    fn category_stats(&self) -> impl Future<Output = Result<CategoryStats, AppError>> + Send;
    fn products(&self) -> impl Future<Output = Result<ProductList, AppError>> + Send;
    fn users(&self) -> impl Future<Output = Result<UserList, AppError>> + Send;
}

/// PostgreSQL-backed fetchers scoped to one calendar year.
#[derive(Debug, Clone)]
pub struct PgStatsSource<'a> {
    pool: &'a PgPool,
    year: i32,
    recent_orders_limit: i64,
    timeout: Duration,
}

impl<'a> PgStatsSource<'a> {
    pub fn new(pool: &'a PgPool, year: i32, recent_orders_limit: i64, timeout: Duration) -> Self {
        Self {
            pool,
            year,
            recent_orders_limit,
            timeout,
        }
    }

    /// Run a query under the configured deadline.
    async fn bounded<T, F>(&self, metric: &str, query: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        tokio::time::timeout(self.timeout, query)
            .await
            .map_err(|_| AppError::Timeout(format!("{metric} query exceeded {:?}", self.timeout)))?
    }
}

impl StatsSource for PgStatsSource<'_> {
    async fn total_revenue(&self) -> Result<TotalRevenue, AppError> {
        self.bounded("total_revenue", async {
            // Average order amount; the dashboard multiplies it by the order count.
            let average = sqlx::query_scalar::<_, Option<f64>>(
                "SELECT AVG(total_amount)::float8 FROM orders",
            )
            .fetch_one(self.pool)
            .await?;
            Ok::<_, AppError>(Envelope::new(TotalRevenueData {
                total_revenue: average,
            }))
        })
        .await
    }

    async fn order_stats(&self) -> Result<OrderStats, AppError> {
        self.bounded("order_stats", async {
            let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
                .fetch_one(self.pool)
                .await?;

            let recent = sqlx::query_as::<_, RecentOrderRow>(
                r#"
                SELECT o.id, u.name AS customer_name, o.total_amount::float8 AS total_amount, o.status
                FROM orders o
                LEFT JOIN users u ON u.id = o.user_id
                ORDER BY o.created_at DESC
                LIMIT $1
                "#,
            )
            .bind(self.recent_orders_limit)
            .fetch_all(self.pool)
            .await?;

            Ok::<_, AppError>(Envelope::new(OrderStatsData {
                total_orders: Some(total as f64),
                recent_orders: Some(recent.into_iter().map(OrderRecord::from).collect()),
            }))
        })
        .await
    }

    async fn monthly_revenue(&self) -> Result<MonthlyRevenue, AppError> {
        self.bounded("monthly_revenue", async {
            let rows = sqlx::query_as::<_, MonthValueRow>(
                r#"
                SELECT EXTRACT(MONTH FROM created_at)::int8 AS month,
                       SUM(total_amount)::float8 AS value
                FROM orders
                WHERE EXTRACT(YEAR FROM created_at)::int4 = $1
                  AND status <> 'Cancelled'
                GROUP BY 1
                ORDER BY 1
                "#,
            )
            .bind(self.year)
            .fetch_all(self.pool)
            .await?;

            Ok::<_, AppError>(Envelope::new(
                rows.into_iter()
                    .map(|r| MonthlyRevenueRow {
                        month: r.month,
                        revenue: r.value,
                    })
                    .collect(),
            ))
        })
        .await
    }

    async fn monthly_orders(&self) -> Result<MonthlyOrders, AppError> {
        self.bounded("monthly_orders", async {
            let rows = sqlx::query_as::<_, MonthValueRow>(
                r#"
                SELECT EXTRACT(MONTH FROM created_at)::int8 AS month,
                       COUNT(*)::float8 AS value
                FROM orders
                WHERE EXTRACT(YEAR FROM created_at)::int4 = $1
                GROUP BY 1
                ORDER BY 1
                "#,
            )
            .bind(self.year)
            .fetch_all(self.pool)
            .await?;

            Ok::<_, AppError>(Envelope::new(
                rows.into_iter()
                    .map(|r| MonthlyOrdersRow {
                        month: r.month,
                        total_orders: r.value,
                    })
                    .collect(),
            ))
        })
        .await
    }

    async fn monthly_sales(&self) -> Result<MonthlySales, AppError> {
        self.bounded("monthly_sales", async {
            let rows = sqlx::query_as::<_, MonthValueRow>(
                r#"
                SELECT EXTRACT(MONTH FROM o.created_at)::int8 AS month,
                       SUM(oi.quantity)::float8 AS value
                FROM order_items oi
                INNER JOIN orders o ON o.id = oi.order_id
                WHERE EXTRACT(YEAR FROM o.created_at)::int4 = $1
                  AND o.status <> 'Cancelled'
                GROUP BY 1
                ORDER BY 1
                "#,
            )
            .bind(self.year)
            .fetch_all(self.pool)
            .await?;

            Ok::<_, AppError>(Envelope::new(
                rows.into_iter()
                    .map(|r| MonthlySalesRow {
                        month: r.month,
                        total_sales: r.value,
                    })
                    .collect(),
            ))
        })
        .await
    }

    async fn category_stats(&self) -> Result<CategoryStats, AppError> {
        self.bounded("category_stats", async {
            let rows = sqlx::query_as::<_, CategoryCountRow>(
                r#"
                SELECT c.name AS category, COUNT(p.id) AS count
                FROM categories c
                LEFT JOIN products p ON p.category_id = c.id
                GROUP BY c.id, c.name
                ORDER BY c.name
                "#,
            )
            .fetch_all(self.pool)
            .await?;

            Ok::<_, AppError>(Envelope::new(
                rows.into_iter()
                    .map(|r| CategoryRow {
                        id: Some(r.category),
                        count: Some(r.count as f64),
                        ..CategoryRow::default()
                    })
                    .collect(),
            ))
        })
        .await
    }

    async fn products(&self) -> Result<ProductList, AppError> {
        self.bounded("products", async {
            let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
                .fetch_one(self.pool)
                .await?;
            Ok::<_, AppError>(ProductList::counted(usize::try_from(count).unwrap_or(0)))
        })
        .await
    }

    async fn users(&self) -> Result<UserList, AppError> {
        self.bounded("users", async {
            let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
                .fetch_one(self.pool)
                .await?;
            Ok::<_, AppError>(Envelope::new(UserListData {
                total_users: Some(count as f64),
            }))
        })
        .await
    }
}

/// Intermediate row for the per-month aggregations.
#[derive(Debug, sqlx::FromRow)]
struct MonthValueRow {
    month: Option<i64>,
    value: Option<f64>,
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryCountRow {
    category: String,
    count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct RecentOrderRow {
    id: Uuid,
    customer_name: Option<String>,
    total_amount: Option<f64>,
    status: String,
}

impl From<RecentOrderRow> for OrderRecord {
    fn from(row: RecentOrderRow) -> Self {
        Self {
            id: Some(row.id.to_string()),
            user: None,
            customer_name: row.customer_name,
            total_price: row.total_amount,
            status: Some(row.status),
        }
    }
}
