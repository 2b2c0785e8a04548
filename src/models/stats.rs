//! Raw stats responses as the shop backend shapes them.
//!
//! Every field is optional and parsed leniently: a value that is missing,
//! `null`, non-numeric or non-finite becomes `None`, and so does a nested
//! object or list of the wrong shape. The aggregator resolves `None` to its
//! default. Nothing here rejects a payload because of a single odd field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The `{ data?: T }` wrapper every stats endpoint responds with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Envelope<T> {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data: Some(data) }
    }

    pub fn empty() -> Self {
        Self { data: None }
    }
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalRevenueData {
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_revenue: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatsData {
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_orders: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub recent_orders: Option<Vec<OrderRecord>>,
}

/// One order as listed by the order-stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Only a populated `{ name }` object counts; a bare user id is `None`.
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<OrderCustomer>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_name: Option<String>,
    #[serde(default, alias = "totalAmount", deserialize_with = "lenient_number")]
    pub total_price: Option<f64>,
    #[serde(default, alias = "orderStatus", deserialize_with = "lenient_string")]
    pub status: Option<String>,
}

impl OrderRecord {
    /// Populated user name first, then the flat `customerName` field.
    pub fn customer(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .or(self.customer_name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderCustomer {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MonthlyRevenueRow {
    #[serde(rename = "_id", default, deserialize_with = "lenient_month")]
    pub month: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub revenue: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOrdersRow {
    #[serde(rename = "_id", default, deserialize_with = "lenient_month")]
    pub month: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_orders: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySalesRow {
    #[serde(rename = "_id", default, deserialize_with = "lenient_month")]
    pub month: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_sales: Option<f64>,
}

/// Product count for one category. Backends disagree on the field names,
/// so both spellings of key and total are accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    #[serde(rename = "_id", default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_products: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub count: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListData {
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_users: Option<f64>,
}

pub type TotalRevenue = Envelope<TotalRevenueData>;
pub type OrderStats = Envelope<OrderStatsData>;
pub type MonthlyRevenue = Envelope<Vec<MonthlyRevenueRow>>;
pub type MonthlyOrders = Envelope<Vec<MonthlyOrdersRow>>;
pub type MonthlySales = Envelope<Vec<MonthlySalesRow>>;
pub type CategoryStats = Envelope<Vec<CategoryRow>>;
pub type UserList = Envelope<UserListData>;

/// One point of a single-metric monthly sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyMetric {
    pub month_index: i64,
    pub value: f64,
}

/// A row of a monthly stats response.
pub trait MonthlyRow {
    fn month(&self) -> Option<i64>;
    fn value(&self) -> Option<f64>;
}

impl MonthlyRow for MonthlyRevenueRow {
    fn month(&self) -> Option<i64> {
        self.month
    }

    fn value(&self) -> Option<f64> {
        self.revenue
    }
}

impl MonthlyRow for MonthlyOrdersRow {
    fn month(&self) -> Option<i64> {
        self.month
    }

    fn value(&self) -> Option<f64> {
        self.total_orders
    }
}

impl MonthlyRow for MonthlySalesRow {
    fn month(&self) -> Option<i64> {
        self.month
    }

    fn value(&self) -> Option<f64> {
        self.total_sales
    }
}

impl<R: MonthlyRow> Envelope<Vec<R>> {
    /// Normalize rows to `MonthlyMetric`s. Rows without a month are dropped
    /// and missing values become `0`. `None` when the response had no data.
    pub fn metrics(&self) -> Option<Vec<MonthlyMetric>> {
        self.data.as_ref().map(|rows| {
            rows.iter()
                .filter_map(|row| {
                    row.month().map(|month_index| MonthlyMetric {
                        month_index,
                        value: row.value().unwrap_or(0.0),
                    })
                })
                .collect()
        })
    }
}

/// Product listing, used only for its length.
///
/// Accepts `{ data: [...] }`, a bare array, or an already counted
/// `{ count: n }` as produced by the database fetcher.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ProductListWire")]
pub struct ProductList {
    pub count: Option<usize>,
}

impl ProductList {
    pub fn counted(count: usize) -> Self {
        Self { count: Some(count) }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProductListWire {
    Bare(Vec<Value>),
    Counted { count: usize },
    Wrapped {
        #[serde(default)]
        data: Option<Vec<Value>>,
    },
}

impl From<ProductListWire> for ProductList {
    fn from(wire: ProductListWire) -> Self {
        let count = match wire {
            ProductListWire::Counted { count } => Some(count),
            ProductListWire::Wrapped { data } => data.map(|items| items.len()),
            ProductListWire::Bare(items) => Some(items.len()),
        };
        Self { count }
    }
}

/// Every raw response the dashboard consumes; any of them may be missing
/// because its fetch failed or is still in flight.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSnapshot {
    #[serde(deserialize_with = "lenient")]
    pub total_revenue: Option<TotalRevenue>,
    #[serde(deserialize_with = "lenient")]
    pub order_stats: Option<OrderStats>,
    #[serde(deserialize_with = "lenient")]
    pub monthly_revenue: Option<MonthlyRevenue>,
    #[serde(deserialize_with = "lenient")]
    pub monthly_orders: Option<MonthlyOrders>,
    #[serde(deserialize_with = "lenient")]
    pub monthly_sales: Option<MonthlySales>,
    #[serde(deserialize_with = "lenient")]
    pub category_stats: Option<CategoryStats>,
    #[serde(deserialize_with = "lenient")]
    pub products: Option<ProductList>,
    #[serde(deserialize_with = "lenient")]
    pub users: Option<UserList>,
}

/// Nested records: anything that does not fit `T` is dropped to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_month<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|n| n.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(n))
        .map(|n| n as i64))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
