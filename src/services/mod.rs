//! Stats fetching and the dashboard aggregation built on top of it.

pub mod categories;
pub mod dashboard;
pub mod metrics;
pub mod series;
pub mod stats;
