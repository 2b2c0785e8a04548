//! Dashboard routes: chart-ready analytics for the admin overview page.

use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::models::dashboard::DashboardView;
use crate::models::stats::StatsSnapshot;
use crate::services::dashboard;
use crate::services::stats::PgStatsSource;
use crate::AppState;

const MIN_YEAR: i32 = 1970;
const MAX_YEAR: i32 = 9999;

/// Query parameters for the overview.
#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    /// Calendar year of the monthly series; defaults to the current year.
    pub year: Option<i32>,
}

impl OverviewQuery {
    fn resolve_year(&self) -> Result<i32, AppError> {
        let year = self.year.unwrap_or_else(|| Utc::now().year());
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(AppError::Validation(format!(
                "year must be between {MIN_YEAR} and {MAX_YEAR}"
            )));
        }
        Ok(year)
    }
}

/// GET /api/v1/dashboard/overview — live stats shaped for the dashboard.
pub async fn overview(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let year = query.resolve_year()?;
    let source = PgStatsSource::new(
        &state.db,
        year,
        state.config.recent_orders_limit,
        Duration::from_millis(state.config.stats_fetch_timeout_ms),
    );
    let view = dashboard::get_overview(&source).await;
    Ok(ApiResponse::success(view))
}

/// POST /api/v1/dashboard/aggregate — shape caller-supplied raw stats.
pub async fn aggregate(Json(snapshot): Json<StatsSnapshot>) -> Json<ApiResponse<DashboardView>> {
    ApiResponse::success(dashboard::build_view(&snapshot))
}
