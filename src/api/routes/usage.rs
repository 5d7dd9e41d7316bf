//! Usage Report Route
//!
//! - GET /api/reports/usage?month=YYYY-MM
//!
//! Resolves the month to a unix-second window, queries the usage API with
//! the server-held admin key and returns the raw buckets. Aggregation into
//! totals happens in the SPA.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{UsageQuery, UsageReportResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::reports::month_window;

/// GET /api/reports/usage
pub async fn usage_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsageQuery>,
) -> ApiResult<Json<UsageReportResponse>> {
    let (start_time, end_time) = month_window(&query.month)?;

    let buckets = state
        .reports()?
        .completions_usage(start_time, end_time)
        .await?;

    tracing::debug!(month = %query.month, buckets = buckets.len(), "Fetched usage report");

    Ok(Json(UsageReportResponse {
        month: query.month,
        start_time,
        end_time,
        buckets,
    }))
}
