//! Revenue summary endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use common::VendorId;
use domain::{Period, RevenueSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct ArtisanSummaryQuery {
    pub vendor_id: Uuid,
    pub period: String,
}

#[derive(Deserialize)]
pub struct PlatformSummaryQuery {
    pub period: String,
}

#[derive(Serialize)]
pub struct RevenueSummaryResponse {
    pub period: String,
    pub start: String,
    pub end: String,
    pub total_gross_cents: i64,
    pub total_commission_cents: i64,
    pub total_earnings_cents: i64,
    pub order_count: u64,
    pub average_order_value_cents: i64,
    pub promotional_spend_cents: i64,
    pub net_earnings_cents: i64,
    pub skipped_records: u64,
}

impl From<RevenueSummary> for RevenueSummaryResponse {
    fn from(summary: RevenueSummary) -> Self {
        RevenueSummaryResponse {
            period: summary.period.to_string(),
            start: summary.start.to_rfc3339(),
            end: summary.end.to_rfc3339(),
            total_gross_cents: summary.total_gross.cents(),
            total_commission_cents: summary.total_commission.cents(),
            total_earnings_cents: summary.total_earnings.cents(),
            order_count: summary.order_count,
            average_order_value_cents: summary.average_order_value.cents(),
            promotional_spend_cents: summary.promotional_spend.cents(),
            net_earnings_cents: summary.net_earnings.cents(),
            skipped_records: summary.skipped_records,
        }
    }
}

/// GET /revenue/artisan/summary — one vendor's revenue over a period.
#[tracing::instrument(skip(state, query))]
pub async fn artisan_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArtisanSummaryQuery>,
) -> Result<Json<RevenueSummaryResponse>, ApiError> {
    let period = parse_period(&query.period)?;
    let summary = state
        .reports
        .vendor_summary(VendorId::from_uuid(query.vendor_id), period)
        .await?;
    Ok(Json(summary.into()))
}

/// GET /revenue/platform/summary — platform-wide revenue over a period.
#[tracing::instrument(skip(state, query))]
pub async fn platform_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlatformSummaryQuery>,
) -> Result<Json<RevenueSummaryResponse>, ApiError> {
    let period = parse_period(&query.period)?;
    let summary = state.reports.platform_summary(period).await?;
    Ok(Json(summary.into()))
}

fn parse_period(value: &str) -> Result<Period, ApiError> {
    value
        .parse::<Period>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}
