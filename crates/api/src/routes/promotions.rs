//! Promotional placement endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use common::Coordinates;
use domain::{RankedPlacement, ViewerContext};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

/// Placements returned when the caller doesn't cap the list.
const DEFAULT_PLACEMENT_LIMIT: usize = 10;

#[derive(Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
    pub user_lat: Option<f64>,
    pub user_lng: Option<f64>,
}

#[derive(Deserialize)]
pub struct SponsoredQuery {
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub search_query: Option<String>,
    pub user_lat: Option<f64>,
    pub user_lng: Option<f64>,
}

#[derive(Serialize)]
pub struct PlacementResponse {
    pub feature_id: String,
    pub product_id: String,
    pub product_name: String,
    pub vendor_id: String,
    pub feature_type: String,
    pub price_cents: i64,
    pub priority: u8,
    pub distance: Option<f64>,
    pub relevance_score: Option<f64>,
    pub remaining_days: i64,
}

impl From<RankedPlacement> for PlacementResponse {
    fn from(placement: RankedPlacement) -> Self {
        PlacementResponse {
            feature_id: placement.feature_id.to_string(),
            product_id: placement.product_id.to_string(),
            product_name: placement.product_name,
            vendor_id: placement.vendor_id.to_string(),
            feature_type: placement.feature_type.to_string(),
            price_cents: placement.price.cents(),
            priority: placement.priority,
            distance: placement.distance,
            relevance_score: placement.relevance_score,
            remaining_days: placement.remaining_days,
        }
    }
}

fn viewer(lat: Option<f64>, lng: Option<f64>) -> ViewerContext {
    let location = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
        _ => None,
    };
    ViewerContext { location }
}

/// GET /promotional/products/featured — ranked featured placements.
#[tracing::instrument(skip(state, query))]
pub async fn featured(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeaturedQuery>,
) -> Result<Json<Vec<PlacementResponse>>, ApiError> {
    let ranked = state
        .placements
        .featured(
            viewer(query.user_lat, query.user_lng),
            query.limit.unwrap_or(DEFAULT_PLACEMENT_LIMIT),
        )
        .await?;
    Ok(Json(ranked.into_iter().map(Into::into).collect()))
}

/// GET /promotional/products/sponsored — ranked sponsored placements.
#[tracing::instrument(skip(state, query))]
pub async fn sponsored(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SponsoredQuery>,
) -> Result<Json<Vec<PlacementResponse>>, ApiError> {
    let ranked = state
        .placements
        .sponsored(
            viewer(query.user_lat, query.user_lng),
            query.limit.unwrap_or(DEFAULT_PLACEMENT_LIMIT),
            query.category,
            query.search_query,
        )
        .await?;
    Ok(Json(ranked.into_iter().map(Into::into).collect()))
}
