//! Placement ranking for featured and sponsored products.
//!
//! Ranking operates on candidates already joined in memory (promotion +
//! product + vendor location), keeping the scoring independent of any
//! storage engine's query language.

use chrono::{DateTime, Utc};
use common::{Coordinates, ProductId, PromotionId, VendorId};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::product::Product;

use super::model::{FeatureType, PromotionalFeature};

/// Base relevance granted to every live sponsored record.
const SPONSORED_BASE_SCORE: f64 = 100.0;

/// Added when the product's category matches the requested one.
const CATEGORY_MATCH_BONUS: f64 = 50.0;

/// Added per search-query token found in the record's keyword list.
const KEYWORD_MATCH_BONUS: f64 = 25.0;

/// Sort-key distance for candidates missing coordinates on either side;
/// ranks them after every located candidate.
const UNLOCATED_DISTANCE: f64 = f64::INFINITY;

/// The viewer requesting placements.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewerContext {
    pub location: Option<Coordinates>,
}

/// A live promotion joined with its product and vendor location.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub feature: PromotionalFeature,
    pub product: Product,
    pub vendor_location: Option<Coordinates>,
}

/// One ranked placement, shaped for the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlacement {
    pub feature_id: PromotionId,
    pub product_id: ProductId,
    pub product_name: String,
    pub vendor_id: VendorId,
    pub feature_type: FeatureType,
    pub price: Money,
    pub priority: u8,

    /// Planar distance to the viewer; None when either side has no
    /// coordinates.
    pub distance: Option<f64>,

    /// Relevance score; populated for sponsored placements only.
    pub relevance_score: Option<f64>,

    /// Whole days until the promotion window closes, for "expires in N
    /// days" display. Never negative.
    pub remaining_days: i64,
}

/// Ranks featured placements: nearest first, then highest priority, then
/// most recently created. Candidates without location data rank after all
/// located ones. Ties preserve input order.
pub fn rank_featured(
    pool: &[Candidate],
    viewer: &ViewerContext,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<RankedPlacement> {
    let mut ranked: Vec<(f64, u8, DateTime<Utc>, RankedPlacement)> = live(pool, now)
        .map(|candidate| {
            let distance = distance_between(viewer.location, candidate.vendor_location);
            (
                distance.unwrap_or(UNLOCATED_DISTANCE),
                candidate.feature.specifications.priority,
                candidate.feature.created_at,
                placement(candidate, distance, None, now),
            )
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then_with(|| b.1.cmp(&a.1))
            .then_with(|| b.2.cmp(&a.2))
    });
    ranked.truncate(limit);
    ranked.into_iter().map(|entry| entry.3).collect()
}

/// Ranks sponsored placements by relevance score (descending), then
/// priority (descending), then distance (ascending). Ties preserve input
/// order.
pub fn rank_sponsored(
    pool: &[Candidate],
    viewer: &ViewerContext,
    limit: usize,
    category: Option<&str>,
    search_query: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<RankedPlacement> {
    let mut ranked: Vec<(f64, u8, f64, RankedPlacement)> = live(pool, now)
        .map(|candidate| {
            let distance = distance_between(viewer.location, candidate.vendor_location);
            let score = relevance_score(candidate, distance, category, search_query);
            (
                score,
                candidate.feature.specifications.priority,
                distance.unwrap_or(UNLOCATED_DISTANCE),
                placement(candidate, distance, Some(score), now),
            )
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then_with(|| b.1.cmp(&a.1))
            .then_with(|| a.2.total_cmp(&b.2))
    });
    ranked.truncate(limit);
    ranked.into_iter().map(|entry| entry.3).collect()
}

/// Candidates that may surface: live promotion, available product.
/// Everything else is dropped silently.
fn live<'a>(
    pool: &'a [Candidate],
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'a Candidate> {
    pool.iter()
        .filter(move |c| c.feature.is_live(now) && c.product.is_active)
}

fn placement(
    candidate: &Candidate,
    distance: Option<f64>,
    relevance_score: Option<f64>,
    now: DateTime<Utc>,
) -> RankedPlacement {
    RankedPlacement {
        feature_id: candidate.feature.id,
        product_id: candidate.product.id.clone(),
        product_name: candidate.product.name.clone(),
        vendor_id: candidate.feature.vendor_id,
        feature_type: candidate.feature.feature_type,
        price: candidate.product.price,
        priority: candidate.feature.specifications.priority,
        distance,
        relevance_score,
        remaining_days: candidate.feature.remaining_days(now),
    }
}

/// Planar approximate distance between viewer and vendor, or None when
/// either side has no coordinates.
fn distance_between(viewer: Option<Coordinates>, vendor: Option<Coordinates>) -> Option<f64> {
    match (viewer, vendor) {
        (Some(a), Some(b)) => {
            let d_lat = a.lat - b.lat;
            let d_lng = a.lng - b.lng;
            Some((d_lat * d_lat + d_lng * d_lng).sqrt() / 1000.0)
        }
        _ => None,
    }
}

fn relevance_score(
    candidate: &Candidate,
    distance: Option<f64>,
    category: Option<&str>,
    search_query: Option<&str>,
) -> f64 {
    let mut score = SPONSORED_BASE_SCORE;

    if let Some(category) = category
        && candidate.product.category.as_deref() == Some(category)
    {
        score += CATEGORY_MATCH_BONUS;
    }

    if let Some(query) = search_query {
        let matches = keyword_overlap(query, &candidate.feature.specifications.keywords);
        score += KEYWORD_MATCH_BONUS * matches as f64;
    }

    if let Some(distance) = distance {
        score += (100.0 - distance * 10.0).max(0.0);
    }

    score
}

/// Counts query tokens present in the keyword list, case-insensitively.
fn keyword_overlap(query: &str, keywords: &[String]) -> usize {
    query
        .split_whitespace()
        .filter(|token| {
            keywords
                .iter()
                .any(|keyword| keyword.eq_ignore_ascii_case(token))
        })
        .count()
}
