//! Promotional placement serving.

use std::sync::Arc;

use chrono::Utc;
use domain::{
    Candidate, FeatureType, PromotionalFeature, RankedPlacement, ViewerContext, rank_featured,
    rank_sponsored,
};
use store::{ProductLookup, PromotionPool, VendorDirectory};

use crate::error::ServiceError;

/// Serves ranked featured/sponsored product placements.
pub struct PromoPlacements {
    pool: Arc<dyn PromotionPool>,
    products: Arc<dyn ProductLookup>,
    vendors: Arc<dyn VendorDirectory>,
}

impl PromoPlacements {
    /// Creates the flow over the injected collaborators.
    pub fn new(
        pool: Arc<dyn PromotionPool>,
        products: Arc<dyn ProductLookup>,
        vendors: Arc<dyn VendorDirectory>,
    ) -> Self {
        Self {
            pool,
            products,
            vendors,
        }
    }

    /// Returns ranked featured placements for the viewer.
    #[tracing::instrument(skip(self, viewer))]
    pub async fn featured(
        &self,
        viewer: ViewerContext,
        limit: usize,
    ) -> Result<Vec<RankedPlacement>, ServiceError> {
        let records = self.pool.active_records(FeatureType::FeaturedProduct).await?;
        let candidates = self.join_candidates(records).await?;
        let ranked = rank_featured(&candidates, &viewer, limit, Utc::now());
        metrics::counter!("promo_placements_served_total").increment(ranked.len() as u64);
        Ok(ranked)
    }

    /// Returns ranked sponsored placements for the viewer, optionally
    /// scoped to a category and search query.
    #[tracing::instrument(skip(self, viewer))]
    pub async fn sponsored(
        &self,
        viewer: ViewerContext,
        limit: usize,
        category: Option<String>,
        search_query: Option<String>,
    ) -> Result<Vec<RankedPlacement>, ServiceError> {
        let records = self
            .pool
            .active_records(FeatureType::SponsoredProduct)
            .await?;
        let candidates = self.join_candidates(records).await?;
        let ranked = rank_sponsored(
            &candidates,
            &viewer,
            limit,
            category.as_deref(),
            search_query.as_deref(),
            Utc::now(),
        );
        metrics::counter!("promo_placements_served_total").increment(ranked.len() as u64);
        Ok(ranked)
    }

    /// Joins records with their product and vendor location. Records whose
    /// product no longer resolves are dropped silently; a missing vendor
    /// profile only costs the candidate its coordinates.
    async fn join_candidates(
        &self,
        records: Vec<PromotionalFeature>,
    ) -> Result<Vec<Candidate>, ServiceError> {
        let mut candidates = Vec::with_capacity(records.len());
        for feature in records {
            let Some(product) = self.products.get(&feature.product_id).await? else {
                tracing::debug!(promotion = %feature.id, "dropping record with unresolvable product");
                continue;
            };
            let vendor_location = self
                .vendors
                .get(feature.vendor_id)
                .await?
                .and_then(|vendor| vendor.location);
            candidates.push(Candidate {
                feature,
                product,
                vendor_location,
            });
        }
        Ok(candidates)
    }
}
