//! Revenue reporting flows.

use std::sync::Arc;

use chrono::Utc;
use common::VendorId;
use domain::{Period, RevenueSummary, summarize_platform_revenue, summarize_vendor_revenue};
use store::{OrderStore, PromotionPool};

use crate::error::ServiceError;

/// Vendor and platform revenue summaries.
pub struct RevenueReports {
    store: Arc<dyn OrderStore>,
    promotions: Arc<dyn PromotionPool>,
}

impl RevenueReports {
    /// Creates the flow over the injected collaborators.
    pub fn new(store: Arc<dyn OrderStore>, promotions: Arc<dyn PromotionPool>) -> Self {
        Self { store, promotions }
    }

    /// Summarizes one vendor's revenue and promotional spend over a period.
    #[tracing::instrument(skip(self))]
    pub async fn vendor_summary(
        &self,
        vendor_id: VendorId,
        period: Period,
    ) -> Result<RevenueSummary, ServiceError> {
        let orders = self.store.list_by_vendor(vendor_id).await?;
        let promotions = self.promotions.paid_records(Some(vendor_id)).await?;
        Ok(summarize_vendor_revenue(
            vendor_id,
            period,
            Utc::now(),
            &orders,
            &promotions,
        ))
    }

    /// Summarizes platform-wide revenue over a period, for administrative
    /// reporting.
    #[tracing::instrument(skip(self))]
    pub async fn platform_summary(&self, period: Period) -> Result<RevenueSummary, ServiceError> {
        let orders = self.store.list_all().await?;
        let promotions = self.promotions.paid_records(None).await?;
        Ok(summarize_platform_revenue(
            period,
            Utc::now(),
            &orders,
            &promotions,
        ))
    }
}
