use crate::domain::model::{PlaceMetrics, PlaceRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read-only access to the remote statistics service.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Region names in service order.
    async fn list_regions(&self) -> Result<Vec<String>>;

    /// Place rows of one region in service order.
    async fn list_places(&self, region_code: &str) -> Result<Vec<PlaceRecord>>;

    async fn fetch_metrics(&self, region_code: &str, place_id: &str) -> Result<PlaceMetrics>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn regions_dataset(&self) -> &str;
    fn places_dataset(&self) -> &str;
    fn metrics_dataset(&self) -> &str;
    fn home_value_variable(&self) -> &str;
    fn income_variable(&self) -> &str;
}
