use crate::core::normalizer::index_places;
use crate::core::regions::RegionTable;
use crate::core::scoring::{self, Scaling};
use crate::domain::model::{Interpretation, Place, PlaceIndex, PlaceMetrics, Region, ScoreReport};
use crate::domain::ports::StatsSource;
use crate::utils::error::Result;

/// Region lookup, place listing and scoring on top of a [`StatsSource`].
///
/// Calls are awaited one after another; nothing here runs concurrently.
pub struct HomeScoreService<S: StatsSource> {
    source: S,
    regions: RegionTable,
    scaling: Scaling,
}

impl<S: StatsSource> HomeScoreService<S> {
    pub fn new(source: S, regions: RegionTable, scaling: Scaling) -> Self {
        Self {
            source,
            regions,
            scaling,
        }
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Region names known to the service, sorted.
    pub async fn list_regions(&self) -> Result<Vec<String>> {
        let mut names = self.source.list_regions().await?;
        names.sort();
        tracing::debug!("Service lists {} regions", names.len());
        Ok(names)
    }

    pub async fn list_places(&self, region_code: &str) -> Result<PlaceIndex> {
        let records = self.source.list_places(region_code).await?;
        let index = index_places(records);

        if !index.collisions().is_empty() {
            tracing::warn!(
                "{} places in region {} share a name with a later place and were replaced",
                index.collisions().len(),
                region_code
            );
        }
        tracing::debug!("Region {} has {} distinct place names", region_code, index.len());

        Ok(index)
    }

    /// Resolves the region name first, so an unknown region never reaches the
    /// network.
    pub async fn places_in(&self, region_name: &str) -> Result<(Region, PlaceIndex)> {
        let region = self.regions.resolve(region_name)?;
        let places = self.list_places(&region.code).await?;
        Ok((region, places))
    }

    pub async fn fetch_metrics(&self, region_code: &str, place_id: &str) -> Result<PlaceMetrics> {
        self.source.fetch_metrics(region_code, place_id).await
    }

    pub async fn score_place(&self, region: &Region, place: &Place) -> Result<ScoreReport> {
        tracing::info!("Calculating score for {}, {}", place.normalized_name, region.name);

        let metrics = self.fetch_metrics(&region.code, &place.place_id).await?;
        let score = scoring::score(
            Some(metrics.median_home_value),
            Some(metrics.median_household_income),
            &self.scaling,
        );

        match &score {
            Some(s) => tracing::debug!("Ratio {:.3} scaled {:.3} score {:.3}", s.ratio, s.scaled, s.value),
            None => tracing::warn!("Cannot score {}: income is zero or data is negative", place.full_name),
        }

        Ok(ScoreReport {
            region: region.clone(),
            place: place.clone(),
            metrics,
            interpretation: score.map(|s| Interpretation::for_score(s.value)),
            score,
            generated_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PlaceRecord;
    use crate::utils::error::HomeScoreError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSource {
        calls: AtomicUsize,
        income: i64,
    }

    impl FakeSource {
        fn new(income: i64) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                income,
            }
        }
    }

    #[async_trait]
    impl StatsSource for FakeSource {
        async fn list_regions(&self) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["Texas".to_string(), "Alabama".to_string(), "Puerto Rico".to_string()])
        }

        async fn list_places(&self, _region_code: &str) -> Result<Vec<PlaceRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![PlaceRecord {
                full_name: "Springfield city, California".to_string(),
                place_id: "12345".to_string(),
            }])
        }

        async fn fetch_metrics(&self, _region_code: &str, _place_id: &str) -> Result<PlaceMetrics> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PlaceMetrics {
                median_home_value: 500_000,
                median_household_income: self.income,
            })
        }
    }

    fn service(income: i64) -> HomeScoreService<FakeSource> {
        HomeScoreService::new(FakeSource::new(income), RegionTable::default(), Scaling::default())
    }

    #[test]
    fn test_list_regions_sorted() {
        let names = tokio_test::block_on(service(100_000).list_regions()).unwrap();
        assert_eq!(names, vec!["Alabama", "Puerto Rico", "Texas"]);
    }

    #[test]
    fn test_unknown_region_makes_no_calls() {
        let svc = service(100_000);
        let err = tokio_test::block_on(svc.places_in("Atlantis")).unwrap_err();
        assert!(matches!(err, HomeScoreError::UnknownRegion { .. }));
        assert_eq!(svc.source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_score_place() {
        let svc = service(100_000);
        let (region, places) = tokio_test::block_on(svc.places_in("California")).unwrap();
        assert_eq!(region.code, "06");

        let place = places.get("Springfield").unwrap();
        let report = tokio_test::block_on(svc.score_place(&region, place)).unwrap();

        let score = report.score.unwrap();
        assert_eq!(score.ratio, 5.0);
        assert!((score.value - 3.5).abs() < 1e-9);
        assert_eq!(report.interpretation, Some(Interpretation::Good));
    }

    #[test]
    fn test_zero_income_reports_no_score() {
        let svc = service(0);
        let (region, places) = tokio_test::block_on(svc.places_in("California")).unwrap();
        let place = places.get("Springfield").unwrap();
        let report = tokio_test::block_on(svc.score_place(&region, place)).unwrap();
        assert!(report.score.is_none());
        assert!(report.interpretation.is_none());
    }
}
