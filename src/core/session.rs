//! Interactive flow: pick a region, pick a place, ask for a score.
//!
//! ```text
//! Idle -> RegionSelected -> PlaceSelected -> Scoring -> Result | Error
//!                                  ^                          |
//!                                  +---- select_place --------+
//! ```

use crate::core::service::HomeScoreService;
use crate::domain::model::{Place, PlaceIndex, Region, ScoreReport};
use crate::domain::ports::StatsSource;
use crate::utils::error::{HomeScoreError, Result};

#[derive(Debug, Clone)]
pub enum SessionState {
    Idle,
    RegionSelected {
        region: Region,
        places: PlaceIndex,
    },
    PlaceSelected {
        region: Region,
        places: PlaceIndex,
        place: Place,
    },
    Scoring {
        region: Region,
        places: PlaceIndex,
        place: Place,
    },
    Result {
        region: Region,
        places: PlaceIndex,
        place: Place,
        report: ScoreReport,
    },
    Error {
        region: Region,
        places: PlaceIndex,
        place: Place,
        message: String,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::RegionSelected { .. } => "region_selected",
            Self::PlaceSelected { .. } => "place_selected",
            Self::Scoring { .. } => "scoring",
            Self::Result { .. } => "result",
            Self::Error { .. } => "error",
        }
    }

    fn region_and_places(&self) -> Option<(&Region, &PlaceIndex)> {
        match self {
            Self::Idle => None,
            Self::RegionSelected { region, places }
            | Self::PlaceSelected { region, places, .. }
            | Self::Scoring { region, places, .. }
            | Self::Result { region, places, .. }
            | Self::Error { region, places, .. } => Some((region, places)),
        }
    }
}

pub struct Session<'a, S: StatsSource> {
    service: &'a HomeScoreService<S>,
    state: SessionState,
}

impl<'a, S: StatsSource> Session<'a, S> {
    pub fn new(service: &'a HomeScoreService<S>) -> Self {
        Self {
            service,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn places(&self) -> Option<&PlaceIndex> {
        self.state.region_and_places().map(|(_, places)| places)
    }

    /// Loads the places of a region, discarding any previous selection.
    /// On failure the session is left as it was.
    pub async fn select_region(&mut self, name: &str) -> Result<&PlaceIndex> {
        let (region, places) = self.service.places_in(name).await?;
        tracing::debug!("Session region -> {} ({} places)", region.name, places.len());
        self.state = SessionState::RegionSelected { region, places };
        self.places().ok_or_else(|| unreachable_state("region_selected"))
    }

    /// Valid in any state after a region has been chosen.
    pub fn select_place(&mut self, normalized_name: &str) -> Result<&Place> {
        let (region, places) = self.state.region_and_places().ok_or_else(|| HomeScoreError::Config {
            field: "session".to_string(),
            message: "select a region before selecting a place".to_string(),
        })?;

        let place = places
            .get(normalized_name)
            .cloned()
            .ok_or_else(|| HomeScoreError::DataUnavailable {
                field: "place".to_string(),
                subject: format!("'{}' in {}", normalized_name, region.name),
            })?;

        self.state = SessionState::PlaceSelected {
            region: region.clone(),
            places: places.clone(),
            place,
        };

        match &self.state {
            SessionState::PlaceSelected { place, .. } => Ok(place),
            _ => Err(unreachable_state("place_selected")),
        }
    }

    /// Scores the selected place. Service errors move the session to `Error`
    /// with a user-facing message and are also returned.
    pub async fn calculate(&mut self) -> Result<&ScoreReport> {
        let (region, places, place) = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::PlaceSelected { region, places, place }
            | SessionState::Scoring { region, places, place }
            | SessionState::Result { region, places, place, .. }
            | SessionState::Error { region, places, place, .. } => (region, places, place),
            other => {
                let state = other.name();
                self.state = other;
                return Err(HomeScoreError::Config {
                    field: "session".to_string(),
                    message: format!("cannot calculate a score from state '{}'", state),
                });
            }
        };

        self.state = SessionState::Scoring {
            region: region.clone(),
            places: places.clone(),
            place: place.clone(),
        };

        let outcome = self.service.score_place(&region, &place).await;
        match outcome {
            Ok(report) => {
                self.state = SessionState::Result {
                    region,
                    places,
                    place,
                    report,
                };
                match &self.state {
                    SessionState::Result { report, .. } => Ok(report),
                    _ => Err(unreachable_state("result")),
                }
            }
            Err(e) => {
                tracing::warn!("Scoring {} failed: {}", place.full_name, e);
                self.state = SessionState::Error {
                    region,
                    places,
                    place,
                    message: e.user_friendly_message(),
                };
                Err(e)
            }
        }
    }
}

fn unreachable_state(expected: &str) -> HomeScoreError {
    HomeScoreError::Config {
        field: "session".to_string(),
        message: format!("session did not reach state '{}'", expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::regions::RegionTable;
    use crate::core::scoring::Scaling;
    use crate::domain::model::{PlaceMetrics, PlaceRecord};
    use async_trait::async_trait;

    struct FakeSource;

    #[async_trait]
    impl StatsSource for FakeSource {
        async fn list_regions(&self) -> Result<Vec<String>> {
            Ok(vec!["California".to_string()])
        }

        async fn list_places(&self, region_code: &str) -> Result<Vec<PlaceRecord>> {
            Ok(vec![
                PlaceRecord {
                    full_name: format!("Springfield city, {}", region_code),
                    place_id: "12345".to_string(),
                },
                PlaceRecord {
                    full_name: format!("Nowhere CDP, {}", region_code),
                    place_id: "00000".to_string(),
                },
            ])
        }

        async fn fetch_metrics(&self, _region_code: &str, place_id: &str) -> Result<PlaceMetrics> {
            if place_id == "00000" {
                return Err(HomeScoreError::DataUnavailable {
                    field: "median home value".to_string(),
                    subject: place_id.to_string(),
                });
            }
            Ok(PlaceMetrics {
                median_home_value: 500_000,
                median_household_income: 100_000,
            })
        }
    }

    fn service() -> HomeScoreService<FakeSource> {
        HomeScoreService::new(FakeSource, RegionTable::default(), Scaling::SingleSample)
    }

    #[tokio::test]
    async fn test_full_flow() {
        let svc = service();
        let mut session = Session::new(&svc);
        assert_eq!(session.state().name(), "idle");

        session.select_region("California").await.unwrap();
        assert_eq!(session.state().name(), "region_selected");

        session.select_place("Springfield").unwrap();
        assert_eq!(session.state().name(), "place_selected");

        let report = session.calculate().await.unwrap();
        assert_eq!(report.score.unwrap().value, 3.0);
        assert_eq!(session.state().name(), "result");
    }

    #[tokio::test]
    async fn test_error_then_new_place() {
        let svc = service();
        let mut session = Session::new(&svc);
        session.select_region("California").await.unwrap();
        session.select_place("Nowhere").unwrap();

        assert!(session.calculate().await.is_err());
        match session.state() {
            SessionState::Error { message, .. } => assert!(message.contains("Unable to retrieve data")),
            other => panic!("unexpected state {}", other.name()),
        }

        session.select_place("Springfield").unwrap();
        assert_eq!(session.state().name(), "place_selected");
        assert!(session.calculate().await.is_ok());
    }

    #[tokio::test]
    async fn test_interrupted_scoring_can_be_retried() {
        let svc = service();
        let mut session = Session::new(&svc);
        session.select_region("California").await.unwrap();
        session.select_place("Springfield").unwrap();

        // A dropped calculate() future leaves the session in Scoring.
        let SessionState::PlaceSelected { region, places, place } =
            std::mem::replace(&mut session.state, SessionState::Idle)
        else {
            panic!("expected place_selected");
        };
        session.state = SessionState::Scoring { region, places, place };
        assert_eq!(session.state().name(), "scoring");

        let report = session.calculate().await.unwrap();
        assert_eq!(report.place.place_id, "12345");
        assert_eq!(session.state().name(), "result");
    }

    #[tokio::test]
    async fn test_place_before_region_is_rejected() {
        let svc = service();
        let mut session = Session::new(&svc);
        assert!(session.select_place("Springfield").is_err());
        assert!(session.calculate().await.is_err());
        assert_eq!(session.state().name(), "idle");
    }

    #[tokio::test]
    async fn test_unknown_region_keeps_previous_state() {
        let svc = service();
        let mut session = Session::new(&svc);
        session.select_region("California").await.unwrap();
        assert!(session.select_region("Atlantis").await.is_err());
        assert_eq!(session.state().name(), "region_selected");
    }
}
