use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub normalized_name: String,
    pub full_name: String,
    pub place_id: String,
}

/// One place row as the service returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub full_name: String,
    pub place_id: String,
}

/// Places of one region keyed by normalized name.
///
/// When two places normalize to the same key the later one in service order
/// wins; every displaced entry is kept in `collisions` so callers can tell the
/// lookup was ambiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaceIndex {
    places: BTreeMap<String, Place>,
    collisions: Vec<Place>,
}

impl PlaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the displaced place, if any.
    pub fn insert(&mut self, place: Place) -> Option<&Place> {
        let replaced = self.places.insert(place.normalized_name.clone(), place)?;
        self.collisions.push(replaced);
        self.collisions.last()
    }

    pub fn get(&self, normalized_name: &str) -> Option<&Place> {
        self.places.get(normalized_name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.places.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }

    pub fn collisions(&self) -> &[Place] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceMetrics {
    pub median_home_value: i64,
    pub median_household_income: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub ratio: f64,
    /// Ratio rescaled into [1, 5] before inversion.
    pub scaled: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    Excellent,
    Good,
    Moderate,
    Challenging,
}

impl Interpretation {
    pub fn for_score(score: f64) -> Self {
        if score >= 4.0 {
            Self::Excellent
        } else if score >= 3.0 {
            Self::Good
        } else if score >= 2.0 {
            Self::Moderate
        } else {
            Self::Challenging
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent time to buy!",
            Self::Good => "Good time to buy.",
            Self::Moderate => "Moderate buying conditions.",
            Self::Challenging => {
                "May be challenging to buy. Consider saving more or exploring other areas."
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub region: Region,
    pub place: Place,
    pub metrics: PlaceMetrics,
    pub score: Option<Score>,
    pub interpretation: Option<Interpretation>,
    pub generated_at: DateTime<Utc>,
}
