pub mod normalizer;
pub mod regions;
pub mod scoring;
pub mod service;
pub mod session;

pub use crate::domain::model::{Place, PlaceIndex, PlaceMetrics, Region, Score, ScoreReport};
pub use crate::domain::ports::{ConfigProvider, StatsSource};
pub use crate::utils::error::Result;
