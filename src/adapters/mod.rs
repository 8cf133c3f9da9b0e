// Adapters layer: concrete implementations of the domain ports.

pub mod census;
pub mod table;

pub use census::CensusClient;
