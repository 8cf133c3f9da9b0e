// Domain layer: data model and ports. Adapters implement the ports.

pub mod model;
pub mod ports;
