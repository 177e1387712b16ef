// Domain layer: prefix listing models and the ports the fetcher depends on.

pub mod model;
pub mod ports;
