// Domain layer: models and ports. Adapters live under config/, services under core/.

pub mod model;
pub mod ports;
