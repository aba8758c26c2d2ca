// Domain layer: models and ports. No HTTP details here.

pub mod model;
pub mod ports;
