// Domain layer: step model and ports (interfaces).

pub mod model;
pub mod ports;
