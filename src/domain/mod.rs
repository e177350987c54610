// Domain layer: models, the network catalog and ports (interfaces).

pub mod catalog;
pub mod model;
pub mod ports;
