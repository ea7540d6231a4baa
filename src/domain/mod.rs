// Domain layer: device model, version model, thresholds and ports.

pub mod model;
pub mod ports;
pub mod thresholds;
pub mod version;
