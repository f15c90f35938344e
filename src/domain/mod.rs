// Domain layer: snapshot models and the ports the extraction job talks through.

pub mod model;
pub mod ports;
