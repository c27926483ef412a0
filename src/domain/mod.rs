// Domain layer: code point ranges, property tables and the ports the pipeline runs against.

pub mod model;
pub mod ports;
