// Domain layer: report models, resource catalogs and ports (interfaces).

pub mod catalog;
pub mod model;
pub mod ports;
