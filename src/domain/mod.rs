// Domain layer: catalog models and the document port. No dependencies beyond std/serde/regex.

pub mod directory;
pub mod model;
pub mod ports;
