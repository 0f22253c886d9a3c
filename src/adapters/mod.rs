// Adapters layer: concrete implementations of the document port.

pub mod memory;
