pub mod controller;
pub mod render;

pub use crate::domain::model::{BusinessRecord, Catalog, ModalState, ReviewRecord};
pub use crate::domain::ports::{
    Document, EventKind, EventOutcome, EventTarget, Key, Selector, UiEvent,
};
pub use crate::utils::error::Result;
