#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod time;

pub use catalog::{CatalogError, VocabularyCatalog};
pub use time::Clock;
