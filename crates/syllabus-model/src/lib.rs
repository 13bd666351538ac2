//! Topic catalog data model.
//!
//! - [`CatalogSource`]: raw, pre-parsed catalog shape (serde)
//! - [`CatalogIndex`]: validated, immutable index built once at startup
//! - [`Difficulty`] / [`DifficultyFilter`]: fixed difficulty enumerations

pub mod catalog;
pub mod enums;
pub mod error;
pub mod source;

pub use catalog::{CatalogIndex, Category, Example, Topic};
pub use enums::{Difficulty, DifficultyFilter};
pub use error::{CatalogError, Result};
pub use source::{CatalogSource, CategorySource, ExampleSource, TopicSource};
