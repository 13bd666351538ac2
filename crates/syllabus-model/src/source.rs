//! Raw catalog source shapes.
//!
//! These mirror the on-disk / pre-parsed catalog layout. Every field is
//! optional here so that a missing required field is reported by
//! [`crate::CatalogIndex::from_source`] with its location instead of as an
//! opaque deserialization failure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSource {
    /// Category used when a requested key is unknown. First category when absent.
    pub default_category: Option<String>,
    pub categories: Vec<CategorySource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySource {
    pub key: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub topics: Vec<TopicSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicSource {
    pub key: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub examples: Vec<ExampleSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleSource {
    pub title: Option<String>,
    pub code: Option<String>,
    /// Reference to an externally runnable version of the example.
    pub runnable: Option<String>,
    pub note: Option<String>,
}

impl CatalogSource {
    /// Parse a catalog source from JSON text.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
