//! Topic catalog and its read-only index.
//!
//! A [`CatalogIndex`] is built once from a [`CatalogSource`] and never
//! mutated. It provides:
//!
//! - ordered category enumeration
//! - a total `category(key)` lookup that falls back to the default category
//! - flattened topic enumeration in declaration order
//! - O(1) topic lookup by key

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;

use crate::enums::Difficulty;
use crate::error::{CatalogError, Result};
use crate::source::{CatalogSource, CategorySource, ExampleSource, TopicSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub title: String,
    /// Opaque code body; never interpreted.
    pub code: String,
    pub runnable: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    /// Unique across the whole catalog.
    pub key: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: String,
    pub title: String,
    pub description: String,
    /// Display glyph shown next to the title.
    pub icon: String,
    pub topics: Vec<Topic>,
}

impl Category {
    /// Number of topics in this category.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn topic(&self, key: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.key == key)
    }
}

/// Position of a topic inside the catalog: (category index, topic index).
#[derive(Debug, Clone, Copy)]
struct TopicSlot {
    category: usize,
    topic: usize,
}

/// Immutable, load-once index over the topic catalog.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    categories: Vec<Category>,
    by_category: HashMap<String, usize>,
    by_topic: HashMap<String, TopicSlot>,
    default_category: usize,
    topic_count: usize,
}

impl CatalogIndex {
    /// Build the index from a pre-parsed source.
    ///
    /// # Errors
    ///
    /// Fails when a category key, topic key, or topic title is missing or
    /// blank, when category or topic keys repeat, when a difficulty is not a
    /// known level, when the declared default category does not exist, or
    /// when the source has no categories at all.
    pub fn from_source(source: CatalogSource) -> Result<Self> {
        if source.categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut categories: Vec<Category> = Vec::with_capacity(source.categories.len());
        let mut by_category = HashMap::new();
        let mut by_topic: HashMap<String, TopicSlot> = HashMap::new();
        let mut topic_count = 0usize;

        for (category_index, raw) in source.categories.into_iter().enumerate() {
            let category = build_category(category_index, raw)?;
            if by_category
                .insert(category.key.clone(), category_index)
                .is_some()
            {
                return Err(CatalogError::DuplicateCategory(category.key));
            }
            for (topic_index, topic) in category.topics.iter().enumerate() {
                match by_topic.entry(topic.key.clone()) {
                    Entry::Occupied(existing) => {
                        // Same-category duplicates are not pushed yet.
                        let first = categories
                            .get(existing.get().category)
                            .map_or_else(|| category.key.clone(), |c| c.key.clone());
                        return Err(CatalogError::DuplicateTopic {
                            key: topic.key.clone(),
                            first,
                            second: category.key.clone(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(TopicSlot {
                            category: category_index,
                            topic: topic_index,
                        });
                    }
                }
            }
            topic_count += category.topics.len();
            categories.push(category);
        }

        let default_category = match source.default_category {
            Some(key) => *by_category
                .get(key.trim())
                .ok_or(CatalogError::UnknownDefaultCategory(key))?,
            None => 0,
        };

        Ok(Self {
            categories,
            by_category,
            by_topic,
            default_category,
            topic_count,
        })
    }

    /// Parse JSON text and build the index.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_source(CatalogSource::from_json_str(json)?)
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Total category lookup: unknown keys resolve to the default category.
    pub fn category(&self, key: &str) -> &Category {
        self.get_category(key)
            .unwrap_or_else(|| self.default_category())
    }

    /// Category lookup that reports unknown keys.
    pub fn get_category(&self, key: &str) -> Option<&Category> {
        self.by_category
            .get(key)
            .and_then(|&index| self.categories.get(index))
    }

    pub fn contains_category(&self, key: &str) -> bool {
        self.by_category.contains_key(key)
    }

    pub fn default_category(&self) -> &Category {
        &self.categories[self.default_category]
    }

    pub fn default_category_key(&self) -> &str {
        &self.default_category().key
    }

    /// Every topic in category declaration order, then topic declaration order.
    pub fn all_topics(&self) -> impl Iterator<Item = &Topic> + '_ {
        self.categories
            .iter()
            .flat_map(|category| category.topics.iter())
    }

    pub fn topic(&self, key: &str) -> Option<&Topic> {
        let slot = self.by_topic.get(key)?;
        self.categories
            .get(slot.category)
            .and_then(|category| category.topics.get(slot.topic))
    }

    pub fn contains_topic(&self, key: &str) -> bool {
        self.by_topic.contains_key(key)
    }

    /// The category a topic belongs to.
    pub fn category_of(&self, topic_key: &str) -> Option<&Category> {
        let slot = self.by_topic.get(topic_key)?;
        self.categories.get(slot.category)
    }

    /// Number of topics across all categories.
    pub fn topic_count(&self) -> usize {
        self.topic_count
    }
}

fn build_category(index: usize, raw: CategorySource) -> Result<Category> {
    let location = format!("categories[{index}]");
    let key = required(raw.key, "key", &location)?;
    let topics = raw
        .topics
        .into_iter()
        .enumerate()
        .map(|(topic_index, topic)| {
            build_topic(&format!("{location}.topics[{topic_index}]"), topic)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Category {
        title: raw.title.unwrap_or_else(|| key.clone()),
        description: raw.description.unwrap_or_default(),
        icon: raw.icon.unwrap_or_default(),
        key,
        topics,
    })
}

fn build_topic(location: &str, raw: TopicSource) -> Result<Topic> {
    let key = required(raw.key, "key", location)?;
    let title = required(raw.title, "title", location)?;
    let difficulty = match raw.difficulty.as_deref().map(str::trim) {
        None | Some("") => Difficulty::default(),
        Some(value) => value
            .parse()
            .map_err(|_| CatalogError::UnknownDifficulty {
                topic: key.clone(),
                value: value.to_string(),
            })?,
    };
    Ok(Topic {
        key,
        title,
        description: raw.description.unwrap_or_default(),
        difficulty,
        examples: raw.examples.into_iter().map(build_example).collect(),
    })
}

fn build_example(raw: ExampleSource) -> Example {
    Example {
        title: raw.title.unwrap_or_default(),
        code: raw.code.unwrap_or_default(),
        runnable: raw.runnable,
        note: raw.note,
    }
}

fn required(value: Option<String>, field: &'static str, location: &str) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(CatalogError::MissingField {
            field,
            location: location.to_string(),
        }),
    }
}
