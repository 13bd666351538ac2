//! Filtered topic views.
//!
//! Filtering runs in three fixed stages, each narrowing the previous one:
//!
//! 1. topics of the active category only (search never spans categories)
//! 2. difficulty, unless the filter is `all`
//! 3. case-insensitive substring search over title, description, example
//!    titles and example code
//!
//! Output keeps the catalog's declaration order. The function is pure, so
//! [`FilterCache`] can memoize results keyed on the inputs.

use std::collections::HashMap;

use syllabus_model::{CatalogIndex, DifficultyFilter, Topic};
use tracing::trace;

/// Upper bound on memoized views before the cache is reset.
const CACHE_CAPACITY: usize = 64;

/// Normalize a raw search query: trimmed and lowercased.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// True if `needle` (already normalized) occurs in any searchable field.
///
/// An empty needle matches everything.
pub fn topic_matches(topic: &Topic, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
    contains(&topic.title)
        || contains(&topic.description)
        || topic
            .examples
            .iter()
            .any(|example| contains(&example.title) || contains(&example.code))
}

/// Topics of `category` that pass the difficulty filter and the search query.
///
/// Unknown categories resolve to the catalog's default category.
pub fn filtered_topics<'a>(
    catalog: &'a CatalogIndex,
    category: &str,
    difficulty: DifficultyFilter,
    query: &str,
) -> Vec<&'a Topic> {
    let needle = normalize_query(query);
    catalog
        .category(category)
        .topics
        .iter()
        .filter(|topic| difficulty.matches(topic.difficulty))
        .filter(|topic| topic_matches(topic, &needle))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FilterKey {
    category: String,
    difficulty: DifficultyFilter,
    query: String,
}

/// Memo table for [`filtered_topics`], storing topic keys.
///
/// The catalog is immutable, so entries never go stale; the cache must not
/// be shared between different catalogs.
#[derive(Debug, Default)]
pub struct FilterCache {
    entries: HashMap<FilterKey, Vec<String>>,
    hits: u64,
    misses: u64,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached filtered topic keys, computing them on a miss.
    pub fn get_or_compute(
        &mut self,
        catalog: &CatalogIndex,
        category: &str,
        difficulty: DifficultyFilter,
        query: &str,
    ) -> &[String] {
        let key = FilterKey {
            category: catalog.category(category).key.clone(),
            difficulty,
            query: normalize_query(query),
        };
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            if self.entries.len() >= CACHE_CAPACITY {
                self.entries.clear();
            }
            let keys = filtered_topics(catalog, &key.category, difficulty, &key.query)
                .into_iter()
                .map(|topic| topic.key.clone())
                .collect();
            trace!(category = %key.category, %difficulty, query = %key.query, "filter cache miss");
            self.entries.insert(key.clone(), keys);
        }
        self.entries.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogIndex {
        CatalogIndex::from_json_str(
            r#"{ "categories": [
                { "key": "core", "topics": [
                    { "key": "A", "title": "Ownership", "description": "Moves and copies" },
                    { "key": "B", "title": "Borrowing", "examples": [
                        { "title": "Shared refs", "code": "let r = &VALUE;" } ] },
                    { "key": "C", "title": "Lifetimes", "difficulty": "advanced" }
                ] },
                { "key": "adv", "topics": [
                    { "key": "D", "title": "Unsafe ownership", "difficulty": "advanced" }
                ] }
            ] }"#,
        )
        .unwrap()
    }

    fn keys(topics: &[&Topic]) -> Vec<String> {
        topics.iter().map(|t| t.key.clone()).collect()
    }

    #[test]
    fn test_search_is_scoped_to_category() {
        let catalog = catalog();
        let result = filtered_topics(&catalog, "core", DifficultyFilter::All, "ownership");
        assert_eq!(keys(&result), vec!["A"]);
    }

    #[test]
    fn test_search_checks_example_code_case_insensitively() {
        let catalog = catalog();
        let result = filtered_topics(&catalog, "core", DifficultyFilter::All, "  &value ");
        assert_eq!(keys(&result), vec!["B"]);
        let result = filtered_topics(&catalog, "core", DifficultyFilter::All, "SHARED");
        assert_eq!(keys(&result), vec!["B"]);
    }

    #[test]
    fn test_blank_query_keeps_everything() {
        let catalog = catalog();
        let result = filtered_topics(&catalog, "core", DifficultyFilter::All, "   ");
        assert_eq!(keys(&result), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_unknown_category_uses_default() {
        let catalog = catalog();
        let result = filtered_topics(&catalog, "missing", DifficultyFilter::Advanced, "");
        assert_eq!(keys(&result), vec!["C"]);
    }

    #[test]
    fn test_cache_hits_on_equivalent_queries() {
        let catalog = catalog();
        let mut cache = FilterCache::new();
        let first = cache
            .get_or_compute(&catalog, "core", DifficultyFilter::All, "Borrow")
            .to_vec();
        let second = cache
            .get_or_compute(&catalog, "core", DifficultyFilter::All, "  borrow ")
            .to_vec();
        assert_eq!(first, vec!["B".to_string()]);
        assert_eq!(first, second);
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(cache.len(), 1);
    }
}
