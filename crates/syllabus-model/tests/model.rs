//! Tests for syllabus-model catalog construction and lookup.

use proptest::prelude::*;
use syllabus_model::{CatalogError, CatalogIndex, CatalogSource, Difficulty};

const CATALOG_JSON: &str = r#"{
    "categories": [
        {
            "key": "core",
            "title": "Core Concepts",
            "description": "Ownership and friends",
            "icon": "📘",
            "topics": [
                { "key": "A", "title": "Ownership", "difficulty": "beginner" },
                { "key": "B", "title": "Borrowing" },
                { "key": "C", "title": "Lifetimes", "difficulty": "Advanced",
                  "examples": [
                      { "title": "Elision", "code": "fn first(s: &str) -> &str { s }",
                        "runnable": "play:elision" }
                  ] }
            ]
        },
        {
            "key": "adv",
            "title": "Advanced",
            "topics": [
                { "key": "D", "title": "Unsafe", "difficulty": "advanced" }
            ]
        }
    ]
}"#;

fn catalog() -> CatalogIndex {
    CatalogIndex::from_json_str(CATALOG_JSON).expect("build catalog")
}

#[test]
fn categories_keep_declaration_order() {
    let index = catalog();
    let keys: Vec<&str> = index.categories().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["core", "adv"]);
    assert_eq!(index.category("core").icon, "📘");
}

#[test]
fn all_topics_flattens_in_order() {
    let index = catalog();
    let keys: Vec<&str> = index.all_topics().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B", "C", "D"]);
    assert_eq!(index.topic_count(), 4);
}

#[test]
fn missing_difficulty_defaults_to_beginner() {
    let index = catalog();
    assert_eq!(
        index.topic("B").map(|t| t.difficulty),
        Some(Difficulty::Beginner)
    );
    assert_eq!(
        index.topic("C").map(|t| t.difficulty),
        Some(Difficulty::Advanced)
    );
}

#[test]
fn unknown_category_falls_back_to_default() {
    let index = catalog();
    assert_eq!(index.category("does-not-exist").key, "core");
    assert!(index.get_category("does-not-exist").is_none());
    assert_eq!(index.default_category_key(), "core");
}

#[test]
fn declared_default_category_is_used() {
    let json = CATALOG_JSON.replacen('{', r#"{ "default_category": "adv","#, 1);
    let index = CatalogIndex::from_json_str(&json).expect("build catalog");
    assert_eq!(index.category("nope").key, "adv");
}

#[test]
fn undeclared_default_category_is_rejected() {
    let json = CATALOG_JSON.replacen('{', r#"{ "default_category": "ghost","#, 1);
    let err = CatalogIndex::from_json_str(&json).unwrap_err();
    assert!(matches!(err, CatalogError::UnknownDefaultCategory(ref key) if key == "ghost"));
}

#[test]
fn topic_lookup_reports_category() {
    let index = catalog();
    assert_eq!(index.category_of("D").map(|c| c.key.as_str()), Some("adv"));
    assert!(index.category_of("Z").is_none());
    let example = &index.topic("C").expect("topic C").examples[0];
    assert_eq!(example.runnable.as_deref(), Some("play:elision"));
    assert!(example.note.is_none());
}

#[test]
fn missing_topic_key_is_fatal() {
    let json = r#"{ "categories": [ { "key": "core", "topics": [ { "title": "No key" } ] } ] }"#;
    let err = CatalogIndex::from_json_str(json).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::MissingField { field: "key", .. }
    ));
}

#[test]
fn unknown_difficulty_is_fatal() {
    let json = r#"{ "categories": [ { "key": "core", "topics": [
        { "key": "A", "title": "A", "difficulty": "expert" } ] } ] }"#;
    let err = CatalogIndex::from_json_str(json).unwrap_err();
    assert!(matches!(err, CatalogError::UnknownDifficulty { .. }));
}

#[test]
fn empty_catalog_is_rejected() {
    let err = CatalogIndex::from_source(CatalogSource::default()).unwrap_err();
    assert!(matches!(err, CatalogError::Empty));
}

#[test]
fn duplicate_category_is_rejected() {
    let json = r#"{ "categories": [ { "key": "core" }, { "key": "core" } ] }"#;
    let err = CatalogIndex::from_json_str(json).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateCategory(ref key) if key == "core"));
}

#[test]
fn malformed_json_is_reported() {
    let err = CatalogIndex::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, CatalogError::Json(_)));
}

proptest! {
    #[test]
    fn all_topics_matches_per_category_concatenation(sizes in prop::collection::vec(0usize..5, 1..5)) {
        let mut categories = Vec::new();
        let mut counter = 0usize;
        for (c, size) in sizes.iter().enumerate() {
            let topics: Vec<String> = (0..*size)
                .map(|_| {
                    counter += 1;
                    format!(r#"{{ "key": "t{counter}", "title": "Topic {counter}" }}"#)
                })
                .collect();
            categories.push(format!(
                r#"{{ "key": "c{c}", "topics": [{}] }}"#,
                topics.join(",")
            ));
        }
        let json = format!(r#"{{ "categories": [{}] }}"#, categories.join(","));
        let index = CatalogIndex::from_json_str(&json).unwrap();

        let flattened: Vec<String> = index.all_topics().map(|t| t.key.clone()).collect();
        let expected: Vec<String> = index
            .categories()
            .iter()
            .flat_map(|c| c.topics.iter().map(|t| t.key.clone()))
            .collect();
        prop_assert_eq!(&flattened, &expected);
        prop_assert_eq!(index.topic_count(), sizes.iter().sum::<usize>());
    }
}
