//! Session-level behavior: filtering, progress and interaction state.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use proptest::prelude::*;
use syllabus_engine::{
    InteractionChange, InteractionStore, SelectionEvent, Session, filtered_topics, progress_percent,
};
use syllabus_model::{CatalogIndex, CatalogSource, CategorySource, DifficultyFilter, TopicSource};

const CATALOG_JSON: &str = r#"{
    "categories": [
        { "key": "core", "title": "Core", "topics": [
            { "key": "A", "title": "Ownership", "difficulty": "beginner",
              "description": "Who frees the value" },
            { "key": "B", "title": "Borrowing", "difficulty": "beginner",
              "examples": [ { "title": "Shared", "code": "let r = &x;" } ] },
            { "key": "C", "title": "Lifetimes", "difficulty": "advanced" }
        ] },
        { "key": "adv", "title": "Advanced", "topics": [
            { "key": "D", "title": "Unsafe code", "difficulty": "advanced" }
        ] }
    ]
}"#;

fn catalog() -> Arc<CatalogIndex> {
    Arc::new(CatalogIndex::from_json_str(CATALOG_JSON).unwrap())
}

fn keys(session: &Session) -> Vec<&str> {
    session.filtered_keys().iter().map(String::as_str).collect()
}

#[test]
fn difficulty_filter_survives_category_switch() {
    let mut session = Session::new(catalog());

    assert!(session.set_difficulty_filter("advanced"));
    assert_eq!(keys(&session), ["C"]);

    assert!(session.set_category("adv"));
    assert_eq!(keys(&session), ["D"]);
    assert_eq!(session.selection().difficulty, DifficultyFilter::Advanced);
}

#[test]
fn two_of_four_complete_is_half() {
    let mut session = Session::new(catalog());
    session.toggle_completed("A");
    session.toggle_completed("B");
    assert_eq!(session.progress().percent, 50);
    assert_eq!(progress_percent(session.catalog(), session.store()), 50);
}

#[test]
fn empty_note_is_distinct_from_missing_note() {
    let mut session = Session::new(catalog());
    session.save_note("A", "");
    assert_eq!(session.store().note("A"), Some(""));
    assert_eq!(session.store().note("C"), None);

    assert!(session.delete_note("A"));
    assert_eq!(session.store().note("A"), None);
    assert!(!session.delete_note("A"));
}

#[test]
fn bookmark_toggle_twice_fires_twice_and_restores_state() {
    let mut session = Session::new(catalog());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.subscribe_topic("B", move |event| sink.borrow_mut().push(event.change));

    session.toggle_bookmark("B");
    session.toggle_bookmark("B");

    assert!(!session.store().is_bookmarked("B"));
    assert_eq!(session.counts().bookmarked, 0);
    assert_eq!(
        *events.borrow(),
        vec![
            InteractionChange::Bookmarked(true),
            InteractionChange::Bookmarked(false)
        ]
    );
}

#[test]
fn topic_subscribers_only_see_their_topic() {
    let mut session = Session::new(catalog());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    session.subscribe_topic("A", move |event| sink.borrow_mut().push(event.key.clone()));

    session.toggle_completed("B");
    session.toggle_expanded("A");

    assert_eq!(*seen.borrow(), vec!["A".to_string()]);
}

#[test]
fn category_selection_requests_panel_close() {
    let mut session = Session::new(catalog());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.subscribe_selection(move |event| sink.borrow_mut().push(event.clone()));

    assert!(!session.set_category("missing"));
    assert!(session.set_category("adv"));

    assert_eq!(
        events.borrow().last(),
        Some(&SelectionEvent::ClosePanelRequested)
    );
    assert_eq!(events.borrow().len(), 2);
}

#[test]
fn search_looks_inside_example_code() {
    let mut session = Session::new(catalog());
    session.set_search_query("&X");
    assert_eq!(keys(&session), ["B"]);
    session.clear_search_query();
    assert_eq!(keys(&session), ["A", "B", "C"]);
}

#[test]
fn snapshot_restores_selection_and_interactions() {
    let mut session = Session::new(catalog());
    session.set_category("adv");
    session.set_search_query("unsafe");
    session.toggle_completed("D");
    session.toggle_expanded("A");
    session.save_note("C", "revisit");

    let restored = Session::from_snapshot(catalog(), &session.snapshot());

    assert_eq!(restored.selection(), session.selection());
    assert_eq!(keys(&restored), ["D"]);
    assert_eq!(restored.progress(), session.progress());
    assert!(restored.store().is_expanded("A"));
    assert_eq!(restored.store().note("C"), Some("revisit"));
}

// ----------------------------------------------------------------------
// Properties
// ----------------------------------------------------------------------

fn arb_difficulty() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("beginner"), Just("intermediate"), Just("advanced")]
}

/// A single-category catalog of `n` topics with arbitrary titles.
fn arb_catalog() -> impl Strategy<Value = CatalogIndex> {
    prop::collection::vec(("[a-z ]{0,12}", arb_difficulty()), 1..12).prop_map(|specs| {
        let topics = specs
            .into_iter()
            .enumerate()
            .map(|(idx, (title, difficulty))| TopicSource {
                key: Some(format!("t{idx}")),
                title: Some(format!("topic {title}")),
                difficulty: Some(difficulty.to_string()),
                ..Default::default()
            })
            .collect();
        let source = CatalogSource {
            categories: vec![CategorySource {
                key: Some("only".to_string()),
                topics,
                ..Default::default()
            }],
            ..Default::default()
        };
        CatalogIndex::from_source(source).unwrap()
    })
}

fn filter_keys(
    catalog: &CatalogIndex,
    difficulty: DifficultyFilter,
    query: &str,
) -> Vec<String> {
    filtered_topics(catalog, "only", difficulty, query)
        .into_iter()
        .map(|topic| topic.key.clone())
        .collect()
}

proptest! {
    #[test]
    fn empty_store_is_zero_percent(catalog in arb_catalog()) {
        prop_assert_eq!(progress_percent(&catalog, &InteractionStore::new()), 0);
    }

    #[test]
    fn all_complete_is_hundred_and_one_is_rounded(catalog in arb_catalog()) {
        let n = catalog.topic_count();
        let mut store = InteractionStore::new();
        store.toggle_completed("t0");
        let expected = ((200 + n) / (2 * n)) as u8;
        prop_assert_eq!(progress_percent(&catalog, &store), expected);

        for topic in catalog.all_topics() {
            store.set_completed(&topic.key, true);
        }
        prop_assert_eq!(progress_percent(&catalog, &store), 100);
    }

    #[test]
    fn filter_output_keeps_declaration_order(
        catalog in arb_catalog(),
        filter_idx in 0usize..4,
        query in "[a-z]{0,2}",
    ) {
        let difficulty = DifficultyFilter::ALL[filter_idx];
        let declared: Vec<String> = catalog
            .category("only")
            .topics
            .iter()
            .map(|t| t.key.clone())
            .collect();
        let result = filter_keys(&catalog, difficulty, &query);
        let mut remaining = declared.iter();
        for key in &result {
            prop_assert!(remaining.any(|declared_key| declared_key == key));
        }
    }

    #[test]
    fn longer_query_never_widens_result(
        catalog in arb_catalog(),
        base in "[a-z]{0,2}",
        suffix in "[a-z ]{0,3}",
    ) {
        let narrow = format!("{base}{suffix}");
        let wide = filter_keys(&catalog, DifficultyFilter::All, &base);
        for key in filter_keys(&catalog, DifficultyFilter::All, &narrow) {
            prop_assert!(wide.contains(&key));
        }
    }

    #[test]
    fn snapshot_round_trip_preserves_records(
        ops in prop::collection::vec((0usize..6, 0u8..5), 0..40),
    ) {
        let mut store = InteractionStore::new();
        for (topic, op) in &ops {
            let key = format!("t{topic}");
            match op {
                0 => { store.toggle_completed(&key); }
                1 => { store.toggle_bookmark(&key); }
                2 => { store.toggle_expanded(&key); }
                3 => store.save_note(&key, format!("note {topic}")),
                _ => { store.delete_note(&key); }
            }
        }
        let restored = InteractionStore::from_snapshot(store.snapshot());
        for topic in 0..6 {
            let key = format!("t{topic}");
            prop_assert_eq!(restored.is_completed(&key), store.is_completed(&key));
            prop_assert_eq!(restored.is_bookmarked(&key), store.is_bookmarked(&key));
            prop_assert_eq!(restored.is_expanded(&key), store.is_expanded(&key));
            prop_assert_eq!(restored.note(&key), store.note(&key));
        }
        prop_assert_eq!(restored.completed_count(), store.completed_count());
        prop_assert_eq!(restored.bookmarked_count(), store.bookmarked_count());
    }
}
