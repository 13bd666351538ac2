//! Workspace loading and state persistence across CLI invocations.

use std::fs;
use std::path::{Path, PathBuf};

use syllabus_cli::settings::{Settings, load_settings};
use syllabus_cli::workspace::{Workspace, load_catalog};
use syllabus_model::DifficultyFilter;
use tempfile::TempDir;

fn catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/catalog.json")
}

fn open(dir: &TempDir) -> Workspace {
    Workspace::open(&catalog_path(), dir.path().join("state.json")).unwrap()
}

#[test]
fn sample_catalog_loads() {
    let catalog = load_catalog(&catalog_path()).unwrap();
    assert_eq!(catalog.categories().len(), 3);
    assert_eq!(catalog.topic_count(), 5);
    assert_eq!(catalog.default_category_key(), "core");
}

#[test]
fn fresh_workspace_has_no_state_file() {
    let dir = TempDir::new().unwrap();
    let workspace = open(&dir);
    assert!(!workspace.state_path().exists());
    assert_eq!(workspace.session().progress().percent, 0);
    assert_eq!(workspace.session().filtered_keys().len(), 3);
}

#[test]
fn interactions_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut workspace = open(&dir);
        workspace.session_mut().toggle_completed("ownership");
        workspace.session_mut().toggle_bookmark("lifetimes");
        workspace.session_mut().save_note("borrowing", "");
        workspace.save().unwrap();
    }

    let workspace = open(&dir);
    let store = workspace.session().store();
    assert!(store.is_completed("ownership"));
    assert!(store.is_bookmarked("lifetimes"));
    assert_eq!(store.note("borrowing"), Some(""));
    assert_eq!(workspace.session().progress().percent, 20);
}

#[test]
fn saved_selection_is_restored() {
    let dir = TempDir::new().unwrap();
    {
        let mut workspace = open(&dir);
        let session = workspace.session_mut();
        assert!(session.set_category("unsafe"));
        assert!(session.set_difficulty_filter("advanced"));
        workspace.save().unwrap();
    }

    let workspace = open(&dir);
    let selection = workspace.session().selection();
    assert_eq!(selection.category, "unsafe");
    assert_eq!(selection.difficulty, DifficultyFilter::Advanced);
    assert_eq!(workspace.session().filtered_keys(), ["raw-pointers"]);
}

#[test]
fn unknown_topic_is_an_error() {
    let dir = TempDir::new().unwrap();
    let workspace = open(&dir);
    let err = workspace.require_topic("missing").unwrap_err();
    assert_eq!(err.to_string(), "unknown topic `missing`");
}

#[test]
fn invalid_catalog_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, r#"{ "categories": [] }"#).unwrap();

    let err = Workspace::open(&path, dir.path().join("state.json"))
        .err()
        .unwrap();
    assert!(format!("{err:#}").contains("catalog has no categories"));
}

#[test]
fn corrupt_state_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("state.json"), "not json").unwrap();
    let result = Workspace::open(&catalog_path(), dir.path().join("state.json"));
    assert!(result.is_err());
}

#[test]
fn settings_file_is_read_when_given() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        "[catalog]\npath = \"topics.json\"\n\n[display]\ntable_width = 90\n",
    )
    .unwrap();

    let settings = load_settings(Some(path.as_path()));
    assert_eq!(settings.catalog.path, Some(PathBuf::from("topics.json")));
    assert_eq!(settings.display.table_width, 90);

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[display\n").unwrap();
    assert_eq!(load_settings(Some(broken.as_path())), Settings::default());
}
