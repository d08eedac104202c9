//! Integration tests for the SettingsStore:
//! - Only changed (delta) fields are persisted
//! - Nested sections diff recursively
//! - Reloading picks up external edits

use std::fs;

use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use settings::{Settings, SettingsError, SettingsStore};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Canvas {
    width: f64,
    height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct Editor {
    base_url: String,
    csrf_token: Option<String>,
    canvas: Canvas,
}

impl Settings for Editor {
    const SECTION: &'static str = "editor";
}

fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
    SettingsStore::builder()
        .with_settings_file(dir.path().join("editor.settings.ron"))
        .build()
        .expect("build store")
}

#[test]
fn register_returns_defaults_without_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.register::<Editor>().expect("register");

    assert!(!store.file_path().exists());
    assert_eq!(store.get::<Editor>().unwrap(), Editor::default());
}

#[test]
fn update_persists_only_changed_nested_field() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.register::<Editor>().unwrap();

    store
        .update::<Editor, _>(|e| e.canvas.width = 1024.0)
        .expect("update");

    let content = fs::read_to_string(store.file_path()).unwrap();
    assert!(content.contains("width"));
    assert!(!content.contains("height"), "unchanged field leaked: {content}");
    assert!(!content.contains("base_url"), "unchanged field leaked: {content}");

    let reopened = store_in(&dir);
    reopened.register::<Editor>().unwrap();
    let editor = reopened.get::<Editor>().unwrap();
    assert_eq!(editor.canvas.width, 1024.0);
    assert_eq!(editor.canvas.height, 600.0);
}

#[test]
fn reverting_to_defaults_clears_the_section() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.register::<Editor>().unwrap();

    store
        .update::<Editor, _>(|e| e.csrf_token = Some("abc".into()))
        .unwrap();
    store.update::<Editor, _>(|e| e.csrf_token = None).unwrap();

    let content = fs::read_to_string(store.file_path()).unwrap();
    assert!(!content.contains("editor"), "section should be gone: {content}");
}

#[test]
fn reload_applies_external_changes() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.register::<Editor>().unwrap();

    fs::write(
        store.file_path(),
        r#"{ "editor": { "base_url": "http://diary.local", "canvas": { "height": 900.0 } } }"#,
    )
    .unwrap();
    store.reload().expect("reload");

    let editor = store.get::<Editor>().unwrap();
    assert_eq!(editor.base_url, "http://diary.local");
    assert_eq!(editor.canvas.height, 900.0);
    assert_eq!(editor.canvas.width, 800.0);
}

#[test]
fn double_registration_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.register::<Editor>().unwrap();

    assert!(matches!(
        store.register::<Editor>(),
        Err(SettingsError::AlreadyRegistered("editor"))
    ));
}
