//! Integration tests for the locale front-end: loading, reloading, and
//! store replacement semantics.

use std::fs;

use weft::{EvalError, LoadError, Locale, args};

// =============================================================================
// Loading
// =============================================================================

#[test]
fn fresh_locale_has_no_store() {
    let locale = Locale::new();
    assert_eq!(locale.language(), "en");
    assert_eq!(locale.entry_count(), 0);
    assert!(locale.store().is_none());
    let err = locale.instantiate("anything", &args![]).unwrap_err();
    assert!(matches!(err, EvalError::NoStore));
}

#[test]
fn load_source_reports_the_entry_count() {
    let mut locale = Locale::new();
    let count = locale.load_source("a { one } b { two }").unwrap();
    assert_eq!(count, 2);
    assert_eq!(locale.entry_count(), 2);
}

#[test]
fn loading_replaces_the_previous_store() {
    let mut locale = Locale::new();
    locale.load_source("old { old text }").unwrap();
    locale.load_source("new { new text }").unwrap();

    assert_eq!(locale.entry_count(), 1);
    assert!(locale.text_id("old").is_none());
    assert_eq!(
        locale.instantiate("new", &args![]).unwrap().text,
        "new text"
    );
}

#[test]
fn failed_load_keeps_the_active_store() {
    let mut locale = Locale::new();
    locale.load_source("keep { kept }").unwrap();

    let err = locale.load_source("broken { unterminated").unwrap_err();
    assert!(matches!(err, LoadError::Compile { .. }));

    assert_eq!(locale.instantiate("keep", &args![]).unwrap().text, "kept");
}

#[test]
fn load_file_and_reload_pick_up_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("en.weft");
    fs::write(&path, "msg { first }").unwrap();

    let mut locale = Locale::new();
    locale.load_file(&path).unwrap();
    assert_eq!(locale.instantiate("msg", &args![]).unwrap().text, "first");

    fs::write(&path, "msg { second }").unwrap();
    locale.reload().unwrap();
    assert_eq!(locale.instantiate("msg", &args![]).unwrap().text, "second");
}

#[test]
fn reload_after_string_load_fails() {
    let mut locale = Locale::new();
    locale.load_source("msg { hi }").unwrap();
    let err = locale.reload().unwrap_err();
    assert!(matches!(
        err,
        LoadError::NoPathForReload { language } if language == "en"
    ));
}

#[test]
fn load_file_with_missing_path_is_an_io_error() {
    let mut locale = Locale::new();
    let err = locale.load_file("/nonexistent/en.weft").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

// =============================================================================
// Language
// =============================================================================

#[test]
fn set_language_changes_classification() {
    let source = r"n { \match{1.few}{few}{}{other} }";
    let mut locale = Locale::with_language("ru");
    locale.load_source(source).unwrap();
    assert_eq!(locale.instantiate("n", &args![2]).unwrap().text, "few");

    // English has no `few` cardinal category.
    locale.set_language("en");
    assert_eq!(locale.language(), "en");
    assert_eq!(locale.instantiate("n", &args![2]).unwrap().text, "other");
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn cached_ids_resolve_without_a_name_lookup() {
    let mut locale = Locale::new();
    locale.load_source("msg { hello }").unwrap();
    let id = locale.text_id("msg").unwrap();
    assert_eq!(locale.instantiate_by_id(id, &args![]).unwrap().text, "hello");
}

#[test]
fn unknown_entry_suggests_close_names() {
    let mut locale = Locale::new();
    locale.load_source("greeting { hi }").unwrap();
    let err = locale.instantiate("greting", &args![]).unwrap_err();
    let EvalError::EntryNotFound { name, suggestions } = err else {
        panic!("expected EntryNotFound, got {err:?}");
    };
    assert_eq!(name, "greting");
    assert_eq!(suggestions, vec!["greeting".to_string()]);
}

#[test]
fn fonts_flow_into_compilation() {
    let mut locale = Locale::builder()
        .fonts(vec!["heading".to_string()])
        .build();
    locale.load_source(r"title { \font{heading}_Hi }").unwrap();
    assert_eq!(locale.fonts(), &["heading".to_string()]);
    assert_eq!(locale.instantiate("title", &args![]).unwrap().text, "Hi");
}
