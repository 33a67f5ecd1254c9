//! Integration tests for the variable library.
//!
//! These tests verify default merging on first run and on reset, and the
//! behaviour of a library bound to a fresh Nexus home directory.

use std::fs;

use tempfile::TempDir;

use nexus::core::paths::NexusPaths;
use nexus::core::store::StoreError;
use nexus::core::types::{Document, DottedKey, Value};
use nexus::core::variables::VariableLibrary;

fn doc(s: &str) -> Document {
    toml::from_str(s).unwrap()
}

fn key(s: &str) -> DottedKey {
    DottedKey::new(s).unwrap()
}

/// A library over `existing` with defaults `{a = 1, b = {c = 2}}`.
fn library_with_existing(temp: &TempDir, existing: &str) -> VariableLibrary {
    let path = temp.path().join("variables.toml");
    fs::write(&path, existing).unwrap();
    VariableLibrary::with_defaults(&path, doc("a = 1\n[b]\nc = 2\n")).unwrap()
}

#[test]
fn merge_precedence_keeps_existing_values() {
    let temp = TempDir::new().unwrap();
    let library = library_with_existing(&temp, "[b]\nc = 99\nd = 3\n");

    library.generate(false).unwrap();

    assert_eq!(
        library.config().unwrap().load().unwrap(),
        doc("a = 1\n[b]\nc = 99\nd = 3\n")
    );
}

#[test]
fn regenerate_yields_defaults_verbatim() {
    let temp = TempDir::new().unwrap();
    let library = library_with_existing(&temp, "[b]\nc = 99\nd = 3\n");

    library.generate(true).unwrap();

    assert_eq!(
        library.config().unwrap().load().unwrap(),
        doc("a = 1\n[b]\nc = 2\n")
    );
}

#[test]
fn generate_twice_equals_once() {
    let temp = TempDir::new().unwrap();
    let library = library_with_existing(&temp, "z = [1, 2]\n[b]\nc = 99\n");

    library.generate(false).unwrap();
    let once = library.config().unwrap().load().unwrap();
    library.generate(false).unwrap();
    let twice = library.config().unwrap().load().unwrap();

    assert_eq!(once, twice);
}

#[test]
fn merge_does_not_check_kinds() {
    // Unlike `set`, merging lets an existing leaf shadow a default table.
    let temp = TempDir::new().unwrap();
    let library = library_with_existing(&temp, "b = \"flat\"\n");

    library.generate(false).unwrap();

    assert_eq!(
        library.config().unwrap().load().unwrap(),
        doc("a = 1\nb = \"flat\"\n")
    );
    assert!(matches!(
        library.set_variable(&key("b"), Some(Value::Table(Document::new()))),
        Err(StoreError::TypeMismatch { .. })
    ));
}

#[test]
fn fresh_home_scenario() {
    let temp = TempDir::new().unwrap();
    let paths = NexusPaths::new(temp.path().join(".nexus"));

    let library = VariableLibrary::new(paths.variables_path()).unwrap();
    assert!(!library.exists());

    assert_eq!(
        library.get_variable(&key("cli.color_palette")).unwrap(),
        Value::String("latte".into())
    );
    assert!(library.exists());
    assert_eq!(library.path(), paths.variables_path());
}

#[test]
fn unknown_variable_is_key_not_found() {
    let temp = TempDir::new().unwrap();
    let library = VariableLibrary::open(&NexusPaths::new(temp.path().to_path_buf())).unwrap();

    let err = library.get_variable(&key("cli.missing")).unwrap_err();
    assert!(matches!(err, StoreError::KeyNotFound { ref key } if key.as_str() == "cli.missing"));
}

#[test]
fn set_variable_requires_existing_parent() {
    let temp = TempDir::new().unwrap();
    let library = VariableLibrary::open(&NexusPaths::new(temp.path().to_path_buf())).unwrap();

    // A new leaf under an existing section is fine.
    library
        .set_variable(&key("cli.rich.border"), Some(Value::String("round".into())))
        .unwrap();
    assert_eq!(
        library.get_variable(&key("cli.rich.border")).unwrap(),
        Value::String("round".into())
    );

    // A typo in an intermediate segment is not silently created.
    let err = library
        .set_variable(&key("cli.rihc.border"), Some(Value::String("round".into())))
        .unwrap_err();
    assert!(matches!(err, StoreError::KeyNotFound { .. }));
}

#[test]
fn customized_values_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let paths = NexusPaths::new(temp.path().to_path_buf());

    {
        let library = VariableLibrary::open(&paths).unwrap();
        library
            .set_variable(&key("cli.color_palette"), Some(Value::String("mocha".into())))
            .unwrap();
    }

    let library = VariableLibrary::open(&paths).unwrap();
    assert_eq!(
        library.get_variable(&key("cli.color_palette")).unwrap(),
        Value::String("mocha".into())
    );
    assert_eq!(
        library.get_variable(&key("cli.rich.palette")).unwrap(),
        Value::String("solarized".into())
    );
}
