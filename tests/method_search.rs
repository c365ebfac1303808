mod common;

use std::fs;

use codeintel_lsp::Backend;
use common::{create_workspace, file_uri};

// ─── Single-Document Scan ───────────────────────────────────────────────────

#[test]
fn test_method_on_first_line_is_found() {
    // Line 0 is a valid match, not "not found".
    let content = "function boot() {\n}\n";
    assert_eq!(Backend::find_method_line(content, "boot"), Some(0));
}

#[test]
fn test_last_declaration_wins() {
    let content = "\
function save() {\n\
}\n\
function save() {\n\
}\n";
    assert_eq!(Backend::find_method_line(content, "save"), Some(2));
}

#[test]
fn test_name_must_end_at_word_boundary() {
    let content = "function runFast() {\n}\n";
    assert_eq!(Backend::find_method_line(content, "run"), None);
    assert_eq!(Backend::find_method_line(content, "runFast"), Some(0));
}

#[test]
fn test_declaration_with_modifiers_is_found() {
    let content = "class Cart {\n    public function total() {\n    }\n}\n";
    assert_eq!(Backend::find_method_line(content, "total"), Some(1));
}

#[test]
fn test_missing_method_is_none() {
    let content = "function other() {\n}\n";
    assert_eq!(Backend::find_method_line(content, "save"), None);
}

// ─── Parent Extraction ──────────────────────────────────────────────────────

#[test]
fn test_parent_class_name_simple() {
    let content = "class Dog extends Animal\n{\n}\n";
    assert_eq!(Backend::parent_class_name(content).as_deref(), Some("Animal"));
}

#[test]
fn test_parent_class_name_with_brace_and_implements() {
    let content = "class Dog extends Animal implements Stringable {\n}\n";
    assert_eq!(Backend::parent_class_name(content).as_deref(), Some("Animal"));
}

#[test]
fn test_parent_class_name_absent() {
    let content = "class Animal\n{\n}\n";
    assert_eq!(Backend::parent_class_name(content), None);
}

// ─── Chain Resolution ───────────────────────────────────────────────────────

#[test]
fn test_method_found_one_level_up() {
    let (backend, dir) = create_workspace(&[
        (
            "Dog.php",
            "class Dog extends Animal {\n    public function bark() {\n    }\n}\n",
        ),
        (
            "Animal.php",
            "class Animal {\n    public function eat() {\n    }\n}\n",
        ),
    ]);

    let uri = file_uri(dir.path(), "Dog.php");
    let content = fs::read_to_string(dir.path().join("Dog.php")).unwrap();

    let location = backend
        .resolve_method("eat", &uri, &content)
        .expect("eat should resolve on the parent");
    let resolved = location.uri.to_file_path().unwrap();
    assert_eq!(resolved, dir.path().join("Animal.php").canonicalize().unwrap());
    assert_eq!(location.range.start.line, 1);
}

#[test]
fn test_result_propagates_through_deep_chain() {
    let (backend, dir) = create_workspace(&[
        ("Puppy.php", "class Puppy extends Dog {\n}\n"),
        ("Dog.php", "class Dog extends Animal {\n}\n"),
        (
            "Animal.php",
            "class Animal {\n    public function eat() {\n    }\n}\n",
        ),
    ]);

    let uri = file_uri(dir.path(), "Puppy.php");
    let content = fs::read_to_string(dir.path().join("Puppy.php")).unwrap();

    let location = backend
        .resolve_method("eat", &uri, &content)
        .expect("eat should resolve two levels up");
    let resolved = location.uri.to_file_path().unwrap();
    assert_eq!(resolved, dir.path().join("Animal.php").canonicalize().unwrap());
}

#[test]
fn test_current_document_wins_over_parent() {
    let (backend, dir) = create_workspace(&[
        (
            "Dog.php",
            "class Dog extends Animal {\n    public function eat() {\n    }\n}\n",
        ),
        (
            "Animal.php",
            "class Animal {\n    public function eat() {\n    }\n}\n",
        ),
    ]);

    let uri = file_uri(dir.path(), "Dog.php");
    let content = fs::read_to_string(dir.path().join("Dog.php")).unwrap();

    let location = backend.resolve_method("eat", &uri, &content).unwrap();
    let resolved = location.uri.to_file_path().unwrap();
    assert_eq!(resolved, dir.path().join("Dog.php").canonicalize().unwrap());
}

#[tokio::test]
async fn test_unsaved_edits_in_open_parent_are_searched() {
    use tower_lsp::LanguageServer;
    use tower_lsp::lsp_types::*;

    // The parent is open in the editor with an extra method that is not on
    // disk yet. The open-document text must win over the file contents.
    let (backend, dir) = create_workspace(&[
        ("Dog.php", "class Dog extends Animal {\n}\n"),
        ("Animal.php", "class Animal {\n}\n"),
    ]);

    let parent_uri = file_uri(dir.path(), "Animal.php");
    let edited = "class Animal {\n    public function eat() {\n    }\n}\n";
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: Url::parse(&parent_uri).unwrap(),
                language_id: "php".to_string(),
                version: 1,
                text: edited.to_string(),
            },
        })
        .await;

    let uri = file_uri(dir.path(), "Dog.php");
    let content = fs::read_to_string(dir.path().join("Dog.php")).unwrap();

    let location = backend.resolve_method("eat", &uri, &content).unwrap();
    assert_eq!(location.range.start.line, 1);
}

#[test]
fn test_circular_chain_terminates_not_found() {
    let (backend, dir) = create_workspace(&[
        ("A.php", "class A extends B {\n}\n"),
        ("B.php", "class B extends A {\n}\n"),
    ]);

    let uri = file_uri(dir.path(), "A.php");
    let content = fs::read_to_string(dir.path().join("A.php")).unwrap();

    assert!(backend.resolve_method("missing", &uri, &content).is_none());
}

#[test]
fn test_chain_with_unresolvable_parent_is_not_found() {
    let (backend, dir) = create_workspace(&[("Dog.php", "class Dog extends Ghost {\n}\n")]);

    let uri = file_uri(dir.path(), "Dog.php");
    let content = fs::read_to_string(dir.path().join("Dog.php")).unwrap();

    assert!(backend.resolve_method("eat", &uri, &content).is_none());
}
