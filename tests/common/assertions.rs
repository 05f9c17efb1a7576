//! Domain-specific assertion macros for artinorm harnesses.
//!
//! These wrap `pretty_assertions` and print the offending document, so a
//! failure shows *which* output violated the contract.

use serde_json::Value;

// ---------------------------------------------------------------------------
// Document assertions
// ---------------------------------------------------------------------------

/// Assert that the value at a JSON pointer equals the expected value.
///
/// ```rust
/// assert_at!(doc, "/event/action", "file-created");
/// ```
#[macro_export]
macro_rules! assert_at {
    ($doc:expr, $pointer:expr, $value:expr) => {{
        let doc: &serde_json::Value = &$doc;
        let pointer: &str = $pointer;
        let expected = serde_json::json!($value);
        match doc.pointer(pointer) {
            Some(actual) => pretty_assertions::assert_eq!(
                actual, &expected,
                "assert_at! failed at {:?} in:\n{}",
                pointer,
                serde_json::to_string_pretty(doc).unwrap()
            ),
            None => panic!(
                "assert_at! failed: {:?} not found in:\n{}",
                pointer,
                serde_json::to_string_pretty(doc).unwrap()
            ),
        }
    }};
}

/// Assert that nothing exists at a JSON pointer.
#[macro_export]
macro_rules! assert_absent {
    ($doc:expr, $pointer:expr) => {{
        let doc: &serde_json::Value = &$doc;
        let pointer: &str = $pointer;
        if let Some(found) = doc.pointer(pointer) {
            panic!("assert_absent! failed: {:?} holds {}", pointer, found);
        }
    }};
}

/// Assert that a document list has the expected `event.action` sequence.
/// Base documents (no `event.action`) are skipped.
///
/// ```rust
/// assert_actions!(docs, ["file-created", "file-modified"]);
/// ```
#[macro_export]
macro_rules! assert_actions {
    ($docs:expr, [$($action:expr),* $(,)?]) => {{
        let docs: &[serde_json::Value] = &$docs;
        let actual: Vec<&str> = docs
            .iter()
            .filter_map(|d| d.pointer("/event/action").and_then(serde_json::Value::as_str))
            .collect();
        let expected: Vec<&str> = vec![$($action),*];
        pretty_assertions::assert_eq!(actual, expected, "event actions differ");
    }};
}

// ---------------------------------------------------------------------------
// Output invariants
// ---------------------------------------------------------------------------

/// Assert the output-normalizer contract on a single document: an object with
/// a string `@timestamp` and no empty value anywhere.
pub fn assert_normalized(doc: &Value) {
    let map = doc
        .as_object()
        .unwrap_or_else(|| panic!("document is not an object: {doc}"));
    assert!(
        map.get("@timestamp").and_then(Value::as_str).is_some_and(|ts| !ts.is_empty()),
        "document has no @timestamp: {doc}"
    );
    assert!(
        !artinorm_core::prune::has_empty(doc),
        "document still holds an empty value: {doc}"
    );
}

/// [`assert_normalized`] over every document.
pub fn assert_all_normalized(docs: &[Value]) {
    for doc in docs {
        assert_normalized(doc);
    }
}
