//! Output normalizer.
//!
//! Removes every null, empty string, empty sequence and empty mapping from a
//! document, repeating until nothing changes (removing a leaf can empty its
//! parent), then guarantees an `@timestamp`.

use serde_json::Value;

pub const TIMESTAMP_KEY: &str = "@timestamp";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// `true` for the values the normalizer removes.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

// Pre-order, so removing in reverse visits later array indices first.
fn collect_empty(value: &Value, path: &mut Vec<Segment>, out: &mut Vec<Vec<Segment>>) {
    let mut visit = |segment: Segment, child: &Value, path: &mut Vec<Segment>| {
        path.push(segment);
        if is_empty(child) {
            out.push(path.clone());
        } else {
            collect_empty(child, path, out);
        }
        path.pop();
    };
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                visit(Segment::Key(key.clone()), child, path);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                visit(Segment::Index(idx), child, path);
            }
        }
        _ => {}
    }
}

fn remove(root: &mut Value, path: &[Segment]) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut node = root;
    for segment in parents {
        let next = match (segment, node) {
            (Segment::Key(key), Value::Object(map)) => map.get_mut(key),
            (Segment::Index(idx), Value::Array(items)) => items.get_mut(*idx),
            _ => None,
        };
        match next {
            Some(child) => node = child,
            None => return,
        }
    }
    match (last, node) {
        (Segment::Key(key), Value::Object(map)) => {
            map.remove(key);
        }
        (Segment::Index(idx), Value::Array(items)) if *idx < items.len() => {
            items.remove(*idx);
        }
        _ => {}
    }
}

/// Prune empty values to a fixed point. The root itself is never removed.
pub fn prune(doc: &mut Value) {
    loop {
        let mut empties = Vec::new();
        collect_empty(doc, &mut Vec::new(), &mut empties);
        if empties.is_empty() {
            break;
        }
        for path in empties.iter().rev() {
            remove(doc, path);
        }
    }
}

/// Prune, then fill `@timestamp` with `default_timestamp` if it is missing.
pub fn finalize(doc: &mut Value, default_timestamp: &str) {
    prune(doc);
    if let Value::Object(map) = doc {
        map.entry(TIMESTAMP_KEY)
            .or_insert_with(|| Value::String(default_timestamp.to_string()));
    }
}

/// Whether any empty value remains below the root.
pub fn has_empty(doc: &Value) -> bool {
    let mut empties = Vec::new();
    collect_empty(doc, &mut Vec::new(), &mut empties);
    !empties.is_empty()
}
