//! Dotted-path access into JSON objects (`"wounds.healRate"`).

use serde_json::{Map, Value};

pub(crate) fn get_path<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = root.get(segments.next()?)?;
    segments.try_fold(first, |value, segment| value.get(segment))
}

pub(crate) fn get_path_mut<'a>(
    root: &'a mut Map<String, Value>,
    path: &str,
) -> Option<&'a mut Value> {
    let mut segments = path.split('.');
    let first = root.get_mut(segments.next()?)?;
    segments.try_fold(first, |value, segment| value.get_mut(segment))
}

/// Remove and return the value at `path`.
pub(crate) fn take_path(root: &mut Map<String, Value>, path: &str) -> Option<Value> {
    match path.rsplit_once('.') {
        Some((parent, leaf)) => get_path_mut(root, parent)?.as_object_mut()?.remove(leaf),
        None => root.remove(path),
    }
}

/// Insert `value` at `path`, creating intermediate objects.
///
/// Hands the value back if the target is already set or a parent is not an
/// object.
pub(crate) fn insert_path(
    root: &mut Map<String, Value>,
    path: &str,
    value: Value,
) -> Result<(), Value> {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };

    let mut cursor = root;
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        let next = cursor
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        cursor = match next.as_object_mut() {
            Some(object) => object,
            None => return Err(value),
        };
    }

    if cursor.contains_key(leaf) {
        return Err(value);
    }
    cursor.insert(leaf.to_string(), value);
    Ok(())
}
