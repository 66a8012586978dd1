//! Clone-on-path field updates.
//!
//! Product sub-forms address fields by dotted path
//! (`cessExpDuty.cenvat.date`, `deecDetails.deecItems[1].unit`). Rather
//! than a per-shape spread copy at every call site, one recursive utility
//! walks the serialized tree, cloning each level from root to leaf and
//! leaving untouched siblings as-is.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A parsed dotted field path. Numeric segments address array elements;
/// both `items.2.unit` and `items[2].unit` parse to the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl FromStr for FieldPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        for part in s.split('.') {
            if part.is_empty() {
                return Err(format!("Empty segment in field path: {}", s));
            }

            // Leading name, then any number of [n] suffixes.
            let (name, mut rest) = match part.find('[') {
                Some(bracket) => (&part[..bracket], &part[bracket..]),
                None => (part, ""),
            };

            if !name.is_empty() {
                if let Ok(index) = name.parse::<usize>() {
                    segments.push(PathSegment::Index(index));
                } else {
                    segments.push(PathSegment::Key(name.to_string()));
                }
            } else if rest.is_empty() {
                return Err(format!("Empty segment in field path: {}", s));
            }

            while !rest.is_empty() {
                let Some(close) = rest.find(']') else {
                    return Err(format!("Unclosed index in field path: {}", s));
                };
                let index = rest[1..close]
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid index in field path: {}", s))?;
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(format!("Malformed index suffix in field path: {}", s));
                }
            }
        }

        if segments.is_empty() {
            return Err("Empty field path".to_string());
        }
        Ok(Self { segments })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if position > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", key)?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Return a copy of `root` with the value at `path` replaced.
///
/// Levels along the path are cloned; missing intermediate objects are
/// materialized as empty maps (a sub-record is created the first time one
/// of its fields is written). An array index beyond the current bounds
/// leaves the tree unchanged: rows are grown through the collection
/// editor, which owns their typed defaults, never through a path write.
pub fn set_path(root: &Value, path: &FieldPath, new_value: Value) -> Value {
    set_segments(root, path.segments(), new_value)
}

fn set_segments(current: &Value, segments: &[PathSegment], new_value: Value) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        return new_value;
    };

    match head {
        PathSegment::Key(key) => {
            let mut map = match current {
                Value::Object(map) => map.clone(),
                _ => serde_json::Map::new(),
            };
            let child = map.get(key).cloned().unwrap_or(Value::Null);
            map.insert(key.clone(), set_segments(&child, rest, new_value));
            Value::Object(map)
        }
        PathSegment::Index(index) => match current {
            Value::Array(items) if *index < items.len() => {
                let mut items = items.clone();
                items[*index] = set_segments(&items[*index], rest, new_value);
                Value::Array(items)
            }
            _ => current.clone(),
        },
    }
}

/// Apply a path write to a typed record: serialize, edit the tree,
/// deserialize. A write whose value does not fit the record's shape
/// degrades to `None`: the caller keeps its previous snapshot and the
/// editing session continues.
pub fn update_typed<T: Serialize + DeserializeOwned>(
    record: &T,
    path: &FieldPath,
    new_value: Value,
) -> Option<T> {
    let tree = match serde_json::to_value(record) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::warn!(%path, error = %e, "Failed to serialize record for field write");
            return None;
        }
    };

    let updated = set_path(&tree, path, new_value);
    match serde_json::from_value(updated) {
        Ok(next) => Some(next),
        Err(e) => {
            tracing::warn!(%path, error = %e, "Rejected field write with mismatched shape");
            None
        }
    }
}
