//! Diff callbacks over JSON item lists.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use listsync_diff::{CallbackError, DiffCallback};
use serde::Serialize;
use serde_json::Value;

/// One top-level field that differs between two matched items.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldChange {
    /// Field name, or `"."` when the items are not objects.
    pub field: String,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

/// Read a JSON array from `path`.
pub fn load_items(path: &Path) -> anyhow::Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not a JSON array", path.display()))
}

/// Identity by a key field (or whole value), content by value equality.
pub struct JsonItems<'a> {
    old: &'a [Value],
    new: &'a [Value],
    key: Option<&'a str>,
}

impl<'a> JsonItems<'a> {
    pub fn new(old: &'a [Value], new: &'a [Value], key: Option<&'a str>) -> Self {
        Self { old, new, key }
    }

    fn key_of<'v>(&self, item: &'v Value, side: &str, index: usize) -> Result<&'v Value, CallbackError> {
        let Some(key) = self.key else {
            return Ok(item);
        };
        item.get(key)
            .ok_or_else(|| CallbackError::new(format!("{side} item {index} has no field {key:?}")))
    }
}

impl DiffCallback for JsonItems<'_> {
    type Payload = Vec<FieldChange>;

    fn are_items_the_same(&self, old: usize, new: usize) -> Result<bool, CallbackError> {
        let old_key = self.key_of(&self.old[old], "old", old)?;
        let new_key = self.key_of(&self.new[new], "new", new)?;
        Ok(old_key == new_key)
    }

    fn are_contents_the_same(&self, old: usize, new: usize) -> Result<bool, CallbackError> {
        Ok(self.old[old] == self.new[new])
    }

    fn change_payload(&self, old: usize, new: usize) -> Result<Option<Vec<FieldChange>>, CallbackError> {
        Ok(Some(field_changes(&self.old[old], &self.new[new])))
    }
}

fn field_changes(old: &Value, new: &Value) -> Vec<FieldChange> {
    let (Value::Object(old_fields), Value::Object(new_fields)) = (old, new) else {
        return vec![FieldChange {
            field: ".".into(),
            old: Some(old.clone()),
            new: Some(new.clone()),
        }];
    };

    let names: BTreeSet<&String> = old_fields.keys().chain(new_fields.keys()).collect();
    names
        .into_iter()
        .filter_map(|name| {
            let (before, after) = (old_fields.get(name), new_fields.get(name));
            (before != after).then(|| FieldChange {
                field: name.clone(),
                old: before.cloned(),
                new: after.cloned(),
            })
        })
        .collect()
}
