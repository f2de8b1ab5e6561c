use crate::errors::TransEditError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn read_json_file(path: &Path) -> Result<Value> {
    let s = fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
    let v: Value = serde_json::from_str(&s).with_context(|| format!("Parsing JSON {:?}", path))?;
    Ok(v)
}

pub async fn write_json_file(path: &Path, json: &Value) -> Result<()> {
    let mut pretty = serde_json::to_string_pretty(json)?;
    pretty.push('\n');
    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, pretty)
        .await
        .with_context(|| format!("Writing {:?}", tmp_path))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("Replacing {:?}", path))?;
    Ok(())
}

/// Walks `root` one key per element of `keys`. An empty path is the root itself.
pub fn get_value_at_path<'a>(root: &'a Value, keys: &[String]) -> Result<&'a Value> {
    let mut current = root;
    for key in keys {
        match current {
            Value::Object(map) => {
                current = map
                    .get(key)
                    .ok_or_else(|| TransEditError::PathNotFound(keys.join(".")))?;
            }
            _ => return Err(TransEditError::NotAnObject(keys.join(".")).into()),
        }
    }
    Ok(current)
}

/// Inserts or overwrites `value` at the final key of `keys`. Every key before
/// the last must already resolve to an object; the path must be non-empty.
pub fn set_value_at_path(root: &mut Value, value: Value, keys: &[String]) -> Result<()> {
    let (last, parents) = keys.split_last().ok_or(TransEditError::EmptyKeyPath)?;
    let mut current = root;
    for key in parents {
        match current {
            Value::Object(map) => {
                current = map
                    .get_mut(key)
                    .ok_or_else(|| TransEditError::PathNotFound(keys.join(".")))?;
            }
            _ => return Err(TransEditError::NotAnObject(keys.join(".")).into()),
        }
    }
    match current {
        Value::Object(map) => {
            map.insert(last.clone(), value);
            Ok(())
        }
        _ => Err(TransEditError::NotAnObject(keys.join(".")).into()),
    }
}
