use crate::prompt::Prompt;
use anyhow::Result;
use serde_json::Value;

pub struct NavigateOptions {
    pub allow_new: bool,
}

/// Prefix-filters `keys` by the typed `input`, keeping their original order.
/// When nothing matches, allow-new mode offers the non-empty typed input
/// itself as the only candidate.
pub fn filter_keys(keys: &[String], input: &str, allow_new: bool) -> Vec<String> {
    let matches: Vec<String> = keys
        .iter()
        .filter(|key| input.is_empty() || key.starts_with(input))
        .cloned()
        .collect();
    if matches.is_empty() && allow_new && !input.is_empty() {
        return vec![input.to_string()];
    }
    matches
}

/// Walks `root` one chosen key per prompt, accumulating the key path. Ends at
/// a leaf, or at a key that does not exist yet (allow-new mode): with nothing
/// to descend into, the path ends there.
pub fn navigate(
    root: &Value,
    options: &NavigateOptions,
    prompt: &mut dyn Prompt,
) -> Result<Vec<String>> {
    let mut current = root;
    let mut keys: Vec<String> = Vec::new();
    loop {
        let Value::Object(map) = current else {
            return Ok(keys);
        };
        let candidates: Vec<String> = map.keys().cloned().collect();
        let message = format!(
            "select {} key{}",
            if keys.is_empty() { "a" } else { "another" },
            if options.allow_new { " (or type your own)" } else { "" },
        );
        let allow_new = options.allow_new;
        let chosen = prompt.select(&message, &|input| {
            filter_keys(&candidates, input, allow_new)
        })?;
        match map.get(&chosen) {
            Some(next) => {
                keys.push(chosen);
                current = next;
            }
            None => {
                keys.push(chosen);
                return Ok(keys);
            }
        }
    }
}
