use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default language set when --langs is not given.
    pub langs: Vec<String>,
    /// Per-language filename template, `{lang}` replaced by the code.
    pub file_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            langs: vec![],
            file_pattern: "{lang}.json".to_string(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    let path = PathBuf::from("transedit.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Reading config file {:?}", path))?;
    let cfg: Config = toml::from_str(&contents)
        .with_context(|| format!("Parsing config file {:?}", path))?;
    Ok(cfg)
}
