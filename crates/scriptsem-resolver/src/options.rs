//! Resolver configuration.
//!
//! Options are read from JSON with camelCase keys. Boolean switches accept the
//! usual string spellings (`"true"`, `"yes"`, `"1"`, ...) as well.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Deserialize a boolean that may also be written as a string.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverOptions {
    /// Replace the names of non-public entities with short generated tokens.
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub minimize_names: bool,
}

impl ResolverOptions {
    pub fn minimized() -> Self {
        ResolverOptions {
            minimize_names: true,
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("failed to parse resolver options")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read resolver options: {}", path.display()))?;
        Self::from_json_str(&source)
            .with_context(|| format!("failed to load resolver options: {}", path.display()))
    }
}
