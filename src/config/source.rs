use anyhow::{Context, Result};
use serde_yaml::Value;
use std::collections::HashMap;
use std::{env, fs::File, io::Read, path::Path};

use super::error::ConfigError;

/// Flat, string-keyed settings with typed fallback getters.
///
/// Absent and empty values fall back to the given default.
pub trait SettingsSource: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;

    fn get_string(&self, key: &str, default: &str) -> String {
        non_empty(self, key).unwrap_or_else(|| default.to_string())
    }

    fn get_int(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        match non_empty(self, key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Parse {
                key: key.to_string(),
                value: raw,
                expected: "integer",
            }),
        }
    }

    fn get_bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match non_empty(self, key) {
            None => Ok(default),
            Some(raw) => match raw.trim() {
                "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
                "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
                _ => Err(ConfigError::Parse {
                    key: key.to_string(),
                    value: raw.clone(),
                    expected: "boolean",
                }),
            },
        }
    }

    /// Comma separated list; items are trimmed but empty items are kept.
    fn get_string_array(&self, key: &str, default: &[&str]) -> Vec<String> {
        match non_empty(self, key) {
            None => default.iter().map(|s| s.to_string()).collect(),
            Some(raw) => raw.split(',').map(|s| s.trim().to_string()).collect(),
        }
    }
}

fn non_empty<S: SettingsSource + ?Sized>(source: &S, key: &str) -> Option<String> {
    source.lookup(key).filter(|v| !v.is_empty())
}

/// Reads settings from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl SettingsSource for EnvSource {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// In-memory settings, mostly for tests and file based configuration.
#[derive(Debug, Default, Clone)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Loads a flat YAML mapping of `KEY: value`. Sequences become comma separated lists.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open settings file: {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        Self::from_yaml_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let mapping: HashMap<String, Value> = serde_yaml::from_str(contents)?;
        let mut values = HashMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let rendered = match &value {
                Value::Sequence(items) => items
                    .iter()
                    .map(scalar_to_string)
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("Invalid list item under '{}'", key))?
                    .join(","),
                other => scalar_to_string(other)
                    .with_context(|| format!("Invalid value under '{}'", key))?,
            };
            values.insert(key, rendered);
        }
        Ok(Self { values })
    }
}

fn scalar_to_string(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        other => Err(anyhow::anyhow!("expected a scalar, got {:?}", other)),
    }
}

impl SettingsSource for MapSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
