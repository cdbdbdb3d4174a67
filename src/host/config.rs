use crate::domain::BuildError;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the project configuration file looked up in the source directory.
pub const CONFIG_FILE: &str = "conf.toml";

pub const DEFAULT_IMGPATH: &str = "_images";

/// Resolved configuration: registered defaults overlaid with user values.
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: toml::Table,
}

impl Config {
    /// Merges user values over the registered defaults. Keys nobody registered
    /// are reported and dropped.
    pub fn resolve(user: toml::Table, registered: &BTreeMap<String, Option<toml::Value>>) -> Self {
        let mut values = toml::Table::new();
        for (name, default) in registered {
            if let Some(default) = default {
                values.insert(name.clone(), default.clone());
            }
        }

        for (name, value) in user {
            if registered.contains_key(&name) {
                values.insert(name, value);
            } else {
                log::warn!("unknown config value `{name}` in configuration, ignoring");
            }
        }

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&toml::Value> {
        self.values.get(name)
    }

    /// Deserializes a value into `T`. Unset values are `Ok(None)`.
    pub fn typed<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, BuildError> {
        self.values
            .get(name)
            .cloned()
            .map(|value| value.try_into::<T>())
            .transpose()
            .map_err(|source| BuildError::ConfigValue {
                name: name.to_string(),
                source,
            })
    }
}

pub fn load_file(path: &Path) -> Result<toml::Table, BuildError> {
    let contents = std::fs::read_to_string(path).map_err(|source| BuildError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| BuildError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a `NAME=VALUE` override. VALUE is read as TOML when possible,
/// otherwise taken as a plain string.
pub fn parse_override(arg: &str) -> Result<(String, toml::Value), BuildError> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| BuildError::InvalidOverride(arg.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(BuildError::InvalidOverride(arg.to_string()));
    }

    let value = toml::from_str::<toml::Table>(&format!("value = {raw}"))
        .ok()
        .and_then(|mut table| table.remove("value"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()));

    Ok((name.to_string(), value))
}
