//! Persisted daemon settings (`/etc/system76-daemon.json`)

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::error::{IoResultExt, LauncherResult};

/// Flat key-to-string mapping read from the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    entries: HashMap<String, String>,
}

impl Settings {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Build settings from a parsed JSON document. Strings are kept verbatim,
    /// any other value is stored as its JSON text (`true` becomes `"true"`).
    pub fn from_json(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };
        let entries = map
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();
        Some(Self { entries })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Load settings from `path`.
///
/// A missing file yields empty settings. Malformed content is logged and also
/// yields empty settings; only other I/O failures are errors.
pub fn load_config(path: &Path) -> LauncherResult<Settings> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No settings file at {}", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(e).with_context(format!("reading {}", path.display())),
    };

    let value: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
            return Ok(Settings::default());
        }
    };

    match Settings::from_json(value) {
        Some(settings) => {
            log::debug!("Loaded {} setting(s) from {}", settings.len(), path.display());
            Ok(settings)
        }
        None => {
            log::warn!("Ignoring settings file {}: top level is not an object", path.display());
            Ok(Settings::default())
        }
    }
}
