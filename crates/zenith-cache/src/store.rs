use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Flat string key/value store shaped like a save-file node.
///
/// Entries keep their insertion order when serialized, so a writer controls
/// the on-disk layout; parsing goes through TOML, which also handles keys
/// containing `:`.
#[derive(Clone, Debug, Default)]
pub struct SaveStore {
    entries: Vec<(String, String)>,
}

impl SaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace an entry. New keys append in order.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, Box<dyn Error>> {
        let values: BTreeMap<String, String> = toml::from_str(text)?;
        Ok(Self {
            entries: values.into_iter().collect(),
        })
    }

    /// Serialize in entry order. Keys and values are rendered as quoted TOML
    /// strings so arbitrary body names survive the trip.
    pub fn to_toml_string(&self) -> String {
        let mut text = String::new();
        for (key, value) in &self.entries {
            let _ = writeln!(
                text,
                "{} = {}",
                toml::Value::from(key.as_str()),
                toml::Value::from(value.as_str())
            );
        }
        text
    }

    pub fn load_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn save_path(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.to_toml_string())
    }
}
