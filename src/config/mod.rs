pub mod models;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{ConfigItem, EditableItem, Item};
use crate::core::types::{Bool, Count, FetchLimit, FieldPath, Percent};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::fuzzy::FuzzyMatcher;
use crate::paging::Target;
use crate::paging::decode::PageShape;
use crate::paging::record::RecordFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    ScoreCutoff,
    ResultLimit,
    FetchLimit,
    PageShape,
    LabelField,
    KeyField,
    FileLoggingEnabled,
}

impl ConfigKey {
    pub fn try_from_str(s: &str) -> Result<Self> {
        ConfigKey::from_str(s.trim()).map_err(|_| {
            Error::Parse(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                s.trim(),
                valid_csv::<ConfigKey>()
            ))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "models::default_score_cutoff")]
    pub score_cutoff: Item<Percent>,
    #[serde(default = "models::default_result_limit")]
    pub result_limit: Item<Count>,
    #[serde(default = "models::default_fetch_limit")]
    pub fetch_limit: Item<FetchLimit>,
    #[serde(default = "models::default_page_shape")]
    pub page_shape: Item<PageShape>,
    #[serde(default = "models::default_label_field")]
    pub label_field: Item<FieldPath>,
    #[serde(default = "models::default_key_field")]
    pub key_field: Item<FieldPath>,
    #[serde(default = "models::default_file_logging")]
    pub file_logging_enabled: Item<Bool>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            score_cutoff: models::default_score_cutoff(),
            result_limit: models::default_result_limit(),
            fetch_limit: models::default_fetch_limit(),
            page_shape: models::default_page_shape(),
            label_field: models::default_label_field(),
            key_field: models::default_key_field(),
            file_logging_enabled: models::default_file_logging(),
        }
    }
}

impl ConfigFile {
    fn item(&self, key: ConfigKey) -> &dyn EditableItem {
        match key {
            ConfigKey::ScoreCutoff => &self.score_cutoff,
            ConfigKey::ResultLimit => &self.result_limit,
            ConfigKey::FetchLimit => &self.fetch_limit,
            ConfigKey::PageShape => &self.page_shape,
            ConfigKey::LabelField => &self.label_field,
            ConfigKey::KeyField => &self.key_field,
            ConfigKey::FileLoggingEnabled => &self.file_logging_enabled,
        }
    }

    fn item_mut(&mut self, key: ConfigKey) -> &mut dyn EditableItem {
        match key {
            ConfigKey::ScoreCutoff => &mut self.score_cutoff,
            ConfigKey::ResultLimit => &mut self.result_limit,
            ConfigKey::FetchLimit => &mut self.fetch_limit,
            ConfigKey::PageShape => &mut self.page_shape,
            ConfigKey::LabelField => &mut self.label_field,
            ConfigKey::KeyField => &mut self.key_field,
            ConfigKey::FileLoggingEnabled => &mut self.file_logging_enabled,
        }
    }
}

/// (key, old value, new value) of the most recent successful edit.
pub type ConfigChange = (String, String, String);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    pub last_change: Option<ConfigChange>,
}

#[derive(Debug, Clone)]
pub struct ConfigRows(Vec<(String, String, String)>);

impl ConfigRows {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(String, String, String)> {
        self.0.iter()
    }
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::Parse(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::Parse(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::Parse(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    /// Loads `path`, writing a default file there first if none exists.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Self {
            path: path.to_path_buf(),
            data: ConfigFile::default(),
            last_change: None,
        };
        config.save()?;
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn score_cutoff(&self) -> f64 {
        self.data.score_cutoff.get_value().0
    }
    pub fn result_limit(&self) -> usize {
        self.data.result_limit.get_value().0
    }
    pub fn fetch_limit(&self) -> Target {
        self.data.fetch_limit.get_value().target()
    }
    pub fn page_shape(&self) -> PageShape {
        *self.data.page_shape.get_value()
    }
    pub fn record_fields(&self) -> RecordFields {
        RecordFields {
            key: self.data.key_field.get_value().clone(),
            label: self.data.label_field.get_value().clone(),
        }
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    /// A matcher tuned by `SCORE_CUTOFF` and `RESULT_LIMIT`.
    pub fn matcher(&self) -> FuzzyMatcher {
        FuzzyMatcher::new(self.score_cutoff(), self.result_limit())
    }

    pub fn rows(&self) -> ConfigRows {
        let rows = ConfigKey::iter()
            .map(|key| {
                let item = self.data.item(key);
                (
                    key.to_string(),
                    item.describe().to_string(),
                    item.value_string(),
                )
            })
            .collect();
        ConfigRows(rows)
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.data.item(key).value_string();
        self.edit(|cfg| cfg.item_mut(key).set_str(new_value))?;
        let new_val = self.data.item(key).value_string();
        self.last_change = Some((key.to_string(), old, new_val));
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<ConfigChange> {
        self.last_change.take()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = ConfigKey::try_from_str(key_str)?;
        self.set_key(key, new_value)
    }

    /// Applies every pair, then saves once. Nothing is saved if any pair fails.
    pub fn set_many<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut staged = self.data.clone();
        for (k, v) in pairs {
            let key = ConfigKey::try_from_str(k.as_ref())?;
            staged.item_mut(key).set_str(v.as_ref())?;
        }
        self.edit(|cfg| {
            *cfg = staged;
            Ok(())
        })
    }

    /// Run-only override of `FETCH_LIMIT`; never written to disk.
    pub fn override_fetch_limit(&mut self, raw: &str) -> Result<()> {
        self.data.fetch_limit.set_value(raw)
    }

    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        f(&mut self.data)?;
        self.save()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| Error::Config(format!("Failed to encode config: {}", e)))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(&self.path, json)
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}
