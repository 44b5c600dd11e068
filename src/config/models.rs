use crate::core::types::{Bool, Count, FetchLimit, FieldPath, Percent};
use crate::errors::Result;
use crate::fuzzy::{DEFAULT_RESULT_LIMIT, DEFAULT_SCORE_CUTOFF};
use crate::paging::Target;
use crate::paging::decode::PageShape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that can be typed in by hand and shown back.
pub trait ConfigValue: Sized + fmt::Display {
    fn parse_value(raw: &str) -> Result<Self>;
}

impl ConfigValue for Percent {
    fn parse_value(raw: &str) -> Result<Self> {
        Percent::try_from_str(raw)
    }
}
impl ConfigValue for Count {
    fn parse_value(raw: &str) -> Result<Self> {
        Count::try_from_str(raw)
    }
}
impl ConfigValue for FetchLimit {
    fn parse_value(raw: &str) -> Result<Self> {
        FetchLimit::try_from_str(raw)
    }
}
impl ConfigValue for PageShape {
    fn parse_value(raw: &str) -> Result<Self> {
        PageShape::try_from(raw)
    }
}
impl ConfigValue for FieldPath {
    fn parse_value(raw: &str) -> Result<Self> {
        FieldPath::try_from_str(raw)
    }
}
impl ConfigValue for Bool {
    fn parse_value(raw: &str) -> Result<Self> {
        Bool::try_from_str(raw)
    }
}

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<()>;
    fn description(&self) -> &str;
}

/// One `{ "value": ..., "description": ... }` entry of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item<T> {
    pub value: T,
    pub description: String,
}

impl<T> Item<T> {
    fn new(value: T, description: &str) -> Self {
        Self {
            value,
            description: description.to_string(),
        }
    }
}

impl<T: ConfigValue> ConfigItem<T> for Item<T> {
    fn get_value(&self) -> &T {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<()> {
        self.value = T::parse_value(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

/// Type-erased view used for table rows and edits by key.
pub(crate) trait EditableItem {
    fn set_str(&mut self, raw: &str) -> Result<()>;
    fn value_string(&self) -> String;
    fn describe(&self) -> &str;
}

impl<T: ConfigValue> EditableItem for Item<T> {
    fn set_str(&mut self, raw: &str) -> Result<()> {
        self.set_value(raw)
    }
    fn value_string(&self) -> String {
        self.value.to_string()
    }
    fn describe(&self) -> &str {
        self.description()
    }
}

pub fn default_score_cutoff() -> Item<Percent> {
    Item::new(
        Percent(DEFAULT_SCORE_CUTOFF),
        "Minimum match score (0-100) for a result to be shown.",
    )
}

pub fn default_result_limit() -> Item<Count> {
    Item::new(
        Count(DEFAULT_RESULT_LIMIT),
        "Maximum number of search results shown at once.",
    )
}

pub fn default_fetch_limit() -> Item<FetchLimit> {
    Item::new(
        FetchLimit(Target::Count(50)),
        "How many items to collect from the source, or 'all'.",
    )
}

pub fn default_page_shape() -> Item<PageShape> {
    Item::new(
        PageShape::Next,
        "Where page bodies keep their continuation cursor.",
    )
}

pub fn default_label_field() -> Item<FieldPath> {
    Item::new(
        FieldPath::known("name"),
        "Dotted path to each item's display name.",
    )
}

pub fn default_key_field() -> Item<FieldPath> {
    Item::new(
        FieldPath::known("id"),
        "Dotted path to each item's unique id.",
    )
}

pub fn default_file_logging() -> Item<Bool> {
    Item::new(Bool(true), "Enable writing log messages to file.")
}
