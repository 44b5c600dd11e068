use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::core::types::FieldPath;
use crate::errors::{Error, Result};
use crate::fuzzy::Labeled;
use crate::paging::Keyed;
use crate::watermark::Timestamped;

/// Field holding when an entry was added to a library listing.
pub const ADDED_AT_FIELD: &str = "added_at";

/// Which fields of a raw JSON item carry its identity and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    pub key: FieldPath,
    pub label: FieldPath,
}

/// A raw API item with its key and label resolved up front.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    value: Value,
    key: String,
    label: String,
}

impl Record {
    pub fn wrap(value: Value, fields: &RecordFields) -> Result<Self> {
        let key = match lookup(&value, &fields.key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(Error::decode(format!(
                    "key field '{}' must be a string or number, found {other}",
                    fields.key
                )));
            }
            None => {
                return Err(Error::decode(format!(
                    "item is missing key field '{}'",
                    fields.key
                )));
            }
        };
        let label = lookup(&value, &fields.label)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::decode(format!(
                    "item '{key}' is missing label field '{}'",
                    fields.label
                ))
            })?
            .to_string();
        Ok(Self { value, key, label })
    }

    pub fn wrap_all(values: Vec<Value>, fields: &RecordFields) -> Result<Vec<Self>> {
        values.into_iter().map(|v| Record::wrap(v, fields)).collect()
    }

    pub fn id(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

fn lookup<'v>(value: &'v Value, path: &FieldPath) -> Option<&'v Value> {
    path.segments().try_fold(value, |node, seg| node.get(seg))
}

impl Keyed for Record {
    type Key = String;
    fn key(&self) -> String {
        self.key.clone()
    }
}

impl Labeled for Record {
    fn label(&self) -> &str {
        &self.label
    }
}

impl Timestamped for Record {
    fn added_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.value.get(ADDED_AT_FIELD)?.as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
