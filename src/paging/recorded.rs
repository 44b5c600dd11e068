use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{Error, Result};
use crate::paging::decode::{PageShape, decode_page};
use crate::paging::record::{Record, RecordFields};
use crate::paging::{Page, PageRequest, PageSource};

#[derive(Debug, Deserialize)]
struct Capture {
    start: Value,
    #[serde(default)]
    pages: HashMap<String, Value>,
}

/// Replays a captured paginated listing from disk. The `limit` hint is ignored.
///
/// The capture file looks like `{ "start": <body>, "pages": { "<cursor>": <body> } }`,
/// where each body is in the configured [`PageShape`].
#[derive(Debug)]
pub struct RecordedSource {
    shape: PageShape,
    fields: RecordFields,
    start: Value,
    pages: HashMap<String, Value>,
    fetches: usize,
}

impl RecordedSource {
    pub fn load(path: impl AsRef<Path>, shape: PageShape, fields: RecordFields) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::unavailable(format!("Failed to read capture {}: {e}", path.display()))
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|e| {
            Error::decode(format!("Invalid JSON in capture '{}': {e}", path.display()))
        })?;
        Self::from_value(value, shape, fields)
    }

    pub fn from_value(value: Value, shape: PageShape, fields: RecordFields) -> Result<Self> {
        let capture: Capture = serde_json::from_value(value)
            .map_err(|e| Error::decode(format!("Capture must have a 'start' page: {e}")))?;
        Ok(Self {
            shape,
            fields,
            start: capture.start,
            pages: capture.pages,
            fetches: 0,
        })
    }

    pub fn fetches(&self) -> usize {
        self.fetches
    }
}

impl PageSource<Record> for RecordedSource {
    fn fetch(&mut self, request: PageRequest) -> Result<Page<Record>> {
        self.fetches += 1;
        let body = match &request.cursor {
            None => &self.start,
            Some(cursor) => self.pages.get(cursor.as_str()).ok_or_else(|| {
                Error::unavailable(format!("No recorded page for cursor '{cursor}'"))
            })?,
        };
        // Pages are served whole: the cursor already points past them, so a
        // cut page would lose its tail. The paginator caps the count.
        let page = decode_page(self.shape, body)?;
        let fields = &self.fields;
        page.try_map(|value| Record::wrap(value, fields))
    }
}
