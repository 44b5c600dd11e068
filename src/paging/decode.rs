use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::paging::{Cursor, Page};

/// Where a page body keeps its continuation marker.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum PageShape {
    /// `{ "items": [...], "next": "<url>" | null }`
    #[strum(serialize = "next", to_string = "next")]
    Next,
    /// `{ "items": [...], "nextPageToken": "<token>" }`, token absent on the last page.
    #[strum(serialize = "next-page-token", to_string = "next-page-token")]
    NextPageToken,
}

impl PageShape {
    pub fn help(&self) -> &'static str {
        match self {
            PageShape::Next => "Next page is a URL in 'next'; null on the last page.",
            PageShape::NextPageToken => {
                "Next page is a token in 'nextPageToken'; missing on the last page."
            }
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Parse(format!(
                "Invalid page shape: '{}'. Allowed shapes: {}",
                s.trim(),
                valid_csv::<PageShape>()
            ))
        })
    }

    fn cursor_field(&self) -> &'static str {
        match self {
            PageShape::Next => "next",
            PageShape::NextPageToken => "nextPageToken",
        }
    }
}

pub fn decode_page(shape: PageShape, body: &Value) -> Result<Page<Value>> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::decode("page body has no 'items' array"))?
        .clone();

    let field = shape.cursor_field();
    let next = match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(Cursor::new(s.as_str())),
        Some(other) => {
            return Err(Error::decode(format!(
                "'{field}' must be a string or null, found {other}"
            )));
        }
    };

    Ok(Page::new(items, next))
}
