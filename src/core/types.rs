use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::paging::Target;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "True", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "False", to_string = "False")]
    TextFalse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s.trim()) {
            Ok(fmt) => Ok(Bool(matches!(fmt, BoolFormat::TextTrue))),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Bool, D::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}

/// A similarity score threshold in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent(pub f64);

impl Percent {
    pub fn try_from_str(s: &str) -> Result<Self> {
        let raw = s.trim().trim_end_matches('%');
        let value: f64 = raw
            .parse()
            .map_err(|_| Error::Parse(format!("Invalid score: '{}'. Expected 0-100.", s.trim())))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(Error::Parse(format!(
                "Score {value} is out of range. Expected 0-100."
            )));
        }
        Ok(Percent(value))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Percent::try_from_str(&raw.to_string()).map_err(serde::de::Error::custom)
    }
}

/// A strictly positive count, e.g. the number of results shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Count(pub usize);

impl Count {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(Count(n)),
            _ => Err(Error::Parse(format!(
                "Invalid count: '{}'. Expected a whole number above zero.",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = usize::deserialize(deserializer)?;
        Count::try_from_str(&raw.to_string()).map_err(serde::de::Error::custom)
    }
}

/// How many items to collect: a number, or `all`. Stored as a string in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimit(pub Target);

impl FetchLimit {
    pub fn try_from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(FetchLimit(Target::All));
        }
        s.parse::<usize>()
            .map(|n| FetchLimit(Target::Count(n)))
            .map_err(|_| {
                Error::Parse(format!(
                    "Invalid fetch limit: '{s}'. Expected a whole number or 'all'."
                ))
            })
    }

    pub fn target(&self) -> Target {
        self.0
    }
}

impl fmt::Display for FetchLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Target::All => write!(f, "all"),
            Target::Count(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for FetchLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FetchLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        FetchLimit::try_from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A dotted JSON path such as `snippet.title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn try_from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.split('.').any(|seg| seg.is_empty()) {
            return Err(Error::Parse(format!(
                "Invalid field path: '{s}'. Expected dot-separated names like 'snippet.title'."
            )));
        }
        Ok(FieldPath(s.to_string()))
    }

    /// For built-in paths that are valid by construction.
    pub(crate) fn known(path: &'static str) -> Self {
        FieldPath(path.to_string())
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        FieldPath::try_from_str(&s).map_err(serde::de::Error::custom)
    }
}
