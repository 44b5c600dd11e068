
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use crate::paging::{Keyed, PageSource, Paginator, Target};

/// How far back the first check for an account looks.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;

/// Items that know when they were added to a listing.
pub trait Timestamped {
    fn added_at(&self) -> Option<DateTime<Utc>>;
}

/// On disk: a flat `{ "<account>": "<rfc3339>" }` map.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
struct WatermarkFile {
    accounts: BTreeMap<String, DateTime<Utc>>,
}

/// Last-checked times per account, kept in a small JSON file.
#[derive(Debug, Clone)]
pub struct WatermarkStore {
    path: PathBuf,
    data: WatermarkFile,
}

impl WatermarkStore {
    /// A missing file is an empty store; it is created on the first `record`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let text = fs::read_to_string(&path)?;
            serde_json::from_str(&text).map_err(|e| {
                Error::Parse(format!("Invalid JSON in '{}': {}", path.display(), e))
            })?
        } else {
            WatermarkFile::default()
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_checked(&self, account: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        self.data
            .accounts
            .get(account)
            .copied()
            .unwrap_or_else(|| now - Duration::days(DEFAULT_LOOKBACK_DAYS))
    }

    pub fn record(&mut self, account: &str, now: DateTime<Utc>) -> Result<()> {
        self.data.accounts.insert(account.to_string(), now);
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Walk every page and keep items added strictly after `since`.
///
/// Items without a timestamp are skipped.
pub fn collect_since<T, S>(source: &mut S, since: DateTime<Utc>, logger: &Logger) -> Result<Vec<T>>
where
    T: Keyed + Timestamped,
    S: PageSource<T> + ?Sized,
{
    let all = Paginator::new(logger).collect(source, Target::All)?;
    let total = all.len();
    let fresh: Vec<T> = all
        .into_iter()
        .filter(|item| item.added_at().is_some_and(|at| at > since))
        .collect();

    logger.scoped("watermark").info(
        format!(
            "{} of {total} item(s) added since {}.",
            fresh.len(),
            since.to_rfc3339()
        ),
        LogTarget::FileOnly,
    );
    Ok(fresh)
}
