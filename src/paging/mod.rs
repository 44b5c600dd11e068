pub mod decode;
pub mod record;
pub mod recorded;

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::errors::Result;
use crate::logging::{LogTarget, Logger};

/// Opaque marker for where the next page begins: a full URL or a page token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next: Option<Cursor>) -> Self {
        Self { items, next }
    }

    /// A page with no successor.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    pub fn try_map<U, F>(self, f: F) -> Result<Page<U>>
    where
        F: FnMut(T) -> Result<U>,
    {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<U>>>()?;
        Ok(Page {
            items,
            next: self.next,
        })
    }
}

/// What the paginator asks the source for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// `None` for the first page.
    pub cursor: Option<Cursor>,
    /// Page-size hint: the remaining shortfall. `None` when collecting everything.
    pub limit: Option<usize>,
}

/// The remote collaborator. Implemented for closures so fakes can be injected.
pub trait PageSource<T> {
    fn fetch(&mut self, request: PageRequest) -> Result<Page<T>>;
}

impl<T, F> PageSource<T> for F
where
    F: FnMut(PageRequest) -> Result<Page<T>>,
{
    fn fetch(&mut self, request: PageRequest) -> Result<Page<T>> {
        self(request)
    }
}

/// Identity used to drop items a source serves twice.
pub trait Keyed {
    type Key: Eq + Hash;
    fn key(&self) -> Self::Key;
}

macro_rules! keyed_by_value {
    ($($ty:ty),*) => {
        $(impl Keyed for $ty {
            type Key = $ty;
            fn key(&self) -> Self::Key {
                self.clone()
            }
        })*
    };
}

keyed_by_value!(String, u32, u64, usize, i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Count(usize),
    All,
}

impl Target {
    fn reached(self, collected: usize) -> bool {
        match self {
            Target::Count(n) => collected >= n,
            Target::All => false,
        }
    }

    fn shortfall(self, collected: usize) -> Option<usize> {
        match self {
            Target::Count(n) => Some(n.saturating_sub(collected)),
            Target::All => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Count(n) => write!(f, "{n}"),
            Target::All => write!(f, "all"),
        }
    }
}

/// Walks a cursor-paginated source until the target is met or pages run out.
#[derive(Debug, Clone)]
pub struct Paginator {
    logger: Logger,
}

impl Paginator {
    pub fn new(logger: &Logger) -> Self {
        Self {
            logger: logger.scoped("paging"),
        }
    }

    /// Collect `min(target, available)` items in source order.
    ///
    /// Any fetch failure aborts the walk and comes back as
    /// `Error::SourceUnavailable`; nothing collected so far is returned.
    pub fn collect<T, S>(&self, source: &mut S, target: Target) -> Result<Vec<T>>
    where
        T: Keyed,
        S: PageSource<T> + ?Sized,
    {
        let mut collected = Vec::new();
        if target.reached(0) {
            return Ok(collected);
        }

        let mut seen_keys = HashSet::new();
        let mut seen_cursors = HashSet::new();
        let mut cursor: Option<Cursor> = None;
        let mut calls = 0usize;

        loop {
            let request = PageRequest {
                cursor: cursor.clone(),
                limit: target.shortfall(collected.len()),
            };
            calls += 1;
            self.logger.info(
                format!(
                    "Fetch #{calls}: cursor={} limit={}",
                    request.cursor.as_ref().map_or("<start>", Cursor::as_str),
                    request.limit.map_or("-".to_string(), |n| n.to_string())
                ),
                LogTarget::FileOnly,
            );

            let page = source.fetch(request).map_err(|err| {
                let err = err.into_unavailable();
                self.logger
                    .error(format!("Fetch #{calls} failed. {err}"), LogTarget::FileOnly);
                err
            })?;

            for item in page.items {
                if target.reached(collected.len()) {
                    break;
                }
                if seen_keys.insert(item.key()) {
                    collected.push(item);
                }
            }

            if target.reached(collected.len()) {
                break;
            }
            let Some(next) = page.next else {
                break;
            };
            if !seen_cursors.insert(next.clone()) {
                self.logger.warn(
                    format!("Source repeated cursor '{next}'; stopping after {calls} fetch(es)."),
                    LogTarget::FileOnly,
                );
                break;
            }
            cursor = Some(next);
        }

        self.logger.info(
            format!(
                "Collected {} item(s) in {calls} fetch(es), target {target}.",
                collected.len()
            ),
            LogTarget::FileOnly,
        );
        Ok(collected)
    }
}
