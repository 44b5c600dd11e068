pub mod scorer;

use std::fmt;

use crate::extensions::string::ToMatchKey;

pub const DEFAULT_SCORE_CUTOFF: f64 = 50.0;
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Anything with a display name that can be searched.
pub trait Labeled {
    fn label(&self) -> &str;
}

impl Labeled for String {
    fn label(&self) -> &str {
        self
    }
}

impl Labeled for &str {
    fn label(&self) -> &str {
        self
    }
}

/// One ranked match. `index` points back into the searched slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub label: String,
    pub score: f64,
    pub index: usize,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}%)", self.label, self.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    cutoff: f64,
    limit: usize,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_CUTOFF, DEFAULT_RESULT_LIMIT)
    }
}

impl FuzzyMatcher {
    pub fn new(cutoff: f64, limit: usize) -> Self {
        Self {
            cutoff: cutoff.clamp(0.0, 100.0),
            limit,
        }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Candidates scoring at least the cutoff, best first, at most `limit` of them.
    /// Equal scores keep the order of `items`. A blank query matches nothing.
    pub fn rank<T: Labeled>(&self, items: &[T], query: &str) -> Vec<Candidate> {
        let query = query.to_match_key();
        if query.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<Candidate> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let score = scorer::weighted_ratio(&query, &item.label().to_match_key());
                (score >= self.cutoff).then(|| Candidate {
                    label: item.label().to_string(),
                    score,
                    index,
                })
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(self.limit);
        ranked
    }
}
