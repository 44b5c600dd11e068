//! Weighted-ratio string similarity on a 0–100 scale.
//!
//! Inputs are expected to be match keys already (see
//! [`ToMatchKey`](crate::extensions::string::ToMatchKey)): lowercase,
//! single-spaced, trimmed.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Plain edit-distance similarity.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Best `ratio` of the shorter string against every equally long window of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    if short_len == 0 {
        return 0.0;
    }
    let long_chars: Vec<char> = long.chars().collect();
    if short_len == long_chars.len() {
        return ratio(short, long);
    }

    let mut best = 0.0_f64;
    for window in long_chars.windows(short_len) {
        let window: String = window.iter().collect();
        best = best.max(ratio(short, &window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

struct TokenSets {
    common: String,
    only_a: String,
    only_b: String,
}

impl TokenSets {
    fn split(a: &str, b: &str) -> Self {
        let set_a: BTreeSet<&str> = a.split_whitespace().collect();
        let set_b: BTreeSet<&str> = b.split_whitespace().collect();
        let join = |tokens: Vec<&str>| tokens.join(" ");
        Self {
            common: join(set_a.intersection(&set_b).copied().collect()),
            only_a: join(set_a.difference(&set_b).copied().collect()),
            only_b: join(set_b.difference(&set_a).copied().collect()),
        }
    }

    fn combined(&self, rest: &str) -> String {
        match (self.common.is_empty(), rest.is_empty()) {
            (true, _) => rest.to_string(),
            (false, true) => self.common.clone(),
            (false, false) => format!("{} {}", self.common, rest),
        }
    }
}

/// Order- and duplicate-insensitive comparison. A token subset scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let sets = TokenSets::split(a, b);
    if !sets.common.is_empty() && (sets.only_a.is_empty() || sets.only_b.is_empty()) {
        return 100.0;
    }
    let with_a = sets.combined(&sets.only_a);
    let with_b = sets.combined(&sets.only_b);
    let mut best = ratio(&with_a, &with_b);
    if !sets.common.is_empty() {
        best = best
            .max(ratio(&sets.common, &with_a))
            .max(ratio(&sets.common, &with_b));
    }
    best
}

fn partial_token_sort_ratio(a: &str, b: &str) -> f64 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn partial_token_set_ratio(a: &str, b: &str) -> f64 {
    let sets = TokenSets::split(a, b);
    if !sets.common.is_empty() {
        return 100.0;
    }
    partial_ratio(&sets.only_a, &sets.only_b)
}

const UNBASE_SCALE: f64 = 0.95;

/// Blend of the ratios above, weighted by how different the lengths are.
///
/// Identical inputs score 100. Only identical inputs do: every other path is
/// scaled below 100.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let base = ratio(a, b);
    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;

    if len_ratio < 1.5 {
        let token_sort = token_sort_ratio(a, b) * UNBASE_SCALE;
        let token_set = token_set_ratio(a, b) * UNBASE_SCALE;
        return base.max(token_sort).max(token_set);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    let partial = partial_ratio(a, b) * partial_scale;
    let partial_sort = partial_token_sort_ratio(a, b) * UNBASE_SCALE * partial_scale;
    let partial_set = partial_token_set_ratio(a, b) * UNBASE_SCALE * partial_scale;
    base.max(partial).max(partial_sort).max(partial_set)
}
