//! Character n-gram set metrics.
//!
//! Each string is split into overlapping `n`-character grams, kept as a multiset. A string
//! shorter than `n` contributes itself as a single gram.

use std::collections::HashMap;

use super::{empty_score, fold_case, SimilarityMetric};
use crate::error::{Error, Result};

/// Default gram length: bigrams.
pub const DEFAULT_NGRAM_SIZE: usize = 2;

/// Multiset of grams with its total cardinality.
struct Grams {
    counts: HashMap<String, usize>,
    total: usize,
}

impl Grams {
    fn new(s: &str, n: usize) -> Self {
        let chars: Vec<char> = s.chars().collect();
        let mut counts: HashMap<String, usize> = HashMap::new();

        if chars.len() < n {
            counts.insert(s.to_string(), 1);
        } else {
            for window in chars.windows(n) {
                *counts.entry(window.iter().collect()).or_insert(0) += 1;
            }
        }

        let total = counts.values().sum();
        Self { counts, total }
    }

    fn intersection(&self, other: &Grams) -> usize {
        self.counts
            .iter()
            .map(|(gram, &count)| other.counts.get(gram).map_or(0, |&c| c.min(count)))
            .sum()
    }
}

fn check_ngram_size(ngram_size: usize) -> Result<usize> {
    if ngram_size == 0 {
        return Err(Error::InvalidParameter {
            name: "ngram_size",
            message: "must be at least 1",
        });
    }
    Ok(ngram_size)
}

macro_rules! ngram_metric {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            /// Distinguish letter case (default `true`).
            pub case_sensitive: bool,
            ngram_size: usize,
        }

        impl $name {
            /// Create a case-sensitive metric over bigrams.
            pub fn new() -> Self {
                Self {
                    case_sensitive: true,
                    ngram_size: DEFAULT_NGRAM_SIZE,
                }
            }

            /// Set case sensitivity.
            pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
                self.case_sensitive = case_sensitive;
                self
            }

            /// Set the gram length.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidParameter`] when `ngram_size` is zero.
            pub fn with_ngram_size(mut self, ngram_size: usize) -> Result<Self> {
                self.ngram_size = check_ngram_size(ngram_size)?;
                Ok(self)
            }

            /// Gram length in use.
            pub fn ngram_size(&self) -> usize {
                self.ngram_size
            }

            fn grams(&self, a: &str, b: &str) -> (Grams, Grams) {
                let a = fold_case(a, self.case_sensitive);
                let b = fold_case(b, self.case_sensitive);
                (Grams::new(&a, self.ngram_size), Grams::new(&b, self.ngram_size))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

ngram_metric!(
    /// Jaccard index over n-gram multisets: `|A ∩ B| / |A ∪ B|`.
    Jaccard
);

ngram_metric!(
    /// Sørensen-Dice coefficient over n-gram multisets: `2|A ∩ B| / (|A| + |B|)`.
    SorensenDice
);

ngram_metric!(
    /// Overlap coefficient over n-gram multisets: `|A ∩ B| / min(|A|, |B|)`.
    ///
    /// Scores 1 whenever one string's grams are contained in the other's.
    OverlapCoefficient
);

impl SimilarityMetric for Jaccard {
    fn compare(&self, a: &str, b: &str) -> f64 {
        if let Some(score) = empty_score(a, b) {
            return score;
        }
        let (a, b) = self.grams(a, b);
        let common = a.intersection(&b);
        let union = a.total + b.total - common;
        common as f64 / union as f64
    }
}

impl SimilarityMetric for SorensenDice {
    fn compare(&self, a: &str, b: &str) -> f64 {
        if let Some(score) = empty_score(a, b) {
            return score;
        }
        let (a, b) = self.grams(a, b);
        2.0 * a.intersection(&b) as f64 / (a.total + b.total) as f64
    }
}

impl SimilarityMetric for OverlapCoefficient {
    fn compare(&self, a: &str, b: &str) -> f64 {
        if let Some(score) = empty_score(a, b) {
            return score;
        }
        let (a, b) = self.grams(a, b);
        a.intersection(&b) as f64 / a.total.min(b.total) as f64
    }
}
