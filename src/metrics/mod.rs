//! String similarity metrics.
//!
//! The clusterer only needs one capability from a metric: score two strings, higher meaning
//! more alike. [`SimilarityMetric`] is that capability. This module also ships the usual
//! family of normalized metrics so callers do not have to bring their own:
//!
//! | Metric | Family | Good for |
//! |---|---|---|
//! | [`Levenshtein`] | edit distance | typos, short labels |
//! | [`Hamming`] | positional mismatch | fixed-width codes |
//! | [`Jaro`] / [`JaroWinkler`] | character matching | person and company names |
//! | [`Jaccard`] / [`SorensenDice`] / [`OverlapCoefficient`] | n-gram sets | reordered tokens, longer text |
//! | [`SmithWatermanGotoh`] | local alignment | one string embedded in another |
//!
//! Every built-in metric returns a score in `[0, 1]`. Two empty strings score `1.0`; an empty
//! string against a non-empty one scores `0.0`. Lengths are counted in `char`s.
//!
//! Any `Fn(&str, &str) -> f64` closure is also a metric.
//!
//! ## Argument order
//!
//! The clusterer always calls `compare(candidate, existing)`: the representative of the group
//! being inserted first, the representative of the group already in the tree second. All
//! built-in metrics are symmetric. A custom asymmetric metric works, but its results depend on
//! that order.
//!
//! ## Non-finite scores
//!
//! Scores are compared with plain `f64` ordering. A metric that returns `NaN` never reaches a
//! threshold, and loses every `left >= right` tie-break in the tree descent. Validating scores
//! is the metric's job.

mod alignment;
mod edit;
mod jaro;
mod ngram;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub use alignment::SmithWatermanGotoh;
pub use edit::{Hamming, Levenshtein};
pub use jaro::{Jaro, JaroWinkler};
pub use ngram::{Jaccard, OverlapCoefficient, SorensenDice, DEFAULT_NGRAM_SIZE};

/// Scores how similar two strings are.
///
/// Implementations must be pure for the duration of a clustering call: the same pair always
/// yields the same score.
pub trait SimilarityMetric: Send + Sync {
    /// Similarity of `a` to `b`. Higher means more similar.
    #[must_use]
    fn compare(&self, a: &str, b: &str) -> f64;
}

impl<F> SimilarityMetric for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn compare(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Wrapper that makes any metric case-insensitive.
///
/// Lowercases both strings before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CaseInsensitive<M>(pub M);

impl<M: SimilarityMetric> SimilarityMetric for CaseInsensitive<M> {
    fn compare(&self, a: &str, b: &str) -> f64 {
        self.0.compare(&a.to_lowercase(), &b.to_lowercase())
    }
}

/// Lowercase `s` unless the comparison is case-sensitive.
pub(crate) fn fold_case(s: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.to_lowercase())
    }
}

/// Scores shared by every built-in metric when either side is empty.
///
/// Returns `None` when both strings are non-empty and the metric has to do real work.
pub(crate) fn empty_score(a: &str, b: &str) -> Option<f64> {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Some(1.0),
        (true, false) | (false, true) => Some(0.0),
        (false, false) => None,
    }
}

/// Any of the built-in metrics, selectable by name.
///
/// ```rust
/// use strclump::{Metric, SimilarityMetric};
///
/// let metric: Metric = "jaro-winkler".parse().unwrap();
/// let metric = metric.with_case_sensitive(false);
/// assert_eq!(metric.compare("MARTHA", "martha"), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    /// See [`Levenshtein`].
    Levenshtein(Levenshtein),
    /// See [`Hamming`].
    Hamming(Hamming),
    /// See [`Jaro`].
    Jaro(Jaro),
    /// See [`JaroWinkler`].
    JaroWinkler(JaroWinkler),
    /// See [`Jaccard`].
    Jaccard(Jaccard),
    /// See [`SorensenDice`].
    SorensenDice(SorensenDice),
    /// See [`OverlapCoefficient`].
    OverlapCoefficient(OverlapCoefficient),
    /// See [`SmithWatermanGotoh`].
    SmithWatermanGotoh(SmithWatermanGotoh),
}

impl Metric {
    /// Every built-in metric with its default settings.
    pub fn all() -> Vec<Metric> {
        vec![
            Metric::Levenshtein(Levenshtein::default()),
            Metric::Hamming(Hamming::default()),
            Metric::Jaro(Jaro::default()),
            Metric::JaroWinkler(JaroWinkler::default()),
            Metric::Jaccard(Jaccard::default()),
            Metric::SorensenDice(SorensenDice::default()),
            Metric::OverlapCoefficient(OverlapCoefficient::default()),
            Metric::SmithWatermanGotoh(SmithWatermanGotoh::default()),
        ]
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Levenshtein(_) => "levenshtein",
            Metric::Hamming(_) => "hamming",
            Metric::Jaro(_) => "jaro",
            Metric::JaroWinkler(_) => "jaro-winkler",
            Metric::Jaccard(_) => "jaccard",
            Metric::SorensenDice(_) => "sorensen-dice",
            Metric::OverlapCoefficient(_) => "overlap-coefficient",
            Metric::SmithWatermanGotoh(_) => "smith-waterman-gotoh",
        }
    }

    /// Whether the wrapped metric distinguishes letter case.
    pub fn case_sensitive(&self) -> bool {
        match self {
            Metric::Levenshtein(m) => m.case_sensitive,
            Metric::Hamming(m) => m.case_sensitive,
            Metric::Jaro(m) => m.case_sensitive,
            Metric::JaroWinkler(m) => m.case_sensitive,
            Metric::Jaccard(m) => m.case_sensitive,
            Metric::SorensenDice(m) => m.case_sensitive,
            Metric::OverlapCoefficient(m) => m.case_sensitive,
            Metric::SmithWatermanGotoh(m) => m.case_sensitive,
        }
    }

    /// Set case sensitivity on the wrapped metric.
    pub fn with_case_sensitive(self, case_sensitive: bool) -> Self {
        match self {
            Metric::Levenshtein(m) => Metric::Levenshtein(m.with_case_sensitive(case_sensitive)),
            Metric::Hamming(m) => Metric::Hamming(m.with_case_sensitive(case_sensitive)),
            Metric::Jaro(m) => Metric::Jaro(m.with_case_sensitive(case_sensitive)),
            Metric::JaroWinkler(m) => Metric::JaroWinkler(m.with_case_sensitive(case_sensitive)),
            Metric::Jaccard(m) => Metric::Jaccard(m.with_case_sensitive(case_sensitive)),
            Metric::SorensenDice(m) => Metric::SorensenDice(m.with_case_sensitive(case_sensitive)),
            Metric::OverlapCoefficient(m) => {
                Metric::OverlapCoefficient(m.with_case_sensitive(case_sensitive))
            }
            Metric::SmithWatermanGotoh(m) => {
                Metric::SmithWatermanGotoh(m.with_case_sensitive(case_sensitive))
            }
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::JaroWinkler(JaroWinkler::default())
    }
}

impl SimilarityMetric for Metric {
    fn compare(&self, a: &str, b: &str) -> f64 {
        match self {
            Metric::Levenshtein(m) => m.compare(a, b),
            Metric::Hamming(m) => m.compare(a, b),
            Metric::Jaro(m) => m.compare(a, b),
            Metric::JaroWinkler(m) => m.compare(a, b),
            Metric::Jaccard(m) => m.compare(a, b),
            Metric::SorensenDice(m) => m.compare(a, b),
            Metric::OverlapCoefficient(m) => m.compare(a, b),
            Metric::SmithWatermanGotoh(m) => m.compare(a, b),
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    /// Parse a metric name. Case is ignored and `_`, `-` and spaces are interchangeable,
    /// so `"Jaro_Winkler"` and `"jaro-winkler"` are the same metric.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let metric = match key.as_str() {
            "levenshtein" => Metric::Levenshtein(Levenshtein::default()),
            "hamming" => Metric::Hamming(Hamming::default()),
            "jaro" => Metric::Jaro(Jaro::default()),
            "jarowinkler" => Metric::JaroWinkler(JaroWinkler::default()),
            "jaccard" => Metric::Jaccard(Jaccard::default()),
            "sorensendice" | "dice" => Metric::SorensenDice(SorensenDice::default()),
            "overlapcoefficient" | "overlap" => {
                Metric::OverlapCoefficient(OverlapCoefficient::default())
            }
            "smithwatermangotoh" | "smithwaterman" => {
                Metric::SmithWatermanGotoh(SmithWatermanGotoh::default())
            }
            _ => return Err(Error::UnknownMetric(s.to_string())),
        };
        Ok(metric)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for metric in Metric::all() {
            let parsed: Metric = metric.name().parse().unwrap();
            assert_eq!(parsed, metric);
        }

        let parsed: Metric = "Jaro_Winkler".parse().unwrap();
        assert_eq!(parsed.name(), "jaro-winkler");

        let parsed: Metric = "  sorensen dice ".parse().unwrap();
        assert_eq!(parsed.name(), "sorensen-dice");
    }

    #[test]
    fn test_parse_unknown() {
        let err = "cosine".parse::<Metric>().unwrap_err();
        assert!(matches!(err, Error::UnknownMetric(ref name) if name == "cosine"));
    }

    #[test]
    fn test_case_sensitivity_toggle() {
        for metric in Metric::all() {
            assert!(metric.case_sensitive(), "{metric} should default to case-sensitive");
            let folded = metric.clone().with_case_sensitive(false);
            assert!(!folded.case_sensitive());
            assert_eq!(folded.compare("Apple", "aPPLE"), 1.0, "{metric}");
        }
    }

    #[test]
    fn test_builtin_metrics_are_normalized() {
        let pairs = [
            ("apple", "aple"),
            ("banana", "bananna"),
            ("orange", "apple"),
            ("a", "bcdefgh"),
            ("same", "same"),
            ("", "x"),
            ("", ""),
        ];

        for metric in Metric::all() {
            for (a, b) in pairs {
                let s = metric.compare(a, b);
                assert!((0.0..=1.0).contains(&s), "{metric}({a:?}, {b:?}) = {s}");
            }
            assert_eq!(metric.compare("same", "same"), 1.0, "{metric}");
            assert_eq!(metric.compare("", ""), 1.0, "{metric}");
            assert_eq!(metric.compare("", "x"), 0.0, "{metric}");
        }
    }

    #[test]
    fn test_builtin_metrics_are_symmetric() {
        let pairs = [("apple", "aple"), ("martha", "marhta"), ("dixon", "dicksonx")];
        for metric in Metric::all() {
            for (a, b) in pairs {
                let ab = metric.compare(a, b);
                let ba = metric.compare(b, a);
                assert!((ab - ba).abs() < 1e-12, "{metric}: {ab} vs {ba}");
            }
        }
    }

    #[test]
    fn test_closure_metric() {
        let exact = |a: &str, b: &str| if a == b { 1.0 } else { 0.0 };
        assert_eq!(exact.compare("x", "x"), 1.0);
        assert_eq!(exact.compare("x", "y"), 0.0);
    }

    #[test]
    fn test_case_insensitive_wrapper() {
        let exact = |a: &str, b: &str| if a == b { 1.0 } else { 0.0 };
        let folded = CaseInsensitive(exact);
        assert_eq!(folded.compare("Hello", "hELLO"), 1.0);
    }
}
