//! Jaro and Jaro-Winkler similarity.
//!
//! Jaro counts characters that appear in both strings within a sliding window, then penalizes
//! matched characters that appear in a different order:
//!
//! ```text
//! jaro = (m/|a| + m/|b| + (m - t)/m) / 3
//! ```
//!
//! where `m` is the number of matches and `t` half the number of out-of-order matches.
//! Jaro-Winkler boosts pairs sharing a common prefix, which suits names.

use super::{empty_score, fold_case, SimilarityMetric};
use crate::error::{Error, Result};

/// Jaro similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jaro {
    /// Distinguish letter case (default `true`).
    pub case_sensitive: bool,
}

impl Jaro {
    /// Create a case-sensitive Jaro metric.
    pub fn new() -> Self {
        Self {
            case_sensitive: true,
        }
    }

    /// Set case sensitivity.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

impl Default for Jaro {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityMetric for Jaro {
    fn compare(&self, a: &str, b: &str) -> f64 {
        if let Some(score) = empty_score(a, b) {
            return score;
        }
        let a: Vec<char> = fold_case(a, self.case_sensitive).chars().collect();
        let b: Vec<char> = fold_case(b, self.case_sensitive).chars().collect();
        jaro(&a, &b)
    }
}

/// Jaro-Winkler similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JaroWinkler {
    /// Distinguish letter case (default `true`).
    pub case_sensitive: bool,
    /// Longest common prefix that earns a bonus (default 4).
    prefix_size: usize,
    /// Bonus per prefix character (default 0.1).
    scaling: f64,
}

/// The bonus may at most close the gap to 1, or scores leave `[0, 1]`.
fn check_prefix_bonus(prefix_size: usize, scaling: f64) -> Result<()> {
    if !scaling.is_finite() || scaling < 0.0 {
        return Err(Error::InvalidParameter {
            name: "scaling",
            message: "must be finite and non-negative",
        });
    }
    if prefix_size as f64 * scaling > 1.0 {
        return Err(Error::InvalidParameter {
            name: "prefix_size",
            message: "prefix_size * scaling must not exceed 1",
        });
    }
    Ok(())
}

impl JaroWinkler {
    /// Create a case-sensitive Jaro-Winkler metric with the standard parameters.
    pub fn new() -> Self {
        Self {
            case_sensitive: true,
            prefix_size: 4,
            scaling: 0.1,
        }
    }

    /// Set case sensitivity.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set the maximum prefix length that earns a bonus.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `prefix_size * scaling` exceeds 1.
    pub fn with_prefix_size(mut self, prefix_size: usize) -> Result<Self> {
        check_prefix_bonus(prefix_size, self.scaling)?;
        self.prefix_size = prefix_size;
        Ok(self)
    }

    /// Set the bonus earned per common prefix character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `scaling` is negative or not finite, or when
    /// `prefix_size * scaling` exceeds 1.
    pub fn with_scaling(mut self, scaling: f64) -> Result<Self> {
        check_prefix_bonus(self.prefix_size, scaling)?;
        self.scaling = scaling;
        Ok(self)
    }

    /// Longest common prefix that earns a bonus.
    pub fn prefix_size(&self) -> usize {
        self.prefix_size
    }

    /// Bonus per common prefix character.
    pub fn scaling(&self) -> f64 {
        self.scaling
    }
}

impl Default for JaroWinkler {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityMetric for JaroWinkler {
    fn compare(&self, a: &str, b: &str) -> f64 {
        if let Some(score) = empty_score(a, b) {
            return score;
        }
        let a: Vec<char> = fold_case(a, self.case_sensitive).chars().collect();
        let b: Vec<char> = fold_case(b, self.case_sensitive).chars().collect();

        let sim = jaro(&a, &b);
        let prefix = a
            .iter()
            .zip(b.iter())
            .take(self.prefix_size)
            .take_while(|(x, y)| x == y)
            .count();

        sim + prefix as f64 * self.scaling * (1.0 - sim)
    }
}

fn jaro(a: &[char], b: &[char]) -> f64 {
    if a == b {
        return 1.0;
    }

    let window = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for (i, &ca) in a.iter().enumerate() {
        let lo = i.saturating_sub(window);
        let hi = (i + window + 1).min(b.len());
        for j in lo..hi {
            if !b_matched[j] && b[j] == ca {
                a_matched[i] = true;
                b_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Matched characters of `b`, in order, compared against those of `a`.
    let mut b_iter = b.iter().zip(&b_matched).filter(|&(_, &m)| m).map(|(c, _)| c);
    let mut out_of_order = 0usize;
    for (ca, _) in a.iter().zip(&a_matched).filter(|&(_, &m)| m) {
        if let Some(cb) = b_iter.next() {
            if ca != cb {
                out_of_order += 1;
            }
        }
    }

    let m = matches as f64;
    let t = (out_of_order / 2) as f64;
    (m / a.len() as f64 + m / b.len() as f64 + (m - t) / m) / 3.0
}
