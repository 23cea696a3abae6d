//! Local alignment similarity (Smith-Waterman with Gotoh's linear-space formulation).

use super::{empty_score, fold_case, SimilarityMetric};
use crate::error::{Error, Result};

/// Smith-Waterman-Gotoh similarity.
///
/// Finds the best-scoring local alignment between the two strings and divides it by the best
/// score attainable for the shorter one, `min(len_a, len_b) * max(match_score, gap_penalty)`.
/// Useful when one value is embedded in a longer one (`"ACME"` vs `"ACME Corporation Ltd"`).
///
/// Scores stay in `[0, 1]` as long as `match_score > 0`, `gap_penalty <= 0` and
/// `mismatch_score <= match_score`; the builders reject anything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmithWatermanGotoh {
    /// Distinguish letter case (default `true`).
    pub case_sensitive: bool,
    /// Score added for a gap (default `-0.5`).
    gap_penalty: f64,
    /// Score for equal characters (default `1.0`).
    match_score: f64,
    /// Score for unequal characters (default `-2.0`).
    mismatch_score: f64,
}

fn check_scores(match_score: f64, mismatch_score: f64, gap_penalty: f64) -> Result<()> {
    if !match_score.is_finite() || match_score <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "match_score",
            message: "must be finite and positive",
        });
    }
    if !mismatch_score.is_finite() || mismatch_score > match_score {
        return Err(Error::InvalidParameter {
            name: "mismatch_score",
            message: "must be finite and at most match_score",
        });
    }
    if !gap_penalty.is_finite() || gap_penalty > 0.0 {
        return Err(Error::InvalidParameter {
            name: "gap_penalty",
            message: "must be finite and not positive",
        });
    }
    Ok(())
}

impl SmithWatermanGotoh {
    /// Create a case-sensitive metric with the standard scores.
    pub fn new() -> Self {
        Self {
            case_sensitive: true,
            gap_penalty: -0.5,
            match_score: 1.0,
            mismatch_score: -2.0,
        }
    }

    /// Set case sensitivity.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set the gap penalty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `gap_penalty` is positive or not finite.
    pub fn with_gap_penalty(mut self, gap_penalty: f64) -> Result<Self> {
        check_scores(self.match_score, self.mismatch_score, gap_penalty)?;
        self.gap_penalty = gap_penalty;
        Ok(self)
    }

    /// Set the score for equal characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `match_score` is not positive, not finite, or
    /// below the mismatch score.
    pub fn with_match_score(mut self, match_score: f64) -> Result<Self> {
        check_scores(match_score, self.mismatch_score, self.gap_penalty)?;
        self.match_score = match_score;
        Ok(self)
    }

    /// Set the score for unequal characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `mismatch_score` exceeds the match score or is
    /// not finite.
    pub fn with_mismatch_score(mut self, mismatch_score: f64) -> Result<Self> {
        check_scores(self.match_score, mismatch_score, self.gap_penalty)?;
        self.mismatch_score = mismatch_score;
        Ok(self)
    }

    /// Score added for a gap.
    pub fn gap_penalty(&self) -> f64 {
        self.gap_penalty
    }

    /// Score for equal characters.
    pub fn match_score(&self) -> f64 {
        self.match_score
    }

    /// Score for unequal characters.
    pub fn mismatch_score(&self) -> f64 {
        self.mismatch_score
    }

    fn substitution(&self, a: char, b: char) -> f64 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    /// Best local alignment score, before normalization.
    fn align(&self, a: &[char], b: &[char]) -> f64 {
        let mut prev = vec![0.0f64; b.len() + 1];
        let mut curr = vec![0.0f64; b.len() + 1];
        let mut best = 0.0f64;

        for &ca in a {
            curr[0] = 0.0;
            for (j, &cb) in b.iter().enumerate() {
                let diagonal = prev[j] + self.substitution(ca, cb);
                let up = prev[j + 1] + self.gap_penalty;
                let left = curr[j] + self.gap_penalty;
                let h = 0.0f64.max(diagonal).max(up).max(left);
                curr[j + 1] = h;
                best = best.max(h);
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        best
    }
}

impl Default for SmithWatermanGotoh {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityMetric for SmithWatermanGotoh {
    fn compare(&self, a: &str, b: &str) -> f64 {
        if let Some(score) = empty_score(a, b) {
            return score;
        }
        let a: Vec<char> = fold_case(a, self.case_sensitive).chars().collect();
        let b: Vec<char> = fold_case(b, self.case_sensitive).chars().collect();

        let max_score = a.len().min(b.len()) as f64 * self.match_score.max(self.gap_penalty);
        self.align(&a, &b) / max_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_substring_scores_one() {
        let m = SmithWatermanGotoh::new();
        assert_eq!(m.compare("ACME", "ACME Corporation Ltd"), 1.0);
        assert_eq!(m.compare("ACME Corporation Ltd", "ACME"), 1.0);
    }

    #[test]
    fn test_partial_alignment() {
        let m = SmithWatermanGotoh::new();
        // Best local alignment is "ab" (score 2) over min length 3.
        assert!((m.compare("abx", "aby") - 2.0 / 3.0).abs() < 1e-12);
        // One gap inside "abcd" vs "abd": a b (gap) d = 1 + 1 - 0.5 + 1 = 2.5
        assert!((m.compare("abcd", "abd") - 2.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint() {
        let m = SmithWatermanGotoh::new();
        assert_eq!(m.compare("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_score_builders() {
        let m = SmithWatermanGotoh::new()
            .with_match_score(2.0)
            .unwrap()
            .with_mismatch_score(-1.0)
            .unwrap()
            .with_gap_penalty(-1.0)
            .unwrap();
        assert_eq!(m.match_score(), 2.0);
        assert_eq!(m.mismatch_score(), -1.0);
        assert_eq!(m.gap_penalty(), -1.0);
        // "ab" aligned (4) over min length 3 times match score 2.
        assert!((m.compare("abx", "aby") - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_scores_rejected() {
        let m = SmithWatermanGotoh::new();
        assert!(matches!(
            m.with_match_score(0.0),
            Err(Error::InvalidParameter { name: "match_score", .. })
        ));
        assert!(m.with_match_score(-1.0).is_err());
        assert!(m.with_match_score(f64::NAN).is_err());
        assert!(matches!(
            m.with_gap_penalty(0.5),
            Err(Error::InvalidParameter { name: "gap_penalty", .. })
        ));
        assert!(m.with_gap_penalty(f64::NEG_INFINITY).is_err());
        assert!(matches!(
            m.with_mismatch_score(1.5),
            Err(Error::InvalidParameter { name: "mismatch_score", .. })
        ));
        // Raising the match score above the current mismatch is fine, lowering below is not.
        assert!(m.with_mismatch_score(0.5).is_ok());
        assert!(m
            .with_mismatch_score(0.5)
            .unwrap()
            .with_match_score(0.25)
            .is_err());
    }
}
