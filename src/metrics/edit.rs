//! Edit-distance metrics.

use super::{empty_score, fold_case, SimilarityMetric};

/// Normalized Levenshtein similarity: `1 - distance / max(len_a, len_b)`.
///
/// Insertions, deletions and substitutions all cost 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levenshtein {
    /// Distinguish letter case (default `true`).
    pub case_sensitive: bool,
}

impl Levenshtein {
    /// Create a case-sensitive Levenshtein metric.
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

    /// Raw edit distance between `a` and `b`, in `char`s.
    pub fn distance(&self, a: &str, b: &str) -> usize {
        let a = fold_case(a, self.case_sensitive);
        let b = fold_case(b, self.case_sensitive);
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        levenshtein(&a, &b)
    }
}

impl Default for Levenshtein {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityMetric for Levenshtein {
    fn compare(&self, a: &str, b: &str) -> f64 {
        if let Some(score) = empty_score(a, b) {
            return score;
        }
        let a = fold_case(a, self.case_sensitive);
        let b = fold_case(b, self.case_sensitive);
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let max_len = a.len().max(b.len());
        1.0 - levenshtein(&a, &b) as f64 / max_len as f64
    }
}

/// Two-row dynamic programming edit distance.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Normalized Hamming similarity: `1 - distance / max(len_a, len_b)`.
///
/// Strings of different length are compared position by position over the shorter one; every
/// extra `char` of the longer string counts as a mismatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hamming {
    /// Distinguish letter case (default `true`).
    pub case_sensitive: bool,
}

impl Hamming {
    /// Create a case-sensitive Hamming metric.
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

    /// Positional mismatches plus the length difference.
    pub fn distance(&self, a: &str, b: &str) -> usize {
        let a = fold_case(a, self.case_sensitive);
        let b = fold_case(b, self.case_sensitive);
        hamming(&a, &b).0
    }
}

impl Default for Hamming {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityMetric for Hamming {
    fn compare(&self, a: &str, b: &str) -> f64 {
        if let Some(score) = empty_score(a, b) {
            return score;
        }
        let a = fold_case(a, self.case_sensitive);
        let b = fold_case(b, self.case_sensitive);
        let (distance, max_len) = hamming(&a, &b);
        1.0 - distance as f64 / max_len as f64
    }
}

/// Returns `(distance, max_len)`.
fn hamming(a: &str, b: &str) -> (usize, usize) {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let mismatches = a.chars().zip(b.chars()).filter(|(x, y)| x != y).count();
    (mismatches + len_a.abs_diff(len_b), len_a.max(len_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        let m = Levenshtein::new();
        assert_eq!(m.distance("kitten", "sitting"), 3);
        assert_eq!(m.distance("flaw", "lawn"), 2);
        assert_eq!(m.distance("", "abc"), 3);
        assert_eq!(m.distance("abc", "abc"), 0);
    }

    #[test]
    fn test_levenshtein_similarity() {
        let m = Levenshtein::new();
        assert!((m.compare("kitten", "sitting") - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
        assert!((m.compare("apple", "aple") - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_levenshtein_unicode() {
        let m = Levenshtein::new();
        assert_eq!(m.distance("café", "cafe"), 1);
        assert_eq!(m.distance("naïve", "naïve"), 0);
    }

    #[test]
    fn test_levenshtein_case() {
        assert_eq!(Levenshtein::new().distance("ABC", "abc"), 3);
        assert_eq!(
            Levenshtein::new().with_case_sensitive(false).distance("ABC", "abc"),
            0
        );
    }

    #[test]
    fn test_hamming() {
        let m = Hamming::new();
        assert_eq!(m.distance("karolin", "kathrin"), 3);
        assert_eq!(m.distance("abc", "abcde"), 2);
        assert!((m.compare("karolin", "kathrin") - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
        assert!((m.compare("abc", "abcde") - 0.6).abs() < 1e-12);
    }
}
