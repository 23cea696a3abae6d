//! Greedy tree-guided clustering with iterative refinement.
//!
//! # The Algorithm
//!
//! Each input string starts as its own group. A *build pass* inserts the groups, in order,
//! into a binary tree keyed on similarity to each node's representative (the group's first
//! string):
//!
//! 1. If the unit's representative is similar enough to the current node's, the unit's whole
//!    group is appended to that node.
//! 2. Otherwise the unit takes the node's empty left slot. If only the right slot is empty,
//!    the unit merges into the left child when close enough and takes the right slot if not.
//! 3. With both children present, the unit merges into the closer child when it clears the
//!    threshold, or else descends into it. Ties go left.
//!
//! The tree is then flattened in pre-order (node, left subtree, right subtree) into the group
//! list for the next pass. Running more passes gives groups that were kept apart by an
//! unlucky insertion order another chance to meet.
//!
//! ## Complexity
//!
//! - **Time**: O(n · depth) metric calls per pass; O(n²) in the worst case (a chain).
//! - **Space**: O(n).
//!
//! ## Limitations
//!
//! - Greedy and order-sensitive: the first grouping encountered wins, and more passes can
//!   change the result without ever converging to a fixed point.
//! - Similarity is neither transitive nor antisymmetric, so the tree is a heuristic index
//!   with no balance guarantee.
//! - Only representatives are compared; a group's later members never attract new units.

use super::traits::Clustering;
use super::tree::build_pass;
use crate::error::{Error, Result};
use crate::metrics::{Metric, SimilarityMetric};

/// Default merge threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.9;

/// Default number of build passes.
pub const DEFAULT_ITERATIONS: usize = 1;

/// Greedy tree-guided string clusterer.
#[derive(Debug, Clone)]
pub struct Clusterer<M = Metric> {
    /// Similarity metric, called as `compare(candidate_head, existing_head)`.
    metric: M,
    /// Minimum similarity (inclusive) for a merge.
    threshold: f64,
    /// Number of build passes.
    iterations: usize,
}

/// An input string tagged with its position.
struct Positioned<'a> {
    idx: usize,
    text: &'a str,
}

impl AsRef<str> for Positioned<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

impl<M: SimilarityMetric> Clusterer<M> {
    /// Create a clusterer with the default threshold and iteration count.
    ///
    /// # Arguments
    ///
    /// * `metric` - Scores two strings; higher means more similar.
    pub fn new(metric: M) -> Self {
        Self {
            metric,
            threshold: DEFAULT_THRESHOLD,
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Set the merge threshold.
    ///
    /// Any real value is accepted. With a metric normalized to `[0, 1]`, `0.0` merges
    /// everything and anything above `1.0` merges nothing.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the number of build passes. Zero returns every input as its own group.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Replace the metric, keeping threshold and iteration count.
    pub fn with_metric<N: SimilarityMetric>(self, metric: N) -> Clusterer<N> {
        Clusterer {
            metric,
            threshold: self.threshold,
            iterations: self.iterations,
        }
    }

    /// The merge threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The similarity metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Check the configuration.
    ///
    /// Clustering never fails, but a `NaN` threshold silently disables every merge; this
    /// reports it instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the threshold is `NaN`.
    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_nan() {
            return Err(Error::InvalidParameter {
                name: "threshold",
                message: "must not be NaN",
            });
        }
        Ok(())
    }

    /// Run every build pass over `items`, each starting as a singleton group.
    fn run<T: AsRef<str>>(&self, items: Vec<T>) -> Vec<Vec<T>> {
        let mut groups: Vec<Vec<T>> = items.into_iter().map(|item| vec![item]).collect();
        if groups.is_empty() {
            return groups;
        }

        for pass in 1..=self.iterations {
            let (next, stats) = build_pass(groups, &self.metric, self.threshold, pass);
            log::debug!(
                "build pass {}/{}: {} units -> {} groups ({} merges, {} comparisons)",
                pass,
                self.iterations,
                stats.units,
                stats.groups,
                stats.merges,
                stats.comparisons,
            );
            groups = next;
        }

        groups
    }
}

impl Default for Clusterer {
    /// Jaro-Winkler (case-sensitive), threshold `0.9`, one pass.
    fn default() -> Self {
        Self::new(Metric::default())
    }
}

impl<M: SimilarityMetric> Clustering for Clusterer<M> {
    fn cluster<I, S>(&self, inputs: I) -> Vec<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(inputs.into_iter().map(Into::into).collect())
    }

    fn cluster_indices<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<Vec<usize>> {
        let items = inputs
            .iter()
            .enumerate()
            .map(|(idx, s)| Positioned {
                idx,
                text: s.as_ref(),
            })
            .collect();

        self.run(items)
            .into_iter()
            .map(|group| group.into_iter().map(|p| p.idx).collect())
            .collect()
    }

    fn iterations(&self) -> usize {
        self.iterations
    }
}
