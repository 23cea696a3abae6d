//! Clustering algorithms for grouping similar strings.
//!
//! ## Hard clustering of strings
//!
//! Every input string ends up in exactly one group. Groups are ordered sequences: the first
//! member is the group's *representative*, and it is the only member ever compared against
//! later inputs. Duplicate inputs are not collapsed; they are clustered like any other string.
//!
//! ## Algorithms (implemented)
//!
//! ### Greedy tree-guided insertion
//!
//! [`Clusterer`] inserts groups one at a time into a binary tree keyed on similarity to each
//! node's representative, merging whenever a score clears the threshold, and flattens the
//! tree back into groups. Several passes can be chained for refinement.
//!
//! **Objective**: none, strictly. It is a fast heuristic for near-duplicate coalescing that
//! avoids the O(n²) all-pairs comparison of exact methods.
//!
//! **Assumptions**:
//! - The metric is cheap relative to n².
//! - Near-duplicates score clearly above unrelated pairs.
//! - Input order is acceptable as a tie-breaker.
//!
//! **When to use**: deduplicating names, addresses, labels and other short text where
//! "close enough" is obvious to a human and exactness is not required.
//!
//! ## Usage
//!
//! ```rust
//! use strclump::cluster::{Clusterer, Clustering};
//! use strclump::metrics::Levenshtein;
//!
//! let inputs = ["apple", "aple", "banana", "bananna", "orange", "ornge"];
//!
//! // Jaro-Winkler with threshold 0.9 by default.
//! let groups = Clusterer::default().cluster(inputs);
//! assert_eq!(groups.len(), 3);
//!
//! // One label per input instead of owned groups.
//! let labels = Clusterer::default().cluster_labels(&inputs);
//! assert_eq!(labels, vec![0, 0, 1, 1, 2, 2]);
//!
//! // Any metric, any threshold, several passes.
//! let strict = Clusterer::new(Levenshtein::new().with_case_sensitive(false))
//!     .with_threshold(0.75)
//!     .with_iterations(2);
//! assert_eq!(strict.cluster(inputs).len(), 3);
//! ```

mod greedy;
mod traits;
mod tree;

pub use greedy::{Clusterer, DEFAULT_ITERATIONS, DEFAULT_THRESHOLD};
pub use traits::Clustering;
