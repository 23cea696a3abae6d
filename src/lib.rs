//! Near-duplicate string clustering.
//!
//! `strclump` groups strings that a pluggable similarity metric considers close enough,
//! without requiring exact matches. It is meant for coalescing names, addresses and labels
//! that differ by typos or formatting.
//!
//! The primary public API is under [`cluster`], which provides:
//! - [`Clusterer`]: greedy, tree-guided insertion with iterative refinement
//! - the [`Clustering`] trait (groups, index partitions, one label per input)
//!
//! Ready-made metrics live under [`metrics`]; any `Fn(&str, &str) -> f64` works as well.
//!
//! ```rust
//! use strclump::{Clusterer, Clustering};
//!
//! let groups = Clusterer::default().cluster(["apple", "aple", "orange", "ornge"]);
//! assert_eq!(groups.len(), 2);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod metrics;

pub use cluster::{Clusterer, Clustering, DEFAULT_ITERATIONS, DEFAULT_THRESHOLD};
pub use error::{Error, Result};
pub use metrics::{Metric, SimilarityMetric};
