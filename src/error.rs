use thiserror::Error;

/// Errors returned by the configuration surfaces of this crate.
///
/// Clustering itself is infallible; these only arise while building or
/// checking a [`Clusterer`](crate::Clusterer) or a metric.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A metric name that does not match any built-in metric.
    #[error("unknown similarity metric: {0:?}")]
    UnknownMetric(String),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
