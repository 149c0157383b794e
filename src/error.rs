use thiserror::Error;

/// Errors returned by the clustering pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameter value, rejected before any work starts.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: String,
    },

    /// A region code that does not occur in the loaded data.
    #[error("region {code:?} does not occur in the data")]
    UnknownRegion {
        /// The offending region code.
        code: String,
    },

    /// The assignment loop hit its iteration bound without reaching a
    /// fixed point.
    #[error("no convergence after {iterations} iterations")]
    IterationLimitExceeded {
        /// The configured iteration bound.
        iterations: usize,
    },

    /// Underlying I/O failure while reading input data.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failure while encoding tabular output.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
