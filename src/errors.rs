//! Error types
//!
//! Precondition failures (empty corpus, unknown page, bad damping) are
//! reported as dedicated variants and returned before any computation starts.
//! Solver non-convergence is kept distinct from a normal result.

use std::path::PathBuf;

/// Errors produced by the ranking core, the corpus loader and configuration.
#[derive(Debug, thiserror::Error)]
pub enum PageRankError {
    /// The corpus has no pages.
    #[error("corpus is empty")]
    EmptyCorpus,

    /// A page was requested that is not part of the corpus.
    #[error("page {0:?} is not in the corpus")]
    UnknownPage(String),

    /// Damping factor outside `[0, 1]` (or NaN).
    #[error("damping factor {0} out of range (expected 0.0..=1.0)")]
    DampingOutOfRange(f64),

    /// The sampler was asked for zero steps.
    #[error("sample count must be at least 1")]
    InvalidSampleCount,

    /// Convergence threshold that is not strictly positive and finite.
    #[error("convergence threshold {0} must be positive and finite")]
    InvalidThreshold(f64),

    /// The solver was given no sweeps to run.
    #[error("max_iterations must be at least 1")]
    InvalidMaxIterations,

    /// Probabilities that are negative, non-finite, or don't sum to one.
    #[error("values do not form a distribution (sum = {sum})")]
    InvalidDistribution {
        /// Sum of the rejected values.
        sum: f64,
    },

    /// The iterative solver hit its iteration cap.
    #[error("did not converge after {iterations} iterations (delta={delta:.2e}, threshold={threshold:.2e})")]
    NonConvergence {
        /// Sweeps completed before giving up.
        iterations: usize,
        /// Largest per-page change on the last sweep.
        delta: f64,
        /// Threshold that was not reached.
        threshold: f64,
    },

    /// Reading a corpus file or directory failed.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// Malformed configuration document.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl PageRankError {
    /// Returns `true` for caller precondition failures, as opposed to
    /// solver or I/O failures.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::EmptyCorpus
                | Self::UnknownPage(_)
                | Self::DampingOutOfRange(_)
                | Self::InvalidSampleCount
                | Self::InvalidThreshold(_)
                | Self::InvalidMaxIterations
                | Self::InvalidDistribution { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PageRankError>;

/// Check that `damping` lies in `[0, 1]`.
pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(PageRankError::DampingOutOfRange(damping))
    }
}
