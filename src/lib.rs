//! # rapid_pagerank
//!
//! PageRank for small, closed hyperlink corpora.
//!
//! Two independent estimators are provided:
//!
//! - **Sampling**: a Monte-Carlo random surfer ([`StochasticEstimator`])
//!   whose visit frequencies approximate the steady state.
//! - **Iteration**: a Jacobi power-iteration solver ([`IterativeSolver`])
//!   that converges to the fixed point of the PageRank equation.
//!
//! Both use the same one-step [`TransitionModel`], including its treatment
//! of pages without links as linking to every page.
//!
//! ```
//! use rapid_pagerank::{iterate, sample, Corpus};
//!
//! let corpus = Corpus::from_links([
//!     ("1.html", vec!["2.html"]),
//!     ("2.html", vec!["1.html", "3.html"]),
//!     ("3.html", vec![]),
//! ]);
//! let sampled = sample(&corpus, 0.85, 10_000).unwrap();
//! let iterated = iterate(&corpus, 0.85).unwrap();
//! assert_eq!(sampled.len(), iterated.len());
//! ```

pub mod errors;
pub mod graph;
pub mod pagerank;
pub mod types;

// Re-export commonly used types
pub use errors::{PageRankError, Result};
pub use types::RankConfig;

// Re-export main functionality
pub use graph::{builder::CorpusBuilder, csr::Corpus, loader::load_corpus};
pub use pagerank::{
    iterative::{iterate, IterativeSolver},
    sampling::{sample, StochasticEstimator},
    transition::{distribution, TransitionModel},
    Distribution, RankTable, SolverReport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
