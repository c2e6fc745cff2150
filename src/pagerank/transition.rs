//! One-step transition model
//!
//! With probability `damping` the surfer follows one of the current page's
//! links uniformly at random; otherwise it jumps to any page uniformly. A
//! dangling page jumps uniformly with probability one.

use super::Distribution;
use crate::errors::{check_damping, PageRankError, Result};
use crate::graph::csr::Corpus;
use crate::types::DEFAULT_DAMPING;

/// Transition model for a fixed damping factor
#[derive(Debug, Clone, Copy)]
pub struct TransitionModel {
    damping: f64,
}

impl Default for TransitionModel {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
        }
    }
}

impl TransitionModel {
    /// Create a model, validating the damping factor
    pub fn new(damping: f64) -> Result<Self> {
        check_damping(damping)?;
        Ok(Self { damping })
    }

    /// The damping factor
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Distribution over the next page when currently on `page`
    pub fn distribution(&self, corpus: &Corpus, page: &str) -> Result<Distribution> {
        if corpus.is_empty() {
            return Err(PageRankError::EmptyCorpus);
        }
        let node = corpus
            .index_of(page)
            .ok_or_else(|| PageRankError::UnknownPage(page.to_string()))?;

        let mut probabilities = vec![0.0; corpus.num_pages()];
        self.fill(corpus, node, &mut probabilities);
        Distribution::new(corpus.shared_pages(), probabilities)
    }

    /// Write the next-page probabilities for `node` into `out`
    ///
    /// `out` must have one slot per page and `node` must be a node of
    /// `corpus`. Used by the sampler to avoid an allocation per step.
    pub(crate) fn fill(&self, corpus: &Corpus, node: u32, out: &mut [f64]) {
        debug_assert_eq!(out.len(), corpus.num_pages());
        let n = corpus.num_pages() as f64;
        let links = corpus.links(node);

        if links.is_empty() {
            out.fill(1.0 / n);
            return;
        }

        out.fill((1.0 - self.damping) / n);
        let follow = self.damping / links.len() as f64;
        for &target in links {
            out[target as usize] += follow;
        }
    }
}

/// Distribution over the next page visited from `page`
///
/// ```
/// use rapid_pagerank::{distribution, Corpus};
///
/// let corpus = Corpus::from_links([("a", vec!["b"]), ("b", vec![])]);
/// let dist = distribution(&corpus, "a", 0.85).unwrap();
/// assert!((dist.get("b").unwrap() - 0.925).abs() < 1e-12);
/// ```
pub fn distribution(corpus: &Corpus, page: &str, damping: f64) -> Result<Distribution> {
    TransitionModel::new(damping)?.distribution(corpus, page)
}
