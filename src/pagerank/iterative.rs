//! Iterative PageRank solver
//!
//! Jacobi-style power iteration: every sweep computes all new ranks from a
//! frozen copy of the previous sweep's ranks, so the result does not depend
//! on page order. Dangling pages spread their rank over every page,
//! themselves included, matching the transition model.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::{RankTable, SolverReport};
use crate::errors::{check_damping, PageRankError, Result};
use crate::graph::csr::Corpus;
use crate::types::{
    check_max_iterations, check_threshold, RankConfig, DEFAULT_DAMPING, DEFAULT_MAX_ITERATIONS,
    DEFAULT_THRESHOLD,
};

/// Corpora at least this large are swept in parallel
const PARALLEL_THRESHOLD: usize = 1024;

/// Power-iteration PageRank solver
#[derive(Debug, Clone)]
pub struct IterativeSolver {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of sweeps
    pub max_iterations: usize,
    /// Per-page convergence threshold
    pub threshold: f64,
}

impl Default for IterativeSolver {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl IterativeSolver {
    /// Create a new IterativeSolver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver from shared configuration
    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            threshold: config.threshold,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Run the solver and return the converged ranks
    pub fn run(&self, corpus: &Corpus) -> Result<RankTable> {
        self.solve(corpus).map(|report| report.ranks)
    }

    /// Run the solver, reporting iteration count and final delta
    ///
    /// Stops after the first sweep in which no page moves by `threshold` or
    /// more and returns that sweep's ranks. Hitting `max_iterations` first
    /// is an error.
    pub fn solve(&self, corpus: &Corpus) -> Result<SolverReport> {
        check_damping(self.damping)?;
        check_threshold(self.threshold)?;
        check_max_iterations(self.max_iterations)?;
        let n = corpus.num_pages();
        if n == 0 {
            return Err(PageRankError::EmptyCorpus);
        }

        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];
        let dangling_nodes = corpus.dangling_nodes();

        let mut iterations = 0;
        let mut delta = f64::INFINITY;

        while iterations < self.max_iterations {
            iterations += 1;

            self.sweep(corpus, &dangling_nodes, &scores, &mut new_scores);
            delta = max_change(&scores, &new_scores);
            std::mem::swap(&mut scores, &mut new_scores);

            debug!(iteration = iterations, delta, "pagerank sweep");

            if delta < self.threshold {
                info!(iterations, delta, "pagerank converged");
                let ranks = RankTable::new(corpus.shared_pages(), scores)?;
                return Ok(SolverReport {
                    ranks,
                    iterations,
                    delta,
                });
            }
        }

        warn!(
            iterations,
            delta,
            threshold = self.threshold,
            "pagerank did not converge"
        );
        Err(PageRankError::NonConvergence {
            iterations,
            delta,
            threshold: self.threshold,
        })
    }

    /// One Jacobi update of every page from the frozen `scores` snapshot
    fn sweep(&self, corpus: &Corpus, dangling_nodes: &[u32], scores: &[f64], out: &mut [f64]) {
        let n = scores.len() as f64;

        // Rank each linking page sends along each of its links
        let shares: Vec<f64> = scores
            .iter()
            .enumerate()
            .map(|(node, &score)| match corpus.degree(node as u32) {
                0 => 0.0,
                degree => score / degree as f64,
            })
            .collect();

        let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
        let base = (1.0 - self.damping) / n;
        let dangling_share = dangling_mass / n;

        let update = |node: usize, slot: &mut f64| {
            let inbound: f64 = corpus
                .in_links(node as u32)
                .iter()
                .map(|&src| shares[src as usize])
                .sum();
            *slot = base + self.damping * (inbound + dangling_share);
        };

        if out.len() >= PARALLEL_THRESHOLD {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(node, slot)| update(node, slot));
        } else {
            out.iter_mut()
                .enumerate()
                .for_each(|(node, slot)| update(node, slot));
        }
    }
}

/// Largest absolute per-page change; NaN if any change is NaN
fn max_change(old: &[f64], new: &[f64]) -> f64 {
    old.iter()
        .zip(new.iter())
        .map(|(o, n)| (o - n).abs())
        .fold(0.0, |acc: f64, d| if d.is_nan() || d > acc { d } else { acc })
}

/// Compute PageRank by iterating to a fixed point
///
/// ```
/// use rapid_pagerank::{iterate, Corpus};
///
/// let corpus = Corpus::from_links([("a", vec!["b"]), ("b", vec!["a"])]);
/// let ranks = iterate(&corpus, 0.85).unwrap();
/// assert!((ranks.get("a").unwrap() - 0.5).abs() < 1e-9);
/// ```
pub fn iterate(corpus: &Corpus, damping: f64) -> Result<RankTable> {
    IterativeSolver::new().with_damping(damping).run(corpus)
}
