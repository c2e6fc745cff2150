//! PageRank estimators
//!
//! This module provides the one-step transition model, a Monte-Carlo
//! random-surfer sampler, and a Jacobi power-iteration solver. All three
//! share the dangling-page policy: a page without links behaves as if it
//! linked to every page, itself included.

pub mod iterative;
pub mod sampling;
pub mod transition;

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::errors::{PageRankError, Result};

/// Allowed drift from 1.0 for a [`Distribution`]
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-9;

/// Allowed drift from 1.0 for a [`RankTable`]
pub const RANK_TOLERANCE: f64 = 1e-6;

fn check_sums_to_one(values: &[f64], tolerance: f64) -> Result<()> {
    let sum: f64 = values.iter().sum();
    let well_formed = values.iter().all(|v| v.is_finite() && *v >= 0.0);
    if well_formed && (sum - 1.0).abs() <= tolerance {
        Ok(())
    } else {
        Err(PageRankError::InvalidDistribution { sum })
    }
}

/// A probability distribution over every page of a corpus
///
/// Values are indexed by node ID and checked to be non-negative and to sum
/// to one when constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pages: Arc<[String]>,
    probabilities: Vec<f64>,
}

impl Distribution {
    pub(crate) fn new(pages: Arc<[String]>, probabilities: Vec<f64>) -> Result<Self> {
        debug_assert_eq!(pages.len(), probabilities.len());
        check_sums_to_one(&probabilities, DISTRIBUTION_TOLERANCE)?;
        Ok(Self {
            pages,
            probabilities,
        })
    }

    /// Probability of moving to `page`, or `None` if it is not in the corpus
    pub fn get(&self, page: &str) -> Option<f64> {
        self.pages
            .binary_search_by(|p| p.as_str().cmp(page))
            .ok()
            .map(|i| self.probabilities[i])
    }

    /// Probabilities indexed by node ID
    pub fn as_slice(&self) -> &[f64] {
        &self.probabilities
    }

    /// Iterate `(page, probability)` in page order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.pages
            .iter()
            .map(String::as_str)
            .zip(self.probabilities.iter().copied())
    }

    /// Number of pages covered
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Check if the distribution covers no pages
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
}

/// Final rank estimate for every page of a corpus
#[derive(Debug, Clone, PartialEq)]
pub struct RankTable {
    pages: Arc<[String]>,
    scores: Vec<f64>,
}

impl RankTable {
    pub(crate) fn new(pages: Arc<[String]>, scores: Vec<f64>) -> Result<Self> {
        debug_assert_eq!(pages.len(), scores.len());
        check_sums_to_one(&scores, RANK_TOLERANCE)?;
        Ok(Self { pages, scores })
    }

    /// Rank of `page`, or `None` if it is not in the corpus
    pub fn get(&self, page: &str) -> Option<f64> {
        self.pages
            .binary_search_by(|p| p.as_str().cmp(page))
            .ok()
            .map(|i| self.scores[i])
    }

    /// Scores indexed by node ID
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Iterate `(page, rank)` sorted by page name
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.pages
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }

    /// Get the top N pages by rank, ties broken by name
    pub fn top_n(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    /// Sum of all ranks
    pub fn total(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// Number of pages ranked
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Serialize for RankTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (page, rank) in self.iter() {
            map.serialize_entry(page, &rank)?;
        }
        map.end()
    }
}

/// Outcome of a solver run
#[derive(Debug, Clone)]
pub struct SolverReport {
    /// Converged ranks
    pub ranks: RankTable,
    /// Number of sweeps performed
    pub iterations: usize,
    /// Largest per-page change on the final sweep
    pub delta: f64,
}
