//! Monte-Carlo random-surfer estimation
//!
//! Simulates a single long walk over the [`TransitionModel`] and reports
//! the fraction of steps spent on each page. The estimate is unbiased but
//! noisy; its variance shrinks as the number of steps grows.
//!
//! The random source is injected through [`StochasticEstimator::run_with_rng`],
//! so tests can drive the walk with a deterministic generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::transition::TransitionModel;
use super::RankTable;
use crate::errors::{check_damping, PageRankError, Result};
use crate::graph::csr::Corpus;
use crate::types::{RankConfig, DEFAULT_DAMPING, DEFAULT_SAMPLES};

/// Random-surfer PageRank estimator
#[derive(Debug, Clone)]
pub struct StochasticEstimator {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Number of walk steps
    pub samples: usize,
    /// Seed for reproducible walks (`None` = OS entropy)
    pub seed: Option<u64>,
}

impl Default for StochasticEstimator {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
            seed: None,
        }
    }
}

impl StochasticEstimator {
    /// Create a new estimator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator from shared configuration
    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            samples: config.samples,
            seed: config.seed,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the number of walk steps
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the random seed for reproducible results
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Run the walk with the configured seed (or OS entropy)
    pub fn run(&self, corpus: &Corpus) -> Result<RankTable> {
        let mut rng = self.make_rng();
        self.run_with_rng(corpus, &mut rng)
    }

    /// Run the walk drawing randomness from `rng`
    pub fn run_with_rng<R: Rng>(&self, corpus: &Corpus, rng: &mut R) -> Result<RankTable> {
        check_damping(self.damping)?;
        if self.samples == 0 {
            return Err(PageRankError::InvalidSampleCount);
        }
        if corpus.is_empty() {
            return Err(PageRankError::EmptyCorpus);
        }

        let model = TransitionModel::new(self.damping)?;
        let n = corpus.num_pages();
        let mut visits = vec![0usize; n];
        let mut weights = vec![0.0; n];

        let mut current = rng.gen_range(0..n) as u32;
        debug!(
            pages = n,
            samples = self.samples,
            start = corpus.page(current),
            "starting random walk"
        );

        for _ in 0..self.samples {
            visits[current as usize] += 1;
            model.fill(corpus, current, &mut weights);
            current = weighted_choice(&weights, rng.gen::<f64>()) as u32;
        }

        let total = self.samples as f64;
        let scores = visits.into_iter().map(|v| v as f64 / total).collect();
        RankTable::new(corpus.shared_pages(), scores)
    }
}

/// Pick an index with probability proportional to its weight
///
/// `u` is a uniform draw from `[0, 1)`. Zero-weight entries are never
/// selected. `weights` must contain at least one positive entry.
pub fn weighted_choice(weights: &[f64], u: f64) -> usize {
    let total: f64 = weights.iter().sum();
    let target = u * total;

    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = i;
        if target < cumulative {
            return i;
        }
    }
    // Rounding can leave `target` just past the final cumulative sum
    last_positive
}

/// Estimate PageRank by sampling `n` steps of a random surfer
///
/// Uses OS entropy; build a [`StochasticEstimator`] with a seed for
/// reproducible output.
pub fn sample(corpus: &Corpus, damping: f64, n: usize) -> Result<RankTable> {
    StochasticEstimator::new()
        .with_damping(damping)
        .with_samples(n)
        .run(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn build_cycle() -> Corpus {
        Corpus::from_links([("a", vec!["b"]), ("b", vec!["c"]), ("c", vec!["a"])])
    }

    #[test]
    fn test_weighted_choice_respects_cumulative_weights() {
        let weights = [0.25, 0.0, 0.5, 0.25];

        assert_eq!(weighted_choice(&weights, 0.0), 0);
        assert_eq!(weighted_choice(&weights, 0.24), 0);
        assert_eq!(weighted_choice(&weights, 0.25), 2);
        assert_eq!(weighted_choice(&weights, 0.74), 2);
        assert_eq!(weighted_choice(&weights, 0.75), 3);
        assert_eq!(weighted_choice(&weights, 0.999_999), 3);
    }

    #[test]
    fn test_weighted_choice_skips_zero_weight() {
        let weights = [0.0, 0.0, 1.0, 0.0];
        for u in [0.0, 0.25, 0.5, 0.999] {
            assert_eq!(weighted_choice(&weights, u), 2);
        }
    }

    #[test]
    fn test_deterministic_walk_follows_links() {
        // A zero source always draws 0.0: start at "a", then take the first
        // positive-weight page each step. With damping 1 that is the link.
        let corpus = build_cycle();
        let mut rng = StepRng::new(0, 0);
        let ranks = StochasticEstimator::new()
            .with_damping(1.0)
            .with_samples(6)
            .run_with_rng(&corpus, &mut rng)
            .unwrap();

        for (_, rank) in ranks.iter() {
            assert!((rank - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_deterministic_walk_with_teleport_stays_put() {
        // With damping < 1 every page has positive weight, so a zero draw
        // always lands on the first page.
        let corpus = build_cycle();
        let mut rng = StepRng::new(0, 0);
        let ranks = StochasticEstimator::new()
            .with_samples(10)
            .run_with_rng(&corpus, &mut rng)
            .unwrap();

        assert_eq!(ranks.get("a"), Some(1.0));
        assert_eq!(ranks.get("b"), Some(0.0));
    }

    #[test]
    fn test_walk_sequence_through_mixed_weights() {
        // a -> b, b -> {a, c}, c dangling; damping 0.5 gives
        //   from a: [1/6, 2/3, 1/6]
        //   from b: [5/12, 1/6, 5/12]
        //   from c: [1/3, 1/3, 1/3]
        // The stepping source yields 0 for the start page, then draws
        // 0.25, 0.5, 0.75, 0.0, 0.25, ... for each step.
        let corpus = Corpus::from_links([("a", vec!["b"]), ("b", vec!["a", "c"]), ("c", vec![])]);
        let walk = ["a", "b", "b", "c", "a", "b"];

        for steps in 1..=walk.len() {
            let mut rng = StepRng::new(0, 1 << 62);
            let ranks = StochasticEstimator::new()
                .with_damping(0.5)
                .with_samples(steps)
                .run_with_rng(&corpus, &mut rng)
                .unwrap();

            for page in ["a", "b", "c"] {
                let visits = walk[..steps].iter().filter(|&&p| p == page).count();
                assert_eq!(
                    ranks.get(page),
                    Some(visits as f64 / steps as f64),
                    "page {page} after {steps} steps"
                );
            }
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let corpus = build_cycle();
        let estimator = StochasticEstimator::new().with_samples(500).with_seed(7);

        let first = estimator.run(&corpus).unwrap();
        let second = estimator.run(&corpus).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_is_a_distribution() {
        let corpus = Corpus::from_links([
            ("1", vec!["2", "3"]),
            ("2", vec!["3"]),
            ("3", vec!["1"]),
            ("4", vec![]),
        ]);
        let ranks = StochasticEstimator::new()
            .with_samples(2_000)
            .with_seed(11)
            .run(&corpus)
            .unwrap();

        assert!((ranks.total() - 1.0).abs() < 1e-9);
        assert!(ranks.scores().iter().all(|&r| (0.0..=1.0).contains(&r)));
    }

    #[test]
    fn test_single_page() {
        let corpus = Corpus::from_links([("a", Vec::<&str>::new())]);
        let ranks = sample(&corpus, 0.85, 100).unwrap();
        assert_eq!(ranks.get("a"), Some(1.0));
    }

    #[test]
    fn test_contract_violations() {
        let corpus = build_cycle();
        assert!(matches!(
            sample(&corpus, 0.85, 0),
            Err(PageRankError::InvalidSampleCount)
        ));
        assert!(matches!(
            sample(&corpus, -0.5, 10),
            Err(PageRankError::DampingOutOfRange(_))
        ));
        assert!(matches!(
            sample(&Corpus::default(), 0.85, 10),
            Err(PageRankError::EmptyCorpus)
        ));
    }
}
