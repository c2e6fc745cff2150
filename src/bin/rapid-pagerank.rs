//! rapid-pagerank CLI
//!
//! Ranks a directory of HTML pages with both estimators.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rapid_pagerank::{load_corpus, IterativeSolver, RankConfig, RankTable, StochasticEstimator};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rapid-pagerank", version, about = "Rank pages in a hyperlink corpus")]
struct Cli {
    /// Directory containing the .html corpus
    corpus: PathBuf,

    /// JSON file with default parameters (flags override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Probability of following a link
    #[arg(long)]
    damping: Option<f64>,

    /// Random-walk steps for the sampler
    #[arg(long)]
    samples: Option<usize>,

    /// Seed for a reproducible random walk
    #[arg(long)]
    seed: Option<u64>,

    /// Per-page convergence threshold for iteration
    #[arg(long)]
    threshold: Option<f64>,

    /// Safety cap on solver sweeps
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Print both tables as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn rank_config(&self) -> Result<RankConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                RankConfig::from_json_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => RankConfig::default(),
        };

        if let Some(damping) = self.damping {
            config.damping = damping;
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    samples: usize,
    sampling: &'a RankTable,
    iterations: usize,
    iteration: &'a RankTable,
}

fn print_table(title: &str, ranks: &RankTable) {
    println!("{title}");
    for (page, rank) in ranks.iter() {
        println!("  {page}: {rank:.4}");
    }
}

/// Filter from a `RUST_LOG` value, falling back to `warn` when unset or invalid
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let cli = Cli::parse();
    let config = cli.rank_config()?;

    let corpus = load_corpus(&cli.corpus)
        .with_context(|| format!("loading corpus from {}", cli.corpus.display()))?;

    let sampled = StochasticEstimator::from_config(&config).run(&corpus)?;
    let report = IterativeSolver::from_config(&config).solve(&corpus)?;

    if cli.json {
        let out = JsonReport {
            samples: config.samples,
            sampling: &sampled,
            iterations: report.iterations,
            iteration: &report.ranks,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_table(
            &format!("PageRank Results from Sampling (n = {})", config.samples),
            &sampled,
        );
        print_table("PageRank Results from Iteration", &report.ranks);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_rust_log_raises_verbosity() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("rapid_pagerank=info")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_cli_flags_override_defaults() {
        let cli = Cli::parse_from(["rapid-pagerank", "corpus", "--damping", "0.5", "--seed", "9"]);
        let config = cli.rank_config().unwrap();
        assert_eq!(config.damping, 0.5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.samples, RankConfig::default().samples);
    }
}
