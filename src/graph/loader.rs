//! HTML corpus loader
//!
//! Reads every `.html` file directly inside a directory and records the
//! `href` targets of its anchor tags. The page ID is the file name.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::info;
use walkdir::WalkDir;

use super::builder::CorpusBuilder;
use super::csr::Corpus;
use crate::errors::{PageRankError, Result};

fn anchor_href() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("anchor pattern is valid")
    })
}

/// Extract raw `href` targets from an HTML document
pub fn extract_links(html: &str) -> impl Iterator<Item = &str> {
    anchor_href()
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Load a corpus from a directory of HTML pages
///
/// Subdirectories and non-`.html` files are ignored. Self links and links
/// to files that are not part of the corpus are dropped.
pub fn load_corpus(dir: impl AsRef<Path>) -> Result<Corpus> {
    let dir = dir.as_ref();
    let mut builder = CorpusBuilder::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !name.ends_with(".html") {
            continue;
        }

        let contents = fs::read_to_string(entry.path()).map_err(|source| PageRankError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;

        builder.add_page(name);
        for link in extract_links(&contents) {
            builder.add_link(name, link);
        }
    }

    let corpus = builder.build();
    info!(
        pages = corpus.num_pages(),
        links = corpus.num_links(),
        dir = %dir.display(),
        "loaded corpus"
    );
    Ok(corpus)
}
