//! Compressed Sparse Row (CSR) link graph
//!
//! Pages are sorted by name and addressed by a dense `u32` node ID. Outbound
//! links are stored row-major for the sampler; the transposed (in-link)
//! adjacency is stored as well so the solver can pull contributions per page.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::builder::CorpusBuilder;

/// An immutable hyperlink corpus in CSR format
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Page names, sorted; node i is `pages[i]`
    pages: Arc<[String]>,
    /// Row pointers: node i's links are at indices row_ptr[i]..row_ptr[i+1]
    row_ptr: Vec<usize>,
    /// Link targets, sorted within each row
    col_idx: Vec<u32>,
    /// Row pointers into `in_idx`
    in_ptr: Vec<usize>,
    /// Link sources, grouped by target
    in_idx: Vec<u32>,
}

impl Corpus {
    /// Freeze a [`CorpusBuilder`] into CSR format
    ///
    /// Links whose target was never added as a page are discarded.
    pub fn from_builder(builder: &CorpusBuilder) -> Self {
        let mut names: Vec<&str> = builder.nodes().map(|(_, n)| n.name.as_str()).collect();
        names.sort_unstable();

        let index: FxHashMap<&str, u32> = names
            .iter()
            .enumerate()
            .map(|(i, &name)| (name, i as u32))
            .collect();

        let num_pages = names.len();
        let mut row_ptr = Vec::with_capacity(num_pages + 1);
        let mut col_idx = Vec::new();
        let mut discarded = 0usize;

        row_ptr.push(0);

        for &name in &names {
            let node = builder
                .get_node_id(name)
                .and_then(|id| builder.get_node(id));

            if let Some(node) = node {
                let mut targets: Vec<u32> = Vec::with_capacity(node.links.len());
                for link in &node.links {
                    match index.get(link.as_str()) {
                        Some(&target) => targets.push(target),
                        None => discarded += 1,
                    }
                }
                // Sort for deterministic iteration
                targets.sort_unstable();
                col_idx.extend(targets);
            }

            row_ptr.push(col_idx.len());
        }

        if discarded > 0 {
            debug!(discarded, "dropped links to pages outside the corpus");
        }

        let (in_ptr, in_idx) = transpose(num_pages, &row_ptr, &col_idx);
        let pages: Arc<[String]> = names.into_iter().map(str::to_string).collect();

        Self {
            pages,
            row_ptr,
            col_idx,
            in_ptr,
            in_idx,
        }
    }

    /// Build a corpus from `(page, links)` pairs
    ///
    /// ```
    /// use rapid_pagerank::Corpus;
    ///
    /// let corpus = Corpus::from_links([("a", vec!["b"]), ("b", vec![])]);
    /// assert_eq!(corpus.num_pages(), 2);
    /// ```
    pub fn from_links<I, P, L, T>(pages: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: AsRef<str>,
        L: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut builder = CorpusBuilder::new();
        for (page, links) in pages {
            let page = page.as_ref();
            builder.add_page(page);
            for link in links {
                builder.add_link(page, link.as_ref());
            }
        }
        builder.build()
    }

    /// Number of pages
    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }

    /// Check if the corpus has no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of links
    pub fn num_links(&self) -> usize {
        self.col_idx.len()
    }

    /// Page names in node-ID order (sorted)
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub(crate) fn shared_pages(&self) -> Arc<[String]> {
        Arc::clone(&self.pages)
    }

    /// Name of a node
    pub fn page(&self, node: u32) -> &str {
        &self.pages[node as usize]
    }

    /// Node ID of a page name
    pub fn index_of(&self, page: &str) -> Option<u32> {
        self.pages
            .binary_search_by(|p| p.as_str().cmp(page))
            .ok()
            .map(|i| i as u32)
    }

    /// Outbound link targets of a node
    pub fn links(&self, node: u32) -> &[u32] {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        &self.col_idx[start..end]
    }

    /// Pages linking to a node
    pub fn in_links(&self, node: u32) -> &[u32] {
        let start = self.in_ptr[node as usize];
        let end = self.in_ptr[node as usize + 1];
        &self.in_idx[start..end]
    }

    /// Out-degree of a node
    pub fn degree(&self, node: u32) -> usize {
        self.row_ptr[node as usize + 1] - self.row_ptr[node as usize]
    }

    /// Outbound link names of a page, or `None` if the page is unknown
    pub fn links_of(&self, page: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let node = self.index_of(page)?;
        Some(self.links(node).iter().map(move |&t| self.page(t)))
    }

    /// Nodes with no outbound links
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_pages() as u32)
            .filter(|&n| self.degree(n) == 0)
            .collect()
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self {
            pages: Arc::from(Vec::<String>::new()),
            row_ptr: vec![0],
            col_idx: Vec::new(),
            in_ptr: vec![0],
            in_idx: Vec::new(),
        }
    }
}

/// Build the reverse adjacency with a counting sort over targets.
fn transpose(num_pages: usize, row_ptr: &[usize], col_idx: &[u32]) -> (Vec<usize>, Vec<u32>) {
    let mut in_ptr = vec![0usize; num_pages + 1];
    for &target in col_idx {
        in_ptr[target as usize + 1] += 1;
    }
    for i in 0..num_pages {
        in_ptr[i + 1] += in_ptr[i];
    }

    let mut cursor = in_ptr.clone();
    let mut in_idx = vec![0u32; col_idx.len()];
    for source in 0..num_pages {
        for &target in &col_idx[row_ptr[source]..row_ptr[source + 1]] {
            in_idx[cursor[target as usize]] = source as u32;
            cursor[target as usize] += 1;
        }
    }

    (in_ptr, in_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_corpus() -> Corpus {
        // c is dangling; d.html is outside the corpus
        Corpus::from_links([
            ("b", vec!["c", "a"]),
            ("a", vec!["b", "d.html"]),
            ("c", vec![]),
        ])
    }

    #[test]
    fn test_pages_sorted() {
        let corpus = build_test_corpus();

        assert_eq!(corpus.num_pages(), 3);
        assert_eq!(corpus.pages(), &["a", "b", "c"]);
        assert_eq!(corpus.index_of("b"), Some(1));
        assert_eq!(corpus.index_of("z"), None);
    }

    #[test]
    fn test_outside_links_dropped() {
        let corpus = build_test_corpus();

        let a_links: Vec<_> = corpus.links_of("a").unwrap().collect();
        assert_eq!(a_links, vec!["b"]);
        assert_eq!(corpus.num_links(), 3);
    }

    #[test]
    fn test_neighbor_iteration() {
        let corpus = build_test_corpus();

        assert_eq!(corpus.links(1), &[0, 2]);
        assert_eq!(corpus.degree(1), 2);
        assert_eq!(corpus.degree(2), 0);
    }

    #[test]
    fn test_in_links_are_transpose() {
        let corpus = build_test_corpus();

        // a <- b, b <- a, c <- b
        assert_eq!(corpus.in_links(0), &[1]);
        assert_eq!(corpus.in_links(1), &[0]);
        assert_eq!(corpus.in_links(2), &[1]);
    }

    #[test]
    fn test_dangling_nodes() {
        let corpus = build_test_corpus();
        assert_eq!(corpus.dangling_nodes(), vec![2]);
    }

    #[test]
    fn test_link_target_added_later() {
        let mut builder = CorpusBuilder::new();
        builder.add_link("x", "y");
        builder.add_page("y");

        let corpus = builder.build();
        let links: Vec<_> = corpus.links_of("x").unwrap().collect();
        assert_eq!(links, vec!["y"]);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = CorpusBuilder::new().build();

        assert!(corpus.is_empty());
        assert_eq!(corpus.num_links(), 0);
        assert!(corpus.dangling_nodes().is_empty());

        let default = Corpus::default();
        assert!(default.is_empty());
    }
}
