//! Corpus builder
//!
//! A mutable builder that collects pages and their raw link targets. Links
//! may name pages that have not been added yet; targets that never become
//! pages are discarded when the builder is frozen into a [`Corpus`].

use rustc_hash::{FxHashMap, FxHashSet};

use super::csr::Corpus;

/// A page in the builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The page identifier
    pub name: String,
    /// Raw outbound link targets, not yet checked against the corpus
    pub links: FxHashSet<String>,
}

impl BuilderNode {
    /// Create a new node with no links
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: FxHashSet::default(),
        }
    }
}

/// A mutable link-graph builder
#[derive(Debug)]
pub struct CorpusBuilder {
    /// Maps page name -> insertion ID
    name_to_id: FxHashMap<String, u32>,
    /// Node storage, in insertion order
    nodes: Vec<BuilderNode>,
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self {
            name_to_id: FxHashMap::default(),
            nodes: Vec::new(),
        }
    }

    /// Create a builder with pre-allocated capacity
    pub fn with_capacity(page_capacity: usize) -> Self {
        Self {
            name_to_id: FxHashMap::with_capacity_and_hasher(page_capacity, Default::default()),
            nodes: Vec::with_capacity(page_capacity),
        }
    }

    /// Get or create the page with the given name, returning its ID
    pub fn add_page(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.name_to_id.insert(name.to_string(), id);
        self.nodes.push(BuilderNode::new(name));
        id
    }

    /// Record a link from page `from` to the page named `to`
    ///
    /// The source page is created if needed. Self links are ignored.
    pub fn add_link(&mut self, from: &str, to: &str) {
        let id = self.add_page(from);
        if from == to {
            return;
        }
        self.nodes[id as usize].links.insert(to.to_string());
    }

    /// Get the number of pages
    pub fn page_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a page by insertion ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a page's insertion ID by name
    pub fn get_node_id(&self, name: &str) -> Option<u32> {
        self.name_to_id.get(name).copied()
    }

    /// Check whether `name` has been added as a page
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_id.contains_key(name)
    }

    /// Iterate over all pages in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the builder is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Freeze into an immutable [`Corpus`], dropping links to unknown pages
    pub fn build(&self) -> Corpus {
        Corpus::from_builder(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_page_deduplicates() {
        let mut builder = CorpusBuilder::new();

        let a = builder.add_page("a.html");
        let b = builder.add_page("b.html");
        let a_again = builder.add_page("a.html");

        assert_eq!(a, a_again);
        assert_ne!(a, b);
        assert_eq!(builder.page_count(), 2);
    }

    #[test]
    fn test_add_link_creates_source() {
        let mut builder = CorpusBuilder::new();
        builder.add_link("a.html", "b.html");

        // Only the source becomes a page; the target is just a raw link
        assert!(builder.contains("a.html"));
        assert!(!builder.contains("b.html"));
        let a = builder.get_node_id("a.html").unwrap();
        assert!(builder.get_node(a).unwrap().links.contains("b.html"));
    }

    #[test]
    fn test_duplicate_links_collapse() {
        let mut builder = CorpusBuilder::new();
        builder.add_link("a", "b");
        builder.add_link("a", "b");

        let a = builder.get_node_id("a").unwrap();
        assert_eq!(builder.get_node(a).unwrap().links.len(), 1);
    }

    #[test]
    fn test_self_links_prevented() {
        let mut builder = CorpusBuilder::new();
        builder.add_link("a", "a");

        let a = builder.get_node_id("a").unwrap();
        assert!(builder.get_node(a).unwrap().links.is_empty());
    }
}
