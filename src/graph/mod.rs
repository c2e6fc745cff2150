//! Link graph construction and representation
//!
//! This module provides the corpus builder, the immutable CSR corpus
//! consumed by the estimators, and the HTML directory loader.

pub mod builder;
pub mod csr;
pub mod loader;
