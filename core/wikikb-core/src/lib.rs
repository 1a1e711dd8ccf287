//! # WikiKB Core
//!
//! Data model and read-only triple storage for the wikikb knowledge-base
//! stack.
//!
//! This crate provides the foundational pieces the query engine builds on:
//!
//! - A raw-value triple model matching the Wikidata dump encoding
//! - An index-backed, read-only triple store with wildcard pattern search
//! - Common vocabulary constants (entity/property namespaces, label
//!   predicates)
//!
//! ## Examples
//!
//! ```rust
//! use wikikb_core::store::{MemoryTripleStore, TripleSearch};
//! use wikikb_core::Triple;
//!
//! # fn main() -> wikikb_core::Result<()> {
//! let store = MemoryTripleStore::from_triples([Triple::new(
//!     "http://www.wikidata.org/entity/Q937",
//!     "http://www.w3.org/2000/01/rdf-schema#label",
//!     "\"Albert Einstein\"@en",
//! )]);
//! let (triples, count) = store.search_triples("http://www.wikidata.org/entity/Q937", "", "")?;
//! assert_eq!(count, triples.len());
//! # Ok(())
//! # }
//! ```

pub mod model;
pub mod store;
pub mod vocab;

// Re-export core types for convenience
pub use model::Triple;
pub use store::{MemoryTripleStore, TripleSearch};

/// Core error type for wikikb operations
#[derive(Debug, thiserror::Error)]
pub enum KbError {
    #[error("Store error: {0}")]
    Store(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for wikikb core operations
pub type Result<T> = std::result::Result<T, KbError>;

/// Version information for WikiKB Core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
