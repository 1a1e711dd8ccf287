//! # WikiKB Engine
//!
//! Conjunctive triple-pattern query evaluation with variable-binding
//! propagation, result post-processing and entity resolution over a
//! read-only triple store.
//!
//! Queries are ordered sequences of subject–predicate–object patterns
//! sharing variables. Evaluation is strictly left to right: each pattern is
//! matched against the store, bindings discovered so far are substituted
//! into the next pattern, and the final binding set is filtered, ordered,
//! projected and optionally collapsed into a count row.
//!
//! ## Examples
//!
//! ```rust
//! use wikikb_core::{MemoryTripleStore, Triple};
//! use wikikb_engine::{KbEngine, RowSet, TriplePattern};
//!
//! # fn main() -> wikikb_engine::Result<()> {
//! let store = MemoryTripleStore::from_triples([Triple::new(
//!     "http://www.wikidata.org/entity/Q937",
//!     "http://www.wikidata.org/prop/direct/P31",
//!     "http://www.wikidata.org/entity/Q5",
//! )]);
//! let engine = KbEngine::from_store(store);
//!
//! let patterns = vec![TriplePattern::parse(
//!     "?ent",
//!     "http://www.wikidata.org/prop/direct/P31",
//!     "http://www.wikidata.org/entity/Q5",
//! )?];
//! let rows = engine.evaluate(&["?ent".to_string()], &patterns, None, None)?;
//! assert_eq!(
//!     rows,
//!     RowSet::Rows(vec![vec!["http://www.wikidata.org/entity/Q937".to_string()]])
//! );
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod config;
pub mod executor;
pub mod pattern;
pub mod postprocess;
pub mod resolver;

// Re-export main types for convenience
pub use binding::{Binding, BindingSet};
pub use config::EngineConfig;
pub use executor::QueryExecutor;
pub use pattern::{PatternTerm, TriplePattern};
pub use postprocess::{FilterSpec, OrderSpec, RowSet, SortOrder};
pub use resolver::{Direction, EntityResolver};

use std::path::Path;
use wikikb_core::{KbError, MemoryTripleStore};

/// Error type for query evaluation and entity resolution
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] KbError),
    #[error("invalid pattern: {pattern}")]
    InvalidPattern { pattern: String },
    #[error("no binding for variable {variable}")]
    MissingBinding { variable: String },
    #[error("cannot order by non-numeric value {value:?}")]
    OrderValue { value: String },
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Knowledge-base engine facade.
///
/// Owns the triple store for the process lifetime and exposes query
/// evaluation and entity resolution over it. The store is opened once at
/// construction and is read-only from then on.
pub struct KbEngine {
    store: MemoryTripleStore,
    config: EngineConfig,
}

impl KbEngine {
    /// Open an engine over the triples file at `path` with the default
    /// configuration. A missing or unreadable file fails fast; the engine
    /// is unusable without its store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, EngineConfig::default())
    }

    /// Open an engine over the triples file at `path`
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self> {
        let store = MemoryTripleStore::open(path)?;
        Ok(KbEngine { store, config })
    }

    /// Build an engine over an already-populated store
    pub fn from_store(store: MemoryTripleStore) -> Self {
        KbEngine {
            store,
            config: EngineConfig::default(),
        }
    }

    /// Build an engine over an already-populated store with a custom
    /// configuration
    pub fn from_store_with_config(store: MemoryTripleStore, config: EngineConfig) -> Self {
        KbEngine { store, config }
    }

    /// The underlying triple store
    pub fn store(&self) -> &MemoryTripleStore {
        &self.store
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a conjunctive query and post-process the result.
    ///
    /// `what_return` lists the projected variable names in output order; a
    /// trailing entry starting with `COUNT` requests the count-aggregate
    /// row shape. `query_seq` is evaluated strictly left to right.
    pub fn evaluate(
        &self,
        what_return: &[String],
        query_seq: &[TriplePattern],
        filter_entities: Option<&[FilterSpec]>,
        order_info: Option<&OrderSpec>,
    ) -> Result<RowSet> {
        let bindings = QueryExecutor::new(&self.store).evaluate_patterns(query_seq)?;
        postprocess::post_process(bindings, what_return, filter_entities, order_info)
    }

    /// An entity resolver borrowing this engine's store
    pub fn resolver(&self) -> EntityResolver<'_> {
        EntityResolver::new(&self.store, &self.config)
    }
}
