//! Read-only, index-backed triple storage
//!
//! The store is populated once, either from an iterator of triples or from
//! a tab-separated dump file, and is immutable afterwards. Lookups go
//! through [`TripleSearch::search_triples`], the wildcard pattern search
//! primitive the query engine is built on: an empty string in a slot
//! matches any value, a non-empty string requires an exact match.

use crate::model::Triple;
use crate::{KbError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Wildcard pattern search over a triple collection.
///
/// The returned count always equals the number of returned triples.
/// Implementations must be safe for concurrent reads if shared; the
/// engine never requests write access.
pub trait TripleSearch {
    /// Find all triples matching the given slot values, where an empty
    /// string in any slot means "match any value in this slot".
    fn search_triples(
        &self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<(Vec<Triple>, usize)>;
}

/// In-memory triple store with secondary indexes on every slot.
///
/// Triples are held in a `BTreeSet`, so iteration order is the set's
/// ordering and is deterministic across runs.
#[derive(Debug, Default)]
pub struct MemoryTripleStore {
    triples: BTreeSet<Triple>,
    subject_index: BTreeMap<String, BTreeSet<Triple>>,
    predicate_index: BTreeMap<String, BTreeSet<Triple>>,
    object_index: BTreeMap<String, BTreeSet<Triple>>,
}

impl MemoryTripleStore {
    /// Create a store from an iterator of triples
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = Triple>,
    {
        let mut store = MemoryTripleStore::default();
        for triple in triples {
            store.insert_triple(triple);
        }
        store
    }

    /// Open a store from a tab-separated triples file.
    ///
    /// One `subject \t predicate \t object` record per line; blank lines
    /// and lines starting with `#` are skipped. A missing or unreadable
    /// file, or a line with the wrong number of fields, fails construction.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| KbError::Store(format!("failed to open {}: {}", path.display(), e)))?;

        let mut store = MemoryTripleStore::default();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let record = line.trim();
            if record.is_empty() || record.starts_with('#') {
                continue;
            }
            let mut fields = record.split('\t');
            match (fields.next(), fields.next(), fields.next(), fields.next()) {
                (Some(subject), Some(predicate), Some(object), None) => {
                    store.insert_triple(Triple::new(subject, predicate, object));
                }
                _ => {
                    return Err(KbError::Parse(format!(
                        "{}:{}: expected 3 tab-separated fields",
                        path.display(),
                        number + 1
                    )));
                }
            }
        }

        debug!(
            path = %path.display(),
            triples = store.len(),
            "opened triple store"
        );
        Ok(store)
    }

    fn insert_triple(&mut self, triple: Triple) {
        if self.triples.insert(triple.clone()) {
            self.subject_index
                .entry(triple.subject().to_string())
                .or_default()
                .insert(triple.clone());
            self.predicate_index
                .entry(triple.predicate().to_string())
                .or_default()
                .insert(triple.clone());
            self.object_index
                .entry(triple.object().to_string())
                .or_default()
                .insert(triple);
        }
    }

    /// Number of triples in the store
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check whether the store holds no triples
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

impl TripleSearch for MemoryTripleStore {
    fn search_triples(
        &self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<(Vec<Triple>, usize)> {
        // Start with the most selective provided slot and intersect
        let mut candidates: Option<BTreeSet<Triple>> = None;

        for (value, index) in [
            (subject, &self.subject_index),
            (predicate, &self.predicate_index),
            (object, &self.object_index),
        ] {
            if value.is_empty() {
                continue;
            }
            let Some(matching) = index.get(value) else {
                return Ok((Vec::new(), 0));
            };
            candidates = Some(match candidates {
                Some(current) => current.intersection(matching).cloned().collect(),
                None => matching.clone(),
            });
        }

        let triples: Vec<Triple> = match candidates {
            Some(matched) => matched.into_iter().collect(),
            // All slots wildcarded: the full collection
            None => self.triples.iter().cloned().collect(),
        };
        let count = triples.len();
        Ok((triples, count))
    }
}
