//! Pattern matching and left-to-right join evaluation
//!
//! The executor drives the store's wildcard search primitive once per
//! pattern, propagating variable bindings from earlier patterns into later
//! ones. Pattern order is caller-supplied and never reordered.

use crate::binding::{Binding, BindingSet};
use crate::pattern::{PatternTerm, TriplePattern};
use crate::Result;
use tracing::debug;
use wikikb_core::store::TripleSearch;

fn wildcard(slot: &PatternTerm) -> &str {
    match slot {
        // unbound slots become the store's "match any" marker
        PatternTerm::Variable(_) => "",
        PatternTerm::Value(value) => value,
    }
}

/// Evaluates pattern sequences against a triple store
pub struct QueryExecutor<'a> {
    store: &'a dyn TripleSearch,
}

impl<'a> QueryExecutor<'a> {
    /// Create an executor borrowing `store`
    pub fn new(store: &'a dyn TripleSearch) -> Self {
        QueryExecutor { store }
    }

    /// Evaluate one pattern, producing one binding per matching triple.
    ///
    /// `var_positions` names the slots whose matched values become
    /// bindings; it is computed from the unfilled query pattern and reused
    /// for filled patterns during a join, so a substituted slot still
    /// reports its (now fixed) value into fresh bindings. When the same
    /// variable occupies several positions, the value at the last position
    /// wins.
    ///
    /// Zero store matches yield an empty binding set, never an error.
    pub fn search(
        &self,
        pattern: &TriplePattern,
        var_positions: &[(usize, String)],
    ) -> Result<BindingSet> {
        let [subject, predicate, object] = pattern.slots();
        let (triples, count) =
            self.store
                .search_triples(wildcard(subject), wildcard(predicate), wildcard(object))?;
        debug!(pattern = %pattern, matches = count, "pattern search");

        let mut results = BindingSet::new();
        for triple in &triples {
            let values = triple.slots();
            let mut binding = Binding::new();
            for (position, variable) in var_positions {
                binding.bind(variable.clone(), values[*position]);
            }
            results.push(binding);
        }
        Ok(results)
    }

    /// Evaluate a pattern sequence as a strict left-to-right join.
    ///
    /// The first pattern seeds the binding set. For every later pattern,
    /// each variable already bound by the current set is substituted into
    /// the pattern and searched **independently**; every binding found this
    /// way is merged into the one it extends, newer values overriding older
    /// ones on collision. A pattern with several known variables is
    /// therefore searched once per known variable, not once with all of
    /// them substituted together.
    ///
    /// An empty binding set after any step ends evaluation immediately; no
    /// further store calls are issued.
    pub fn evaluate_patterns(&self, patterns: &[TriplePattern]) -> Result<BindingSet> {
        let mut combs = BindingSet::new();

        for (index, pattern) in patterns.iter().enumerate() {
            let var_positions = pattern.variable_positions();
            if index == 0 {
                combs = self.search(pattern, &var_positions)?;
                continue;
            }
            if combs.is_empty() {
                debug!(pattern = %pattern, "empty binding set, skipping remaining patterns");
                break;
            }

            // All bindings in a set share one key set by construction, so
            // membership is checked against the first.
            let known: Vec<String> = var_positions
                .iter()
                .filter(|(_, variable)| {
                    combs
                        .first()
                        .is_some_and(|binding| binding.contains(variable))
                })
                .map(|(_, variable)| variable.clone())
                .collect();

            let mut extended = BindingSet::new();
            for comb in &combs {
                for variable in &known {
                    let Some(value) = comb.get(variable) else {
                        continue;
                    };
                    let filled = pattern.fill(variable, value);
                    let found = self.search(&filled, &var_positions)?;
                    for new_comb in &found {
                        extended.push(comb.merge(new_comb));
                    }
                }
            }
            debug!(
                pattern = %pattern,
                known = known.len(),
                bindings = extended.len(),
                "join step"
            );
            combs = extended;
        }

        Ok(combs)
    }
}
