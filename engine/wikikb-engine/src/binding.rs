//! Variable bindings produced by pattern matching
//!
//! A [`Binding`] maps variable names (marker included, `?ent`) to the raw
//! store values discovered for them. Bindings are produced fresh per search
//! call and never mutated afterwards; combining two bindings goes through
//! [`Binding::merge`], which returns a new one.

use std::collections::BTreeMap;

/// One match's variable assignments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    values: BTreeMap<String, String>,
}

impl Binding {
    /// Create an empty binding
    pub fn new() -> Self {
        Binding::default()
    }

    /// Assign `value` to `variable`, replacing any previous assignment
    pub fn bind(&mut self, variable: impl Into<String>, value: impl Into<String>) {
        self.values.insert(variable.into(), value.into());
    }

    /// The value assigned to `variable`, if any
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.values.get(variable).map(String::as_str)
    }

    /// Whether `variable` has an assignment
    pub fn contains(&self, variable: &str) -> bool {
        self.values.contains_key(variable)
    }

    /// Number of assigned variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variable is assigned
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Assigned variable names in key order
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Key union of `self` and `other` as a new binding.
    ///
    /// On collision the value from `other` wins: newer assignments override
    /// older ones. This precedence is part of the join contract.
    pub fn merge(&self, other: &Binding) -> Binding {
        let mut merged = self.clone();
        for (variable, value) in &other.values {
            merged.values.insert(variable.clone(), value.clone());
        }
        merged
    }
}

/// Accumulated join state: the ordered sequence of bindings produced so far.
///
/// An empty set after any join step means the whole query has no answer and
/// short-circuits everything downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSet {
    bindings: Vec<Binding>,
}

impl BindingSet {
    /// Create an empty binding set
    pub fn new() -> Self {
        BindingSet::default()
    }

    /// Append a binding, preserving insertion order
    pub fn push(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    /// Number of bindings in the set
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the set holds no bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The first binding, if any
    pub fn first(&self) -> Option<&Binding> {
        self.bindings.first()
    }

    /// Iterate over the bindings in order
    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.bindings.iter()
    }
}

impl FromIterator<Binding> for BindingSet {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        BindingSet {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for BindingSet {
    type Item = Binding;
    type IntoIter = std::vec::IntoIter<Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}

impl<'a> IntoIterator for &'a BindingSet {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}
