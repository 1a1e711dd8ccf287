//! Triple patterns with literal and variable slots
//!
//! A pattern is one query clause: three slots over subject, predicate and
//! object, each holding either a concrete value or a variable reference.
//! Variable references carry the reserved `?` marker as part of their name,
//! so `?ent` is both the slot syntax and the binding key.

use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved leading marker distinguishing variable references from values
pub const VARIABLE_MARKER: char = '?';

/// One slot of a triple pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternTerm {
    /// Concrete value the store must match exactly
    Value(String),
    /// Variable reference, stored with its leading marker (`?ent`)
    Variable(String),
}

impl PatternTerm {
    /// Parse one raw slot. The empty string is rejected because it is
    /// reserved as the store wildcard, and a bare marker names no variable.
    pub fn parse(slot: &str) -> Result<Self> {
        if slot.is_empty() || slot == "?" {
            return Err(EngineError::InvalidPattern {
                pattern: slot.to_string(),
            });
        }
        if slot.starts_with(VARIABLE_MARKER) {
            Ok(PatternTerm::Variable(slot.to_string()))
        } else {
            Ok(PatternTerm::Value(slot.to_string()))
        }
    }

    /// The variable name if this slot is a variable reference
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            PatternTerm::Variable(name) => Some(name),
            PatternTerm::Value(_) => None,
        }
    }
}

impl fmt::Display for PatternTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternTerm::Value(value) => write!(f, "{}", value),
            PatternTerm::Variable(name) => write!(f, "{}", name),
        }
    }
}

/// One query clause: three slots over subject, predicate, object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriplePattern {
    slots: [PatternTerm; 3],
}

impl TriplePattern {
    /// Build a pattern from already-parsed slots
    pub fn new(subject: PatternTerm, predicate: PatternTerm, object: PatternTerm) -> Self {
        TriplePattern {
            slots: [subject, predicate, object],
        }
    }

    /// Parse a pattern from three raw slot strings. Malformed slots are
    /// rejected here, before any store access.
    pub fn parse(subject: &str, predicate: &str, object: &str) -> Result<Self> {
        Ok(TriplePattern {
            slots: [
                PatternTerm::parse(subject)?,
                PatternTerm::parse(predicate)?,
                PatternTerm::parse(object)?,
            ],
        })
    }

    /// Parse a pattern from a slice of raw slots; anything other than
    /// exactly three slots is an invalid pattern.
    pub fn parse_slice<S: AsRef<str>>(slots: &[S]) -> Result<Self> {
        match slots {
            [subject, predicate, object] => {
                Self::parse(subject.as_ref(), predicate.as_ref(), object.as_ref())
            }
            _ => Err(EngineError::InvalidPattern {
                pattern: slots
                    .iter()
                    .map(|s| s.as_ref())
                    .collect::<Vec<_>>()
                    .join(" "),
            }),
        }
    }

    /// The three slots in positional order
    pub fn slots(&self) -> &[PatternTerm; 3] {
        &self.slots
    }

    /// Positions and names of variable slots, left to right
    pub fn variable_positions(&self) -> Vec<(usize, String)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| {
                slot.as_variable().map(|name| (position, name.to_string()))
            })
            .collect()
    }

    /// Replace every occurrence of `variable` with `value`, producing a
    /// filled pattern. Slots not holding that variable are untouched.
    pub fn fill(&self, variable: &str, value: &str) -> TriplePattern {
        let filled = self.slots.clone().map(|slot| match slot {
            PatternTerm::Variable(ref name) if name == variable => {
                PatternTerm::Value(value.to_string())
            }
            other => other,
        });
        TriplePattern { slots: filled }
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.slots[0], self.slots[1], self.slots[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slots() {
        assert_eq!(
            PatternTerm::parse("?ent").unwrap(),
            PatternTerm::Variable("?ent".to_string())
        );
        assert_eq!(
            PatternTerm::parse("Q5").unwrap(),
            PatternTerm::Value("Q5".to_string())
        );
    }

    #[test]
    fn test_reject_empty_and_bare_marker() {
        assert!(matches!(
            PatternTerm::parse(""),
            Err(EngineError::InvalidPattern { .. })
        ));
        assert!(matches!(
            PatternTerm::parse("?"),
            Err(EngineError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_parse_slice_arity() {
        let pattern = TriplePattern::parse_slice(&["?ent", "P31", "Q5"]).unwrap();
        assert_eq!(pattern.variable_positions(), vec![(0, "?ent".to_string())]);

        let err = TriplePattern::parse_slice(&["?ent", "P31"]).unwrap_err();
        match err {
            EngineError::InvalidPattern { pattern } => assert_eq!(pattern, "?ent P31"),
            other => panic!("expected invalid pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_variable_positions_repeated_variable() {
        let pattern = TriplePattern::parse("?x", "P131", "?x").unwrap();
        assert_eq!(
            pattern.variable_positions(),
            vec![(0, "?x".to_string()), (2, "?x".to_string())]
        );
    }

    #[test]
    fn test_fill_replaces_every_occurrence() {
        let pattern = TriplePattern::parse("?x", "P131", "?x").unwrap();
        let filled = pattern.fill("?x", "Q64");
        assert_eq!(filled, TriplePattern::parse("Q64", "P131", "Q64").unwrap());
        // the original pattern is untouched
        assert_eq!(pattern.variable_positions().len(), 2);
    }

    #[test]
    fn test_fill_ignores_other_variables() {
        let pattern = TriplePattern::parse("?x", "P31", "?y").unwrap();
        let filled = pattern.fill("?x", "Q1");
        assert_eq!(filled, TriplePattern::parse("Q1", "P31", "?y").unwrap());
    }

    #[test]
    fn test_display() {
        let pattern = TriplePattern::parse("?ent", "P31", "Q5").unwrap();
        assert_eq!(pattern.to_string(), "?ent P31 Q5");
    }
}
