//! Raw-value triple model
//!
//! Values are kept exactly as the backing dump records them: entity and
//! property URIs, language-tagged literals (`"Albert Einstein"@en`) and
//! datatype-tagged literals (`"+1879-03-14T00:00:00Z"^^xsd:dateTime`).
//! Interpretation of those encodings happens in the engine layer, never
//! here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One stored fact: subject, predicate and object, each a raw string value.
///
/// Triples are immutable once constructed and owned by the store that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    subject: String,
    predicate: String,
    object: String,
}

impl Triple {
    /// Create a new triple from raw slot values
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// The subject slot value
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The predicate slot value
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// The object slot value
    pub fn object(&self) -> &str {
        &self.object
    }

    /// All three slot values in positional order: subject, predicate, object
    pub fn slots(&self) -> [&str; 3] {
        [&self.subject, &self.predicate, &self.object]
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_order() {
        let triple = Triple::new("s", "p", "o");
        assert_eq!(triple.slots(), ["s", "p", "o"]);
        assert_eq!(triple.subject(), "s");
        assert_eq!(triple.predicate(), "p");
        assert_eq!(triple.object(), "o");
    }

    #[test]
    fn test_values_kept_verbatim() {
        let triple = Triple::new(
            "http://www.wikidata.org/entity/Q937",
            "http://www.w3.org/2000/01/rdf-schema#label",
            "\"Albert Einstein\"@en",
        );
        assert_eq!(triple.object(), "\"Albert Einstein\"@en");
    }
}
