//! Entity resolution: labels, aliases and incident relations
//!
//! Raw triple values come in several shapes: full entity URIs, compact
//! entity ids, language-tagged literals (`"Berlin"@en`) and datatype-tagged
//! literals (`"+1879-03-14T00:00:00Z"^^xsd:dateTime`). The resolver
//! normalizes each shape into a display value, looking labels up in the
//! store where the value alone does not carry one. An unrecognized shape
//! resolves to "not found", never to an error.

use crate::config::EngineConfig;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wikikb_core::store::TripleSearch;
use wikikb_core::vocab::{rdfs, skos, wikidata};

/// Direction of relation traversal relative to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Relations where the entity is the subject
    Forward,
    /// Relations where the entity is the object
    Backward,
}

/// Resolves raw triple values into labels, aliases and relation lists
pub struct EntityResolver<'a> {
    store: &'a dyn TripleSearch,
    language_suffix: String,
}

impl<'a> EntityResolver<'a> {
    /// Create a resolver borrowing `store`, selecting labels in the
    /// configured target language
    pub fn new(store: &'a dyn TripleSearch, config: &EngineConfig) -> Self {
        EntityResolver {
            store,
            language_suffix: format!("@{}", config.language),
        }
    }

    /// Strip the target-language tag and quotes, if the value carries
    /// that tag
    fn strip_language_tag(&self, value: &str) -> Option<String> {
        value
            .strip_suffix(&self.language_suffix)
            .map(|stripped| stripped.replace('"', ""))
    }

    /// Resolve a raw value to a display label.
    ///
    /// `None` is the ordinary "not found" outcome; only store failures
    /// propagate as errors.
    pub fn find_label(&self, raw: &str) -> Result<Option<String>> {
        let value = raw.replace('"', "");
        let value = if value.starts_with(wikidata::ENTITY_ID_PREFIX) {
            format!("{}{}", wikidata::ENTITY_NAMESPACE, value)
        } else {
            value
        };

        if value.starts_with(wikidata::ENTITY_NAMESPACE) {
            let (labels, _) = self.store.search_triples(&value, rdfs::LABEL, "")?;
            for triple in &labels {
                if let Some(label) = self.strip_language_tag(triple.object()) {
                    return Ok(Some(label));
                }
            }
            debug!(entity = %value, "no label in target language");
            Ok(None)
        } else if let Some(stripped) = value.strip_suffix(&self.language_suffix) {
            Ok(Some(stripped.to_string()))
        } else if let Some((payload, _datatype)) = value.split_once("^^") {
            // drop date/numeric formatting artifacts from typed payloads
            let cleaned = payload.replace("T00:00:00Z", "");
            let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
            Ok(Some(cleaned.to_string()))
        } else if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Alternate labels of a full entity URI, in store iteration order.
    ///
    /// Anything other than a full entity URI has no aliases and yields an
    /// empty list.
    pub fn find_aliases(&self, raw: &str) -> Result<Vec<String>> {
        if !raw.starts_with(wikidata::ENTITY_NAMESPACE) {
            return Ok(Vec::new());
        }
        let (triples, _) = self.store.search_triples(raw, skos::ALT_LABEL, "")?;
        Ok(triples
            .iter()
            .filter_map(|triple| self.strip_language_tag(triple.object()))
            .collect())
    }

    /// Relation URIs incident to an entity in the given direction, in
    /// store iteration order, without deduplication.
    ///
    /// Only predicates in the property namespace are returned, narrowed to
    /// `prefix` under that namespace when given (direct properties
    /// otherwise).
    pub fn find_relations(
        &self,
        entity_id: &str,
        direction: Direction,
        prefix: Option<&str>,
    ) -> Result<Vec<String>> {
        let entity = format!("{}{}", wikidata::ENTITY_NAMESPACE, entity_id);
        let (triples, _) = match direction {
            Direction::Forward => self.store.search_triples(&entity, "", "")?,
            Direction::Backward => self.store.search_triples("", "", &entity)?,
        };

        let wanted = match prefix {
            Some(sub_path) => format!("{}{}", wikidata::PROP_NAMESPACE, sub_path),
            None => format!("{}{}", wikidata::PROP_NAMESPACE, wikidata::PROPERTY_ID_PREFIX),
        };
        Ok(triples
            .iter()
            .map(|triple| triple.predicate())
            .filter(|predicate| predicate.starts_with(&wanted))
            .map(str::to_string)
            .collect())
    }
}
