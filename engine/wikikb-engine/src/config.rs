//! Engine configuration

use serde::{Deserialize, Serialize};

/// Configuration for query evaluation and entity resolution.
///
/// Loading this from a file or environment is left to the caller; the
/// engine only consumes the resolved values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Language tag selecting labels and aliases, without the `@` marker
    pub language: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            language: "en".to_string(),
        }
    }
}
