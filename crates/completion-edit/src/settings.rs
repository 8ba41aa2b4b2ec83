//! Engine settings.

use crate::buffer::MarkerNamespace;
use completion_edit_lang::WordChars;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading [`EngineSettings`].
pub enum SettingsError {
    #[error("JSON parse error: {0}")]
    /// The settings document is not valid JSON or has the wrong shape.
    Json(#[from] serde_json::Error),

    #[error("unifying character entry '{0}' is not a single character")]
    /// A `unifying_chars` entry was empty or longer than one character.
    InvalidUnifyingChar(String),
}

/// Settings for [`EditEngine`](crate::EditEngine).
///
/// Every field has a default, so a partial document such as `{"unifying_chars": ["_"]}` is
/// valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Characters that continue a word besides alphanumerics.
    pub unifying_chars: BTreeSet<String>,
    /// Message shown when a snippet fails to parse and is inserted literally.
    pub parse_failure_message: String,
    /// Marker namespace used to bracket pending text.
    pub marker_namespace: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            unifying_chars: ["-", "_"].into_iter().map(str::to_string).collect(),
            parse_failure_message: "failed to parse snippet".to_string(),
            marker_namespace: 0x00c0_ffee,
        }
    }
}

impl EngineSettings {
    /// Load settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.word_chars()?;
        Ok(settings)
    }

    /// The word-character config described by `unifying_chars`.
    pub fn word_chars(&self) -> Result<WordChars, SettingsError> {
        self.unifying_chars
            .iter()
            .map(|entry| {
                let mut chars = entry.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(SettingsError::InvalidUnifyingChar(entry.clone())),
                }
            })
            .collect()
    }

    /// The pending-text marker namespace.
    pub fn namespace(&self) -> MarkerNamespace {
        MarkerNamespace(self.marker_namespace)
    }
}
