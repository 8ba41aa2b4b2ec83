//! LSP `TextEdit` parsing.
//!
//! Only the small subset of the protocol needed to turn `TextEdit` / `additionalTextEdits`
//! payloads into [`RangeEdit`]s is parsed; no `lsp-types` dependency.

use crate::lsp_position::LspRange;
use completion_edit::{Encoding, RangeEdit};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A minimal representation of an LSP `TextEdit`.
pub struct LspTextEdit {
    /// The range to replace, in the negotiated position encoding.
    pub range: LspRange,
    /// Replacement text (may contain newlines).
    pub new_text: String,
}

impl LspTextEdit {
    /// Parse a `TextEdit`-shaped JSON value. A missing `newText` reads as a deletion.
    pub fn from_value(value: &Value) -> Option<Self> {
        let range = LspRange::from_value(value.get("range")?)?;
        let new_text = value
            .get("newText")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        Some(Self { range, new_text })
    }

    /// Tag the edit with the position encoding its columns are measured in.
    pub fn into_range_edit(self, encoding: Encoding) -> RangeEdit {
        RangeEdit::new(
            self.range.start.into(),
            self.range.end.into(),
            encoding,
            self.new_text,
        )
    }
}

/// Parse a JSON array of `TextEdit` values, skipping malformed entries.
pub fn text_edits_from_value(value: &Value) -> Vec<LspTextEdit> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|edit| {
                    let parsed = LspTextEdit::from_value(edit);
                    if parsed.is_none() {
                        tracing::debug!(%edit, "skipping malformed TextEdit");
                    }
                    parsed
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
}
