//! LSP `CompletionItem` → [`Completion`] conversion.
//!
//! Supported shapes:
//! - `CompletionItem.textEdit` as `TextEdit`
//! - `CompletionItem.textEdit` as `InsertReplaceEdit` (choose insert vs replace)
//! - `insertText` / `label` when no `textEdit` is present (replaces the word at the cursor)
//! - `CompletionItem.additionalTextEdits` (secondary edits)
//! - Snippet-shaped inserts (`insertTextFormat == 2`) become [`SnippetEdit`]s for the engine's
//!   snippet parser.

use crate::lsp_position::LspRange;
use crate::lsp_text_edits::{LspTextEdit, text_edits_from_value};
use completion_edit::{
    ApplicableEdit, ChangeId, Completion, Edit, Encoding, SnippetEdit, SnippetGrammar,
    SnippetRange,
};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Which range to apply when a completion item uses an LSP `InsertReplaceEdit`.
pub enum CompletionTextEditMode {
    /// Use the `insert` range (usually less destructive).
    #[default]
    Insert,
    /// Use the `replace` range.
    Replace,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Completion items that cannot be turned into an edit.
pub enum CompletionItemError {
    #[error("completion item has no textEdit, insertText or label")]
    /// Nothing to insert.
    NoInsertText,

    #[error("completion item textEdit is malformed")]
    /// `textEdit` is present but is neither a `TextEdit` nor an `InsertReplaceEdit`.
    MalformedTextEdit,
}

fn is_snippet(item: &Value) -> bool {
    item.get("insertTextFormat").and_then(Value::as_u64) == Some(2)
}

fn main_text_edit(
    text_edit: &Value,
    mode: CompletionTextEditMode,
) -> Result<LspTextEdit, CompletionItemError> {
    // Standard `TextEdit`: { range, newText }
    if text_edit.get("range").is_some() {
        return LspTextEdit::from_value(text_edit).ok_or(CompletionItemError::MalformedTextEdit);
    }

    // `InsertReplaceEdit`: { insert, replace, newText }
    let key = match mode {
        CompletionTextEditMode::Insert => "insert",
        CompletionTextEditMode::Replace => "replace",
    };
    let range = text_edit
        .get(key)
        .and_then(LspRange::from_value)
        .ok_or(CompletionItemError::MalformedTextEdit)?;
    let new_text = text_edit
        .get("newText")
        .and_then(Value::as_str)
        .ok_or(CompletionItemError::MalformedTextEdit)?;

    Ok(LspTextEdit {
        range,
        new_text: new_text.to_string(),
    })
}

fn primary_edit(
    item: &Value,
    encoding: Encoding,
    mode: CompletionTextEditMode,
) -> Result<ApplicableEdit, CompletionItemError> {
    let snippet = is_snippet(item);

    if let Some(text_edit) = item.get("textEdit") {
        let edit = main_text_edit(text_edit, mode)?;
        return Ok(if snippet {
            ApplicableEdit::Snippet(SnippetEdit {
                new_text: edit.new_text,
                grammar: SnippetGrammar::Lsp,
                range: Some(SnippetRange {
                    begin: edit.range.start.into(),
                    end: edit.range.end.into(),
                    encoding,
                }),
            })
        } else {
            ApplicableEdit::Range(edit.into_range_edit(encoding))
        });
    }

    let text = item
        .get("insertText")
        .and_then(Value::as_str)
        .or_else(|| item.get("label").and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .ok_or(CompletionItemError::NoInsertText)?;

    Ok(if snippet {
        ApplicableEdit::Snippet(SnippetEdit {
            new_text: text.to_string(),
            grammar: SnippetGrammar::Lsp,
            range: None,
        })
    } else {
        ApplicableEdit::Edit(Edit::new(text))
    })
}

/// Convert an LSP `CompletionItem` value into a [`Completion`] for the context `change_id`.
///
/// Every range is tagged with `encoding`, the position encoding negotiated with the server (see
/// [`negotiated_encoding`](crate::negotiated_encoding)). Malformed `additionalTextEdits`
/// entries are skipped.
pub fn completion_item_to_completion(
    item: &Value,
    change_id: ChangeId,
    encoding: Encoding,
    mode: CompletionTextEditMode,
) -> Result<Completion, CompletionItemError> {
    let primary = primary_edit(item, encoding, mode)?;
    let secondary = item
        .get("additionalTextEdits")
        .map(text_edits_from_value)
        .unwrap_or_default()
        .into_iter()
        .map(|edit| edit.into_range_edit(encoding));

    Ok(Completion::new(change_id, primary).with_secondary(secondary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use completion_edit::{Position, RangeEdit};
    use serde_json::json;

    #[test]
    fn test_insert_replace_edit_honours_mode() {
        let item = json!({
            "label": "format",
            "textEdit": {
                "insert": { "start": { "line": 0, "character": 4 }, "end": { "line": 0, "character": 6 } },
                "replace": { "start": { "line": 0, "character": 4 }, "end": { "line": 0, "character": 9 } },
                "newText": "format"
            }
        });

        let insert =
            completion_item_to_completion(&item, 3, Encoding::Utf16, CompletionTextEditMode::Insert)
                .unwrap();
        let replace = completion_item_to_completion(
            &item,
            3,
            Encoding::Utf16,
            CompletionTextEditMode::Replace,
        )
        .unwrap();

        assert_eq!(
            insert.primary_edit,
            ApplicableEdit::Range(RangeEdit::new(
                Position::new(0, 4),
                Position::new(0, 6),
                Encoding::Utf16,
                "format"
            ))
        );
        match replace.primary_edit {
            ApplicableEdit::Range(edit) => assert_eq!(edit.end, Position::new(0, 9)),
            other => panic!("expected a range edit, got {other:?}"),
        }
    }

    #[test]
    fn test_label_fallback_is_a_word_edit() {
        let item = json!({ "label": "println" });
        let completion =
            completion_item_to_completion(&item, 1, Encoding::Utf8, Default::default()).unwrap();
        assert_eq!(
            completion.primary_edit,
            ApplicableEdit::Edit(Edit::new("println"))
        );
        assert!(completion.secondary_edits.is_empty());
    }

    #[test]
    fn test_snippet_insert_text_without_range() {
        let item = json!({ "label": "fn", "insertText": "fn ${1:name}() {}", "insertTextFormat": 2 });
        let completion =
            completion_item_to_completion(&item, 1, Encoding::Utf16, Default::default()).unwrap();
        assert_eq!(
            completion.primary_edit,
            ApplicableEdit::Snippet(SnippetEdit {
                new_text: "fn ${1:name}() {}".to_string(),
                grammar: SnippetGrammar::Lsp,
                range: None,
            })
        );
    }

    #[test]
    fn test_item_without_text_is_rejected() {
        let item = json!({ "label": "", "kind": 3 });
        assert_eq!(
            completion_item_to_completion(&item, 1, Encoding::Utf16, Default::default()),
            Err(CompletionItemError::NoInsertText)
        );

        let broken = json!({ "label": "x", "textEdit": { "newText": "x" } });
        assert_eq!(
            completion_item_to_completion(&broken, 1, Encoding::Utf16, Default::default()),
            Err(CompletionItemError::MalformedTextEdit)
        );
    }
}
