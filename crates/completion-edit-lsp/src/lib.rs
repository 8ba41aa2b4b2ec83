#![warn(missing_docs)]
//! `completion-edit-lsp` - LSP adapters for `completion-edit`.
//!
//! This crate turns language-server payloads into `completion_edit` batches: completion items and
//! their `additionalTextEdits`, position-encoding negotiation, and an LSP snippet parser that
//! plugs into [`completion_edit::EditEngine`]. VSCode-style JSON snippet files can be loaded as
//! well. Transport is out of scope; payloads are plain `serde_json::Value`s.

pub mod lsp_completion;
pub mod lsp_position;
pub mod lsp_text_edits;
pub mod snippet;
pub mod snippet_loader;

pub use lsp_completion::{
    CompletionItemError, CompletionTextEditMode, completion_item_to_completion,
};
pub use lsp_position::{LspPosition, LspRange, negotiated_encoding};
pub use lsp_text_edits::{LspTextEdit, text_edits_from_value};
pub use snippet::{Expansion, LspSnippetParser, expand};
pub use snippet_loader::{LoadedSnippet, SnippetLoadError, load_snippet_file, parse_snippets};
