//! The edit shapes a completion can carry.
//!
//! A batch is exactly one primary [`ApplicableEdit`] plus zero or more secondary [`RangeEdit`]s.
//! Snippet edits must be parsed into a [`ParsedEdit`] before they can be normalized; the
//! [`PrimaryEdit`] type is what remains once that has happened.

use crate::context::ChangeId;
use crate::position::{Encoding, Position};

/// Replace the word token at the cursor with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Replacement text (may contain line feeds).
    pub new_text: String,
}

impl Edit {
    /// Create a new cursor-relative edit.
    pub fn new(new_text: impl Into<String>) -> Self {
        Self {
            new_text: new_text.into(),
        }
    }
}

/// Replace known text around the cursor.
///
/// `old_prefix` / `old_suffix` are the exact text immediately before / after the cursor that the
/// source wants replaced; either may span several lines. `new_prefix` is the part of `new_text`
/// that ends up before the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextualEdit {
    /// Full replacement text.
    pub new_text: String,
    /// Portion of `new_text` placed before the cursor.
    pub new_prefix: String,
    /// Text before the cursor being replaced.
    pub old_prefix: String,
    /// Text after the cursor being replaced.
    pub old_suffix: String,
}

/// Replace an explicit `[begin, end)` range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEdit {
    /// Replacement text.
    pub new_text: String,
    /// One end of the range.
    pub begin: Position,
    /// The other end of the range (the pair is ordered during normalization).
    pub end: Position,
    /// Unit of both columns.
    pub encoding: Encoding,
    /// Set only for edits produced by snippet parsing: the part of `new_text` before the cursor.
    pub new_prefix: Option<String>,
}

impl RangeEdit {
    /// Create a plain range edit.
    pub fn new(
        begin: Position,
        end: Position,
        encoding: Encoding,
        new_text: impl Into<String>,
    ) -> Self {
        Self {
            new_text: new_text.into(),
            begin,
            end,
            encoding,
            new_prefix: None,
        }
    }

    /// Returns `true` if this edit came out of snippet parsing.
    pub fn is_parsed_snippet(&self) -> bool {
        self.new_prefix.is_some()
    }
}

/// The grammar a snippet template is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetGrammar {
    /// LSP / VSCode snippet syntax (`${1:foo}`).
    Lsp,
    /// SnipMate / UltiSnips style templates.
    Snu,
}

/// The explicit range a snippet expansion replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetRange {
    /// One end of the range.
    pub begin: Position,
    /// The other end of the range.
    pub end: Position,
    /// Unit of both columns.
    pub encoding: Encoding,
}

/// A snippet template awaiting expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetEdit {
    /// Raw template text.
    pub new_text: String,
    /// Template grammar.
    pub grammar: SnippetGrammar,
    /// Range to replace; `None` replaces the word token at the cursor.
    pub range: Option<SnippetRange>,
}

/// Any primary edit, as delivered by a completion source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicableEdit {
    /// Cursor-relative word replacement.
    Edit(Edit),
    /// Replacement of known text around the cursor.
    Contextual(ContextualEdit),
    /// Explicit range replacement.
    Range(RangeEdit),
    /// Snippet template, parsed before normalization.
    Snippet(SnippetEdit),
}

/// Result of parsing a [`SnippetEdit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEdit {
    /// The snippet replaces text around the cursor.
    Contextual(ContextualEdit),
    /// The snippet replaces an explicit range; `new_prefix` is always set.
    Range(RangeEdit),
}

/// A primary edit ready for normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryEdit {
    /// Cursor-relative word replacement.
    Edit(Edit),
    /// Replacement of known text around the cursor.
    Contextual(ContextualEdit),
    /// Explicit range replacement.
    Range(RangeEdit),
}

impl From<ParsedEdit> for PrimaryEdit {
    fn from(parsed: ParsedEdit) -> Self {
        match parsed {
            ParsedEdit::Contextual(edit) => Self::Contextual(edit),
            ParsedEdit::Range(edit) => Self::Range(edit),
        }
    }
}

/// An accepted completion: one primary edit plus side-effect range edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Change id of the context the completion was computed for.
    pub change_id: ChangeId,
    /// The completion's own text change.
    pub primary_edit: ApplicableEdit,
    /// Side-effect edits (e.g. auto-imports), dropped if they conflict with the primary.
    pub secondary_edits: Vec<RangeEdit>,
}

impl Completion {
    /// Create a completion without secondary edits.
    pub fn new(change_id: ChangeId, primary_edit: ApplicableEdit) -> Self {
        Self {
            change_id,
            primary_edit,
            secondary_edits: Vec::new(),
        }
    }

    /// Attach secondary edits.
    pub fn with_secondary(mut self, edits: impl IntoIterator<Item = RangeEdit>) -> Self {
        self.secondary_edits.extend(edits);
        self
    }
}
