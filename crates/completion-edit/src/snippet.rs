//! The snippet-parser collaborator.

use crate::context::Context;
use crate::edit::{ParsedEdit, SnippetEdit, SnippetGrammar};
use completion_edit_lang::WordChars;
use thiserror::Error;

/// A tab stop produced by snippet expansion.
///
/// `begin`/`end` are byte offsets into the expanded text (the primary edit's `new_text`). The
/// engine passes marks through untouched; placing them in the buffer is up to the host, which can
/// resolve them against [`Applied::anchor`](crate::Applied::anchor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mark {
    /// Tab-stop index (0 = final cursor position).
    pub idx: usize,
    /// Start offset in the expanded text.
    pub begin: usize,
    /// End offset in the expanded text.
    pub end: usize,
    /// Placeholder text covered by the mark.
    pub text: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Snippet template parse failures.
pub enum ParseError {
    #[error("unterminated '${{' at byte {0}")]
    /// A `${` without its closing brace.
    Unterminated(usize),

    #[error("unexpected '{found}' at byte {at}")]
    /// A character that cannot appear at this point of the template.
    Unexpected {
        /// The offending character.
        found: char,
        /// Byte offset in the template.
        at: usize,
    },

    #[error("unsupported snippet grammar {0:?}")]
    /// The parser does not understand this grammar.
    UnsupportedGrammar(SnippetGrammar),
}

/// Expands snippet templates into a primary edit plus tab-stop marks.
pub trait SnippetParser {
    /// Parse `snippet` against the cursor context. `visual` is the text of the last visual
    /// selection, substituted for the selected-text variable.
    fn parse(
        &self,
        chars: &WordChars,
        ctx: &Context,
        snippet: &SnippetEdit,
        visual: &str,
    ) -> Result<(ParsedEdit, Vec<Mark>), ParseError>;
}

/// A parser that rejects every template, so snippets are inserted literally.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnippets;

impl SnippetParser for NoSnippets {
    fn parse(
        &self,
        _chars: &WordChars,
        _ctx: &Context,
        snippet: &SnippetEdit,
        _visual: &str,
    ) -> Result<(ParsedEdit, Vec<Mark>), ParseError> {
        Err(ParseError::UnsupportedGrammar(snippet.grammar))
    }
}
