#![warn(missing_docs)]
//! `completion-edit-lang` - data-driven word configuration for `completion-edit`.
//!
//! This crate intentionally stays lightweight and has no dependencies. It answers a single
//! question for the edit engine: which characters continue a "word" token at the cursor.

use std::collections::BTreeSet;

/// The set of "unifying characters" for a language.
///
/// A character belongs to a word token when it is alphanumeric or one of the unifying
/// characters (e.g. `_` in most languages, `-` in Lisp or CSS identifiers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordChars {
    unifying: BTreeSet<char>,
}

impl WordChars {
    /// Create a config from an explicit set of unifying characters.
    pub fn new(unifying: impl IntoIterator<Item = char>) -> Self {
        Self {
            unifying: unifying.into_iter().collect(),
        }
    }

    /// A config where only alphanumeric characters form words.
    pub fn alphanumeric() -> Self {
        Self {
            unifying: BTreeSet::new(),
        }
    }

    /// Returns `true` if `c` continues a word token.
    pub fn is_word_char(&self, c: char) -> bool {
        c.is_alphanumeric() || self.unifying.contains(&c)
    }

    /// The trailing run of word characters in `text`.
    pub fn trailing_word<'a>(&self, text: &'a str) -> &'a str {
        let start = text
            .char_indices()
            .rev()
            .take_while(|(_, c)| self.is_word_char(*c))
            .last()
            .map_or(text.len(), |(idx, _)| idx);
        &text[start..]
    }

    /// The leading run of word characters in `text`.
    pub fn leading_word<'a>(&self, text: &'a str) -> &'a str {
        let end = text
            .char_indices()
            .find(|(_, c)| !self.is_word_char(*c))
            .map_or(text.len(), |(idx, _)| idx);
        &text[..end]
    }
}

impl Default for WordChars {
    /// `-` and `_` continue words.
    fn default() -> Self {
        Self::new(['-', '_'])
    }
}

impl FromIterator<char> for WordChars {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_word_stops_at_separator() {
        let chars = WordChars::default();
        assert_eq!(chars.trailing_word("let foo_bar"), "foo_bar");
        assert_eq!(chars.trailing_word("a.b-c"), "b-c");
        assert_eq!(chars.trailing_word("x "), "");
        assert_eq!(chars.trailing_word(""), "");
    }

    #[test]
    fn test_leading_word_handles_multibyte() {
        let chars = WordChars::alphanumeric();
        assert_eq!(chars.leading_word("日本語 rest"), "日本語");
        assert_eq!(chars.leading_word("_x"), "");
        assert_eq!(WordChars::default().leading_word("_x)"), "_x");
    }
}
