#![warn(missing_docs)]
//! Completion Edit - edit-application engine for editor completions
//!
//! # Overview
//!
//! When a completion is accepted, the editor receives one *primary* edit (the completion text
//! itself) and zero or more *secondary* edits (side effects such as auto-imports). Each edit is
//! addressed in its own way: relative to the word at the cursor, relative to known text around
//! the cursor, or as an explicit range measured in UTF-8 bytes or UTF-16 code units.
//!
//! `completion-edit` turns such a batch into an ordered, conflict-free list of buffer mutations
//! and computes the final cursor position exactly.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditEngine (stale check, pending text)     │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Normalizer (edits → EditInstruction)       │  ← Lines view, UTF-16 → UTF-8
//! ├─────────────────────────────────────────────┤
//! │  Consolidation (primary wins conflicts)     │
//! ├─────────────────────────────────────────────┤
//! │  Cursor resolver                            │
//! ├─────────────────────────────────────────────┤
//! │  Shift + apply (sequential mutation)        │  ← TextBuffer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use completion_edit::{
//!     ApplicableEdit, Completion, Context, Edit, EditEngine, NoSnippets, Position, RopeBuffer,
//!     TextBuffer,
//! };
//!
//! let mut buffer = RopeBuffer::new("let x = hel");
//! let ctx = Context::new(buffer.id(), 1, Position::new(0, 11), "let x = hel", 1);
//!
//! let mut engine = EditEngine::new(Default::default(), NoSnippets);
//! let completion = Completion::new(1, ApplicableEdit::Edit(Edit::new("hello")));
//!
//! let applied = engine.edit(&mut buffer, &ctx, &completion).unwrap();
//! assert_eq!(buffer.text(), "let x = hello");
//! assert_eq!(applied.cursor, Position::new(0, 13));
//! ```
//!
//! # Module Description
//!
//! - [`position`] - byte positions and range encodings
//! - [`lines`] - line snapshot with UTF-8 / UTF-16 views
//! - [`edit`] - the edit shapes a completion can carry
//! - [`normalize`] - edits → [`EditInstruction`]s
//! - [`consolidate`] - conflict removal, primary-wins
//! - [`shift`] - coordinate re-targeting for sequential application
//! - [`cursor`] - final cursor resolution
//! - [`apply`] - mutation driver
//! - [`pending`] - preservation of text typed while the completion was pending
//! - [`engine`] - the end-to-end batch entry point
//!
//! # Unicode Support
//!
//! - Buffer columns are UTF-8 byte offsets
//! - Language-server ranges in UTF-16 code units are converted per line, dropping a split
//!   surrogate pair rather than failing

pub mod apply;
pub mod buffer;
pub mod consolidate;
pub mod context;
pub mod cursor;
pub mod edit;
pub mod engine;
pub mod error;
pub mod instruction;
pub mod lines;
pub mod normalize;
pub mod pending;
pub mod position;
pub mod rope_buffer;
pub mod settings;
pub mod shift;
pub mod snippet;
pub mod trigger;
mod text;

pub use apply::apply_instructions;
pub use buffer::{BufferError, BufferId, MarkerNamespace, MarkerRange, TextBuffer};
pub use consolidate::consolidate;
pub use context::{ChangeId, Context};
pub use cursor::resolve_cursor;
pub use edit::{
    ApplicableEdit, Completion, ContextualEdit, Edit, ParsedEdit, PrimaryEdit, RangeEdit,
    SnippetEdit, SnippetGrammar, SnippetRange,
};
pub use engine::{Applied, EditEngine, MessageCallback};
pub use error::EditError;
pub use instruction::EditInstruction;
pub use lines::Lines;
pub use normalize::{derive_contextual, fetch_window, instructions};
pub use pending::{MarkerGuard, PendingText};
pub use position::{Encoding, Position};
pub use rope_buffer::RopeBuffer;
pub use settings::{EngineSettings, SettingsError};
pub use shift::{ShiftState, shift};
pub use snippet::{Mark, NoSnippets, ParseError, SnippetParser};
pub use trigger::should_continue;

pub use completion_edit_lang::WordChars;
