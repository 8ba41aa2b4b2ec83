//! End-to-end application of an accepted completion.

use crate::apply::apply_instructions;
use crate::buffer::TextBuffer;
use crate::consolidate::consolidate;
use crate::context::Context;
use crate::cursor::resolve_cursor;
use crate::edit::{ApplicableEdit, Completion, Edit, PrimaryEdit, RangeEdit, SnippetEdit};
use crate::error::EditError;
use crate::instruction::EditInstruction;
use crate::lines::Lines;
use crate::normalize::{fetch_window, instructions};
use crate::pending::{MarkerGuard, PendingText};
use crate::position::Position;
use crate::settings::{EngineSettings, SettingsError};
use crate::snippet::{Mark, SnippetParser};
use completion_edit_lang::WordChars;
use std::ops::Range;

/// Callback receiving user-facing messages.
pub type MessageCallback = Box<dyn FnMut(&str) + Send>;

/// Outcome of a successfully applied batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Final cursor position, set on the buffer (a rejected move is logged).
    pub cursor: Position,
    /// Where the primary edit's text starts in the edited buffer.
    pub anchor: Position,
    /// Tab stops of an expanded snippet, relative to `anchor`'s text.
    pub marks: Vec<Mark>,
    /// The instructions as applied (shifted coordinates).
    pub instructions: Vec<EditInstruction>,
}

/// Applies accepted completions to a buffer.
///
/// The engine holds no per-batch state; the caller must ensure at most one batch runs against a
/// buffer at a time, which `&mut` access to the buffer already enforces.
pub struct EditEngine<P> {
    settings: EngineSettings,
    chars: WordChars,
    parser: P,
    visual: String,
    callbacks: Vec<MessageCallback>,
}

impl<P: SnippetParser> EditEngine<P> {
    /// Create an engine. Invalid `unifying_chars` entries fall back to the default word config.
    pub fn new(settings: EngineSettings, parser: P) -> Self {
        let chars = settings.word_chars().unwrap_or_else(|err| {
            tracing::warn!(%err, "invalid unifying characters, using defaults");
            WordChars::default()
        });
        Self {
            settings,
            chars,
            parser,
            visual: String::new(),
            callbacks: Vec::new(),
        }
    }

    /// Create an engine from a JSON settings document.
    pub fn from_json(json: &str, parser: P) -> Result<Self, SettingsError> {
        let settings = EngineSettings::from_json(json)?;
        Ok(Self::new(settings, parser))
    }

    /// Settings in use.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Word-character config in use.
    pub fn word_chars(&self) -> &WordChars {
        &self.chars
    }

    /// Record the text of the last visual selection, substituted into snippet templates.
    pub fn set_visual(&mut self, text: impl Into<String>) {
        self.visual = text.into();
    }

    /// Subscribe to user-facing messages.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    fn notify(&mut self, message: &str) {
        for callback in &mut self.callbacks {
            callback(message);
        }
    }

    /// Bracket the cursor of `ctx` so text typed before acceptance can be preserved.
    ///
    /// Call when the completion request is issued.
    pub fn bracket<B: TextBuffer + ?Sized>(&self, buffer: &mut B, ctx: &Context) {
        PendingText::bracket(buffer, self.settings.namespace(), ctx);
    }

    /// Apply an accepted completion.
    ///
    /// The batch aborts without mutating the buffer when the context belongs to another buffer,
    /// when the rows it touches are no longer in the buffer, or when reading them fails. Once
    /// mutation starts, individual failures are logged and skipped. The pending-text markers are
    /// cleared on every exit path.
    pub fn edit<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &mut B,
        ctx: &Context,
        completion: &Completion,
    ) -> Result<Applied, EditError> {
        if buffer.id() != ctx.buf_id {
            tracing::warn!(expected = ctx.buf_id, actual = buffer.id(), "stale buffer");
            return Err(EditError::StaleBuffer {
                expected: ctx.buf_id,
                actual: buffer.id(),
            });
        }

        let namespace = self.settings.namespace();
        let mut buffer = MarkerGuard::new(buffer, namespace);

        let (primary, marks) = self.resolve_primary(ctx, &completion.primary_edit);
        let window = fetch_window(ctx, &primary, &completion.secondary_edits)
            .inspect_err(|err| tracing::warn!(%err, ?completion, "out of bounds"))?;

        let pending = PendingText::take(&mut *buffer, namespace, ctx.position.row)?;

        let batch = self.apply_batch(
            &mut *buffer,
            ctx,
            &primary,
            &completion.secondary_edits,
            window,
        );
        let (cursor, applied) = match batch {
            Ok(done) => done,
            Err(err) => {
                if let Err(put_back) = pending.put_back(&mut *buffer) {
                    tracing::warn!(err = %put_back, "failed to restore pending text");
                }
                return Err(err);
            }
        };

        if !pending.is_empty()
            && let Err(err) = buffer.set_text(cursor, cursor, &[pending.text.clone()])
        {
            tracing::warn!(%err, "failed to re-insert pending text");
        }
        let cursor = Position::new(cursor.row, cursor.col + pending.movement);
        if let Err(err) = buffer.set_cursor(cursor) {
            tracing::warn!(%err, %cursor, "failed to set cursor");
        }

        let anchor = applied
            .iter()
            .find(|inst| inst.primary)
            .map_or(cursor, |inst| inst.begin);
        tracing::debug!(edits = ?completion, instructions = ?applied, "applied completion");

        Ok(Applied {
            cursor,
            anchor,
            marks,
            instructions: applied,
        })
    }

    fn apply_batch<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        ctx: &Context,
        primary: &PrimaryEdit,
        secondary: &[RangeEdit],
        window: Range<usize>,
    ) -> Result<(Position, Vec<EditInstruction>), EditError> {
        let lines = Lines::new(window.start, buffer.get_lines(window)?);
        let consolidated = consolidate(instructions(ctx, &self.chars, &lines, primary, secondary));
        let cursor = resolve_cursor(ctx.position, &consolidated)
            .inspect_err(|err| tracing::error!(%err, ?consolidated, "cursor resolution failed"))?;
        let applied = apply_instructions(buffer, &consolidated);
        Ok((cursor, applied))
    }

    fn resolve_primary(&mut self, ctx: &Context, edit: &ApplicableEdit) -> (PrimaryEdit, Vec<Mark>) {
        match edit {
            ApplicableEdit::Edit(edit) => (PrimaryEdit::Edit(edit.clone()), Vec::new()),
            ApplicableEdit::Contextual(edit) => (PrimaryEdit::Contextual(edit.clone()), Vec::new()),
            ApplicableEdit::Range(edit) => (PrimaryEdit::Range(edit.clone()), Vec::new()),
            ApplicableEdit::Snippet(snippet) => {
                match self.parser.parse(&self.chars, ctx, snippet, &self.visual) {
                    Ok((parsed, marks)) => (parsed.into(), marks),
                    Err(err) => {
                        tracing::info!(%err, "snippet parse failed, inserting it literally");
                        let message = self.settings.parse_failure_message.clone();
                        self.notify(&message);
                        (literal(snippet), Vec::new())
                    }
                }
            }
        }
    }
}

fn literal(snippet: &SnippetEdit) -> PrimaryEdit {
    match snippet.range {
        Some(range) => PrimaryEdit::Range(RangeEdit::new(
            range.begin,
            range.end,
            range.encoding,
            snippet.new_text.as_str(),
        )),
        None => PrimaryEdit::Edit(Edit::new(snippet.new_text.as_str())),
    }
}
