//! Preservation of text typed while a completion was pending.
//!
//! When a completion request is issued, the cursor row is bracketed with two markers: one
//! covering the text before the cursor, one covering the text after it. Anything the user types
//! at the cursor before the completion is accepted ends up between the two markers. The engine
//! takes that text out, applies the batch as if it was never typed, then puts it back at the new
//! cursor.

use crate::buffer::{BufferError, MarkerNamespace, MarkerRange, TextBuffer};
use crate::context::Context;
use crate::position::Position;
use crate::text::decode_utf8_dropping_invalid;
use std::ops::{Deref, DerefMut};

const BEFORE_CURSOR: usize = 1;
const AFTER_CURSOR: usize = 2;

/// Text found between the cursor markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingText {
    /// The typed text (invalid UTF-8 dropped).
    pub text: String,
    /// Byte offset to add to the resolved cursor column once `text` is re-inserted.
    pub movement: usize,
    /// Where `text` was taken from.
    pub origin: Position,
}

impl PendingText {
    fn none(origin: Position) -> Self {
        Self {
            text: String::new(),
            movement: 0,
            origin,
        }
    }

    /// Returns `true` if nothing was typed.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Bracket the cursor of `ctx` with the before/after markers, replacing any previous ones.
    pub fn bracket<B: TextBuffer + ?Sized>(
        buffer: &mut B,
        namespace: MarkerNamespace,
        ctx: &Context,
    ) {
        let Position { row, col } = ctx.position;
        buffer.clear_markers(namespace);
        buffer.set_markers(
            namespace,
            &[
                MarkerRange {
                    id: BEFORE_CURSOR,
                    begin: Position::new(row, 0),
                    end: Position::new(row, col),
                },
                MarkerRange {
                    id: AFTER_CURSOR,
                    begin: Position::new(row, col),
                    end: Position::new(row, ctx.line.len()),
                },
            ],
        );
    }

    /// Read the text between the markers on `row` and remove it from the buffer.
    ///
    /// If the live cursor sits inside the typed span, `movement` keeps it at the same offset
    /// within the span; otherwise the cursor ends up after the re-inserted text. Missing markers,
    /// or markers pushed onto other rows, mean nothing is pending.
    pub fn take<B: TextBuffer + ?Sized>(
        buffer: &mut B,
        namespace: MarkerNamespace,
        row: usize,
    ) -> Result<Self, BufferError> {
        let markers = buffer.markers(namespace);
        let find = |id: usize| markers.iter().find(|m| m.id == id);
        let (Some(before), Some(after)) = (find(BEFORE_CURSOR), find(AFTER_CURSOR)) else {
            return Ok(Self::none(Position::new(row, 0)));
        };
        let (lo, hi) = (before.end, after.begin);
        if lo.row != row || hi.row != row || hi.col < lo.col {
            return Ok(Self::none(lo));
        }

        let line = buffer
            .get_lines(row..row + 1)?
            .into_iter()
            .next()
            .unwrap_or_default();
        let bytes = line.as_bytes();
        let hi_col = hi.col.min(bytes.len());
        let lo_col = lo.col.min(hi_col);
        let text = decode_utf8_dropping_invalid(&bytes[lo_col..hi_col]);

        let cursor = buffer.cursor();
        let cursor_inside = cursor.row == row && (lo_col..=hi_col).contains(&cursor.col);
        let movement = if !text.is_empty() && cursor_inside {
            cursor.col - lo_col
        } else {
            text.len()
        };

        let origin = Position::new(row, lo_col);
        if !text.is_empty() {
            buffer.set_text(origin, Position::new(row, hi_col), &[String::new()])?;
        }

        Ok(Self {
            text,
            movement,
            origin,
        })
    }

    /// Re-insert the text where it was taken from (used when a batch aborts after `take`).
    pub fn put_back<B: TextBuffer + ?Sized>(&self, buffer: &mut B) -> Result<(), BufferError> {
        if self.is_empty() {
            return Ok(());
        }
        buffer.set_text(self.origin, self.origin, &[self.text.clone()])
    }
}

/// Scoped ownership of a marker namespace.
///
/// Dereferences to the buffer; dropping the guard clears the namespace, whichever way the batch
/// exits.
pub struct MarkerGuard<'a, B: TextBuffer + ?Sized> {
    buffer: &'a mut B,
    namespace: MarkerNamespace,
}

impl<'a, B: TextBuffer + ?Sized> MarkerGuard<'a, B> {
    /// Take ownership of `namespace` on `buffer` until the guard is dropped.
    pub fn new(buffer: &'a mut B, namespace: MarkerNamespace) -> Self {
        Self { buffer, namespace }
    }
}

impl<B: TextBuffer + ?Sized> Deref for MarkerGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.buffer
    }
}

impl<B: TextBuffer + ?Sized> DerefMut for MarkerGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.buffer
    }
}

impl<B: TextBuffer + ?Sized> Drop for MarkerGuard<'_, B> {
    fn drop(&mut self) {
        self.buffer.clear_markers(self.namespace);
    }
}
