//! Edit normalizer: every edit shape becomes one [`EditInstruction`].
//!
//! Instructions are expressed in the coordinate space of the [`Lines`] snapshot (UTF-8 byte
//! columns). The primary instruction also records where the cursor lands, as a row delta relative
//! to the context's cursor row plus an absolute byte column.

use crate::context::Context;
use crate::edit::{ContextualEdit, Edit, PrimaryEdit, RangeEdit};
use crate::error::EditError;
use crate::instruction::EditInstruction;
use crate::lines::Lines;
use crate::position::Position;
use crate::text::split_lines;
use completion_edit_lang::WordChars;
use std::ops::Range;

/// Rewrite a cursor-relative [`Edit`] as a [`ContextualEdit`].
///
/// The replaced text is the word token around the cursor: the run of word characters ending at
/// the cursor and the run starting at it.
pub fn derive_contextual(chars: &WordChars, ctx: &Context, new_text: &str) -> ContextualEdit {
    ContextualEdit {
        new_text: new_text.to_string(),
        new_prefix: new_text.to_string(),
        old_prefix: ctx.words_before(chars).to_string(),
        old_suffix: ctx.words_after(chars).to_string(),
    }
}

/// The rows an edit batch touches, as a half-open window.
///
/// Fails with [`EditError::OutOfBounds`] when the window starts before the first row or ends
/// past `line_count + 1` (one row of slack covers ranges ending at end-of-buffer).
pub fn fetch_window(
    ctx: &Context,
    primary: &PrimaryEdit,
    secondary: &[RangeEdit],
) -> Result<Range<usize>, EditError> {
    let row = ctx.position.row as isize;
    let linefeed = ctx.linefeed.as_str();

    let span = |lines: usize| lines.saturating_sub(1) as isize;
    let (mut lo, mut hi) = match primary {
        PrimaryEdit::Edit(_) => (row, row),
        PrimaryEdit::Contextual(edit) => (
            row - span(split_lines(&edit.old_prefix, linefeed).len()),
            row + span(split_lines(&edit.old_suffix, linefeed).len()),
        ),
        PrimaryEdit::Range(edit) => range_rows(edit),
    };
    for edit in secondary {
        let (a, b) = range_rows(edit);
        lo = lo.min(a);
        hi = hi.max(b);
    }
    let hi = hi + 1;

    if lo < 0 || hi > ctx.line_count as isize + 1 {
        return Err(EditError::OutOfBounds {
            lo,
            hi,
            line_count: ctx.line_count,
        });
    }
    Ok(lo as usize..hi as usize)
}

fn range_rows(edit: &RangeEdit) -> (isize, isize) {
    let (a, b) = (edit.begin.row as isize, edit.end.row as isize);
    (a.min(b), a.max(b))
}

fn contextual_instruction(ctx: &Context, lines: &Lines, edit: &ContextualEdit) -> EditInstruction {
    let Position { row, col } = ctx.position;
    let linefeed = ctx.linefeed.as_str();

    let old_prefix_lines = split_lines(&edit.old_prefix, linefeed);
    let old_suffix_lines = split_lines(&edit.old_suffix, linefeed);
    let new_prefix_lines = split_lines(&edit.new_prefix, linefeed);

    let r1 = row.saturating_sub(old_prefix_lines.len() - 1);
    let r2 = row + (old_suffix_lines.len() - 1);

    let c1 = if old_prefix_lines.len() > 1 {
        lines.len8(r1).saturating_sub(old_prefix_lines[0].len())
    } else {
        col.saturating_sub(old_prefix_lines[0].len())
    };
    let c2 = if old_suffix_lines.len() > 1 {
        old_suffix_lines[old_suffix_lines.len() - 1].len()
    } else {
        col + old_suffix_lines[0].len()
    };

    let cursor_yoffset = new_prefix_lines.len() as isize - old_prefix_lines.len() as isize;
    let cursor_xpos = if new_prefix_lines.len() > 1 {
        new_prefix_lines[new_prefix_lines.len() - 1].len()
    } else {
        c1 + new_prefix_lines[0].len()
    };

    EditInstruction {
        primary: true,
        begin: Position::new(r1, c1),
        end: Position::new(r2, c2),
        cursor_yoffset,
        cursor_xpos: Some(cursor_xpos),
        new_lines: owned_lines(&edit.new_text, linefeed),
    }
}

fn edit_instruction(
    chars: &WordChars,
    ctx: &Context,
    lines: &Lines,
    edit: &Edit,
) -> EditInstruction {
    let adjusted = derive_contextual(chars, ctx, &edit.new_text);
    contextual_instruction(ctx, lines, &adjusted)
}

fn range_instruction(
    chars: &WordChars,
    ctx: &Context,
    primary: bool,
    lines: &Lines,
    edit: &RangeEdit,
) -> EditInstruction {
    let linefeed = ctx.linefeed.as_str();
    let new_lines = owned_lines(&edit.new_text, linefeed);

    // A plain single-line insertion at the cursor lands the cursor better when handled like a
    // word replacement.
    if primary
        && !edit.is_parsed_snippet()
        && new_lines.len() <= 1
        && edit.begin == edit.end
        && Position::new(
            edit.begin.row,
            lines.utf8_col(edit.begin.row, edit.begin.col, edit.encoding),
        ) == ctx.position
    {
        return edit_instruction(chars, ctx, lines, &Edit::new(edit.new_text.as_str()));
    }

    let (b, e) = if edit.begin <= edit.end {
        (edit.begin, edit.end)
    } else {
        (edit.end, edit.begin)
    };
    let begin = Position::new(b.row, lines.utf8_col(b.row, b.col, edit.encoding));
    let end = Position::new(e.row, lines.utf8_col(e.row, e.col, edit.encoding));

    let (cursor_yoffset, cursor_xpos) = if primary {
        let lines_before = match &edit.new_prefix {
            Some(prefix) => split_lines(prefix, linefeed),
            None => split_lines(&edit.new_text, linefeed),
        };
        let yoffset = (begin.row as isize - ctx.position.row as isize)
            + (lines_before.len() as isize - 1);
        let xpos = if lines_before.len() > 1 {
            lines_before[lines_before.len() - 1].len()
        } else {
            begin.col + lines_before[0].len()
        };
        (yoffset, Some(xpos))
    } else {
        let yoffset = (new_lines.len() as isize - 1) - (end.row - begin.row) as isize;
        (yoffset, None)
    };

    EditInstruction {
        primary,
        begin,
        end,
        cursor_yoffset,
        cursor_xpos,
        new_lines,
    }
}

fn owned_lines(text: &str, linefeed: &str) -> Vec<String> {
    split_lines(text, linefeed)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Normalize a batch: the primary instruction first, then one instruction per secondary edit.
pub fn instructions(
    ctx: &Context,
    chars: &WordChars,
    lines: &Lines,
    primary: &PrimaryEdit,
    secondary: &[RangeEdit],
) -> Vec<EditInstruction> {
    let mut out = Vec::with_capacity(1 + secondary.len());
    out.push(match primary {
        PrimaryEdit::Edit(edit) => edit_instruction(chars, ctx, lines, edit),
        PrimaryEdit::Contextual(edit) => contextual_instruction(ctx, lines, edit),
        PrimaryEdit::Range(edit) => range_instruction(chars, ctx, true, lines, edit),
    });
    out.extend(
        secondary
            .iter()
            .map(|edit| range_instruction(chars, ctx, false, lines, edit)),
    );
    out
}
