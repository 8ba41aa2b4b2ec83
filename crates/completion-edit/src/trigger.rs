//! Whether a new cursor context should (re)start completion.

use crate::context::Context;
use crate::position::Position;

/// Decide whether completion should run for `cur`, given the previous context and the cursor
/// position right after the last accepted completion.
///
/// - manual requests always run;
/// - an unchanged buffer, or a cursor still sitting where the last completion left it, does not;
/// - non-whitespace symbols right before the cursor do;
/// - otherwise the line before the cursor must be non-blank and end in at most one whitespace
///   character.
pub fn should_continue(inserted: Option<Position>, prev: &Context, cur: &Context) -> bool {
    if cur.manual {
        return true;
    }
    if prev.change_id == cur.change_id {
        return false;
    }
    if inserted == Some(cur.position) {
        return false;
    }
    if !cur.syms_before().is_empty() {
        return true;
    }

    let before = cur.line_before();
    let stripped = before.trim_end();
    let trailing = before[stripped.len()..].chars().count();
    !stripped.is_empty() && trailing <= 1
}
