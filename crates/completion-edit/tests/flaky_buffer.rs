use completion_edit::{
    BufferError, BufferId, EditInstruction, MarkerNamespace, MarkerRange, Position, RopeBuffer,
    TextBuffer, apply_instructions,
};
use std::ops::Range;

/// Rejects the first `set_text` call, then behaves like the wrapped buffer.
struct FlakyBuffer {
    inner: RopeBuffer,
    failures_left: usize,
}

impl TextBuffer for FlakyBuffer {
    fn id(&self) -> BufferId {
        self.inner.id()
    }

    fn line_count(&self) -> usize {
        self.inner.line_count()
    }

    fn get_lines(&self, rows: Range<usize>) -> Result<Vec<String>, BufferError> {
        self.inner.get_lines(rows)
    }

    fn set_text(
        &mut self,
        begin: Position,
        end: Position,
        lines: &[String],
    ) -> Result<(), BufferError> {
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(BufferError::InvertedRange { begin, end });
        }
        self.inner.set_text(begin, end, lines)
    }

    fn cursor(&self) -> Position {
        self.inner.cursor()
    }

    fn set_cursor(&mut self, position: Position) -> Result<(), BufferError> {
        self.inner.set_cursor(position)
    }

    fn set_markers(&mut self, namespace: MarkerNamespace, markers: &[MarkerRange]) {
        self.inner.set_markers(namespace, markers)
    }

    fn markers(&self, namespace: MarkerNamespace) -> Vec<MarkerRange> {
        self.inner.markers(namespace)
    }

    fn clear_markers(&mut self, namespace: MarkerNamespace) {
        self.inner.clear_markers(namespace)
    }
}

fn replace(begin: (usize, usize), end: (usize, usize), text: &str) -> EditInstruction {
    EditInstruction {
        primary: false,
        begin: begin.into(),
        end: end.into(),
        cursor_yoffset: 0,
        cursor_xpos: None,
        new_lines: text.split('\n').map(str::to_string).collect(),
    }
}

#[test]
fn test_rejected_instruction_does_not_stop_the_batch() {
    let mut buffer = FlakyBuffer {
        inner: RopeBuffer::new("one two\nthree"),
        failures_left: 1,
    };
    let batch = [replace((0, 0), (0, 3), "1"), replace((1, 0), (1, 5), "3")];

    let shifted = apply_instructions(&mut buffer, &batch);

    assert_eq!(shifted.len(), 2);
    assert_eq!(buffer.inner.text(), "one two\n3");
}

#[test]
fn test_later_instructions_use_shifted_coordinates() {
    let mut buffer = RopeBuffer::new("ab\ncd");
    let batch = [replace((0, 0), (0, 1), "x\ny\n"), replace((1, 1), (1, 2), "D")];

    let shifted = apply_instructions(&mut buffer, &batch);

    assert_eq!(shifted[1].begin, Position::new(3, 1));
    assert_eq!(buffer.text(), "x\ny\nb\ncD");
}
