use completion_edit::{Context, EditEngine, Position, RopeBuffer, TextBuffer};
use completion_edit_lsp::{
    CompletionTextEditMode, LspSnippetParser, completion_item_to_completion, negotiated_encoding,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn context_at(buffer: &RopeBuffer, change_id: u64, row: usize, col: usize) -> Context {
    let line = buffer.line(row).unwrap_or_default();
    Context::new(
        buffer.id(),
        change_id,
        Position::new(row, col),
        line,
        buffer.line_count(),
    )
}

#[test]
fn test_snippet_item_with_additional_edits() {
    let mut buffer = RopeBuffer::new("fn main() {\n    fo\n}\n");
    let ctx = context_at(&buffer, 7, 1, 6);

    let item = json!({
        "label": "println!",
        "insertTextFormat": 2,
        "textEdit": {
            "range": { "start": { "line": 1, "character": 4 }, "end": { "line": 1, "character": 6 } },
            "newText": "println!(${1:msg})$0"
        },
        "additionalTextEdits": [
            {
                "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 0, "character": 0 } },
                "newText": "use std::io;\n"
            }
        ]
    });
    let encoding = negotiated_encoding(&json!({ "capabilities": {} })).unwrap();
    let completion =
        completion_item_to_completion(&item, 7, encoding, CompletionTextEditMode::Insert).unwrap();

    let mut engine = EditEngine::new(Default::default(), LspSnippetParser);
    let applied = engine.edit(&mut buffer, &ctx, &completion).unwrap();

    assert_eq!(buffer.text(), "use std::io;\nfn main() {\n    println!(msg)\n}\n");
    // The cursor sits at the start of the first placeholder.
    assert_eq!(applied.cursor, Position::new(2, 13));
    assert_eq!(applied.anchor, Position::new(2, 4));

    let marks: Vec<_> = applied.marks.iter().map(|m| (m.idx, m.text.as_str())).collect();
    assert_eq!(marks, vec![(1, "msg"), (0, "")]);
}

#[test]
fn test_insert_text_falls_back_to_word_at_cursor() {
    let mut buffer = RopeBuffer::new("hello wor\n");
    let ctx = context_at(&buffer, 1, 0, 9);

    let item = json!({ "label": "world", "insertText": "world" });
    let completion =
        completion_item_to_completion(&item, 1, encoding_utf16(), Default::default()).unwrap();

    let mut engine = EditEngine::new(Default::default(), LspSnippetParser);
    let applied = engine.edit(&mut buffer, &ctx, &completion).unwrap();

    assert_eq!(buffer.text(), "hello world\n");
    assert_eq!(applied.cursor, Position::new(0, 11));
}

#[test]
fn test_replace_mode_with_utf16_columns() {
    // "é" is one UTF-16 unit but two UTF-8 bytes.
    let mut buffer = RopeBuffer::new("café.le|ngth");
    let ctx = context_at(&buffer, 1, 0, 8);

    let item = json!({
        "label": "len",
        "textEdit": {
            "insert": { "start": { "line": 0, "character": 5 }, "end": { "line": 0, "character": 7 } },
            "replace": { "start": { "line": 0, "character": 5 }, "end": { "line": 0, "character": 8 } },
            "newText": "len"
        }
    });
    let completion = completion_item_to_completion(
        &item,
        1,
        encoding_utf16(),
        CompletionTextEditMode::Replace,
    )
    .unwrap();

    let mut engine = EditEngine::new(Default::default(), LspSnippetParser);
    let applied = engine.edit(&mut buffer, &ctx, &completion).unwrap();

    assert_eq!(buffer.text(), "café.lenngth");
    assert_eq!(applied.cursor, Position::new(0, 9));
}

#[test]
fn test_snippet_substitutes_visual_selection() {
    let mut buffer = RopeBuffer::new("    db");
    let ctx = context_at(&buffer, 1, 0, 6);

    let item = json!({ "label": "dbg", "insertText": "dbg!(${TM_SELECTED_TEXT:expr})", "insertTextFormat": 2 });
    let completion =
        completion_item_to_completion(&item, 1, encoding_utf16(), Default::default()).unwrap();

    let mut engine = EditEngine::new(Default::default(), LspSnippetParser);
    engine.set_visual("total");
    let applied = engine.edit(&mut buffer, &ctx, &completion).unwrap();

    assert_eq!(buffer.text(), "    dbg!(total)");
    assert_eq!(applied.cursor, Position::new(0, 15));
    assert!(applied.marks.is_empty());
}

fn encoding_utf16() -> completion_edit::Encoding {
    completion_edit::Encoding::Utf16
}
