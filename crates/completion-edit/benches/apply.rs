use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use completion_edit::{
    ApplicableEdit, Completion, Context, Edit, EditEngine, EditInstruction, Encoding, Lines,
    NoSnippets, Position, PrimaryEdit, RangeEdit, RopeBuffer, TextBuffer, consolidate,
    instructions, shift,
};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 48);
    for i in 0..line_count {
        out.push_str(&format!("{i:06} let value = compute_something(arg, 日本語);\n"));
    }
    out.pop();
    out
}

/// One secondary edit per row of `rows`, each renaming the `value` binding.
fn secondary_edits(rows: std::ops::Range<usize>) -> Vec<RangeEdit> {
    rows.map(|row| {
        RangeEdit::new(
            Position::new(row, 11),
            Position::new(row, 16),
            Encoding::Utf16,
            "renamed",
        )
    })
    .collect()
}

fn bench_normalize_and_consolidate(c: &mut Criterion) {
    let line_count = 1_000;
    let text = large_text(line_count);
    let lines = Lines::new(0, text.split('\n').map(str::to_string).collect());
    let ctx = Context::new(
        0,
        0,
        Position::new(500, 20),
        lines.line(500).to_string(),
        line_count,
    );
    let chars = Default::default();
    let primary = PrimaryEdit::Edit(Edit::new("compute_everything"));
    let secondary = secondary_edits(0..line_count);

    c.bench_function("normalize_consolidate/1k_secondaries", |b| {
        b.iter(|| {
            let batch = instructions(&ctx, &chars, &lines, &primary, black_box(&secondary));
            black_box(consolidate(batch));
        })
    });
}

fn bench_shift(c: &mut Criterion) {
    let batch: Vec<EditInstruction> = (0..10_000)
        .map(|row| EditInstruction {
            primary: row == 5_000,
            begin: Position::new(row, 4),
            end: Position::new(row, 8),
            cursor_yoffset: 1,
            cursor_xpos: (row == 5_000).then_some(2),
            new_lines: vec!["ab".to_string(), "cd".to_string()],
        })
        .collect();

    c.bench_function("shift/10k_instructions", |b| {
        b.iter(|| black_box(shift(black_box(&batch))))
    });
}

fn bench_engine_edit(c: &mut Criterion) {
    let text = large_text(50_000);
    let mut engine = EditEngine::new(Default::default(), NoSnippets);

    c.bench_function("engine_edit/50k_lines_100_secondaries", |b| {
        b.iter_batched(
            || RopeBuffer::new(&text),
            |mut buffer| {
                let row = 25_000;
                let line = buffer.line(row).unwrap_or_default();
                let ctx = Context::new(
                    buffer.id(),
                    0,
                    Position::new(row, 20),
                    line,
                    buffer.line_count(),
                );
                let completion = Completion::new(
                    0,
                    ApplicableEdit::Edit(Edit::new("compute_everything")),
                )
                .with_secondary(secondary_edits(24_900..25_000));
                let applied = engine.edit(&mut buffer, &ctx, &completion).unwrap();
                black_box(applied.cursor);
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_normalize_and_consolidate,
    bench_shift,
    bench_engine_edit
);
criterion_main!(benches);
