use chunkev::{
    encode_mark, reference_spans, score_sentence, ClassEval, EntitySpan, MatchMode,
    WordTokenizer,
};
use criterion::{criterion_group, criterion_main, Criterion};

const NAMES: [&str; 4] = ["Jan Peters", "Piet", "Marie van Dam", "Ahmed"];
const PLACES: [&str; 4] = ["Utrecht", "Den Haag", "Amsterdam", "Groningen"];

fn build_marks(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "nou ja hij heet [{}]PER en woont al jaren in [{}]LOC zei ze toen",
                NAMES[i % NAMES.len()],
                PLACES[i % PLACES.len()],
            )
        })
        .collect()
}

fn benchmark_encode(c: &mut Criterion) {
    let marks = build_marks(1000);
    c.bench_function("encode_marks", |b| {
        b.iter(|| {
            marks
                .iter()
                .map(|m| encode_mark(m, &WordTokenizer).tokens.len())
                .sum::<usize>()
        })
    });
}

fn benchmark_score(c: &mut Criterion) {
    let marks = build_marks(1000);
    let references: Vec<Vec<EntitySpan>> = marks
        .iter()
        .map(|m| reference_spans(&encode_mark(m, &WordTokenizer).tokens))
        .collect();
    // Half of the predictions hit, half are truncated surface forms that
    // only match in loose mode.
    let predictions: Vec<Vec<EntitySpan>> = references
        .iter()
        .enumerate()
        .map(|(i, spans)| {
            spans
                .iter()
                .map(|span| {
                    if i % 2 == 0 {
                        span.clone()
                    } else {
                        let tail = span.text.split_whitespace().last().unwrap_or(&span.text);
                        EntitySpan::new(tail.to_lowercase(), span.class.clone())
                    }
                })
                .collect()
        })
        .collect();
    for mode in [MatchMode::Exact, MatchMode::Loose] {
        c.bench_function(&format!("score_sentences_{mode}"), |b| {
            b.iter(|| {
                let mut classes = ClassEval::new();
                references
                    .iter()
                    .zip(&predictions)
                    .map(|(reference, predicted)| {
                        score_sentence(reference, predicted, mode, &mut classes)
                    })
                    .count()
            })
        });
    }
}

criterion_group!(
    name = pipeline_benches;
    config = Criterion::default().sample_size(100);
    targets = benchmark_encode, benchmark_score,
);
criterion_main!(pipeline_benches);
