use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mastery_core::{OptionId, PathwayId};
use mastery_path::{evaluate_pathway, PathwayStep, ReasoningPathway};

fn candidates(count: u64, length: usize) -> Vec<ReasoningPathway> {
    (0..count)
        .map(|id| {
            let steps = (0..length)
                .map(|position| {
                    let option = (position as u64 + id) % length as u64;
                    PathwayStep::correct(position, OptionId::from_raw(option))
                })
                .collect();
            ReasoningPathway::new(PathwayId::from_raw(id), steps).unwrap()
        })
        .collect()
}

fn classify_bench(c: &mut Criterion) {
    let pathways = candidates(16, 24);
    let submitted: Vec<OptionId> = (0..24u64).rev().map(OptionId::from_raw).collect();
    c.bench_function("evaluate_pathway_16x24", |b| {
        b.iter(|| black_box(evaluate_pathway(&pathways, &submitted)));
    });
}

criterion_group!(benches, classify_bench);
criterion_main!(benches);
