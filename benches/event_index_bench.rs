// Benchmark for event index construction
// Measures building the date index from backend-sized record sets

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use project_calendar::models::record::{CommentRecord, ProjectRecord, RecordId, RecordSet, TaskRecord};
use project_calendar::models::settings::SpanPolicy;
use project_calendar::services::event_index::EventIndexBuilder;

fn sample_records(projects: usize) -> RecordSet {
    let projects = (0..projects)
        .map(|p| {
            let month = (p % 12) as u32 + 1;
            let mut project = ProjectRecord::new(RecordId::new(p.to_string()), format!("Projeto {}", p));
            project.start = Some(format!("2024-{:02}-01 08:00:00", month));
            project.end = Some(format!("2024-{:02}-28", month));
            project.tasks = (0..20)
                .map(|t| TaskRecord {
                    id: RecordId::new(format!("{}-{}", p, t)),
                    project_id: Some(RecordId::new(p.to_string())),
                    name: format!("Tarefa {}", t),
                    description: None,
                    status: None,
                    started_at: Some(format!("2024-{:02}-{:02} {:02}:15:00", month, t % 28 + 1, t % 24)),
                })
                .collect();
            project.comments = (0..10)
                .map(|c| CommentRecord {
                    id: RecordId::new(format!("{}-c{}", p, c)),
                    project_id: Some(RecordId::new(p.to_string())),
                    author: "Ana".to_string(),
                    created_at: Some(format!("2024-{:02}-{:02}T10:{:02}:00", month, c + 1, c)),
                    text: "Comentário de acompanhamento".to_string(),
                })
                .collect();
            project
        })
        .collect();

    RecordSet {
        projects,
        ..RecordSet::default()
    }
}

fn bench_point_policy(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_index_point");

    for count in [10, 100, 500].iter() {
        let records = sample_records(*count);
        let builder = EventIndexBuilder::new(SpanPolicy::Point);
        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            b.iter(|| builder.build(black_box(records)));
        });
    }

    group.finish();
}

fn bench_policy_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("span_policy_comparison");
    let records = sample_records(100);

    for policy in [SpanPolicy::Point, SpanPolicy::Range] {
        let builder = EventIndexBuilder::new(policy);
        group.bench_function(policy.to_string(), |b| {
            b.iter(|| builder.build(black_box(&records)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_point_policy, bench_policy_comparison);
criterion_main!(benches);
