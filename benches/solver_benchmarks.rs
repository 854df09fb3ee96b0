use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rota::{solve, ExceptionPolicy, ExceptionScope, Person, Roster};

/// Five people over 25 days with tight quotas: the total rest capacity
/// exactly matches the total rest demand, so every day is saturated.
fn tight_crew_roster() -> Roster {
    let mandatory: [&[u32]; 5] = [
        &[1, 6, 14],
        &[4, 16, 20],
        &[2, 10, 18],
        &[5, 15, 21],
        &[3, 12, 19],
    ];
    Roster::new(
        mandatory
            .iter()
            .enumerate()
            .map(|(i, days)| Person::new(format!("p{i}"), 10, days.iter().copied()))
            .collect(),
        25,
        vec![
            2, 3, 1, 3, 1, 3, 1, 1, 1, 2, 1, 1, 3, 2, 2, 3, 3, 3, 2, 3, 1, 2, 2, 3, 1,
        ],
        4,
        None,
        Duration::from_secs(30),
    )
    .unwrap()
}

/// Seven people over 30 days, again with exactly saturated quotas, plus a
/// one-per-person exception budget for a fifth consecutive working day.
fn exception_crew_roster() -> Roster {
    let mandatory: [&[u32]; 7] = [
        &[10],
        &[24, 27, 28],
        &[2, 9, 15],
        &[16, 17, 19],
        &[11, 19, 25],
        &[19, 20, 21, 22, 23],
        &[15, 16, 17],
    ];
    Roster::new(
        mandatory
            .iter()
            .enumerate()
            .map(|(i, days)| Person::new(format!("p{i}"), 10, days.iter().copied()))
            .collect(),
        30,
        vec![
            3, 2, 2, 2, 2, 2, 3, 3, 2, 2, 2, 2, 2, 3, 3, 2, 2, 1, 3, 2, 3, 3, 2, 2, 2, 2, 2, 3,
            4, 2,
        ],
        4,
        Some(ExceptionPolicy {
            scope: ExceptionScope::PerPerson,
            budget: 1,
        }),
        Duration::from_secs(30),
    )
    .unwrap()
}

fn bench_tight_crew(c: &mut Criterion) {
    let roster = tight_crew_roster();
    let mut group = c.benchmark_group("roster");
    group.sample_size(10);
    group.bench_function("tight_crew_5x25", |b| {
        b.iter(|| solve(black_box(&roster)).unwrap())
    });
    group.finish();
}

fn bench_exception_crew(c: &mut Criterion) {
    let roster = exception_crew_roster();
    let mut group = c.benchmark_group("roster");
    group.sample_size(10);
    group.bench_function("exception_crew_7x30", |b| {
        b.iter(|| solve(black_box(&roster)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_tight_crew, bench_exception_crew);
criterion_main!(benches);
