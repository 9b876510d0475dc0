//! Solver and digit algorithm benchmarks

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use digitlp_core::domain::digits::{count_smaller, find_distinct};
use digitlp_core::domain::problem::ProductMixProblem;
use digitlp_core::{analyze_student_id, brute_force_solve, brute_force_solve_parallel};
use rand::Rng;

fn ci_criterion() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5))
}

fn wide_problem(span: i64) -> ProductMixProblem {
    let mut problem = ProductMixProblem::default();
    problem.search.a = [0, span];
    problem.search.b = [0, span];
    problem
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver");

    let problem = ProductMixProblem::default();
    group.bench_function("default_sequential", |b| {
        b.iter(|| brute_force_solve(black_box(&problem)))
    });

    for span in [256i64, 1024] {
        let problem = wide_problem(span);
        group.bench_with_input(BenchmarkId::new("sequential", span), &problem, |b, p| {
            b.iter(|| brute_force_solve(black_box(p)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", span), &problem, |b, p| {
            b.iter(|| brute_force_solve_parallel(black_box(p)))
        });
    }

    group.finish();
}

fn bench_digits(c: &mut Criterion) {
    let mut group = c.benchmark_group("digits");

    group.bench_function("analyze_student_id", |b| {
        b.iter(|| analyze_student_id(black_box("s225187913")))
    });

    let mut rng = rand::thread_rng();
    let values: Vec<u8> = (0..10_000).map(|_| rng.gen_range(0..10)).collect();

    group.bench_function("count_smaller_10k", |b| {
        b.iter(|| count_smaller(black_box(&values)))
    });
    group.bench_function("find_distinct_10k", |b| {
        b.iter(|| find_distinct(black_box(&values)))
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = ci_criterion();
    targets = bench_solver, bench_digits
}
criterion_main!(benches);
