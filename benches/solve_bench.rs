use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use symb_solve::{Equation, Expr, Solver, System, solve, solve_system, symb};

// ==============================================================================
// Single-equation strategies
// ==============================================================================

fn bench_closed_forms(c: &mut Criterion) {
    let mut group = c.benchmark_group("closed_forms");
    let x = symb("x");

    let quadratic = x.clone().pow_of(2.0) - 5.0 * &x + 6.0;
    let cubic = (x.clone() - 1.0) * (x.clone() - 2.0) * (x.clone() - 3.0);
    let exponential = 2.0 * (3.0 * &x).exp() - 5.0;
    let inverse = x.clone() + Expr::number(1.0) / &x - 2.5;

    group.bench_function("quadratic", |b| {
        b.iter(|| solve(black_box(quadratic.clone()), black_box(&x)))
    });

    group.bench_function("cubic_cardano", |b| {
        b.iter(|| solve(black_box(cubic.clone()), black_box(&x)))
    });

    group.bench_function("exponential", |b| {
        b.iter(|| solve(black_box(exponential.clone()), black_box(&x)))
    });

    group.bench_function("inverse", |b| {
        b.iter(|| solve(black_box(inverse.clone()), black_box(&x)))
    });

    group.finish();
}

// Newton iterations with different precision targets
fn bench_numeric_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric_fallback");
    let x = symb("x");
    let quintic = x.clone().pow_of(5.0) + &x - 3.0;
    let fixed_point = Equation::new(x.clone().cos(), x.clone());

    group.bench_function("quintic_default", |b| {
        b.iter(|| solve(black_box(quintic.clone()), black_box(&x)))
    });

    let precise = Solver::new().precision(1e-12);
    group.bench_function("cos_fixed_point_1e-12", |b| {
        b.iter(|| precise.solve(black_box(fixed_point.clone()), black_box(&x)))
    });

    group.finish();
}

// ==============================================================================
// Systems
// ==============================================================================

fn bench_systems(c: &mut Criterion) {
    let mut group = c.benchmark_group("systems");
    let (x, y, z) = (symb("x"), symb("y"), symb("z"));

    let linear: System = vec![
        Equation::new(&x + &y + &z, 6.0),
        Equation::new(&x - &y, -1.0),
        Equation::new(2.0 * &x + &z, 5.0),
    ]
    .into();
    let unknowns = [x.clone(), y.clone(), z.clone()];

    let circle_line: System = vec![
        Equation::new(x.clone().pow_of(2.0) + y.clone().pow_of(2.0), 25.0),
        Equation::new(&x - &y, 1.0),
    ]
    .into();
    let plane = [x.clone(), y.clone()];

    group.bench_function("linear_3x3", |b| {
        b.iter(|| solve_system(black_box(&linear), black_box(&unknowns)))
    });

    group.bench_function("circle_line", |b| {
        b.iter(|| solve_system(black_box(&circle_line), black_box(&plane)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_closed_forms,
    bench_numeric_fallback,
    bench_systems
);

criterion_main!(benches);
