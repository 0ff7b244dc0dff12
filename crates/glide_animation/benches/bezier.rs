use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glide_animation::{
    AnimationCurve, CubicBezier, DurationBehavior, ScrollOffset, TimingFunction,
};

fn bench_solve(c: &mut Criterion) {
    let bezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);
    c.bench_function("bezier_solve_ease_in_out", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..=100 {
                sum += bezier.solve(black_box(i as f64 / 100.0));
            }
            sum
        })
    });

    let flat = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
    c.bench_function("bezier_solve_flat_ends", |b| {
        b.iter(|| flat.solve(black_box(0.0005)))
    });
}

fn bench_retarget(c: &mut Criterion) {
    c.bench_function("curve_wheel_burst", |b| {
        b.iter(|| {
            let mut curve = AnimationCurve::new(
                ScrollOffset::vertical(100.0),
                TimingFunction::ease_in_out(),
                DurationBehavior::InverseDelta,
            );
            curve.set_initial_value(ScrollOffset::ZERO, 0.0);
            for step in 1..=10 {
                let t = step as f64 * 0.016;
                curve.update_target(t, ScrollOffset::vertical(100.0 * (step + 1) as f64));
                black_box(curve.value(t + 0.008));
            }
            curve.duration()
        })
    });
}

criterion_group!(benches, bench_solve, bench_retarget);
criterion_main!(benches);
