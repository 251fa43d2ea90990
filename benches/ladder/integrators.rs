//! Benchmarks for single scalar integrator steps.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use vintage_ladder::rate::SampleRate;
use vintage_ladder::tuning::EqualTemperament;
use vintage_ladder::MAX_COEFFS;

use crate::ladder::MODELS;

pub fn bench_integrators(c: &mut Criterion) {
    let mut group = c.benchmark_group("ladder/integrate");
    let rate = SampleRate::new(96_000.0);

    for (name, model) in MODELS {
        let mut lane_coeffs = [0.0f32; MAX_COEFFS];
        model.coefficients(0.0, 0.5, &EqualTemperament, rate, &mut lane_coeffs);
        let coeffs: Vec<f64> = lane_coeffs[..model.coefficient_count()]
            .iter()
            .map(|&v| f64::from(v))
            .collect();
        let mut state = vec![0.0f64; model.state_count()];

        group.bench_function(BenchmarkId::new("step", name), |b| {
            b.iter(|| {
                model.integrate(
                    black_box(0.5),
                    black_box(&coeffs),
                    black_box(&mut state),
                    rate.inv(),
                )
            })
        });
    }

    group.finish();
}
