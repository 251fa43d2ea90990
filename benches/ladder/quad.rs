//! Benchmarks for the four-lane dispatcher over common block sizes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use vintage_ladder::dsp::LaneParams;
use vintage_ladder::quad::QuadLadder;
use vintage_ladder::rate::SampleRate;
use vintage_ladder::tuning::EqualTemperament;
use vintage_ladder::LANES;

use crate::ladder::MODELS;
use crate::BLOCK_SIZES;

pub fn bench_quad(c: &mut Criterion) {
    let mut group = c.benchmark_group("quad/process_block");
    let rate = SampleRate::new(96_000.0);

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp on every lane.
        let input: Vec<[f32; LANES]> = (0..size)
            .map(|i| [(i as f32 / size as f32) * 2.0 - 1.0; LANES])
            .collect();

        for (name, model) in MODELS {
            let mut quad = QuadLadder::new(model, rate);
            for lane in 0..LANES {
                quad.set_active(lane, true);
                quad.tune_lane(
                    lane,
                    LaneParams {
                        cutoff_pitch: -12.0,
                        resonance: 0.5,
                    },
                    &EqualTemperament,
                );
            }

            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    quad.process_block(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
