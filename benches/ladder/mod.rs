//! Benchmarks for the scalar integrators and the lane dispatcher.

mod integrators;
mod quad;

pub use integrators::bench_integrators;
pub use quad::bench_quad;

use vintage_ladder::dsp::LadderModel;

pub const MODELS: [(&str, LadderModel); 4] = [
    ("rk", LadderModel::RungeKutta),
    ("huovilainen", LadderModel::Huovilainen),
    ("krajeski", LadderModel::Krajeski),
    ("improved", LadderModel::Improved),
];
