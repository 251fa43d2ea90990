//! Runge-Kutta ladder model.
//!
//! Imitates the resonant ladder by 4th-order Runge-Kutta integration of a
//! differential equation approximating the circuit dynamics:
//!
//! ```text
//!   y1' = k * (S(x - r*y4) - S(y1))
//!   y2' = k * (S(y1) - S(y2))
//!   y3' = k * (S(y2) - S(y3))
//!   y4' = k * (S(y3) - S(y4))
//! ```
//!
//! where k tracks the cutoff, r is the feedback amount and S is a cubic
//! soft-clip saturation. See Stilson, "Analyzing the Moog VCF with
//! Considerations for Digital Implementation", and Huovilainen (2004) for
//! background on the underlying circuit equations.

use std::f32::consts::TAU;

use crate::dsp::clamped_frequency;
use crate::rate::SampleRate;
use crate::tuning::Tuning;

pub const N_COEFF: usize = 4;
pub const N_STATE: usize = 4;

// Coefficient slots.
pub const CUTOFF: usize = 0;
pub const RESO: usize = 1;
pub const SAT: usize = 2;
pub const SAT_INV: usize = 3;

/// Build one lane's coefficient vector.
///
/// Resonance is nominally 0-10 and deliberately unclamped: values above 6
/// only push the filter further into self-oscillation.
pub fn coefficients(
    pitch: f32,
    resonance: f32,
    tuning: &dyn Tuning,
    rate: SampleRate,
    c: &mut [f32],
) {
    let cutoff = clamped_frequency(pitch, tuning, rate);
    c[CUTOFF] = cutoff * TAU;
    c[RESO] = resonance * 6.0;
    c[SAT] = 3.0;
    c[SAT_INV] = 1.0 / 3.0;
}

/// Cubic soft clip: `sat * (v' - v'^3 / 3)` with `v' = clamp(v / sat, -1, 1)`.
#[inline]
fn clip(v: f64, sat: f64, sat_inv: f64) -> f64 {
    let v2 = (v * sat_inv).clamp(-1.0, 1.0);
    sat * (v2 - (1.0 / 3.0) * v2 * v2 * v2)
}

fn derivatives(
    input: f64,
    d: &mut [f64; N_STATE],
    s: &[f64; N_STATE],
    cutoff: f64,
    reso: f64,
    sat: f64,
    sat_inv: f64,
) {
    let sat0 = clip(s[0], sat, sat_inv);
    let sat1 = clip(s[1], sat, sat_inv);
    let sat2 = clip(s[2], sat, sat_inv);

    d[0] = cutoff * (clip(input - reso * s[3], sat, sat_inv) - sat0);
    d[1] = cutoff * (sat0 - sat1);
    d[2] = cutoff * (sat1 - sat2);
    d[3] = cutoff * (sat2 - clip(s[3], sat, sat_inv));
}

/// Advance the ladder by one sample of `step` seconds.
///
/// Standard RK4: four derivative evaluations combined with weights
/// (1, 2, 2, 1) / 6. Returns the fourth stage, the lowpass output.
pub fn integrate(input: f64, c: &[f64], state: &mut [f64], step: f64) -> f64 {
    let cutoff = c[CUTOFF];
    let reso = c[RESO];
    let sat = c[SAT];
    let sat_inv = c[SAT_INV];

    let y = [state[0], state[1], state[2], state[3]];
    let mut d1 = [0.0; N_STATE];
    let mut d2 = [0.0; N_STATE];
    let mut d3 = [0.0; N_STATE];
    let mut d4 = [0.0; N_STATE];
    let mut mid = [0.0; N_STATE];

    derivatives(input, &mut d1, &y, cutoff, reso, sat, sat_inv);

    for i in 0..N_STATE {
        mid[i] = y[i] + 0.5 * step * d1[i];
    }
    derivatives(input, &mut d2, &mid, cutoff, reso, sat, sat_inv);

    for i in 0..N_STATE {
        mid[i] = y[i] + 0.5 * step * d2[i];
    }
    derivatives(input, &mut d3, &mid, cutoff, reso, sat, sat_inv);

    for i in 0..N_STATE {
        mid[i] = y[i] + step * d3[i];
    }
    derivatives(input, &mut d4, &mid, cutoff, reso, sat, sat_inv);

    for i in 0..N_STATE {
        state[i] = y[i] + (1.0 / 6.0) * step * (d1[i] + 2.0 * d2[i] + 2.0 * d3[i] + d4[i]);
    }

    state[N_STATE - 1]
}
