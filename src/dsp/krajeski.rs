//! Krajeski ladder model.
//!
//! Tim Stilson's MoogVCF with 'compromise' poles at z = -0.3, plus
//! Krajeski's corrections: quartic fits for the cutoff and resonance gains,
//! audio-rate parameter updates, and a smoothly saturating tanh at the
//! input that clamps the output and supplies the nonlinearity.
//!
//! Source algorithm placed in the public domain by Aaron Krajeski.

use std::f64::consts::TAU;

use crate::dsp::clamped_frequency;
use crate::rate::SampleRate;
use crate::tuning::Tuning;

pub const N_COEFF: usize = 7;
pub const N_STATE: usize = 10;

// Coefficient slots.
pub const CUTOFF: usize = 0;
pub const RESO: usize = 1;
pub const WC: usize = 2;
pub const G: usize = 3;
pub const G_RES: usize = 4;
pub const G_COMP: usize = 5;
pub const DRIVE: usize = 6;

// State layout: five chain values (input stage plus four poles), five
// delay taps.
pub const STAGE: usize = 0;
pub const DELAY: usize = 5;

/// Build one lane's coefficient vector.
///
/// Resonance is scaled by 1.3 and not clamped. `g` and `gres` are quartic
/// and cubic fits to the compromise-pole response; drive and gain
/// compensation are tunable hooks left at unity.
pub fn coefficients(
    pitch: f32,
    resonance: f32,
    tuning: &dyn Tuning,
    rate: SampleRate,
    c: &mut [f32],
) {
    let cutoff = clamped_frequency(pitch, tuning, rate);
    let resonance = f64::from(resonance) * 1.3;
    let wc = TAU * f64::from(cutoff) * rate.inv();
    let wc2 = wc * wc;
    let wc3 = wc2 * wc;
    let wc4 = wc3 * wc;

    c[CUTOFF] = cutoff;
    c[RESO] = resonance as f32;
    c[WC] = wc as f32;
    c[G] = (0.9892 * wc - 0.4342 * wc2 + 0.1381 * wc3 - 0.0202 * wc4) as f32;
    c[G_RES] = (resonance * (1.0029 + 0.0526 * wc - 0.926 * wc2 + 0.0218 * wc3)) as f32;
    c[G_COMP] = 1.0;
    c[DRIVE] = 1.0;
}

/// Advance the one-pole chain by one sample. Returns the fourth pole.
pub fn integrate(input: f64, c: &[f64], state: &mut [f64]) -> f64 {
    let drive = c[DRIVE];
    let g_res = c[G_RES];
    let g_comp = c[G_COMP];
    let g = c[G];

    state[STAGE] = (drive * (input - 4.0 * g_res * (state[STAGE + 4] - g_comp * input))).tanh();

    for i in 0..4 {
        state[STAGE + i + 1] +=
            g * (0.3 / 1.3 * state[STAGE + i] + 1.0 / 1.3 * state[DELAY + i] - state[STAGE + i + 1]);
        state[DELAY + i] = state[STAGE + i];
    }

    state[STAGE + 4]
}
