//! Huovilainen ladder model.
//!
//! Places a tanh nonlinearity inside each of the four one-pole sections,
//! following the transistor base-emitter behavior of the analog circuit,
//! and permits self-oscillation for resonance approaching 1. The integrator
//! runs two half-rate sub-steps per outer sample and applies a half-sample
//! delay at the last stage for phase compensation.
//!
//! References: Huovilainen (2004), Huovilainen (2010), DAFX - Zolzer (ed),
//! 2nd ed. First implemented by Victor Lazzarini for CSound5.

use std::f64::consts::TAU;

use crate::dsp::clamped_frequency;
use crate::rate::SampleRate;
use crate::tuning::Tuning;

pub const N_COEFF: usize = 6;
pub const N_STATE: usize = 13;

// Coefficient slots.
pub const CUTOFF: usize = 0;
pub const RES: usize = 1;
pub const THERMAL: usize = 2;
pub const TUNE: usize = 3;
pub const ACR: usize = 4;
pub const RES_QUAD: usize = 5;

// State layout: four stage outputs, three cached stage tanh values, six
// delay taps (the sixth is the phase-compensated output).
pub const STAGE: usize = 0;
pub const STAGE_TANH: usize = 4;
pub const DELAY: usize = 7;

/// Build one lane's coefficient vector.
///
/// Resonance is clamped to [0, 0.994]; the model is only stable below that
/// ceiling. The `tune` factor folds the frequency correction polynomial and
/// the thermal scale into a single per-stage gain.
pub fn coefficients(
    pitch: f32,
    resonance: f32,
    tuning: &dyn Tuning,
    rate: SampleRate,
    c: &mut [f32],
) {
    let cutoff = clamped_frequency(pitch, tuning, rate);
    let resonance = resonance.clamp(0.0, 0.994);

    let fc = f64::from(cutoff) * rate.inv();
    let f = fc * 0.5; // the integrator runs at twice this rate
    let fc2 = fc * fc;
    let fc3 = fc2 * fc;

    let fcr = 1.8730 * fc3 + 0.4955 * fc2 - 0.6490 * fc + 0.9988;
    let acr = -3.9364 * fc2 + 1.8409 * fc + 0.9968;
    let thermal = 0.000025;
    let tune = (1.0 - (-(TAU * f * fcr)).exp()) / thermal;

    c[CUTOFF] = cutoff;
    c[RES] = resonance;
    c[THERMAL] = thermal as f32;
    c[TUNE] = tune as f32;
    c[ACR] = acr as f32;
    c[RES_QUAD] = (4.0 * f64::from(resonance) * acr) as f32;
}

/// Advance the ladder by one sample: two half-rate sub-steps of the
/// four-stage tanh cascade. Returns the phase-compensated delay tap.
pub fn integrate(input: f64, c: &[f64], state: &mut [f64]) -> f64 {
    let res_quad = c[RES_QUAD];
    let thermal = c[THERMAL];
    let tune = c[TUNE];

    for _ in 0..2 {
        let driven = input - res_quad * state[DELAY + 5];
        state[STAGE] = state[DELAY] + tune * ((driven * thermal).tanh() - state[STAGE_TANH]);
        state[DELAY] = state[STAGE];

        for k in 1..4 {
            let stage_in = state[STAGE + k - 1];
            let lower = (stage_in * thermal).tanh();
            state[STAGE_TANH + k - 1] = lower;
            let upper = if k != 3 {
                state[STAGE_TANH + k]
            } else {
                (state[DELAY + k] * thermal).tanh()
            };
            state[STAGE + k] = state[DELAY + k] + tune * (lower - upper);
            state[DELAY + k] = state[STAGE + k];
        }

        // Half-sample delay for phase compensation at the last stage.
        state[DELAY + 5] = (state[STAGE + 3] + state[DELAY + 4]) * 0.5;
        state[DELAY + 4] = state[STAGE + 3];
    }

    state[DELAY + 5]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::EqualTemperament;

    #[test]
    fn resonance_clamps_at_ceiling() {
        let rate = SampleRate::new(96_000.0);
        let mut c = [0.0f32; N_COEFF];
        coefficients(0.0, 5.0, &EqualTemperament, rate, &mut c);
        assert_eq!(c[RES], 0.994);

        coefficients(0.0, -1.0, &EqualTemperament, rate, &mut c);
        assert_eq!(c[RES], 0.0);
    }

    #[test]
    fn builder_matches_documented_polynomials() {
        let rate = SampleRate::new(96_000.0);
        let mut c = [0.0f32; N_COEFF];
        coefficients(0.0, 0.5, &EqualTemperament, rate, &mut c);

        let fc = f64::from(c[CUTOFF]) * rate.inv();
        let acr = -3.9364 * fc * fc + 1.8409 * fc + 0.9968;
        assert!((f64::from(c[ACR]) - acr).abs() < 1e-6);
        assert!((f64::from(c[THERMAL]) - 0.000025).abs() < 1e-12);
        assert!((f64::from(c[RES_QUAD]) - 4.0 * 0.5 * acr).abs() < 1e-5);
    }

    #[test]
    fn zero_input_zero_state_stays_silent() {
        let rate = SampleRate::new(96_000.0);
        let mut c = [0.0f32; N_COEFF];
        coefficients(-12.0, 0.0, &EqualTemperament, rate, &mut c);
        let c: Vec<f64> = c.iter().map(|&v| f64::from(v)).collect();

        let mut state = [0.0f64; N_STATE];
        for _ in 0..1000 {
            let out = integrate(0.0, &c, &mut state);
            assert_eq!(out, 0.0);
        }
    }

    /// A unit impulse at the resonance ceiling must stay bounded: the clamp
    /// exists precisely to keep the model on the stable side.
    #[test]
    fn impulse_at_resonance_ceiling_stays_bounded() {
        let rate = SampleRate::new(96_000.0);
        let mut c = [0.0f32; N_COEFF];
        coefficients(0.0, 0.994, &EqualTemperament, rate, &mut c);
        let c: Vec<f64> = c.iter().map(|&v| f64::from(v)).collect();

        let mut state = [0.0f64; N_STATE];
        let mut peak = 0.0f64;
        for n in 0..10_000 {
            let input = if n == 0 { 1.0 } else { 0.0 };
            let out = integrate(input, &c, &mut state);
            assert!(out.is_finite(), "output went non-finite at sample {}", n);
            peak = peak.max(out.abs());
        }
        assert!(peak < 10.0, "impulse response grew unbounded: peak {}", peak);
    }
}
