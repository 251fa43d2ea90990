#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{huovilainen, improved, krajeski, rk};
use crate::rate::SampleRate;
use crate::tuning::Tuning;

/// Which ladder emulation a voice group runs.
///
/// A model is a fixed pairing of coefficient count, state count, coefficient
/// builder and scalar integrator. Coefficient and state vectors are not
/// interchangeable across models; switching models means rebuilding both.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LadderModel {
    RungeKutta,
    Huovilainen,
    Krajeski,
    Improved,
}

/// Control-rate parameters for one voice lane.
///
/// `cutoff_pitch` is semitone-relative with 0.0 on A4 before tuning.
/// `resonance` is nominally 0-10; whether out-of-range values are clamped
/// is model-specific (only Huovilainen clamps), so callers must not assume
/// uniform behavior across models.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct LaneParams {
    pub cutoff_pitch: f32,
    pub resonance: f32,
}

impl LadderModel {
    /// Number of coefficient slots the model's builder writes.
    pub fn coefficient_count(self) -> usize {
        match self {
            LadderModel::RungeKutta => rk::N_COEFF,
            LadderModel::Huovilainen => huovilainen::N_COEFF,
            LadderModel::Krajeski => krajeski::N_COEFF,
            LadderModel::Improved => improved::N_COEFF,
        }
    }

    /// Number of state slots the model's integrator evolves.
    pub fn state_count(self) -> usize {
        match self {
            LadderModel::RungeKutta => rk::N_STATE,
            LadderModel::Huovilainen => huovilainen::N_STATE,
            LadderModel::Krajeski => krajeski::N_STATE,
            LadderModel::Improved => improved::N_STATE,
        }
    }

    /// Build one lane's coefficient vector at control rate.
    ///
    /// Writes the first `coefficient_count()` slots of `coeffs`. Never
    /// fails; out-of-range resonance handling is model-specific.
    pub fn coefficients(
        self,
        pitch: f32,
        resonance: f32,
        tuning: &dyn Tuning,
        rate: SampleRate,
        coeffs: &mut [f32],
    ) {
        match self {
            LadderModel::RungeKutta => rk::coefficients(pitch, resonance, tuning, rate, coeffs),
            LadderModel::Huovilainen => {
                huovilainen::coefficients(pitch, resonance, tuning, rate, coeffs)
            }
            LadderModel::Krajeski => {
                krajeski::coefficients(pitch, resonance, tuning, rate, coeffs)
            }
            LadderModel::Improved => {
                improved::coefficients(pitch, resonance, tuning, rate, coeffs)
            }
        }
    }

    /// Advance one lane by one sample.
    ///
    /// `coeffs` and `state` must use this model's layout; `step` is the
    /// reciprocal internal rate (Huovilainen and Krajeski bake it into
    /// their coefficients and ignore it). Total over finite inputs: bad
    /// coefficients yield unstable output, never a panic on the numeric
    /// path.
    pub fn integrate(self, input: f64, coeffs: &[f64], state: &mut [f64], step: f64) -> f64 {
        match self {
            LadderModel::RungeKutta => rk::integrate(input, coeffs, state, step),
            LadderModel::Huovilainen => huovilainen::integrate(input, coeffs, state),
            LadderModel::Krajeski => krajeski::integrate(input, coeffs, state),
            LadderModel::Improved => improved::integrate(input, coeffs, state, step),
        }
    }
}
